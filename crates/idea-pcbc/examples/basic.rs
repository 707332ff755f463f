//! Demonstrates a two-block encrypt/decrypt round trip with a fixed key.

use idea_core::IdeaKey;
use idea_pcbc::{decrypt, encrypt};

fn main() {
    let key = IdeaKey::from(*b"0123456789ABCDEF");
    let plaintext = *b"ABCDEFGHabcdefgh";

    let ciphertext = encrypt(&key, &plaintext);
    let recovered = decrypt(&key, &ciphertext);

    assert_eq!(recovered, plaintext);
    println!("example succeeded; two-block round trip matches");
}
