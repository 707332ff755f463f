//! PCBC-style chaining over the IDEA block cipher.
//!
//! Streams are processed as 8-byte blocks, the final partial block padded
//! with zeros; the padded length is not recorded anywhere, so exact-length
//! round trips need framing outside this crate. Two feedback buffers (both
//! zero at the start of a stream) are XORed into each block: before the
//! transform when encrypting, after it when decrypting.
//!
//! The feedback values the two directions store are asymmetric: the
//! encryptor keeps the masked plaintext while the decryptor keeps the raw
//! ciphertext. The two sequences only coincide for the first block, so
//! decryption is guaranteed to reproduce the plaintext for the first two
//! blocks of a stream and may diverge afterwards. This crate reproduces
//! that behavior rather than correcting it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::io::{self, Read, Write};

use idea_core::{
    expand_key, invert_schedule, transform_block, xor_in_place, Block, IdeaKey, SubKeys,
};
use thiserror::Error;

/// Bytes per cipher block.
pub const BLOCK_BYTES: usize = 8;

/// Whether a stream is being enciphered or deciphered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// Errors surfaced by the stream driver.
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink rejected a block. The operation is aborted and any
    /// partial output must not be treated as valid.
    #[error("failed to write output block")]
    Write(#[source] io::Error),
}

/// Chaining encryptor owning the feedback state for one stream.
#[derive(Clone, Debug)]
pub struct Encryptor {
    keys: SubKeys,
    prev_masked: Block,
    prev_cipher: Block,
}

impl Encryptor {
    /// Creates an encryptor with zeroed feedback buffers (zero IV).
    pub fn new(key: &IdeaKey) -> Self {
        Self {
            keys: expand_key(key),
            prev_masked: [0u8; BLOCK_BYTES],
            prev_cipher: [0u8; BLOCK_BYTES],
        }
    }

    /// Encrypts one block and advances the feedback state.
    pub fn process_block(&mut self, plaintext: &Block) -> Block {
        let mut masked = *plaintext;
        xor_in_place(&mut masked, &self.prev_masked);
        xor_in_place(&mut masked, &self.prev_cipher);
        let ciphertext = transform_block(&masked, &self.keys);
        self.prev_masked = masked;
        self.prev_cipher = ciphertext;
        ciphertext
    }
}

/// Chaining decryptor owning the feedback state for one stream.
#[derive(Clone, Debug)]
pub struct Decryptor {
    keys: SubKeys,
    prev_cipher: Block,
    prev_plain: Block,
}

impl Decryptor {
    /// Creates a decryptor with zeroed feedback buffers; the decryption
    /// schedule is derived internally.
    pub fn new(key: &IdeaKey) -> Self {
        Self {
            keys: invert_schedule(&expand_key(key)),
            prev_cipher: [0u8; BLOCK_BYTES],
            prev_plain: [0u8; BLOCK_BYTES],
        }
    }

    /// Decrypts one block and advances the feedback state.
    pub fn process_block(&mut self, ciphertext: &Block) -> Block {
        let mut plaintext = transform_block(ciphertext, &self.keys);
        xor_in_place(&mut plaintext, &self.prev_cipher);
        xor_in_place(&mut plaintext, &self.prev_plain);
        self.prev_cipher = *ciphertext;
        self.prev_plain = plaintext;
        plaintext
    }
}

/// Runs a whole stream through the chaining engine.
///
/// The input is chunked into 8-byte blocks, zero-padding the final partial
/// block. Stream exhaustion is the only termination signal: a source that
/// stops yielding bytes (including one that fails to read) ends the
/// operation normally, while a sink that rejects a block aborts it with
/// [`Error::Write`]. Zero-length input produces zero-length output.
pub fn process<R: Read, W: Write>(
    key: &IdeaKey,
    direction: Direction,
    reader: R,
    writer: W,
) -> Result<(), Error> {
    match direction {
        Direction::Encrypt => {
            let mut engine = Encryptor::new(key);
            drive(reader, writer, move |block| engine.process_block(block))
        }
        Direction::Decrypt => {
            let mut engine = Decryptor::new(key);
            drive(reader, writer, move |block| engine.process_block(block))
        }
    }
}

/// Encrypts a buffer, returning the ciphertext padded to a block multiple.
pub fn encrypt(key: &IdeaKey, plaintext: &[u8]) -> Vec<u8> {
    let mut engine = Encryptor::new(key);
    chain_buffer(plaintext, move |block| engine.process_block(block))
}

/// Decrypts a buffer of ciphertext blocks.
///
/// The result length is the input length rounded up to a block multiple;
/// any zero padding added during encryption is still present.
pub fn decrypt(key: &IdeaKey, ciphertext: &[u8]) -> Vec<u8> {
    let mut engine = Decryptor::new(key);
    chain_buffer(ciphertext, move |block| engine.process_block(block))
}

fn chain_buffer<F>(input: &[u8], mut step: F) -> Vec<u8>
where
    F: FnMut(&Block) -> Block,
{
    let mut output = Vec::with_capacity(input.len() + BLOCK_BYTES);
    for chunk in input.chunks(BLOCK_BYTES) {
        let mut block = [0u8; BLOCK_BYTES];
        block[..chunk.len()].copy_from_slice(chunk);
        output.extend_from_slice(&step(&block));
    }
    output
}

fn drive<R, W, F>(mut reader: R, mut writer: W, mut step: F) -> Result<(), Error>
where
    R: Read,
    W: Write,
    F: FnMut(&Block) -> Block,
{
    let mut block = [0u8; BLOCK_BYTES];
    loop {
        if read_padded_block(&mut reader, &mut block) == 0 {
            return Ok(());
        }
        writer.write_all(&step(&block)).map_err(Error::Write)?;
    }
}

/// Fills `block` from the reader, zero-padding the tail. Returns the number
/// of bytes actually read; a source that fails to read counts as exhausted.
fn read_padded_block<R: Read>(reader: &mut R, block: &mut Block) -> usize {
    let mut filled = 0;
    while filled < BLOCK_BYTES {
        match reader.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    block[filled..].fill(0);
    filled
}
