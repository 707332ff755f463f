//! End-to-end tests for the stream driver.

use std::io::{self, Cursor, Read, Write};

use idea_core::IdeaKey;
use idea_pcbc::{process, Direction, Error};

const KEY: [u8; 16] = *b"0123456789ABCDEF";

const MESSAGE: &[u8] = b"The quick brown fox jumps over the lazy dog";

/// Ciphertext of `MESSAGE` under `KEY`, recorded from the reference
/// behavior (43 input bytes, zero-padded to 48).
const MESSAGE_CIPHERTEXT: [u8; 48] = [
    0xA9, 0x1C, 0x73, 0x78, 0xD1, 0x73, 0x03, 0x29, 0xD4, 0x85, 0x89, 0x19, 0x40, 0x25, 0xF6,
    0xE3, 0x3E, 0xB2, 0x55, 0x50, 0x1B, 0x11, 0xB6, 0xF2, 0x54, 0x6B, 0xD4, 0xD8, 0xFA, 0x86,
    0xE4, 0xFE, 0x83, 0x25, 0x89, 0xBB, 0x44, 0xE3, 0xCC, 0xFF, 0xCD, 0x37, 0x6C, 0xE4, 0x45,
    0x10, 0x49, 0x76,
];

/// Sink that rejects every write.
struct ClosedSink;

impl Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Source that yields a prefix and then fails instead of reporting EOF.
struct BrokenSource {
    data: Cursor<Vec<u8>>,
}

impl Read for BrokenSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf) {
            Ok(0) => Err(io::Error::new(io::ErrorKind::ConnectionReset, "source gone")),
            other => other,
        }
    }
}

#[test]
fn encrypt_stream_matches_fixture() {
    let key = IdeaKey::from(KEY);
    let mut output = Vec::new();
    process(&key, Direction::Encrypt, Cursor::new(MESSAGE), &mut output)
        .expect("writing to a Vec cannot fail");
    assert_eq!(output, MESSAGE_CIPHERTEXT);
}

#[test]
fn decrypt_stream_recovers_first_two_blocks() {
    let key = IdeaKey::from(KEY);
    let mut output = Vec::new();
    process(
        &key,
        Direction::Decrypt,
        Cursor::new(MESSAGE_CIPHERTEXT.to_vec()),
        &mut output,
    )
    .expect("writing to a Vec cannot fail");
    assert_eq!(output.len(), MESSAGE_CIPHERTEXT.len());
    // Chained decryption is only guaranteed for the first two blocks.
    assert_eq!(output[..16], MESSAGE[..16]);
}

#[test]
fn partial_final_block_is_zero_padded() {
    let key = IdeaKey::from(KEY);
    let mut ciphertext = Vec::new();
    process(&key, Direction::Encrypt, Cursor::new(&b"hello"[..]), &mut ciphertext)
        .expect("writing to a Vec cannot fail");
    assert_eq!(ciphertext.len(), 8);

    let mut recovered = Vec::new();
    process(&key, Direction::Decrypt, Cursor::new(ciphertext), &mut recovered)
        .expect("writing to a Vec cannot fail");
    assert_eq!(recovered, b"hello\x00\x00\x00");
}

#[test]
fn empty_stream_produces_no_output() {
    let key = IdeaKey::from(KEY);
    let mut output = Vec::new();
    process(&key, Direction::Encrypt, Cursor::new(Vec::new()), &mut output)
        .expect("writing to a Vec cannot fail");
    assert!(output.is_empty());
}

#[test]
fn write_failure_aborts_the_operation() {
    let key = IdeaKey::from(KEY);
    let result = process(&key, Direction::Encrypt, Cursor::new(MESSAGE), ClosedSink);
    assert!(matches!(result, Err(Error::Write(_))));
}

#[test]
fn read_failure_counts_as_end_of_stream() {
    let key = IdeaKey::from(KEY);
    let source = BrokenSource {
        data: Cursor::new(MESSAGE[..16].to_vec()),
    };
    let mut output = Vec::new();
    process(&key, Direction::Encrypt, source, &mut output)
        .expect("a failing source ends the stream, it does not abort");
    assert_eq!(output, MESSAGE_CIPHERTEXT[..16]);
}
