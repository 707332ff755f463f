//! Reference IDEA (International Data Encryption Algorithm) implementation.
//!
//! This crate provides:
//! - Arithmetic modulo 2^16 + 1 used by the round function.
//! - Key schedule expansion and decryption-schedule derivation.
//! - The single-block transform shared by encryption and decryption.
//!
//! The implementation aims for clarity and testability rather than
//! constant-time guarantees; it should not be treated as side-channel
//! hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod modular;

pub use crate::block::{xor_in_place, Block};
pub use crate::cipher::{expand_key, invert_schedule, transform_block};
pub use crate::key::{IdeaKey, SubKeys};
