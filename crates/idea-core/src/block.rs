//! Block representation helpers.

/// IDEA block of 8 bytes.
pub type Block = [u8; 8];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Splits a block into four big-endian 16-bit words.
#[inline]
pub(crate) fn to_words(block: &Block) -> [u16; 4] {
    [
        u16::from_be_bytes([block[0], block[1]]),
        u16::from_be_bytes([block[2], block[3]]),
        u16::from_be_bytes([block[4], block[5]]),
        u16::from_be_bytes([block[6], block[7]]),
    ]
}

/// Packs four 16-bit words back into big-endian bytes.
#[inline]
pub(crate) fn from_words(words: [u16; 4]) -> Block {
    let mut block = [0u8; 8];
    for (chunk, word) in block.chunks_exact_mut(2).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    block
}
