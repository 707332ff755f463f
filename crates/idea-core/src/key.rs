//! Key types for IDEA.

/// IDEA 128-bit key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdeaKey(pub [u8; 16]);

impl From<[u8; 16]> for IdeaKey {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

/// Expanded schedule of 52 round subkeys.
///
/// Rounds 0..8 consume six words each; the output transform reuses the final
/// four. The decryption schedule produced by `invert_schedule` has the same
/// shape, so the block transform is parameterized only by which schedule it
/// is handed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubKeys(pub [u16; 52]);

impl SubKeys {
    /// Returns the six subkeys consumed by the requested round (0..=7).
    #[inline]
    pub fn round(&self, round: usize) -> &[u16] {
        &self.0[round * 6..round * 6 + 6]
    }

    /// Returns the four subkeys of the final output transform.
    #[inline]
    pub fn output(&self) -> &[u16] {
        &self.0[48..]
    }
}
