//! IDEA key schedule, schedule inversion, and the shared block transform.

use crate::block::{from_words, to_words, Block};
use crate::key::{IdeaKey, SubKeys};
use crate::modular::{add_inverse, mul, mul_inverse};

/// Number of full rounds before the output transform.
const ROUNDS: usize = 8;

/// Expands a 128-bit key into the 52 encryption subkeys.
///
/// Words 0..8 are the big-endian 16-bit slices of the key. Every later word
/// is assembled from two earlier words so that each group of eight new words
/// realizes a 25-bit left rotation of the 128-bit key register: the high 7
/// bits come from one source shifted left by 9, the low 9 bits from another
/// shifted right by 7.
pub fn expand_key(key: &IdeaKey) -> SubKeys {
    let mut words = [0u16; 52];
    for (word, chunk) in words.iter_mut().zip(key.0.chunks_exact(2)) {
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }

    for i in 8..52 {
        // Source indices lag by 7 and 14, stepping back a full group
        // whenever the raw offset would cross a group boundary.
        let upper = words[if (i + 1) % 8 == 0 { i - 15 } else { i - 7 }];
        let lower = words[if (i + 2) % 8 < 2 { i - 14 } else { i - 6 }];
        words[i] = (upper << 9) | (lower >> 7);
    }

    SubKeys(words)
}

/// Derives the decryption schedule from an encryption schedule.
///
/// Rows are taken from the source in reverse order: the outer subkeys get
/// multiplicative inverses, the middle pair gets additive inverses (swapped
/// except in the first and last rows), and the two MA-box subkeys of each
/// round carry over unchanged from the matching round. Running
/// [`transform_block`] with the result undoes a transform made with the
/// source schedule.
pub fn invert_schedule(keys: &SubKeys) -> SubKeys {
    let mut out = [0u16; 52];
    for row in 0..9 {
        // The middle pair keeps its order in the first and last rows.
        let swap = usize::from(row % 8 != 0);
        let src = (8 - row) * 6;
        out[row * 6] = mul_inverse(keys.0[src]);
        out[row * 6 + 1] = add_inverse(keys.0[src + 1 + swap]);
        out[row * 6 + 2] = add_inverse(keys.0[src + 2 - swap]);
        out[row * 6 + 3] = mul_inverse(keys.0[src + 3]);
        if row != 8 {
            out[row * 6 + 4] = keys.0[(7 - row) * 6 + 4];
            out[row * 6 + 5] = keys.0[(7 - row) * 6 + 5];
        }
    }
    SubKeys(out)
}

/// Applies the 8.5-round IDEA transform to a single block.
///
/// The same permutation serves encryption and decryption; pass the schedule
/// from [`expand_key`] to encrypt and the one from [`invert_schedule`] to
/// decrypt.
pub fn transform_block(block: &Block, keys: &SubKeys) -> Block {
    let [mut x0, mut x1, mut x2, mut x3] = to_words(block);

    for round in 0..ROUNDS {
        let k = keys.round(round);
        let a = mul(x0, k[0]);
        let b = x1.wrapping_add(k[1]);
        let c = x2.wrapping_add(k[2]);
        let d = mul(x3, k[3]);
        let g = mul(a ^ c, k[4]);
        let j = mul((b ^ d).wrapping_add(g), k[5]);
        let m = g.wrapping_add(j);
        // The two middle words leave each round interchanged.
        x0 = a ^ j;
        x1 = c ^ j;
        x2 = b ^ m;
        x3 = d ^ m;
    }

    // Output transform; using x2 before x1 undoes the final interchange.
    let k = keys.output();
    from_words([
        mul(x0, k[0]),
        x2.wrapping_add(k[1]),
        x1.wrapping_add(k[2]),
        mul(x3, k[3]),
    ])
}
