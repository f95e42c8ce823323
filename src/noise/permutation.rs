//! Seeded permutation and gradient-index tables.
//!
//! A seed collapses to two bytes that are XORed into a fixed shuffled base
//! table, alternating bytes between odd and even slots. The 256 results are
//! stored twice so lookups of the form `perm[i + perm[j]]` never need to wrap.

use glam::DVec3;

use super::gradient::GRADIENTS;

/// Number of distinct lattice hashes.
pub const TABLE_SIZE: usize = 256;

/// Shuffled base permutation of `0..=255`.
#[rustfmt::skip]
pub const BASE_PERMUTATION: [u8; TABLE_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Seeds in the open interval (0, 1) are treated as normalized and scaled by this.
const NORMALIZED_SEED_SCALE: f64 = 32768.0;

/// Noise seed.
///
/// Accepts any numeric input. Fractional seeds in (0, 1) are scaled out to the
/// 15-bit range first; anything else is floored. Huge, negative or NaN inputs
/// still fold deterministically to two bytes. Integer seeds are kept exact, so
/// values past 2^53 fold by masking their real low bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed(SeedValue);

#[derive(Debug, Clone, Copy, PartialEq)]
enum SeedValue {
    Integer(i64),
    Real(f64),
}

/// The two bytes a [`Seed`] contributes to the permutation XOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBytes {
    pub low: u8,
    pub high: u8,
}

impl Seed {
    pub const fn new(value: f64) -> Self {
        Self(SeedValue::Real(value))
    }

    /// Seed as a float; integers beyond 2^53 are rounded here but not when folding.
    pub fn value(self) -> f64 {
        match self.0 {
            SeedValue::Integer(v) => v as f64,
            SeedValue::Real(v) => v,
        }
    }

    /// Fold the seed into the bytes XORed into odd (`low`) and even (`high`) slots.
    pub fn bytes(self) -> SeedBytes {
        let mut bits = match self.0 {
            SeedValue::Integer(v) => v,
            SeedValue::Real(mut value) => {
                if value > 0.0 && value < 1.0 {
                    value *= NORMALIZED_SEED_SCALE;
                }
                // `as` saturates out-of-range floats and maps NaN to 0
                value.floor() as i64
            }
        };
        if bits < TABLE_SIZE as i64 {
            bits |= bits << 8;
        }

        SeedBytes {
            low: (bits & 0xFF) as u8,
            high: ((bits >> 8) & 0xFF) as u8,
        }
    }

    /// 16-bit integer form of the folded seed, used to key third-party generators.
    pub fn folded(self) -> u32 {
        let bytes = self.bytes();
        (u32::from(bytes.high) << 8) | u32::from(bytes.low)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self(SeedValue::Integer(value))
    }
}

impl From<i32> for Seed {
    fn from(value: i32) -> Self {
        Self(SeedValue::Integer(i64::from(value)))
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(SeedValue::Integer(i64::from(value)))
    }
}

/// 512-entry permutation, second half a copy of the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable([u8; TABLE_SIZE * 2]);

impl PermutationTable {
    /// Build the table for `seed`. Pure function of the seed.
    pub fn from_seed(seed: Seed) -> Self {
        let SeedBytes { low, high } = seed.bytes();
        let mut table = [0u8; TABLE_SIZE * 2];

        for (i, base) in BASE_PERMUTATION.iter().enumerate() {
            let mixed = if i & 1 == 1 { base ^ low } else { base ^ high };
            table[i] = mixed;
            table[i + TABLE_SIZE] = mixed;
        }

        Self(table)
    }

    #[inline]
    pub fn get(&self, index: usize) -> usize {
        usize::from(self.0[index])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Per-slot index into [`GRADIENTS`], co-built with a [`PermutationTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientIndexTable([u8; TABLE_SIZE * 2]);

impl GradientIndexTable {
    pub fn from_permutation(permutation: &PermutationTable) -> Self {
        let mut table = [0u8; TABLE_SIZE * 2];
        for (slot, value) in table.iter_mut().zip(permutation.as_slice()) {
            *slot = value % GRADIENTS.len() as u8;
        }
        Self(table)
    }

    /// Gradient vector referenced by slot `index`.
    #[inline]
    pub fn gradient(&self, index: usize) -> DVec3 {
        GRADIENTS[usize::from(self.0[index])]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}
