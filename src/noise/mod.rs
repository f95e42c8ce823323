//! Deterministic, seedable 2D gradient noise.
//!
//! - [`perlin2`] - four-corner gradient noise on a square lattice
//! - [`simplex2`] - three-corner noise on a skewed triangular lattice
//!
//! Both read the tables held by a [`NoiseContext`] and return values
//! normalized to roughly `[0, 1]`.

mod gradient;
mod perlin;
mod permutation;
mod simplex;

use std::fmt;

use ::noise::{NoiseFn, OpenSimplex};
use glam::DVec3;
use tracing::info;

pub use gradient::{dot2, GRADIENTS};
pub use perlin::{fade, lerp, perlin2};
pub use permutation::{
    GradientIndexTable, PermutationTable, Seed, SeedBytes, BASE_PERMUTATION, TABLE_SIZE,
};
pub use simplex::{simplex2, F2, G2};

/// Which kernel fills the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    /// Square-lattice gradient noise
    Perlin,
    /// Triangular-lattice gradient noise
    #[default]
    Simplex,
    /// The `noise` crate's OpenSimplex, kept for side-by-side comparison renders
    OpenSimplex,
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Perlin => "perlin",
            Self::Simplex => "simplex",
            Self::OpenSimplex => "open-simplex",
        };
        f.write_str(name)
    }
}

/// Owned permutation and gradient tables for one seed.
///
/// Built explicitly at startup and again on every seed change; immutable in
/// between, so any number of readers can sample it.
#[derive(Clone)]
pub struct NoiseContext {
    seed: Seed,
    permutation: PermutationTable,
    gradients: GradientIndexTable,
    open_simplex: OpenSimplex,
}

impl NoiseContext {
    pub fn new(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        let permutation = PermutationTable::from_seed(seed);
        let gradients = GradientIndexTable::from_permutation(&permutation);
        let bytes = seed.bytes();
        info!(
            seed = seed.value(),
            low = bytes.low,
            high = bytes.high,
            "built noise tables"
        );

        Self {
            seed,
            permutation,
            gradients,
            open_simplex: OpenSimplex::new(seed.folded()),
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.permutation
    }

    pub fn gradients(&self) -> &GradientIndexTable {
        &self.gradients
    }

    #[inline]
    pub fn perlin2(&self, x: f64, y: f64) -> f64 {
        perlin2(self, x, y)
    }

    #[inline]
    pub fn simplex2(&self, x: f64, y: f64) -> f64 {
        simplex2(self, x, y)
    }

    /// Sample the chosen kernel, normalized to roughly `[0, 1]`.
    pub fn sample(&self, kind: NoiseKind, x: f64, y: f64) -> f64 {
        match kind {
            NoiseKind::Perlin => perlin2(self, x, y),
            NoiseKind::Simplex => simplex2(self, x, y),
            NoiseKind::OpenSimplex => (self.open_simplex.get([x, y]) + 1.0) / 2.0,
        }
    }

    #[inline]
    pub(crate) fn perm(&self, index: usize) -> usize {
        self.permutation.get(index)
    }

    #[inline]
    pub(crate) fn gradient(&self, slot: usize) -> DVec3 {
        self.gradients.gradient(slot)
    }

    /// Gradient at `slot` dotted with the corner offset `(x, y)`.
    #[inline]
    pub(crate) fn corner(&self, slot: usize, x: f64, y: f64) -> f64 {
        dot2(self.gradient(slot), x, y)
    }
}

impl fmt::Debug for NoiseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseContext")
            .field("seed", &self.seed)
            .field("bytes", &self.seed.bytes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_tables_match_free_builders() {
        let ctx = NoiseContext::new(30);
        let table = PermutationTable::from_seed(Seed::new(30.0));
        assert_eq!(ctx.permutation(), &table);
        assert_eq!(ctx.gradients(), &GradientIndexTable::from_permutation(&table));
    }

    #[test]
    fn test_sample_dispatches_to_kernels() {
        let ctx = NoiseContext::new(30);
        let (x, y) = (1.25, 0.875);
        assert_eq!(ctx.sample(NoiseKind::Perlin, x, y), ctx.perlin2(x, y));
        assert_eq!(ctx.sample(NoiseKind::Simplex, x, y), ctx.simplex2(x, y));
    }

    #[test]
    fn test_open_simplex_is_normalized() {
        let ctx = NoiseContext::new(30);
        for i in 0..200 {
            let v = ctx.sample(NoiseKind::OpenSimplex, f64::from(i) * 0.173, f64::from(i) * -0.31);
            assert!((-0.25..=1.25).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_different_seeds_give_different_fields() {
        let a = NoiseContext::new(30);
        let b = NoiseContext::new(1234);
        let differs = (0..64).any(|i| {
            let x = f64::from(i) * 0.41 + 0.13;
            let y = f64::from(i) * 0.17 + 0.29;
            a.simplex2(x, y) != b.simplex2(x, y)
        });
        assert!(differs);
    }
}
