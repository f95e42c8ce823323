//! 2D simplex noise on a skewed triangular lattice.

use super::NoiseContext;

const SQRT_3: f64 = 1.732_050_807_568_877_2;
/// Skewing factor: `(sqrt(3) - 1) / 2`
pub const F2: f64 = (SQRT_3 - 1.0) / 2.0;
/// Unskewing factor: `(3 - sqrt(3)) / 6`
pub const G2: f64 = (3.0 - SQRT_3) / 6.0;

/// Contribution of one simplex corner at offset `(x, y)`.
#[inline]
fn corner(ctx: &NoiseContext, slot: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * ctx.corner(slot, x, y)
    }
}

/// Sample 2D simplex noise.
///
/// The signed sum is scaled by 70 then mapped with `(v + 1) / 2`, giving
/// roughly `[0, 1]` with the same small overshoot tolerance as [`perlin2`].
///
/// [`perlin2`]: super::perlin2
pub fn simplex2(ctx: &NoiseContext, xin: f64, yin: f64) -> f64 {
    let s = (xin + yin) * F2;
    let i = (xin + s).floor();
    let j = (yin + s).floor();
    let t = (i + j) * G2;
    // Distances from the cell origin, unskewed
    let x0 = xin - i + t;
    let y0 = yin - j + t;

    // Lower triangle walks (0,0)->(1,0)->(1,1), upper walks (0,0)->(0,1)->(1,1)
    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - f64::from(i1) + G2;
    let y1 = y0 - f64::from(j1) + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = (i as i64 & 0xFF) as usize;
    let jj = (j as i64 & 0xFF) as usize;
    let i1 = i1 as usize;
    let j1 = j1 as usize;

    let n0 = corner(ctx, ii + ctx.perm(jj), x0, y0);
    let n1 = corner(ctx, ii + i1 + ctx.perm(jj + j1), x1, y1);
    let n2 = corner(ctx, ii + 1 + ctx.perm(jj + 1), x2, y2);

    (70.0 * (n0 + n1 + n2) + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Seed;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ctx() -> NoiseContext {
        NoiseContext::new(Seed::new(30.0))
    }

    #[test]
    fn test_skew_factors() {
        assert!((F2 - 0.366_025_403_784_438_6).abs() < 1e-15);
        assert!((G2 - 0.211_324_865_405_187_1).abs() < 1e-15);
    }

    #[test]
    fn test_origin_is_half() {
        // Corner 0 has a zero offset; the other two lie outside the 0.5 radius
        assert_eq!(simplex2(&ctx(), 0.0, 0.0), 0.5);
    }

    #[test]
    fn test_golden_samples() {
        let ctx = ctx();
        assert!((simplex2(&ctx, 0.625, 0.375) - 0.197_430_272_941_278_02).abs() < 1e-9);
        assert!((simplex2(&ctx, 1.25, 0.875) - 0.392_377_704_707_718_5).abs() < 1e-9);
        assert!((simplex2(&ctx, 1.875, 1.875) - 0.281_104_827_643_089_3).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let a = ctx();
        let b = ctx();
        for i in 0..50 {
            let x = f64::from(i) * 2.11 - 40.0;
            let y = f64::from(i) * 0.91 - 3.0;
            assert_eq!(simplex2(&a, x, y).to_bits(), simplex2(&b, x, y).to_bits());
        }
    }

    #[test]
    fn test_range_with_bounded_overshoot() {
        let ctx = ctx();
        let mut rng = StdRng::seed_from_u64(3);
        let mut outside = 0;
        for _ in 0..10_000 {
            let v = simplex2(&ctx, rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            assert!((-0.5..=1.5).contains(&v), "wild sample {v}");
            if !(0.0..=1.0).contains(&v) {
                outside += 1;
            }
        }
        assert!(outside <= 500, "{outside} samples outside [0, 1]");
    }

    #[test]
    fn test_continuous() {
        let ctx = ctx();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10_000 {
            let x = rng.gen_range(-50.0..50.0);
            let y = rng.gen_range(-50.0..50.0);
            let step = (simplex2(&ctx, x + 1e-3, y) - simplex2(&ctx, x, y)).abs();
            assert!(step < 0.01, "jump of {step} at ({x}, {y})");
        }
    }

    #[test]
    fn test_spatial_variation() {
        let ctx = ctx();
        let values: Vec<f64> = (0..20)
            .map(|i| simplex2(&ctx, f64::from(i) * 0.37, f64::from(i) * 0.21))
            .collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01, "simplex should vary across space");
    }
}
