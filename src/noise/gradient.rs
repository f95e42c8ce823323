//! Fixed gradient set shared by the Perlin and simplex kernels.

use glam::DVec3;

/// The twelve edge midpoints of a cube: every combination of `(±1, ±1, 0)`,
/// `(±1, 0, ±1)` and `(0, ±1, ±1)`. The 2D kernels only read `x` and `y`.
pub const GRADIENTS: [DVec3; 12] = [
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(-1.0, 1.0, 0.0),
    DVec3::new(1.0, -1.0, 0.0),
    DVec3::new(-1.0, -1.0, 0.0),
    DVec3::new(1.0, 0.0, 1.0),
    DVec3::new(-1.0, 0.0, 1.0),
    DVec3::new(1.0, 0.0, -1.0),
    DVec3::new(-1.0, 0.0, -1.0),
    DVec3::new(0.0, 1.0, 1.0),
    DVec3::new(0.0, -1.0, 1.0),
    DVec3::new(0.0, 1.0, -1.0),
    DVec3::new(0.0, -1.0, -1.0),
];

/// Dot product of a gradient's xy part with an offset vector.
#[inline]
pub fn dot2(gradient: DVec3, x: f64, y: f64) -> f64 {
    gradient.x * x + gradient.y * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradients_have_two_unit_components() {
        for g in GRADIENTS {
            let nonzero = g.to_array().iter().filter(|c| **c != 0.0).count();
            assert_eq!(nonzero, 2, "{g:?}");
            assert!((g.length_squared() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gradients_are_distinct() {
        for (i, a) in GRADIENTS.iter().enumerate() {
            for b in &GRADIENTS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_dot2_ignores_z() {
        assert_eq!(dot2(DVec3::new(1.0, -1.0, 0.0), 0.25, 0.5), -0.25);
        assert_eq!(dot2(DVec3::new(0.0, 1.0, -1.0), 3.0, 2.0), 2.0);
    }
}
