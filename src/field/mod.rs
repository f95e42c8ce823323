//! Cached noise field: one sample per addressable pixel plus its height range.

use glam::DVec2;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::noise::{NoiseContext, NoiseKind};

/// Pixel grid shape. `height = pixel_count / width`, and the division must be exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    width: usize,
    height: usize,
}

impl MatrixLayout {
    pub fn new(width: usize, pixel_count: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if pixel_count == 0 {
            return Err(ConfigError::ZeroPixelCount);
        }
        if pixel_count % width != 0 {
            return Err(ConfigError::UnevenLayout { width, pixel_count });
        }
        Ok(Self {
            width,
            height: pixel_count / width,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Normalized host coordinates of pixel `index`, each axis in `[0, 1)`.
    pub fn coords_of(&self, index: usize) -> (f64, f64) {
        let x = (index % self.width) as f64 / self.width as f64;
        let y = (index / self.width) as f64 / self.height as f64;
        (x, y)
    }

    /// Grid cell under normalized coordinates, clamped into the grid.
    pub fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        (cell_index(x, self.width), cell_index(y, self.height))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

// The epsilon keeps `k / n * n` from flooring to `k - 1` on inexact widths
fn cell_index(coord: f64, extent: usize) -> usize {
    let scaled = (coord * extent as f64 + 1e-9).floor();
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else {
        (scaled as usize).min(extent - 1)
    }
}

/// Flat `width * height` buffer of noise samples with running min/max.
///
/// Only [`FieldCache::recompute`] mutates it, and always in one full pass.
#[derive(Debug, Clone)]
pub struct FieldCache {
    layout: MatrixLayout,
    samples: Vec<f64>,
    min_height: f64,
    max_height: f64,
    /// Number of completed recomputes; zero means nothing valid to read yet
    generation: u64,
}

impl FieldCache {
    pub fn new(layout: MatrixLayout) -> Self {
        Self {
            layout,
            samples: vec![0.0; layout.pixel_count()],
            min_height: 0.0,
            max_height: 0.0,
            generation: 0,
        }
    }

    pub fn layout(&self) -> MatrixLayout {
        self.layout
    }

    /// Resample every cell at `((x / width - offset.x) * scale, (y / height - offset.y) * scale)`.
    pub fn recompute(&mut self, ctx: &NoiseContext, kind: NoiseKind, scale: f64, offset: DVec2) {
        let width = self.layout.width as f64;
        let height = self.layout.height as f64;
        let mut min_height = f64::INFINITY;
        let mut max_height = f64::NEG_INFINITY;

        for y in 0..self.layout.height {
            for x in 0..self.layout.width {
                let z = ctx.sample(
                    kind,
                    (x as f64 / width - offset.x) * scale,
                    (y as f64 / height - offset.y) * scale,
                );
                self.samples[self.layout.index(x, y)] = z;
                min_height = min_height.min(z);
                max_height = max_height.max(z);
            }
        }

        self.min_height = min_height;
        self.max_height = max_height;
        self.generation += 1;

        debug!(
            %kind,
            scale,
            offset_x = offset.x,
            offset_y = offset.y,
            min_height,
            max_height,
            generation = self.generation,
            "recomputed noise field"
        );
        if self.is_degenerate() {
            warn!(min_height, max_height, "flat noise field, normalizing every sample to 0");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.generation > 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// True when the last pass produced no usable height range.
    pub fn is_degenerate(&self) -> bool {
        let range = self.max_height - self.min_height;
        !(range > 0.0 && range.is_finite())
    }

    /// Raw sample at a grid cell, `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.layout.width || y >= self.layout.height {
            return None;
        }
        self.samples.get(self.layout.index(x, y)).copied()
    }

    /// Raw sample under normalized coordinates.
    pub fn sample_at(&self, x: f64, y: f64) -> f64 {
        let (cx, cy) = self.layout.cell_of(x, y);
        self.samples[self.layout.index(cx, cy)]
    }

    /// Map a height into `[0, 1]` against the current range; 0 for a flat field.
    pub fn normalize(&self, z: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (z - self.min_height) / (self.max_height - self.min_height)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golden_field(kind: NoiseKind) -> FieldCache {
        let ctx = NoiseContext::new(30);
        let mut field = FieldCache::new(MatrixLayout::new(16, 256).unwrap());
        field.recompute(&ctx, kind, 2.0, DVec2::ZERO);
        field
    }

    #[test]
    fn test_layout_rejects_bad_shapes() {
        assert_eq!(MatrixLayout::new(0, 256), Err(ConfigError::ZeroWidth));
        assert_eq!(MatrixLayout::new(16, 0), Err(ConfigError::ZeroPixelCount));
        assert_eq!(
            MatrixLayout::new(16, 250),
            Err(ConfigError::UnevenLayout {
                width: 16,
                pixel_count: 250
            })
        );
        let layout = MatrixLayout::new(8, 24).unwrap();
        assert_eq!((layout.width(), layout.height()), (8, 3));
    }

    #[test]
    fn test_coords_round_trip_to_cells() {
        for width in [1, 3, 10, 16, 30] {
            let layout = MatrixLayout::new(width, width * 7).unwrap();
            for index in 0..layout.pixel_count() {
                let (x, y) = layout.coords_of(index);
                assert_eq!(layout.cell_of(x, y), (index % width, index / width));
            }
        }
    }

    #[test]
    fn test_cell_of_clamps() {
        let layout = MatrixLayout::new(4, 16).unwrap();
        assert_eq!(layout.cell_of(-0.3, 1.7), (0, 3));
        assert_eq!(layout.cell_of(f64::NAN, 0.999), (0, 3));
    }

    #[test]
    fn test_not_ready_before_first_recompute() {
        let field = FieldCache::new(MatrixLayout::new(4, 16).unwrap());
        assert!(!field.is_ready());
        assert_eq!(field.normalize(0.3), 0.0);
    }

    #[test]
    fn test_golden_cells() {
        let simplex = golden_field(NoiseKind::Simplex);
        assert_eq!(simplex.get(0, 0), Some(0.5));
        assert!((simplex.get(5, 3).unwrap() - 0.197_430_272_941_278_02).abs() < 1e-9);
        assert!((simplex.get(15, 15).unwrap() - 0.281_104_827_643_089_3).abs() < 1e-9);
        assert!((simplex.min_height() - 0.050_018_490_288_572_25).abs() < 1e-9);
        assert!((simplex.max_height() - 0.940_792_596_901_305_6).abs() < 1e-9);

        let perlin = golden_field(NoiseKind::Perlin);
        assert_eq!(perlin.get(0, 0), Some(0.5));
        assert!((perlin.get(5, 3).unwrap() - 0.592_202_185_187_488_8).abs() < 1e-9);
        assert!((perlin.get(10, 7).unwrap() - 0.326_147_273_182_868_96).abs() < 1e-9);
        assert!((perlin.min_height() - 0.012_039_184_570_312_5).abs() < 1e-9);
        assert!((perlin.max_height() - 0.933_486_938_476_562_5).abs() < 1e-9);
    }

    #[test]
    fn test_offset_shifts_sample_window() {
        let ctx = NoiseContext::new(30);
        let mut field = FieldCache::new(MatrixLayout::new(16, 256).unwrap());
        field.recompute(&ctx, NoiseKind::Perlin, 2.0, DVec2::new(0.25, -0.5));
        assert!((field.get(5, 3).unwrap() - 0.454_841_834_027_320_15).abs() < 1e-9);
        field.recompute(&ctx, NoiseKind::Simplex, 2.0, DVec2::new(0.25, -0.5));
        assert!((field.get(5, 3).unwrap() - 0.182_722_079_614_976_72).abs() < 1e-9);
        assert_eq!(field.generation(), 2);
    }

    #[test]
    fn test_bounds_are_true_extremes() {
        for kind in [NoiseKind::Perlin, NoiseKind::Simplex, NoiseKind::OpenSimplex] {
            let field = golden_field(kind);
            let min = field.samples().iter().copied().fold(f64::INFINITY, f64::min);
            let max = field.samples().iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(field.min_height(), min);
            assert_eq!(field.max_height(), max);
            assert!(field
                .samples()
                .iter()
                .all(|z| (field.min_height()..=field.max_height()).contains(z)));
        }
    }

    #[test]
    fn test_normalize_endpoints() {
        let field = golden_field(NoiseKind::Simplex);
        assert_eq!(field.normalize(field.min_height()), 0.0);
        assert_eq!(field.normalize(field.max_height()), 1.0);
        for z in field.samples() {
            assert!((0.0..=1.0).contains(&field.normalize(*z)));
        }
    }

    #[test]
    fn test_flat_field_normalizes_to_zero() {
        let ctx = NoiseContext::new(30);
        let mut field = FieldCache::new(MatrixLayout::new(4, 16).unwrap());
        // Zero scale collapses every cell onto the same sample point
        field.recompute(&ctx, NoiseKind::Perlin, 0.0, DVec2::new(0.3, 0.7));
        assert!(field.is_degenerate());
        assert_eq!(field.normalize(field.min_height()), 0.0);
        assert_eq!(field.normalize(field.max_height()), 0.0);
    }

    #[test]
    fn test_sample_at_reads_cell_under_coords() {
        let field = golden_field(NoiseKind::Perlin);
        let layout = field.layout();
        for index in 0..layout.pixel_count() {
            let (x, y) = layout.coords_of(index);
            assert_eq!(Some(field.sample_at(x, y)), field.get(index % 16, index / 16));
        }
    }
}
