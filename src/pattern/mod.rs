//! Per-frame and per-pixel pattern hooks.
//!
//! The host calls [`NoisePattern::before_frame`] once per frame, then
//! [`NoisePattern::render_pixel`] for every pixel. All mutation happens in
//! `before_frame`; rendering only reads the cached field.

mod clock;
mod sweep;

// Re-export all types
pub use clock::{FrameClock, PhaseClock};
pub use sweep::{pan_offset, SweepPhase, PAN_PERIOD_SECS};

use glam::DVec2;
use tracing::{debug, info};

use crate::contour::{ContourRenderer, Hsv};
use crate::error::ConfigError;
use crate::field::{FieldCache, MatrixLayout};
use crate::noise::NoiseContext;
use crate::params::{ExcitationConfig, RenderConfig};
use crate::rendering::PixelSink;

/// Whether the cached field reflects the current configuration.
///
/// Recomputation runs synchronously inside [`NoisePattern::before_frame`], so
/// a frame never sees a half-written field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Idle,
    Dirty,
}

/// Contour-banded noise pattern for one LED matrix.
#[derive(Debug)]
pub struct NoisePattern {
    layout: MatrixLayout,
    noise: NoiseContext,
    field: FieldCache,
    sweep: SweepPhase,
    pan: DVec2,
}

impl NoisePattern {
    pub fn new(layout: MatrixLayout, config: &RenderConfig, excitation: ExcitationConfig) -> Self {
        info!(
            width = layout.width(),
            height = layout.height(),
            kernel = %config.kernel(),
            "creating noise pattern"
        );
        Self {
            layout,
            noise: NoiseContext::new(config.seed()),
            field: FieldCache::new(layout),
            sweep: SweepPhase::new(excitation),
            pan: DVec2::ZERO,
        }
    }

    /// Validate the matrix shape, then build the pattern.
    pub fn with_pixel_count(
        width: usize,
        pixel_count: usize,
        config: &RenderConfig,
    ) -> Result<Self, ConfigError> {
        let layout = MatrixLayout::new(width, pixel_count)?;
        Ok(Self::new(layout, config, ExcitationConfig::default()))
    }

    /// Advance phases and bring the field up to date with `config`.
    ///
    /// `bands` holds this frame's audio band energies, if any.
    pub fn before_frame(
        &mut self,
        config: &mut RenderConfig,
        clock: &impl PhaseClock,
        delta_ms: f64,
        bands: Option<&[f32]>,
    ) {
        self.sweep.advance(clock, config, delta_ms, bands);

        if config.take_reseed() {
            debug!(seed = config.seed().value(), "reseeding noise tables");
            self.noise = NoiseContext::new(config.seed());
        }

        // Panning moves the sample origin every frame
        let dirty = config.take_recompute() || !self.field.is_ready();
        if dirty || config.is_panning() {
            self.pan = pan_offset(clock, config);
            self.field.recompute(
                &self.noise,
                config.kernel(),
                config.scale(),
                self.pan + config.offset(),
            );
        }
    }

    /// Shade the pixel at normalized `(x, y)` and hand it to `sink`.
    ///
    /// Before the first frame has been prepared every pixel is black.
    pub fn render_pixel(&self, config: &RenderConfig, x: f64, y: f64, sink: &mut impl PixelSink) {
        let color = if self.field.is_ready() {
            let n = self.field.normalize(self.field.sample_at(x, y));
            ContourRenderer::new(config, self.sweep.t1()).render(self.layout, n, x, y)
        } else {
            Hsv::BLACK
        };
        sink.set_pixel_color(color.h, color.s, color.v);
    }

    pub fn field_state(&self, config: &RenderConfig) -> FieldState {
        if !self.field.is_ready() || config.needs_recompute() || config.needs_reseed() {
            FieldState::Dirty
        } else {
            FieldState::Idle
        }
    }

    pub fn layout(&self) -> MatrixLayout {
        self.layout
    }

    pub fn field(&self) -> &FieldCache {
        &self.field
    }

    pub fn noise(&self) -> &NoiseContext {
        &self.noise
    }

    pub fn sweep(&self) -> &SweepPhase {
        &self.sweep
    }

    /// Pan offset applied at the last recompute.
    pub fn pan(&self) -> DVec2 {
        self.pan
    }
}
