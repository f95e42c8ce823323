//! Pattern rendering parameters and recording configuration.

use std::path::{Path, PathBuf};

use glam::DVec2;
use tracing::warn;

use crate::error::ConfigError;
use crate::noise::{NoiseKind, Seed};

/// How stripe hues are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// One solid hue per sweeping stripe, rotated by the color offset
    #[default]
    Auto,
    /// Three user-defined hue stops, always three stripes
    Fixed,
}

/// Hue stops used in [`ColorMode::Fixed`]. Must be ascending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPalette {
    pub stops: [f64; 3],
}

impl Default for FixedPalette {
    fn default() -> Self {
        // "Fire": red through orange
        Self {
            stops: [0.0, 0.028, 0.07],
        }
    }
}

/// Pattern parameters, mutated by setters and read by the frame hooks.
///
/// Setters that change where the field is sampled (kernel, seed, scale,
/// offsets) mark it for recompute. Banding and palette setters don't.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Noise kernel filling the field
    kernel: NoiseKind,

    /// Noise seed, folds into the permutation tables
    seed: Seed,

    /// Noise-space units spanned by the whole matrix (larger = finer grained)
    scale: f64,

    /// User translation of the sampling window, in matrix widths
    x_offset: f64,
    y_offset: f64,

    /// Circular panning strength (0 = static field)
    pan_speed: f64,

    /// Stripes sweeping through the contours
    stripes: u32,

    /// Slots per stripe; all but one are blanked
    sub_stripes: u32,

    color_mode: ColorMode,

    /// Hue rotation subtracted in auto mode
    color_offset: f64,

    palette: FixedPalette,

    /// Stripe sweep speed multiplier (0 freezes the sweep)
    sweep_speed: f64,

    /// Overlay a white progress bar for the sweep phase on the last row
    show_progress_bar: bool,

    /// Summed bass energy that triggers a sweep burst (0 disables)
    bass_threshold: f64,

    needs_recompute: bool,
    needs_reseed: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            kernel: NoiseKind::Simplex,
            seed: Seed::default(),
            scale: 2.0,
            x_offset: 0.0,
            y_offset: 0.0,
            pan_speed: 0.0,
            stripes: 3,
            sub_stripes: 1,
            color_mode: ColorMode::Auto,
            color_offset: 0.4,
            palette: FixedPalette::default(),
            sweep_speed: 1.0,
            show_progress_bar: false,
            bass_threshold: 0.0,
            // The field starts empty
            needs_recompute: true,
            needs_reseed: false,
        }
    }
}

impl RenderConfig {
    pub fn kernel(&self) -> NoiseKind {
        self.kernel
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> DVec2 {
        DVec2::new(self.x_offset, self.y_offset)
    }

    pub fn pan_speed(&self) -> f64 {
        self.pan_speed
    }

    pub fn stripes(&self) -> u32 {
        self.stripes
    }

    pub fn sub_stripes(&self) -> u32 {
        self.sub_stripes
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn color_offset(&self) -> f64 {
        self.color_offset
    }

    pub fn palette(&self) -> FixedPalette {
        self.palette
    }

    pub fn sweep_speed(&self) -> f64 {
        self.sweep_speed
    }

    pub fn show_progress_bar(&self) -> bool {
        self.show_progress_bar
    }

    pub fn bass_threshold(&self) -> f64 {
        self.bass_threshold
    }

    /// Stripe count actually used for banding. Fixed palettes always use three.
    pub fn effective_stripes(&self) -> u32 {
        match self.color_mode {
            ColorMode::Auto => self.stripes,
            ColorMode::Fixed => 3,
        }
    }

    /// Radius of the circular pan trajectory, in matrix widths.
    pub fn pan_amplitude(&self) -> f64 {
        if self.scale == 0.0 {
            return 0.0;
        }
        self.pan_speed * 40.0 / self.scale / 2.0
    }

    /// Continuous panning resamples the field every frame.
    pub fn is_panning(&self) -> bool {
        self.pan_speed != 0.0
    }

    pub fn needs_recompute(&self) -> bool {
        self.needs_recompute
    }

    pub fn needs_reseed(&self) -> bool {
        self.needs_reseed
    }

    /// Consume the pending-recompute flag.
    pub fn take_recompute(&mut self) -> bool {
        std::mem::take(&mut self.needs_recompute)
    }

    /// Consume the pending-reseed flag.
    pub fn take_reseed(&mut self) -> bool {
        std::mem::take(&mut self.needs_reseed)
    }

    pub fn set_kernel(&mut self, kernel: NoiseKind) {
        if self.kernel != kernel {
            self.kernel = kernel;
            self.needs_recompute = true;
        }
    }

    /// Rebuilds the permutation tables and resamples the field.
    pub fn set_seed(&mut self, seed: impl Into<Seed>) {
        self.seed = seed.into();
        self.needs_reseed = true;
        self.needs_recompute = true;
    }

    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            warn!(scale, "ignoring non-finite scale");
            return;
        }
        self.scale = scale;
        self.needs_recompute = true;
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            warn!(x, y, "ignoring non-finite offset");
            return;
        }
        self.x_offset = x;
        self.y_offset = y;
        self.needs_recompute = true;
    }

    pub fn set_x_offset(&mut self, x: f64) {
        self.set_offset(x, self.y_offset);
    }

    pub fn set_y_offset(&mut self, y: f64) {
        self.set_offset(self.x_offset, y);
    }

    /// Nonzero speed switches the field to per-frame resampling. Stopping
    /// resamples once more so the pan offset drops out of the field.
    pub fn set_pan_speed(&mut self, speed: f64) {
        if !speed.is_finite() {
            warn!(speed, "ignoring non-finite pan speed");
            return;
        }
        if self.pan_speed != 0.0 && speed == 0.0 {
            self.needs_recompute = true;
        }
        self.pan_speed = speed;
    }

    /// Clamped to at least one stripe.
    pub fn set_stripes(&mut self, stripes: u32) {
        self.stripes = stripes.max(1);
    }

    /// Clamped to at least one slot.
    pub fn set_sub_stripes(&mut self, sub_stripes: u32) {
        self.sub_stripes = sub_stripes.max(1);
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    pub fn set_color_offset(&mut self, offset: f64) {
        self.color_offset = offset;
    }

    pub fn set_palette(&mut self, palette: FixedPalette) {
        self.palette = palette;
    }

    pub fn set_sweep_speed(&mut self, speed: f64) {
        self.sweep_speed = speed;
    }

    pub fn set_show_progress_bar(&mut self, show: bool) {
        self.show_progress_bar = show;
    }

    pub fn set_bass_threshold(&mut self, threshold: f64) {
        self.bass_threshold = threshold;
    }
}

/// Frame recording configuration for the headless host
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,

    /// Side length of one LED in the written PNG (pixels)
    pub cell_size: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            duration_secs,
            output_dir: output_dir.into(),
            fps: 30,
            cell_size: 16,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::NonPositiveFps);
        }
        Ok(())
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs.max(0.0) * self.fps as f32).ceil() as usize
    }

    /// Milliseconds between consecutive frames
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    pub fn frame_path(&self, frame: usize) -> PathBuf {
        frame_path_in(&self.frames_dir(), frame)
    }
}

fn frame_path_in(dir: &Path, frame: usize) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}
