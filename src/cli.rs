//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::ConfigError;
use crate::field::MatrixLayout;
use crate::noise::NoiseKind;
use crate::params::{ColorMode, RecordingConfig, RenderConfig, Slider};

/// Noise kernel selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelArg {
    Perlin,
    Simplex,
    OpenSimplex,
}

impl From<KernelArg> for NoiseKind {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Perlin => NoiseKind::Perlin,
            KernelArg::Simplex => NoiseKind::Simplex,
            KernelArg::OpenSimplex => NoiseKind::OpenSimplex,
        }
    }
}

/// Palette selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Fixed,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Fixed => ColorMode::Fixed,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "contourwave")]
#[command(about = "Renders animated noise contour patterns for LED matrices", long_about = None)]
pub struct Args {
    /// Matrix width in pixels
    #[arg(long, default_value_t = 16)]
    pub width: usize,

    /// Total pixel count (must be a multiple of width)
    #[arg(long, default_value_t = 256)]
    pub pixels: usize,

    /// Permutation seed; values in (0, 1) are scaled by 32768
    #[arg(long, default_value_t = 30.0)]
    pub seed: f64,

    /// Noise kernel
    #[arg(long, value_enum, default_value_t = KernelArg::Simplex)]
    pub kernel: KernelArg,

    /// Noise-space units across the matrix
    #[arg(long, default_value_t = 2.0)]
    pub scale: f64,

    /// Horizontal field offset (matrix widths)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_offset: f64,

    /// Vertical field offset (matrix heights)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub y_offset: f64,

    /// Circular pan speed (0 keeps the field still)
    #[arg(long, default_value_t = 0.0)]
    pub pan: f64,

    /// Contour stripes across the height range
    #[arg(long, default_value_t = 3)]
    pub stripes: u32,

    /// Slots per stripe; all but one are blanked
    #[arg(long, default_value_t = 1)]
    pub sub_stripes: u32,

    /// Palette mode
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    pub color_mode: ColorArg,

    /// Hue rotation for the auto palette
    #[arg(long, default_value_t = 0.4)]
    pub color_offset: f64,

    /// Stripe sweep speed (0 freezes the sweep)
    #[arg(long, default_value_t = 1.0)]
    pub sweep_speed: f64,

    /// Draw the sweep progress bar on the last row
    #[arg(long)]
    pub progress_bar: bool,

    /// Summed bass energy that triggers a sweep burst (0 disables)
    #[arg(long, default_value_t = 0.0)]
    pub bass_threshold: f64,

    /// Slider position applied after the other options, e.g. `scale=0.5`
    #[arg(long = "slider", value_name = "NAME=VALUE", value_parser = parse_slider)]
    pub sliders: Vec<(Slider, f64)>,

    /// WAV file driving bass excitation
    #[arg(long, value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Duration to record (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 10.0)]
    pub duration: f32,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Output directory; frames land in `<output>/frames`
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output: PathBuf,

    /// Side length of one LED in the written frames (pixels)
    #[arg(long, default_value_t = 16)]
    pub cell_size: u32,
}

fn parse_slider(s: &str) -> Result<(Slider, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let slider = name.parse::<Slider>().map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for {slider}: {e}"))?;
    Ok((slider, value))
}

impl Args {
    /// Matrix layout, validated
    pub fn layout(&self) -> Result<MatrixLayout, ConfigError> {
        MatrixLayout::new(self.width, self.pixels)
    }

    /// Pattern configuration with sliders applied in the order given
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        config.set_kernel(self.kernel.into());
        config.set_seed(self.seed);
        config.set_scale(self.scale);
        config.set_offset(self.x_offset, self.y_offset);
        config.set_pan_speed(self.pan);
        config.set_stripes(self.stripes);
        config.set_sub_stripes(self.sub_stripes);
        config.set_color_mode(self.color_mode.into());
        config.set_color_offset(self.color_offset);
        config.set_sweep_speed(self.sweep_speed);
        config.set_show_progress_bar(self.progress_bar);
        config.set_bass_threshold(self.bass_threshold);

        for &(slider, value) in &self.sliders {
            config.apply_slider(slider, value);
        }
        config
    }

    pub fn recording_config(&self) -> RecordingConfig {
        let mut recording = RecordingConfig::new(self.duration, &self.output);
        recording.fps = self.fps;
        recording.cell_size = self.cell_size;
        recording
    }
}
