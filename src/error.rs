//! Error types for layout validation, audio analysis and frame output.

use thiserror::Error;

/// Invalid configuration, detected before the first frame runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("matrix width must be greater than zero")]
    ZeroWidth,

    #[error("pixel count must be greater than zero")]
    ZeroPixelCount,

    #[error("width {width} does not evenly divide pixel count {pixel_count}")]
    UnevenLayout { width: usize, pixel_count: usize },

    #[error("invalid FFT config: {0}")]
    InvalidFft(String),

    #[error("frame rate must be greater than zero")]
    NonPositiveFps,
}

/// Failure while turning a WAV file into per-frame band energies.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read WAV: {0}")]
    Wav(#[from] hound::Error),

    #[error("WAV file contains no samples")]
    NoSamples,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure while writing rendered frames.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode frame: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame buffer does not match its {width}x{height} dimensions")]
    BufferSize { width: u32, height: u32 },

    #[error("{width}x{height} frame at cell size {cell_size} is too large")]
    ImageTooLarge {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
