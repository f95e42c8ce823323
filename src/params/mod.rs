//! Parameter definitions with units and documented semantics.
//!
//! Grouped by what they drive:
//! - Field sampling: seed, kernel, scale, offsets, panning
//! - Banding: stripe counts, palette, sweep speed
//! - Host side: FFT analysis and frame recording

mod audio;
mod render;
mod slider;

// Re-export all types
pub use audio::{ExcitationConfig, FFTConfig};
pub use render::{ColorMode, FixedPalette, RecordingConfig, RenderConfig};
pub use slider::{ParseSliderError, Slider};
