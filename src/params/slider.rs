//! Normalized user sliders and how each maps onto [`RenderConfig`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::render::{ColorMode, RenderConfig};
use crate::noise::NoiseKind;

/// One user-facing control. Every slider takes a position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    /// Above 0.5 selects simplex, otherwise Perlin
    PerlinOrSimplex,
    /// `1 + 4v`
    Scale,
    /// Circular pan speed, `v`
    Motion,
    /// Above 0.5 selects the auto palette
    AutoColor,
    /// Auto palette hue rotation, `v`
    AutoColorPalette,
    /// `1 + floor(4v)` stripes
    NumberOfStripes,
    /// Sweep speed, `v`
    StripeSpeed,
    /// `5 - floor(4v)` slots per stripe: heavier weight means fewer blanked slots
    StripeWeight,
    /// `4 * v * scale`
    XOffset,
    /// `4 * v * scale`
    YOffset,
    /// Above 0.5 shows the progress bar
    ShowProgress,
    /// `0.03 * v`
    BassThreshold,
}

impl Slider {
    pub const ALL: [Slider; 12] = [
        Slider::PerlinOrSimplex,
        Slider::Scale,
        Slider::Motion,
        Slider::AutoColor,
        Slider::AutoColorPalette,
        Slider::NumberOfStripes,
        Slider::StripeSpeed,
        Slider::StripeWeight,
        Slider::XOffset,
        Slider::YOffset,
        Slider::ShowProgress,
        Slider::BassThreshold,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Slider::PerlinOrSimplex => "perlin-or-simplex",
            Slider::Scale => "scale",
            Slider::Motion => "motion",
            Slider::AutoColor => "auto-color",
            Slider::AutoColorPalette => "auto-color-palette",
            Slider::NumberOfStripes => "number-of-stripes",
            Slider::StripeSpeed => "stripe-speed",
            Slider::StripeWeight => "stripe-weight",
            Slider::XOffset => "x-offset",
            Slider::YOffset => "y-offset",
            Slider::ShowProgress => "show-progress",
            Slider::BassThreshold => "bass-threshold",
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown slider '{0}'")]
pub struct ParseSliderError(String);

impl FromStr for Slider {
    type Err = ParseSliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Slider::ALL
            .into_iter()
            .find(|slider| slider.name() == wanted)
            .ok_or_else(|| ParseSliderError(s.to_string()))
    }
}

impl RenderConfig {
    /// Move `slider` to position `v` (clamped to `[0, 1]`).
    pub fn apply_slider(&mut self, slider: Slider, v: f64) {
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        let steps = (v * 4.0).floor() as u32;

        match slider {
            Slider::PerlinOrSimplex => self.set_kernel(if v > 0.5 {
                NoiseKind::Simplex
            } else {
                NoiseKind::Perlin
            }),
            Slider::Scale => self.set_scale(1.0 + v * 4.0),
            Slider::Motion => self.set_pan_speed(v),
            Slider::AutoColor => self.set_color_mode(if v > 0.5 {
                ColorMode::Auto
            } else {
                ColorMode::Fixed
            }),
            Slider::AutoColorPalette => self.set_color_offset(v),
            Slider::NumberOfStripes => self.set_stripes(1 + steps),
            Slider::StripeSpeed => self.set_sweep_speed(v),
            Slider::StripeWeight => self.set_sub_stripes(5 - steps),
            Slider::XOffset => self.set_x_offset(v * self.scale() * 4.0),
            Slider::YOffset => self.set_y_offset(v * self.scale() * 4.0),
            Slider::ShowProgress => self.set_show_progress_bar(v > 0.5),
            Slider::BassThreshold => self.set_bass_threshold(v * 0.03),
        }
    }
}
