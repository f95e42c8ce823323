//! Contour-stripe shading of a normalized height field.
//!
//! Stripes sweep along lines of equal height as the sweep phase advances.
//! Each stripe period is split into `sub_stripes` slots and all but one are
//! blanked, which thins filled bands down to separated contour lines.

use crate::field::MatrixLayout;
use crate::params::{ColorMode, FixedPalette, RenderConfig};

/// A color in hue/saturation/value, each channel nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const BLACK: Hsv = Hsv::new(0.0, 0.0, 0.0);

    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Hue wrapped into `[0, 1)`, saturation and value clamped to `[0, 1]`.
    pub fn wrapped(self) -> Self {
        let h = self.h.rem_euclid(1.0);
        Self {
            // rem_euclid can round up to exactly 1.0 for tiny negative hues
            h: if h < 1.0 { h } else { 0.0 },
            s: clamp_unit(self.s),
            v: clamp_unit(self.v),
        }
    }
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Sawtooth to triangle: 0 at integers, 1 at half-integers.
pub fn triangle(v: f64) -> f64 {
    let v = v.rem_euclid(1.0);
    if v < 0.5 {
        2.0 * v
    } else {
        2.0 - 2.0 * v
    }
}

/// Sawtooth to square wave: 1 for the first `duty` of each period, else 0.
pub fn square(v: f64, duty: f64) -> f64 {
    if v.rem_euclid(1.0) < duty {
        1.0
    } else {
        0.0
    }
}

/// Contour shader over a snapshot of the banding parameters and a sweep phase.
///
/// Building one only copies a few fields, so callers may build it per pixel
/// from the live configuration.
#[derive(Debug, Clone)]
pub struct ContourRenderer {
    stripes: f64,
    sub_stripes: f64,
    color_mode: ColorMode,
    color_offset: f64,
    palette: FixedPalette,
    show_progress_bar: bool,
    t1: f64,
}

impl ContourRenderer {
    pub fn new(config: &RenderConfig, t1: f64) -> Self {
        Self {
            stripes: f64::from(config.effective_stripes().max(1)),
            sub_stripes: f64::from(config.sub_stripes().max(1)),
            color_mode: config.color_mode(),
            color_offset: config.color_offset(),
            palette: config.palette(),
            show_progress_bar: config.show_progress_bar(),
            t1,
        }
    }

    pub fn phase(&self) -> f64 {
        self.t1
    }

    /// Hue for normalized height `n`. Not wrapped.
    pub fn hue(&self, n: f64) -> f64 {
        let phase = n - self.t1;
        match self.color_mode {
            ColorMode::Auto => {
                ((self.stripes * phase).floor() / self.stripes).rem_euclid(1.0) - self.color_offset
            }
            ColorMode::Fixed => {
                let [c1, c2, c3] = self.palette.stops;
                c1 + (c2 - c1) * square(phase - 1.0 / 3.0, 2.0 / 3.0)
                    + (c3 - c2) * square(phase - 2.0 / 3.0, 1.0 / 3.0)
            }
        }
    }

    /// Brightness before squaring: a triangle per slot, zero outside the kept slot.
    pub fn value(&self, n: f64) -> f64 {
        let slots = self.sub_stripes * self.stripes;
        let v = triangle((n - self.t1) * slots);
        let slot = ((1.0 + n - self.t1) * slots).floor() as i64;
        if slot.rem_euclid(self.sub_stripes as i64) == 0 {
            v
        } else {
            0.0
        }
    }

    /// Full color for normalized height `n`.
    pub fn shade(&self, n: f64) -> Hsv {
        let v = self.value(n);
        Hsv::new(self.hue(n), 1.0, v * v)
    }

    /// White progress marker for the sweep phase, drawn on the last row only.
    pub fn progress_bar(&self, layout: MatrixLayout, x: f64, y: f64) -> Option<Hsv> {
        if !self.show_progress_bar {
            return None;
        }
        let height = layout.height() as f64;
        let last_row = y >= (height - 1.0) / height;
        let distance = (self.t1 - x).abs() * layout.width() as f64;
        if last_row && distance < 2.0 {
            Some(Hsv::new(0.0, 0.0, 1.0 - distance.clamp(0.0, 1.0)))
        } else {
            None
        }
    }

    /// Shade a pixel, with the progress bar drawn over it when enabled.
    pub fn render(&self, layout: MatrixLayout, n: f64, x: f64, y: f64) -> Hsv {
        self.progress_bar(layout, x, y)
            .unwrap_or_else(|| self.shade(n))
            .wrapped()
    }
}
