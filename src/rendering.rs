//! Headless frame output.
//!
//! Pixels arrive as HSV through [`PixelSink`], are stored as packed RGB and
//! written out as one PNG per frame, each LED scaled up to a square cell.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use image::{imageops, RgbImage};
use tracing::{debug, info};

use crate::audio::SpectrumTrack;
use crate::error::RenderError;
use crate::field::MatrixLayout;
use crate::params::{RecordingConfig, RenderConfig};
use crate::pattern::{FrameClock, NoisePattern};

/// Receives the color of one pixel. Components are expected in `[0, 1]`.
pub trait PixelSink {
    fn set_pixel_color(&mut self, hue: f64, saturation: f64, value: f64);
}

/// One packed 8-bit RGB pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert HSV to RGB. Hue wraps; saturation and value are clamped.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        if !(h.is_finite() && s.is_finite() && v.is_finite()) {
            return Self::default();
        }

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        let quantize = |c: f64| (c * 255.0).round() as u8;
        Self::new(quantize(r), quantize(g), quantize(b))
    }
}

impl PixelSink for Rgb8 {
    fn set_pixel_color(&mut self, hue: f64, saturation: f64, value: f64) {
        *self = Rgb8::from_hsv(hue, saturation, value);
    }
}

/// Row-major RGB frame for one matrix.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    layout: MatrixLayout,
    pixels: Vec<Rgb8>,
}

impl FrameBuffer {
    pub fn new(layout: MatrixLayout) -> Self {
        Self {
            layout,
            pixels: vec![Rgb8::default(); layout.pixel_count()],
        }
    }

    /// Render every pixel of `pattern` in index order.
    pub fn render(&mut self, pattern: &NoisePattern, config: &RenderConfig) {
        for (index, pixel) in self.pixels.iter_mut().enumerate() {
            let (x, y) = self.layout.coords_of(index);
            pattern.render_pixel(config, x, y, pixel);
        }
    }

    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Frame as an image, each LED drawn as a `cell_size` square.
    pub fn to_image(&self, cell_size: u32) -> Result<RgbImage, RenderError> {
        let width = u32::try_from(self.layout.width()).unwrap_or(u32::MAX);
        let height = u32::try_from(self.layout.height()).unwrap_or(u32::MAX);
        let image = RgbImage::from_raw(width, height, self.as_bytes().to_vec())
            .ok_or(RenderError::BufferSize { width, height })?;

        let cell_size = cell_size.max(1);
        if cell_size == 1 {
            return Ok(image);
        }
        let too_large = || RenderError::ImageTooLarge {
            width,
            height,
            cell_size,
        };
        let scaled_width = width.checked_mul(cell_size).ok_or_else(too_large)?;
        let scaled_height = height.checked_mul(cell_size).ok_or_else(too_large)?;
        Ok(imageops::resize(
            &image,
            scaled_width,
            scaled_height,
            imageops::FilterType::Nearest,
        ))
    }

    pub fn save_png(&self, path: &Path, cell_size: u32) -> Result<(), RenderError> {
        self.to_image(cell_size)?.save(path)?;
        Ok(())
    }
}

/// Render `recording.total_frames()` frames into `<output>/frames/`.
///
/// `track` supplies per-frame band energies for bass excitation. Returns the
/// number of frames written.
pub fn record(
    pattern: &mut NoisePattern,
    config: &mut RenderConfig,
    recording: &RecordingConfig,
    track: Option<&SpectrumTrack>,
) -> Result<usize, RenderError> {
    recording.validate()?;
    let frames_dir = recording.frames_dir();
    std::fs::create_dir_all(&frames_dir)?;

    let total = recording.total_frames();
    let delta_ms = recording.frame_interval_ms();
    info!(
        frames = total,
        fps = recording.fps,
        dir = %frames_dir.display(),
        "recording"
    );

    let mut clock = FrameClock::new();
    let mut buffer = FrameBuffer::new(pattern.layout());
    for frame in 0..total {
        clock.advance(delta_ms);
        pattern.before_frame(config, &clock, delta_ms, track.map(|t| t.bands(frame)));
        buffer.render(pattern, config);

        let path = recording.frame_path(frame);
        buffer.save_png(&path, recording.cell_size)?;
        debug!(frame, t1 = pattern.sweep().t1(), "wrote frame");

        if recording.fps > 0 && (frame + 1) % recording.fps as usize == 0 {
            info!(seconds = (frame + 1) / recording.fps as usize, "recorded");
        }
    }

    Ok(total)
}
