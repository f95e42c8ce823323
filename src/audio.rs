//! Offline FFT analysis of a WAV file into per-frame band energies.
//!
//! Each video frame gets one spectrum, taken from an FFT window centred on
//! the frame's timestamp and split into log-spaced bands.

use std::f32::consts::PI;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use tracing::{debug, info};

use crate::error::{AudioError, ConfigError};
use crate::params::FFTConfig;

/// Windowed FFT producing band energies for one block of samples.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    bins: Vec<Range<usize>>,
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    pub fn new(config: &FFTConfig, sample_rate_hz: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| hann_window(i, config.fft_size))
            .collect();

        Ok(Self {
            fft,
            window,
            bins: config.band_bins(sample_rate_hz),
            buffer: vec![Complex::new(0.0, 0.0); config.fft_size],
        })
    }

    pub fn band_count(&self) -> usize {
        self.bins.len()
    }

    /// Band energies of `samples`, zero-padded or truncated to the FFT size.
    ///
    /// Each band is the mean bin magnitude divided by the FFT size.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let size = self.buffer.len();
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        self.bins
            .iter()
            .map(|bins| {
                let sum: f32 = self.buffer[bins.clone()].iter().map(|c| c.norm()).sum();
                sum / bins.len() as f32 / size as f32
            })
            .collect()
    }
}

/// Band energies for every frame of a recording.
#[derive(Debug, Clone)]
pub struct SpectrumTrack {
    frames: Vec<Vec<f32>>,
    sample_rate_hz: u32,
}

impl SpectrumTrack {
    /// Decode `path`, mix it down to mono and analyze one window per frame.
    pub fn from_wav(path: &Path, config: &FFTConfig, fps: u32) -> Result<Self, AudioError> {
        if fps == 0 {
            return Err(ConfigError::NonPositiveFps.into());
        }

        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let full_scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let channels = usize::from(spec.channels.max(1));
        let mono: Vec<f32> = samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();
        if mono.is_empty() {
            return Err(AudioError::NoSamples);
        }

        info!(
            path = %path.display(),
            sample_rate = spec.sample_rate,
            channels,
            seconds = mono.len() as f64 / f64::from(spec.sample_rate),
            "loaded audio"
        );

        Self::from_samples(&mono, spec.sample_rate, config, fps)
    }

    /// Analyze mono `samples` at `fps` frames per second.
    pub fn from_samples(
        samples: &[f32],
        sample_rate_hz: u32,
        config: &FFTConfig,
        fps: u32,
    ) -> Result<Self, AudioError> {
        if fps == 0 {
            return Err(ConfigError::NonPositiveFps.into());
        }
        if samples.is_empty() || sample_rate_hz == 0 {
            return Err(AudioError::NoSamples);
        }

        let mut analyzer = SpectrumAnalyzer::new(config, sample_rate_hz)?;
        let half = config.fft_size / 2;
        let frame_count =
            (samples.len() as u64 * u64::from(fps)).div_ceil(u64::from(sample_rate_hz)) as usize;

        let mut window = vec![0.0; config.fft_size];
        let frames = (0..frame_count)
            .map(|frame| {
                let centre = frame as u64 * u64::from(sample_rate_hz) / u64::from(fps);
                let start = centre as i64 - half as i64;
                for (i, slot) in window.iter_mut().enumerate() {
                    let at = start + i as i64;
                    *slot = if at >= 0 {
                        samples.get(at as usize).copied().unwrap_or(0.0)
                    } else {
                        0.0
                    };
                }
                analyzer.analyze(&window)
            })
            .collect::<Vec<_>>();

        debug!(frames = frames.len(), bands = analyzer.band_count(), "analyzed spectrum");

        Ok(Self {
            frames,
            sample_rate_hz,
        })
    }

    /// Band energies for `frame`; empty once the recording has ended.
    pub fn bands(&self, frame: usize) -> &[f32] {
        self.frames.get(frame).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44_100;

    /// Sine centred on FFT bin 2 at 44.1 kHz / 1024
    fn bass_tone(seconds: f32, amplitude: f32) -> Vec<f32> {
        let hz = 2.0 * SAMPLE_RATE as f32 / 1024.0;
        (0..(seconds * SAMPLE_RATE as f32) as usize)
            .map(|i| amplitude * (2.0 * PI * hz * i as f32 / SAMPLE_RATE as f32).sin())
            .collect()
    }

    fn write_wav(path: &Path, samples: &[f32], spec: hound::WavSpec) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            for _ in 0..spec.channels {
                match spec.sample_format {
                    hound::SampleFormat::Float => writer.write_sample(s).unwrap(),
                    hound::SampleFormat::Int => {
                        writer.write_sample((s * i16::MAX as f32) as i16).unwrap()
                    }
                }
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_silence_has_no_energy() {
        let mut analyzer = SpectrumAnalyzer::new(&FFTConfig::default(), SAMPLE_RATE).unwrap();
        let bands = analyzer.analyze(&[0.0; 1024]);
        assert_eq!(bands.len(), 32);
        assert!(bands.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_bass_tone_lands_in_bass_bands() {
        let mut analyzer = SpectrumAnalyzer::new(&FFTConfig::default(), SAMPLE_RATE).unwrap();
        let bands = analyzer.analyze(&bass_tone(0.1, 0.5));

        assert!(bands[4] > 0.05, "bass band too quiet: {}", bands[4]);
        assert!(bands[30] < 1e-3, "treble band too loud: {}", bands[30]);
        let bass: f32 = bands[2..=5].iter().sum();
        assert!(bass > 0.03);
    }

    #[test]
    fn test_invalid_fft_config_is_rejected() {
        let config = FFTConfig {
            fft_size: 1000,
            ..FFTConfig::default()
        };
        assert!(SpectrumAnalyzer::new(&config, SAMPLE_RATE).is_err());
    }

    #[test]
    fn test_track_from_int_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, &bass_tone(1.0, 0.5), spec);

        let track = SpectrumTrack::from_wav(&path, &FFTConfig::default(), 30).unwrap();
        assert_eq!(track.frame_count(), 30);
        assert_eq!(track.sample_rate_hz(), SAMPLE_RATE);
        assert!(track.bands(15)[4] > 0.05);
        assert!(track.bands(30).is_empty());
    }

    #[test]
    fn test_track_from_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        write_wav(&path, &bass_tone(0.5, 0.5), spec);

        let track = SpectrumTrack::from_wav(&path, &FFTConfig::default(), 30).unwrap();
        assert_eq!(track.frame_count(), 15);
        assert!(track.bands(7)[4] > 0.05);
    }

    #[test]
    fn test_empty_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, &[], spec);

        let config = FFTConfig::default();
        assert!(matches!(
            SpectrumTrack::from_wav(&path, &config, 30),
            Err(AudioError::NoSamples)
        ));
        assert!(matches!(
            SpectrumTrack::from_wav(&dir.path().join("missing.wav"), &config, 30),
            Err(AudioError::Wav(_))
        ));
        assert!(matches!(
            SpectrumTrack::from_wav(&path, &config, 0),
            Err(AudioError::Config(ConfigError::NonPositiveFps))
        ));
    }
}
