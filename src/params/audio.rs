//! Audio analysis and excitation configuration.

use std::ops::{Range, RangeInclusive};

use crate::error::ConfigError;

/// FFT analysis configuration with log-spaced band layout
#[derive(Debug, Clone)]
pub struct FFTConfig {
    /// FFT window size (must be power of 2)
    pub fft_size: usize,

    /// Number of output bands per frame
    pub band_count: usize,

    /// Lower edge of the first band (Hz)
    pub min_hz: f32,

    /// Upper edge of the last band (Hz)
    pub max_hz: f32,
}

impl Default for FFTConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            band_count: 32,
            min_hz: 37.5,
            max_hz: 10_000.0,
        }
    }
}

impl FFTConfig {
    /// Convert frequency (Hz) to FFT bin index
    pub fn hz_to_bin(&self, hz: f32, sample_rate_hz: u32) -> usize {
        ((hz * self.fft_size as f32) / sample_rate_hz as f32) as usize
    }

    /// Bin range of every band. Each band covers at least one bin below Nyquist.
    pub fn band_bins(&self, sample_rate_hz: u32) -> Vec<Range<usize>> {
        let nyquist_bin = self.fft_size / 2;
        let ratio = self.max_hz / self.min_hz;
        let edge = |k: usize| self.min_hz * ratio.powf(k as f32 / self.band_count as f32);

        (0..self.band_count)
            .map(|k| {
                let start = self
                    .hz_to_bin(edge(k), sample_rate_hz)
                    .min(nyquist_bin.saturating_sub(1));
                let end = self
                    .hz_to_bin(edge(k + 1), sample_rate_hz)
                    .clamp(start + 1, nyquist_bin.max(start + 1));
                start..end
            })
            .collect()
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(ConfigError::InvalidFft(format!(
                "FFT size must be a power of 2, got {}",
                self.fft_size
            )));
        }
        if self.band_count == 0 {
            return Err(ConfigError::InvalidFft("band count must be > 0".to_string()));
        }
        if !(self.min_hz > 0.0 && self.max_hz > self.min_hz) {
            return Err(ConfigError::InvalidFft(format!(
                "band edges must satisfy 0 < min < max, got {}..{}",
                self.min_hz, self.max_hz
            )));
        }
        Ok(())
    }
}

/// How bass energy accelerates the stripe sweep
#[derive(Debug, Clone)]
pub struct ExcitationConfig {
    /// Bands summed to detect bass
    pub bass_bands: RangeInclusive<usize>,

    /// How long one trigger keeps the sweep accelerated (milliseconds)
    pub burst_duration_ms: f64,

    /// Milliseconds of burst per unit of extra phase, before the speed factor
    pub ms_per_phase: f64,
}

impl Default for ExcitationConfig {
    fn default() -> Self {
        Self {
            bass_bands: 2..=5,
            burst_duration_ms: 160.0,
            ms_per_phase: 2048.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_config_hz_to_bin() {
        let config = FFTConfig::default();

        // At 44100 Hz sample rate and 1024 FFT size:
        // Bin resolution = 44100 / 1024 ≈ 43.07 Hz per bin
        assert_eq!(config.hz_to_bin(0.0, 44_100), 0);
        assert_eq!(config.hz_to_bin(43.07, 44_100), 1);
        assert_eq!(config.hz_to_bin(100.0, 44_100), 2);
    }

    #[test]
    fn test_band_bins_are_ordered_and_non_empty() {
        let config = FFTConfig::default();
        let bands = config.band_bins(44_100);

        assert_eq!(bands.len(), 32);
        for band in &bands {
            assert!(band.start < band.end, "{band:?}");
            assert!(band.end <= config.fft_size / 2);
        }
        for pair in bands.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn test_validate() {
        assert!(FFTConfig::default().validate().is_ok());

        let odd = FFTConfig {
            fft_size: 1000,
            ..FFTConfig::default()
        };
        assert!(matches!(odd.validate(), Err(ConfigError::InvalidFft(_))));

        let inverted = FFTConfig {
            min_hz: 500.0,
            max_hz: 100.0,
            ..FFTConfig::default()
        };
        assert!(inverted.validate().is_err());
    }
}
