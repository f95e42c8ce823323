//! Sweep phase with bass-triggered bursts, and the circular pan trajectory.

use std::f64::consts::TAU;

use glam::DVec2;
use tracing::trace;

use super::clock::PhaseClock;
use crate::params::{ExcitationConfig, RenderConfig};

/// Seconds per stripe for one full sweep at speed 1
const SWEEP_SECS_PER_STRIPE: f64 = 0.44;

/// Seconds per revolution of the pan trajectory
pub const PAN_PERIOD_SECS: f64 = 100.0;

/// Stripe sweep phase `t1`, optionally pushed ahead by bass bursts.
///
/// A burst starts when the summed bass bands exceed the configured threshold
/// and runs for a fixed duration, adding extra phase every frame. Triggers
/// during a burst extend nothing; they only start a new burst after it ends.
#[derive(Debug, Clone)]
pub struct SweepPhase {
    excitation: ExcitationConfig,
    sound_offset: f64,
    bursting: bool,
    burst_elapsed_ms: f64,
    t1: f64,
}

impl SweepPhase {
    pub fn new(excitation: ExcitationConfig) -> Self {
        Self {
            excitation,
            sound_offset: 0.0,
            bursting: false,
            burst_elapsed_ms: 0.0,
            t1: 0.0,
        }
    }

    /// Period of one sweep in seconds; infinite when the sweep is stopped.
    pub fn period_secs(config: &RenderConfig) -> f64 {
        let speed = config.sweep_speed();
        if speed > 0.0 {
            SWEEP_SECS_PER_STRIPE * f64::from(config.effective_stripes()) / speed
        } else {
            f64::INFINITY
        }
    }

    /// Advance to this frame's phase.
    pub fn advance(
        &mut self,
        clock: &impl PhaseClock,
        config: &RenderConfig,
        delta_ms: f64,
        bands: Option<&[f32]>,
    ) -> f64 {
        let base = clock.phase(Self::period_secs(config));
        if config.bass_threshold() != 0.0 {
            self.react(delta_ms, bands.unwrap_or(&[]), config);
        }
        self.t1 = (base + self.sound_offset).rem_euclid(1.0);
        self.t1
    }

    fn react(&mut self, delta_ms: f64, bands: &[f32], config: &RenderConfig) {
        let bass: f64 = self
            .excitation
            .bass_bands
            .clone()
            .filter_map(|i| bands.get(i))
            .map(|e| f64::from(*e))
            .sum();

        if bass > config.bass_threshold() && !self.bursting {
            trace!(bass, threshold = config.bass_threshold(), "bass burst");
        }
        self.bursting |= bass > config.bass_threshold();
        if !self.bursting {
            return;
        }

        self.burst_elapsed_ms += delta_ms;
        self.sound_offset +=
            delta_ms / self.excitation.ms_per_phase * (1.0 + config.sweep_speed());
        if self.sound_offset > 1.0 {
            self.sound_offset -= 1.0;
        }
        if self.burst_elapsed_ms > self.excitation.burst_duration_ms {
            self.burst_elapsed_ms = 0.0;
            self.bursting = false;
        }
    }

    /// Phase computed by the last [`SweepPhase::advance`].
    pub fn t1(&self) -> f64 {
        self.t1
    }

    pub fn sound_offset(&self) -> f64 {
        self.sound_offset
    }

    pub fn is_bursting(&self) -> bool {
        self.bursting
    }
}

/// Current point on the circular pan trajectory, in matrix widths.
pub fn pan_offset(clock: &impl PhaseClock, config: &RenderConfig) -> DVec2 {
    let amplitude = config.pan_amplitude();
    if amplitude == 0.0 {
        return DVec2::ZERO;
    }
    let angle = TAU * clock.phase(PAN_PERIOD_SECS);
    DVec2::new(amplitude * angle.sin(), amplitude * angle.cos())
}
