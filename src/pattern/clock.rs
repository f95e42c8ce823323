//! Time sources for the per-frame phases.

/// Sawtooth phase source driven by frame time.
pub trait PhaseClock {
    /// Phase in `[0, 1)` of a sawtooth repeating every `period_secs`.
    ///
    /// A non-positive or non-finite period holds the phase at 0.
    fn phase(&self, period_secs: f64) -> f64;
}

/// Clock advanced explicitly by the host, once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(elapsed_ms: f64) -> Self {
        Self { elapsed_ms }
    }

    pub fn advance(&mut self, delta_ms: f64) {
        self.elapsed_ms += delta_ms;
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl PhaseClock for FrameClock {
    fn phase(&self, period_secs: f64) -> f64 {
        if !(period_secs > 0.0 && period_secs.is_finite()) {
            return 0.0;
        }
        let phase = (self.elapsed_ms / 1000.0 / period_secs).rem_euclid(1.0);
        if phase < 1.0 {
            phase
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wraps_each_period() {
        let clock = FrameClock::at(2500.0);
        assert!((clock.phase(1.0) - 0.5).abs() < 1e-12);
        assert!((clock.phase(10.0) - 0.25).abs() < 1e-12);
        assert_eq!(FrameClock::at(3000.0).phase(1.5), 0.0);
    }

    #[test]
    fn test_degenerate_periods_hold_zero() {
        let clock = FrameClock::at(1234.0);
        assert_eq!(clock.phase(0.0), 0.0);
        assert_eq!(clock.phase(-1.0), 0.0);
        assert_eq!(clock.phase(f64::INFINITY), 0.0);
        assert_eq!(clock.phase(f64::NAN), 0.0);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = FrameClock::new();
        for _ in 0..30 {
            clock.advance(1000.0 / 30.0);
        }
        assert!((clock.elapsed_ms() - 1000.0).abs() < 1e-9);
    }
}
