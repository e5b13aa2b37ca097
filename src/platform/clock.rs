//! Frame delta from host timestamps

use crate::consts::BASELINE_DT;
use crate::sim::sanitize_dt;

/// Turns animation-frame timestamps (ms) into tick deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame. The first frame after a reset
    /// gets the baseline tick.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => BASELINE_DT,
        };
        self.last_ms = Some(now_ms);
        sanitize_dt(dt)
    }

    /// Forget the last timestamp (after a pause)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_DT;

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12_345.0), BASELINE_DT);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let dt = clock.advance(1020.0);
        assert!((dt - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_DT);
    }

    #[test]
    fn test_backwards_or_nan_timestamp() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), BASELINE_DT);
        assert_eq!(clock.advance(f64::NAN), BASELINE_DT);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(60_000.0), BASELINE_DT);
    }
}
