//! Release-velocity estimation from pointer samples.
//!
//! Terminal mice only report whole-cell moves, so instantaneous speeds are
//! noisy.  Samples are smoothed with an exponential moving average and the
//! estimate decays to zero if the pointer rested before release.

use std::time::{Duration, Instant};

/// EMA weight of the newest sample.
const SMOOTHING: f64 = 0.3;

/// Gaps longer than this don't contribute a speed sample.
const MAX_SAMPLE_GAP: Duration = Duration::from_millis(500);

/// Pointer resting this long before release counts as a still release.
const STILL_AFTER: Duration = Duration::from_millis(100);

/// Assumed frame interval when only a single move has been seen.
const FIRST_SAMPLE_FRAME: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    last: Option<(Instant, f64)>,
    velocity: f64,
    samples: u32,
}

impl VelocityTracker {
    /// Start tracking from the press position.
    pub fn reset(&mut self, at: Instant, position: f64) {
        self.last = Some((at, position));
        self.velocity = 0.0;
        self.samples = 0;
    }

    /// Record a pointer position (units along the drag axis).
    pub fn record(&mut self, at: Instant, position: f64) {
        let Some((prev_at, prev_pos)) = self.last else {
            self.reset(at, position);
            return;
        };

        let delta = position - prev_pos;
        let dt = at.saturating_duration_since(prev_at);
        if dt.is_zero() {
            // Same instant: fold the move into the previous sample.
            self.velocity += delta / FIRST_SAMPLE_FRAME * SMOOTHING;
        } else if dt <= MAX_SAMPLE_GAP {
            let instant = delta / dt.as_secs_f64();
            self.velocity = if self.samples == 0 {
                instant
            } else {
                self.velocity * (1.0 - SMOOTHING) + instant * SMOOTHING
            };
        } else {
            self.velocity = 0.0;
        }

        self.samples += 1;
        self.last = Some((at, position));
    }

    /// Velocity at `release`, in units per second.
    pub fn release_velocity(&self, release: Instant) -> f64 {
        match self.last {
            Some((at, _)) if release.saturating_duration_since(at) <= STILL_AFTER => self.velocity,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_20: Duration = Duration::from_millis(20);

    #[test]
    fn steady_motion_is_measured() {
        let t = Instant::now();
        let mut tracker = VelocityTracker::default();
        tracker.reset(t, 0.0);
        for i in 1..=5 {
            tracker.record(t + MS_20 * i, -16.0 * f64::from(i));
        }

        let v = tracker.release_velocity(t + MS_20 * 5);
        assert!((v - (-800.0)).abs() < 1e-6, "velocity was {v}");
    }

    #[test]
    fn resting_before_release_is_still() {
        let t = Instant::now();
        let mut tracker = VelocityTracker::default();
        tracker.reset(t, 0.0);
        tracker.record(t + MS_20, 32.0);

        assert!(tracker.release_velocity(t + MS_20).abs() > 0.0);
        assert_eq!(tracker.release_velocity(t + Duration::from_millis(400)), 0.0);
    }

    #[test]
    fn long_gap_drops_speed() {
        let t = Instant::now();
        let mut tracker = VelocityTracker::default();
        tracker.reset(t, 0.0);
        tracker.record(t + Duration::from_secs(2), 100.0);

        assert_eq!(tracker.release_velocity(t + Duration::from_secs(2)), 0.0);
    }

    #[test]
    fn untouched_tracker_reports_zero() {
        let tracker = VelocityTracker::default();
        assert_eq!(tracker.release_velocity(Instant::now()), 0.0);
    }
}
