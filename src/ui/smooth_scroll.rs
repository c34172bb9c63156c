//! Ease-out row animation for the transaction list.
//!
//! The list scrolls in whole items.  When the first visible item changes,
//! the rows jump by `delta × item_height` and a compensating displacement is
//! injected; each frame the displacement decays geometrically so the rows
//! glide into place instead of snapping.

/// Displacement below this many rows is dropped.
const REST_ROWS: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Rows the list is currently drawn away from its target position.
    /// Positive shifts items down.
    row_offset: f64,
    target: usize,
    /// Fraction of the displacement removed each frame.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            row_offset: 0.0,
            target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Move the first visible item to `target`.
    pub fn set_target(&mut self, target: usize, item_height: f64) {
        if target == self.target {
            return;
        }
        let delta = target as f64 - self.target as f64;
        self.row_offset += delta * item_height;
        self.target = target;
    }

    /// Jump straight to `target` without animating.
    pub fn reset(&mut self, target: usize) {
        self.target = target;
        self.row_offset = 0.0;
    }

    pub fn tick(&mut self) {
        self.row_offset *= 1.0 - self.speed;
        if self.row_offset.abs() < REST_ROWS {
            self.row_offset = 0.0;
        }
    }

    pub fn row_offset(&self) -> i16 {
        self.row_offset.round() as i16
    }

    pub fn is_animating(&self) -> bool {
        self.row_offset != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_down_starts_displaced_then_settles() {
        let mut s = SmoothScroll::new(0.35);
        s.set_target(2, 3.0);
        assert_eq!(s.target(), 2);
        assert_eq!(s.row_offset(), 6);
        assert!(s.is_animating());

        let mut frames = 0;
        while s.is_animating() {
            s.tick();
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(s.row_offset(), 0);
    }

    #[test]
    fn unchanged_target_adds_nothing() {
        let mut s = SmoothScroll::new(0.35);
        s.set_target(0, 3.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn reset_drops_displacement() {
        let mut s = SmoothScroll::new(0.35);
        s.set_target(4, 3.0);
        s.reset(0);
        assert!(!s.is_animating());
        assert_eq!(s.target(), 0);
    }
}
