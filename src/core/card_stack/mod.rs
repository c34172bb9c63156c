//! Gesture-driven wallet card stack.
//!
//! [`CardStackController`] owns the scroll offset of one mounted stack.  Drags
//! move the offset directly (clamped with a little overscroll); releasing
//! resolves a target card, announces it, and hands the offset to a spring
//! that settles onto the card over the following frames.  Only one driver is
//! live at a time: a new drag always cancels the spring first, picking up
//! from wherever the spring currently is.

pub mod layout;
pub mod notifier;
pub mod spring;
pub mod velocity;

use std::time::Duration;

use thiserror::Error;

use self::layout::CardVisualTransform;
use self::notifier::SelectionNotifier;
use self::spring::{Spring, SpringParams};

/// Static configuration for one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackConfig {
    pub card_count: usize,
    /// Offset distance between two adjacent resting positions.
    pub step: f64,
    /// Offset of the active card's top edge from the stack origin.
    pub top_padding: f64,
    /// Slack allowed past the first/last card while dragging.
    pub overscroll: f64,
    /// Release speed (units/s) above which the target is pushed one card further.
    pub fling_velocity: f64,
    /// Release velocity is divided by this before seeding the spring.
    pub velocity_divisor: f64,
    pub spring: SpringParams,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            card_count: 0,
            step: 50.0,
            top_padding: 16.0,
            overscroll: 20.0,
            fling_velocity: 600.0,
            velocity_divisor: 400.0,
            spring: SpringParams::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StackConfigError {
    #[error("step must be a positive finite number, got {0}")]
    Step(f64),
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

impl StackConfig {
    pub fn validate(&self) -> Result<(), StackConfigError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(StackConfigError::Step(self.step));
        }

        let non_negative = [
            ("top_padding", self.top_padding),
            ("overscroll", self.overscroll),
            ("fling_velocity", self.fling_velocity),
            ("spring damping", self.spring.damping),
            ("spring rest threshold", self.spring.rest_threshold),
            ("spring velocity threshold", self.spring.velocity_threshold),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(StackConfigError::Negative { name, value });
            }
        }

        let positive = [
            ("velocity_divisor", self.velocity_divisor),
            ("spring stiffness", self.spring.stiffness),
            ("spring mass", self.spring.mass),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(StackConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }

    /// Lowest offset a drag may reach.
    pub fn min_scroll(&self) -> f64 {
        -self.overscroll
    }

    /// Highest offset a drag may reach.
    pub fn max_scroll(&self) -> f64 {
        self.card_count.saturating_sub(1) as f64 * self.step + self.overscroll
    }

    /// Resting offset of card `index`.
    pub fn rest_offset(&self, index: usize) -> f64 {
        index as f64 * self.step
    }
}

/// Live state of one mounted card stack.
#[derive(Debug)]
pub struct CardStackController {
    config: StackConfig,
    scroll_offset: f64,
    gesture_start_offset: f64,
    active_index: Option<usize>,
    dragging: bool,
    spring: Option<Spring>,
    notifier: SelectionNotifier,
}

impl CardStackController {
    pub fn new(config: StackConfig, notifier: SelectionNotifier) -> Result<Self, StackConfigError> {
        config.validate()?;
        let active_index = (config.card_count > 0).then_some(0);
        Ok(Self {
            config,
            scroll_offset: 0.0,
            gesture_start_offset: 0.0,
            active_index,
            dragging: false,
            spring: None,
            notifier,
        })
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// The selected card, readable synchronously by the host.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while a spring is still driving the offset.
    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }

    /// True when the offset sits exactly on the active card's resting position.
    pub fn is_settled(&self) -> bool {
        match self.active_index {
            Some(index) => {
                !self.dragging
                    && self.spring.is_none()
                    && self.scroll_offset == self.config.rest_offset(index)
            }
            None => true,
        }
    }

    // ── gesture tracking ─────────────────────────────────────────

    /// A drag started.  Cancels any running spring in place.
    pub fn begin_gesture(&mut self) {
        if self.config.card_count == 0 {
            return;
        }
        if let Some(spring) = self.spring.take() {
            tracing::debug!(
                offset = spring.position(),
                velocity = spring.velocity(),
                target = spring.target(),
                "drag interrupted snap"
            );
        }
        self.gesture_start_offset = self.scroll_offset;
        self.dragging = true;
    }

    /// Apply the cumulative translation since the drag began.  Positive
    /// translation is a downward drag, which reveals earlier cards.
    pub fn update_gesture(&mut self, translation: f64) {
        if self.config.card_count == 0 || !translation.is_finite() {
            return;
        }
        if !self.dragging {
            self.begin_gesture();
        }
        let candidate = self.gesture_start_offset - translation;
        self.scroll_offset = candidate.clamp(self.config.min_scroll(), self.config.max_scroll());
    }

    // ── snap resolution ──────────────────────────────────────────

    /// Index the stack would settle on if released now at `release_velocity`
    /// (units/s, positive toward later cards).
    pub fn resolve_target(&self, release_velocity: f64) -> Option<usize> {
        let last = self.config.card_count.checked_sub(1)?;

        // Half-steps round toward +inf.
        let mut rough = (self.scroll_offset / self.config.step + 0.5).floor() as i64;
        if release_velocity.abs() > self.config.fling_velocity {
            rough += release_velocity.signum() as i64;
        }
        Some(rough.clamp(0, last as i64) as usize)
    }

    /// The drag ended.  Resolves the target, announces it, and starts the
    /// spring toward it.
    pub fn end_gesture(&mut self, release_velocity: f64) -> Option<usize> {
        self.dragging = false;
        let velocity = if release_velocity.is_finite() { release_velocity } else { 0.0 };
        let target = self.resolve_target(velocity)?;

        tracing::debug!(
            offset = self.scroll_offset,
            velocity,
            target,
            "snap resolved"
        );
        self.settle_on(target, velocity / self.config.velocity_divisor);
        Some(target)
    }

    /// A press ended without any movement.  If the press froze a running
    /// snap, resume settling onto the already-announced card.  Returns `true`
    /// when a spring was restarted.
    pub fn cancel_gesture(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        let Some(index) = self.active_index else {
            return false;
        };
        let rest = self.config.rest_offset(index);
        if self.scroll_offset == rest {
            return false;
        }
        self.spring = Some(Spring::new(self.scroll_offset, 0.0, rest, self.config.spring));
        true
    }

    /// Animate to `index` as if it had been picked by a gesture.
    pub fn snap_to(&mut self, index: usize) -> Option<usize> {
        let last = self.config.card_count.checked_sub(1)?;
        if self.dragging {
            return None;
        }
        let target = index.min(last);
        self.settle_on(target, 0.0);
        Some(target)
    }

    /// Move the selection by `delta` cards.
    pub fn step_by(&mut self, delta: isize) -> Option<usize> {
        let current = self.active_index?;
        self.snap_to(current.saturating_add_signed(delta))
    }

    fn settle_on(&mut self, target: usize, spring_velocity: f64) {
        tracing::debug!(previous = ?self.notifier.last_notified(), target, "selection");
        self.spring = Some(Spring::new(
            self.scroll_offset,
            spring_velocity,
            self.config.rest_offset(target),
            self.config.spring,
        ));
        self.active_index = Some(target);
        self.notifier.notify(target);
    }

    // ── per-frame update ─────────────────────────────────────────

    /// Advance the spring by one frame.  Returns `true` while still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(spring) = self.spring.as_mut() else {
            return false;
        };
        self.scroll_offset = spring.advance(dt);
        if spring.is_at_rest() {
            self.spring = None;
            return false;
        }
        true
    }

    /// Transforms for every card at the current offset, in index order.
    pub fn transforms(&self) -> Vec<CardVisualTransform> {
        layout::project_all(self.scroll_offset, &self.config)
    }
}
