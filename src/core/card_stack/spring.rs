//! Damped spring used to settle the stack onto a card after release.
//!
//! Semi-implicit Euler over `F = -k·x - c·v`, divided by mass.  Large frame
//! deltas are subdivided so a stalled frame can't blow the integration up.

use std::time::Duration;

/// Largest integration step.  Bigger frame deltas are split into pieces.
const MAX_STEP_SECS: f64 = 0.004;

/// Physical parameters of the snap spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
    /// Offset distance below which the spring may count as settled.
    pub rest_threshold: f64,
    /// Speed (units/s) below which the spring may count as settled.
    pub velocity_threshold: f64,
    /// Consecutive quiet frames required before the spring stops.
    pub settle_frames: u32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: 18.0,
            stiffness: 140.0,
            mass: 0.6,
            rest_threshold: 0.5,
            velocity_threshold: 5.0,
            settle_frames: 3,
        }
    }
}

/// One in-flight spring transition.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
    quiet_frames: u32,
    at_rest: bool,
}

impl Spring {
    /// Start a transition at `position` moving with `velocity` toward `target`.
    pub fn new(position: f64, velocity: f64, target: f64, params: SpringParams) -> Self {
        Self {
            position,
            velocity,
            target,
            params,
            quiet_frames: 0,
            at_rest: false,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let force = -self.params.stiffness * displacement - self.params.damping * self.velocity;
        let acceleration = force / self.params.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by one frame of `dt`.  Returns the new position.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.at_rest {
            return self.position;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let quiet = (self.position - self.target).abs() < self.params.rest_threshold
            && self.velocity.abs() < self.params.velocity_threshold;
        if quiet {
            self.quiet_frames += 1;
        } else {
            self.quiet_frames = 0;
        }

        if self.quiet_frames >= self.params.settle_frames.max(1) {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }

        self.position
    }
}
