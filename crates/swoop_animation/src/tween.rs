//! Duration-based value animation
//!
//! A `Tween` interpolates a float from its value at the moment of retargeting
//! to a new target over a fixed duration, shaped by an [`Easing`]. Unlike a
//! spring it has no velocity; it is the right tool for fades and other
//! purely cosmetic transitions.

use crate::easing::Easing;

/// A retargetable timed animation of a single `f32`
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Duration in milliseconds
    duration_ms: u32,
    /// Elapsed time in milliseconds since the last retarget
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Create a tween resting at `initial`
    pub fn new(initial: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: initial,
            to: initial,
            duration_ms,
            elapsed_ms: duration_ms as f32,
            easing,
        }
    }

    /// Progress of the current transition (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Animate towards `target`, starting from the current value
    ///
    /// Retargeting to the current target is a no-op, so an in-flight
    /// transition is not restarted.
    pub fn set_target(&mut self, target: f32) {
        if self.to == target {
            return;
        }
        self.from = self.value();
        self.to = target;
        self.elapsed_ms = 0.0;
    }

    /// Jump to `value` and stop
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed_ms = self.duration_ms as f32;
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms as f32);
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}
