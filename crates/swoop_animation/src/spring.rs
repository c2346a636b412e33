//! Spring physics animation
//!
//! RK4-integrated damped harmonic oscillator. A spring holds
//! `(value, velocity, target)` and is advanced by [`Spring::step`] once per
//! frame. Changing the target mid-flight keeps the current value and velocity,
//! so interrupted animations continue smoothly from where they are.

/// Standard stiffness values
///
/// Lower stiffness settles more slowly.
pub mod stiffness {
    pub const HIGH: f32 = 10_000.0;
    pub const MEDIUM: f32 = 1_500.0;
    pub const MEDIUM_LOW: f32 = 400.0;
    pub const LOW: f32 = 200.0;
    pub const VERY_LOW: f32 = 50.0;
}

/// Standard damping ratios
///
/// `1.0` is critically damped; anything below oscillates around the target.
pub mod damping_ratio {
    pub const HIGH_BOUNCY: f32 = 0.2;
    pub const MEDIUM_BOUNCY: f32 = 0.5;
    pub const LOW_BOUNCY: f32 = 0.75;
    pub const NO_BOUNCY: f32 = 1.0;
}

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Create a unit-mass spring from a damping ratio and stiffness
    ///
    /// `damping = 2 * ratio * sqrt(stiffness * mass)`
    pub fn from_damping_ratio(ratio: f32, stiffness: f32) -> Self {
        let mut config = Self::new(stiffness, 0.0, 1.0);
        config.damping = ratio * config.critical_damping();
        config
    }

    /// A slow, barely oscillating glide (good for indicators crossing the screen)
    pub fn glide() -> Self {
        Self::from_damping_ratio(0.9, stiffness::VERY_LOW)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of the configured damping to critical damping
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical > 0.0 {
            self.damping / critical
        } else {
            0.0
        }
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::glide()
    }
}

/// Distance from the target below which a spring may come to rest
pub const DEFAULT_REST_DISTANCE: f32 = 0.5;
/// Speed below which a spring may come to rest
pub const DEFAULT_REST_VELOCITY: f32 = 5.0;

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    rest_distance: f32,
    rest_velocity: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_distance: DEFAULT_REST_DISTANCE,
            rest_velocity: DEFAULT_REST_VELOCITY,
        }
    }

    /// Override the settle thresholds
    ///
    /// The defaults suit pixel-valued springs: half a pixel and 5px/s are
    /// imperceptible.
    pub fn with_rest_threshold(mut self, distance: f32, velocity: f32) -> Self {
        self.rest_distance = distance;
        self.rest_velocity = velocity;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring, keeping the current value and velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.rest_distance
            && self.velocity.abs() < self.rest_velocity
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
