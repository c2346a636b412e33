//! Swoop Animation System
//!
//! Frame-stepped animation primitives with no dependency on any UI framework.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs built from stiffness and damping ratio
//! - **Interruptible**: Springs keep their velocity when retargeted mid-flight
//! - **Tweens**: Fixed-duration transitions shaped by cubic Bézier easing
//!
//! Every animation is an explicit `(current, target, ...)` state machine that the
//! owner advances once per frame.
//!
//! ```rust
//! use swoop_animation::{Spring, SpringConfig};
//!
//! let mut spring = Spring::new(SpringConfig::glide(), 0.0);
//! spring.set_target(100.0);
//! for _ in 0..600 {
//!     spring.step(1.0 / 60.0);
//! }
//! assert_eq!(spring.value(), 100.0);
//! ```

pub mod easing;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use spring::{damping_ratio, stiffness, Spring, SpringConfig};
pub use tween::Tween;
