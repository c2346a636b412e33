//! Navigation bar style
//!
//! Lengths are specified in density-independent units (dp) and resolved to
//! pixels with [`NavBarStyle::resolve`]. Styles can be loaded from TOML; every
//! field is optional and falls back to the default look:
//!
//! ```toml
//! indicator_radius = 28.0
//! cutout_circle_radius = 45.0
//! corner_radius = 25.0
//! circle_gap = 8.0
//! bar_height = 76.0
//! indicator_lift = 5.0
//! density = 2.75
//! corner_mode = "degenerate"
//! icon_fade_ms = 300
//!
//! [spring]
//! damping_ratio = 0.9
//! stiffness = 50.0
//! ```

use serde::{Deserialize, Serialize};
use swoop_animation::{stiffness, SpringConfig};

use crate::error::{NavBarError, Result};

/// Fixed upward bias of the indicator, in pixels, applied before `indicator_lift`
pub const INDICATOR_BASE_LIFT_PX: f32 = 10.0;

/// How the outline's top corners are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerMode {
    /// Zero-size corner ovals: the top corners come out sharp
    #[default]
    Degenerate,
    /// Quarter-circle corners of `corner_radius`
    Rounded,
}

/// Spring parameters shared by the cutout and indicator channels
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpringStyle {
    pub damping_ratio: f32,
    pub stiffness: f32,
}

impl Default for SpringStyle {
    fn default() -> Self {
        Self {
            damping_ratio: 0.9,
            stiffness: stiffness::VERY_LOW,
        }
    }
}

impl SpringStyle {
    pub fn to_config(self) -> SpringConfig {
        SpringConfig::from_damping_ratio(self.damping_ratio, self.stiffness)
    }
}

/// Visual and motion parameters of the bar
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavBarStyle {
    /// Radius of the floating indicator circle (dp)
    pub indicator_radius: f32,
    /// Radius of the circle the cutout is shaped around (dp)
    pub cutout_circle_radius: f32,
    /// Radius of the bar's top corners (dp)
    pub corner_radius: f32,
    /// Clearance between the circle and the cutout edge (dp)
    pub circle_gap: f32,
    /// Bar height (dp)
    pub bar_height: f32,
    /// Extra upward lift of the indicator (dp)
    pub indicator_lift: f32,
    /// Pixels per dp
    pub density: f32,
    pub corner_mode: CornerMode,
    pub spring: SpringStyle,
    /// Duration of the icon fade (ms)
    pub icon_fade_ms: u32,
}

impl Default for NavBarStyle {
    fn default() -> Self {
        Self {
            indicator_radius: 28.0,
            cutout_circle_radius: 45.0,
            corner_radius: 25.0,
            circle_gap: 8.0,
            bar_height: 76.0,
            indicator_lift: 5.0,
            density: 1.0,
            corner_mode: CornerMode::Degenerate,
            spring: SpringStyle::default(),
            icon_fade_ms: 300,
        }
    }
}

impl NavBarStyle {
    /// Parse and validate a style from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let style: NavBarStyle = toml::from_str(source)?;
        style.validate()?;
        Ok(style)
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("indicator_radius", self.indicator_radius),
            ("cutout_circle_radius", self.cutout_circle_radius),
            ("corner_radius", self.corner_radius),
            ("circle_gap", self.circle_gap),
            ("bar_height", self.bar_height),
            ("indicator_lift", self.indicator_lift),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(NavBarError::InvalidStyle(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let positives = [
            ("density", self.density),
            ("spring.damping_ratio", self.spring.damping_ratio),
            ("spring.stiffness", self.spring.stiffness),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(NavBarError::InvalidStyle(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Resolve dp lengths to pixels at the style's density
    pub fn resolve(&self) -> NavBarMetrics {
        let px = |dp: f32| dp * self.density;
        NavBarMetrics {
            indicator_radius: px(self.indicator_radius),
            cutout_circle_radius: px(self.cutout_circle_radius),
            corner_radius: px(self.corner_radius),
            circle_gap: px(self.circle_gap),
            bar_height: px(self.bar_height),
            indicator_lift: INDICATOR_BASE_LIFT_PX + px(self.indicator_lift),
            corner_mode: self.corner_mode,
        }
    }
}

/// Style lengths resolved to pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavBarMetrics {
    pub indicator_radius: f32,
    pub cutout_circle_radius: f32,
    pub corner_radius: f32,
    pub circle_gap: f32,
    pub bar_height: f32,
    /// Total upward bias of the indicator
    pub indicator_lift: f32,
    pub corner_mode: CornerMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_valid() {
        let style = NavBarStyle::default();
        style.validate().unwrap();

        let spring = style.spring.to_config();
        assert!((spring.damping_ratio() - 0.9).abs() < 1e-5);
        assert_eq!(spring.stiffness, 50.0);
    }

    #[test]
    fn test_resolve_applies_density() {
        let style = NavBarStyle {
            density: 2.0,
            ..NavBarStyle::default()
        };
        let metrics = style.resolve();
        assert_eq!(metrics.indicator_radius, 56.0);
        assert_eq!(metrics.cutout_circle_radius, 90.0);
        assert_eq!(metrics.circle_gap, 16.0);
        assert_eq!(metrics.bar_height, 152.0);
        assert_eq!(metrics.indicator_lift, 20.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let style = NavBarStyle::from_toml_str(
            r#"
            density = 3.0
            corner_mode = "rounded"

            [spring]
            stiffness = 200.0
            "#,
        )
        .unwrap();

        assert_eq!(style.density, 3.0);
        assert_eq!(style.corner_mode, CornerMode::Rounded);
        assert_eq!(style.spring.stiffness, 200.0);
        assert_eq!(style.spring.damping_ratio, 0.9);
        assert_eq!(style.indicator_radius, 28.0);
        assert_eq!(style.icon_fade_ms, 300);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = NavBarStyle::from_toml_str("density = \"high\"").unwrap_err();
        assert!(matches!(err, NavBarError::Config(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = NavBarStyle::from_toml_str("circle_gap = -1.0").unwrap_err();
        assert!(matches!(err, NavBarError::InvalidStyle(_)));
        assert!(err.to_string().contains("circle_gap"));

        let zero_density = NavBarStyle {
            density: 0.0,
            ..NavBarStyle::default()
        };
        assert!(zero_density.validate().is_err());

        let no_damping = NavBarStyle {
            spring: SpringStyle {
                damping_ratio: 0.0,
                stiffness: 50.0,
            },
            ..NavBarStyle::default()
        };
        assert!(no_damping.validate().is_err());
    }
}
