//! Swoop Navigation Bar
//!
//! A bottom navigation bar whose selected item floats above the bar in a circle,
//! sitting in a smooth notch cut into the bar's top edge. Changing the
//! selection slides the notch and the circle to the new slot on a spring.
//!
//! # Modules
//!
//! - [`position`]: slot centres along the bar
//! - [`motion`]: spring and fade channels driven once per frame
//! - [`cutout`]: the bar outline with its notch
//! - [`navbar`]: the widget state tying items, selection, motion and outline together
//!
//! Rendering is left to the host: each [`NavBarFrame`] carries the outline as a
//! [`swoop_core::Path`] plus the indicator position and icon opacities.

pub mod cutout;
pub mod error;
pub mod item;
pub mod motion;
pub mod navbar;
pub mod position;
pub mod selection;
pub mod style;

pub use cutout::{build_outline, CutoutGeometry, CutoutPathBuilder};
pub use error::{NavBarError, Result};
pub use item::{IconRef, NavItem, NavItems};
pub use motion::MotionController;
pub use navbar::{BarGeometry, IndicatorFrame, NavBar, NavBarFrame};
pub use position::{compute_target_offset, slot_at, slot_centers};
pub use selection::{SavedSelection, SelectionState};
pub use style::{CornerMode, NavBarMetrics, NavBarStyle, SpringStyle};
