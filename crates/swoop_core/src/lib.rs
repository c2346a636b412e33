//! Swoop Core
//!
//! Foundational drawing primitives for the Swoop widgets:
//!
//! - **Geometry**: pixel-space points, sizes and rectangles (y-down)
//! - **Paths**: a command-list vector path with oval arcs and SVG export
//! - **Tessellation**: lyon-backed flattening and fill meshes for host renderers
//!
//! # Example
//!
//! ```rust
//! use swoop_core::{tessellate, Path};
//!
//! let triangle = Path::new()
//!     .move_to(200.0, 50.0)
//!     .line_to(300.0, 200.0)
//!     .line_to(100.0, 200.0)
//!     .close();
//!
//! let mesh = tessellate::tessellate_fill(&triangle);
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

pub mod draw;
pub mod geometry;
pub mod tessellate;

pub use draw::{Path, PathCommand};
pub use geometry::{Point, Rect, Size, Vec2};
pub use tessellate::{Polyline, TessellatedPath};
