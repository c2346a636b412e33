//! Vector paths
//!
//! `Path` is an immutable-by-builder list of drawing commands. Shapes such as the
//! navigation bar outline are produced as a `Path` and handed to the host renderer,
//! either directly (via [`Path::commands`] or [`Path::to_svg_data`]) or after
//! tessellation (see [`crate::tessellate`]).
//!
//! # Example
//!
//! ```rust
//! use swoop_core::{Path, Point};
//!
//! let path = Path::new()
//!     .move_to(0.0, 76.0)
//!     .line_to(0.0, 0.0)
//!     .line_to(400.0, 0.0)
//!     .line_to(400.0, 76.0)
//!     .close();
//!
//! assert!(path.is_closed());
//! assert_eq!(path.start_point(), Some(Point::new(0.0, 76.0)));
//! ```

use std::fmt::Write as _;

use crate::geometry::{Point, Rect, Size, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// SVG-style elliptical arc to a point
    ArcTo {
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// SVG Arc to a point
    ///
    /// - `radii`: The x and y radii of the ellipse
    /// - `rotation`: Rotation angle of the ellipse in radians
    /// - `large_arc`: If true, use the larger arc (> 180 degrees)
    /// - `sweep`: If true, draw clockwise; if false, counter-clockwise
    /// - `x`, `y`: End point of the arc
    pub fn arc_to(
        mut self,
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) -> Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            rotation,
            large_arc,
            sweep,
            end: Point::new(x, y),
        });
        self
    }

    /// Append an arc of the ellipse inscribed in `oval`
    ///
    /// Angles are in degrees, measured clockwise from the positive x axis (y-down).
    /// The arc starts at `start_angle_degrees` and spans `sweep_angle_degrees`.
    /// Unless `force_move_to` is set (or the path is empty), a straight line joins
    /// the current point to the start of the arc.
    ///
    /// A zero-width or zero-height oval is legal: the "arc" then runs along a
    /// straight segment, and a zero-size oval collapses to a single point.
    pub fn arc_to_oval(
        mut self,
        oval: Rect,
        start_angle_degrees: f32,
        sweep_angle_degrees: f32,
        force_move_to: bool,
    ) -> Self {
        let center = oval.center();
        let rx = oval.width().abs() / 2.0;
        let ry = oval.height().abs() / 2.0;
        let point_at = |degrees: f32| {
            let radians = degrees.to_radians();
            Point::new(center.x + rx * radians.cos(), center.y + ry * radians.sin())
        };

        let force_move_to = force_move_to || self.commands.is_empty();
        let join = |start: Point| {
            if force_move_to {
                PathCommand::MoveTo(start)
            } else {
                PathCommand::LineTo(start)
            }
        };

        // A zero-size oval is a lone point at its top-right corner
        if rx == 0.0 && ry == 0.0 {
            self.commands.push(join(Point::new(oval.right(), oval.y())));
            return self;
        }

        self.commands.push(join(point_at(start_angle_degrees)));

        let sweep = sweep_angle_degrees.clamp(-360.0, 360.0);
        if sweep == 0.0 {
            return self;
        }

        // A single SVG arc cannot describe a full turn; split anything past a
        // half turn into two segments.
        let segments = if sweep.abs() > 180.0 { 2 } else { 1 };
        let step = sweep / segments as f32;
        for i in 1..=segments {
            let end = point_at(start_angle_degrees + step * i as f32);
            self = self.arc_to(Vec2::new(rx, ry), 0.0, false, step > 0.0, end.x, end.y);
        }
        self
    }

    /// Closed circle of `radius` around `center`, as two half-turn arcs
    pub fn circle(center: Point, radius: f32) -> Self {
        let diameter = radius.abs() * 2.0;
        let oval = Rect::from_center(center, Size::new(diameter, diameter));
        Self::new().arc_to_oval(oval, 0.0, 360.0, true).close()
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Start point of the last subpath
    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            PathCommand::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// Position of the pen after the last command
    ///
    /// After `Close` the pen returns to the start of the closed subpath.
    pub fn current_point(&self) -> Option<Point> {
        let mut subpath_start = None;
        let mut current = None;
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => {
                    subpath_start = Some(*p);
                    current = Some(*p);
                }
                PathCommand::LineTo(p)
                | PathCommand::CubicTo { end: p, .. }
                | PathCommand::ArcTo { end: p, .. } => current = Some(*p),
                PathCommand::Close => current = subpath_start,
            }
        }
        current
    }

    /// Check whether the path ends with a `Close` command
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Calculate the bounding rectangle of this path
    ///
    /// Control points are included, so curves yield a conservative box.
    pub fn bounds(&self) -> Rect {
        if self.commands.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut include = |p: &Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                }
                PathCommand::ArcTo { end, .. } => include(end),
                PathCommand::Close => {}
            }
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::from_ltrb(min_x, min_y, max_x, max_y)
        } else {
            Rect::ZERO
        }
    }

    /// Serialize as SVG path data (the `d` attribute)
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(out, "M{} {}", num(p.x), num(p.y)),
                PathCommand::LineTo(p) => write!(out, "L{} {}", num(p.x), num(p.y)),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => write!(
                    out,
                    "C{} {} {} {} {} {}",
                    num(control1.x),
                    num(control1.y),
                    num(control2.x),
                    num(control2.y),
                    num(end.x),
                    num(end.y)
                ),
                PathCommand::ArcTo {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    end,
                } => write!(
                    out,
                    "A{} {} {} {} {} {} {}",
                    num(radii.x),
                    num(radii.y),
                    num(rotation.to_degrees()),
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    num(end.x),
                    num(end.y)
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros
fn num(value: f32) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
