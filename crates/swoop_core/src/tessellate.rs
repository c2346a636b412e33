//! Path flattening and tessellation
//!
//! Converts [`Path`]s into lyon path events, polylines, or triangle meshes the
//! host renderer can upload as-is.

use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers,
};
use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::PathEvent;

use crate::draw::{Path, PathCommand};
use crate::geometry::{Point, Vec2};

/// Default flattening tolerance in pixels
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Tessellated fill geometry
#[derive(Clone, Debug, Default)]
pub struct TessellatedPath {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TessellatedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Convert an SVG arc to cubic bezier curves
/// Based on the SVG arc implementation algorithm from the W3C spec
///
/// Returns an empty list for degenerate arcs (coincident endpoints or a zero
/// radius); callers draw those as straight lines.
fn arc_to_cubics(
    from: Point,
    radii: Vec2,
    x_rotation: f32,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Vec<(Point, Point, Point)> {
    let mut curves = Vec::new();

    if from.x == to.x && from.y == to.y {
        return curves;
    }

    let mut rx = radii.x.abs();
    let mut ry = radii.y.abs();

    if rx == 0.0 || ry == 0.0 {
        return curves;
    }

    let cos_phi = x_rotation.cos();
    let sin_phi = x_rotation.sin();

    // Transformed start point
    let dx = (from.x - to.x) / 2.0;
    let dy = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // Scale radii up if they cannot span the endpoints
    let x1p_sq = x1p * x1p;
    let y1p_sq = y1p * y1p;
    let lambda = x1p_sq / (rx * rx) + y1p_sq / (ry * ry);
    if lambda > 1.0 {
        let lambda_sqrt = lambda.sqrt();
        rx *= lambda_sqrt;
        ry *= lambda_sqrt;
    }

    let rx_sq = rx * rx;
    let ry_sq = ry * ry;

    let sq_numer = (rx_sq * ry_sq - rx_sq * y1p_sq - ry_sq * x1p_sq).max(0.0);
    let sq_denom = rx_sq * y1p_sq + ry_sq * x1p_sq;
    let sq = if sq_denom > 0.0 {
        (sq_numer / sq_denom).sqrt()
    } else {
        0.0
    };

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let cxp = sign * sq * rx * y1p / ry;
    let cyp = sign * sq * -ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    fn angle(ux: f32, uy: f32, vx: f32, vy: f32) -> f32 {
        let dot = ux * vx + uy * vy;
        let len = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
        let cos_val = (dot / len).clamp(-1.0, 1.0);
        let angle = cos_val.acos();
        if ux * vy - uy * vx < 0.0 {
            -angle
        } else {
            angle
        }
    }

    let theta1 = angle(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
    let mut dtheta = angle(
        (x1p - cxp) / rx,
        (y1p - cyp) / ry,
        (-x1p - cxp) / rx,
        (-y1p - cyp) / ry,
    );

    if sweep && dtheta < 0.0 {
        dtheta += std::f32::consts::TAU;
    } else if !sweep && dtheta > 0.0 {
        dtheta -= std::f32::consts::TAU;
    }

    // At most 90 degrees per cubic segment
    let num_segments = ((dtheta.abs() / (std::f32::consts::PI / 2.0)).ceil() as usize).max(1);
    let segment_angle = dtheta / num_segments as f32;
    let alpha = (segment_angle / 4.0).tan() * 4.0 / 3.0;

    let ellipse_point = |t: f32| {
        let (sin_t, cos_t) = t.sin_cos();
        Point::new(
            cx + rx * cos_phi * cos_t - ry * sin_phi * sin_t,
            cy + rx * sin_phi * cos_t + ry * cos_phi * sin_t,
        )
    };
    let ellipse_tangent = |t: f32| {
        let (sin_t, cos_t) = t.sin_cos();
        Vec2::new(
            -rx * cos_phi * sin_t - ry * sin_phi * cos_t,
            -rx * sin_phi * sin_t + ry * cos_phi * cos_t,
        )
    };

    for i in 0..num_segments {
        let t1 = theta1 + i as f32 * segment_angle;
        let t2 = t1 + segment_angle;

        let p0 = ellipse_point(t1);
        let p3 = if i + 1 == num_segments {
            to
        } else {
            ellipse_point(t2)
        };
        let d1 = ellipse_tangent(t1);
        let d2 = ellipse_tangent(t2);

        curves.push((
            Point::new(p0.x + alpha * d1.x, p0.y + alpha * d1.y),
            Point::new(p3.x - alpha * d2.x, p3.y - alpha * d2.y),
            p3,
        ));
    }

    curves
}

fn begin_implicit(events: &mut Vec<PathEvent>, first_point: &mut Option<Point>, pen: Point) {
    if first_point.is_none() {
        events.push(PathEvent::Begin {
            at: point(pen.x, pen.y),
        });
        *first_point = Some(pen);
    }
}

/// Convert a [`Path`] to lyon path events
///
/// Drawing commands with no open subpath start one at the pen position (the
/// origin for a fresh path).
pub fn to_events(path: &Path) -> Vec<PathEvent> {
    let mut events = Vec::new();
    let mut first_point: Option<Point> = None;
    let mut current_point = Point::ZERO;

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => {
                if let Some(first) = first_point {
                    events.push(PathEvent::End {
                        last: point(current_point.x, current_point.y),
                        first: point(first.x, first.y),
                        close: false,
                    });
                }
                events.push(PathEvent::Begin {
                    at: point(p.x, p.y),
                });
                first_point = Some(*p);
                current_point = *p;
            }
            PathCommand::LineTo(p) => {
                begin_implicit(&mut events, &mut first_point, current_point);
                events.push(PathEvent::Line {
                    from: point(current_point.x, current_point.y),
                    to: point(p.x, p.y),
                });
                current_point = *p;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                begin_implicit(&mut events, &mut first_point, current_point);
                events.push(PathEvent::Cubic {
                    from: point(current_point.x, current_point.y),
                    ctrl1: point(control1.x, control1.y),
                    ctrl2: point(control2.x, control2.y),
                    to: point(end.x, end.y),
                });
                current_point = *end;
            }
            PathCommand::ArcTo {
                radii,
                rotation,
                large_arc,
                sweep,
                end,
            } => {
                begin_implicit(&mut events, &mut first_point, current_point);
                let cubics =
                    arc_to_cubics(current_point, *radii, *rotation, *large_arc, *sweep, *end);

                if cubics.is_empty() {
                    events.push(PathEvent::Line {
                        from: point(current_point.x, current_point.y),
                        to: point(end.x, end.y),
                    });
                } else {
                    let mut prev = current_point;
                    for (ctrl1, ctrl2, end_pt) in cubics {
                        events.push(PathEvent::Cubic {
                            from: point(prev.x, prev.y),
                            ctrl1: point(ctrl1.x, ctrl1.y),
                            ctrl2: point(ctrl2.x, ctrl2.y),
                            to: point(end_pt.x, end_pt.y),
                        });
                        prev = end_pt;
                    }
                }
                current_point = *end;
            }
            PathCommand::Close => {
                if let Some(first) = first_point.take() {
                    events.push(PathEvent::End {
                        last: point(current_point.x, current_point.y),
                        first: point(first.x, first.y),
                        close: true,
                    });
                    current_point = first;
                }
            }
        }
    }

    if let Some(first) = first_point {
        events.push(PathEvent::End {
            last: point(current_point.x, current_point.y),
            first: point(first.x, first.y),
            close: false,
        });
    }

    events
}

/// A flattened subpath
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Flatten a path into one polyline per subpath
///
/// Curves are approximated with line segments no further than `tolerance`
/// pixels from the true curve.
pub fn flatten(path: &Path, tolerance: f32) -> Vec<Polyline> {
    let mut polylines = Vec::new();
    let mut current: Option<Polyline> = None;

    for event in to_events(path).into_iter().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => {
                current = Some(Polyline {
                    points: vec![Point::new(at.x, at.y)],
                    closed: false,
                });
            }
            PathEvent::Line { to, .. } => {
                if let Some(polyline) = current.as_mut() {
                    polyline.points.push(Point::new(to.x, to.y));
                }
            }
            PathEvent::End { close, .. } => {
                if let Some(mut polyline) = current.take() {
                    polyline.closed = close;
                    polylines.push(polyline);
                }
            }
            // Flattening only yields lines
            PathEvent::Quadratic { .. } | PathEvent::Cubic { .. } => {}
        }
    }

    polylines
}

/// Tessellate a path for filling
///
/// Tessellation failures are logged and produce an empty mesh.
pub fn tessellate_fill(path: &Path) -> TessellatedPath {
    let events = to_events(path);

    if events.is_empty() {
        return TessellatedPath::new();
    }

    let mut geometry: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();

    let options = FillOptions::default().with_tolerance(DEFAULT_TOLERANCE);

    let result = tessellator.tessellate(
        events.iter().cloned(),
        &options,
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| {
            vertex.position().to_array()
        }),
    );

    if let Err(err) = result {
        tracing::warn!("Path fill tessellation failed: {:?}", err);
        return TessellatedPath::new();
    }

    TessellatedPath {
        vertices: geometry.vertices,
        indices: geometry.indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn square() -> Path {
        Path::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .line_to(100.0, 100.0)
            .line_to(0.0, 100.0)
            .close()
    }

    #[test]
    fn test_tessellate_square() {
        let result = tessellate_fill(&square());

        assert!(!result.is_empty());
        assert_eq!(result.triangle_count(), 2);
    }

    #[test]
    fn test_tessellate_circle() {
        let path = Path::circle(Point::new(50.0, 50.0), 25.0);
        let result = tessellate_fill(&path);

        assert!(!result.is_empty());
    }

    #[test]
    fn test_tessellate_empty_path() {
        assert!(tessellate_fill(&Path::new()).is_empty());
    }

    #[test]
    fn test_flatten_square() {
        let polylines = flatten(&square(), DEFAULT_TOLERANCE);
        assert_eq!(polylines.len(), 1);
        assert!(polylines[0].closed);
        assert_eq!(polylines[0].points.len(), 4);
    }

    #[test]
    fn test_degenerate_arc_becomes_line() {
        let path = Path::new()
            .move_to(0.0, 10.0)
            .arc_to(Vec2::ZERO, 0.0, false, true, 10.0, 10.0);
        let events = to_events(&path);
        assert!(matches!(events[1], PathEvent::Line { .. }));
    }

    #[test]
    fn test_quarter_arc_stays_on_circle() {
        let path = Path::new()
            .move_to(0.0, 20.0)
            .arc_to_oval(Rect::new(0.0, 0.0, 20.0, 20.0), 180.0, 90.0, false);

        let polylines = flatten(&path, 0.01);
        let center = Point::new(10.0, 10.0);
        // Skip the leading straight segment from (0, 20) to (0, 10)
        for p in polylines[0].points.iter().skip(1) {
            assert!((p.distance(center) - 10.0).abs() < 0.05, "{:?}", p);
        }
        let last = polylines[0].points.last().unwrap();
        assert!(last.approx_eq(Point::new(10.0, 0.0), 1e-3));
    }
}
