//! Bar outline with a bowl-shaped cutout
//!
//! The outline is a single closed contour: straight sides and bottom, and a top
//! edge with a smooth notch centred under the floating indicator.
//!
//! ```text
//!  ┌────────────╮            ╭────────────┐
//!  │             ╲__________╱             │   ← notch depth = cutout radius
//!  │                                      │
//!  └──────────────────────────────────────┘
//!               left_x  offset  right_x
//! ```
//!
//! The notch is two mirrored cubic Béziers meeting at `(offset, cutout_radius)`.
//! It spans `1.3 * cutout_radius` either side of the offset so the curve flares
//! gently into the top edge instead of meeting it at an angle.

use swoop_core::{Path, Rect, Size};

use crate::style::{CornerMode, NavBarMetrics};

/// How far either side of the centre the notch reaches, as a multiple of its radius
pub const EDGE_SPREAD_FACTOR: f32 = 1.3;

/// Key measurements of a notch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutoutGeometry {
    /// Horizontal centre of the notch
    pub offset: f32,
    /// Notch depth; the indicator radius plus the gap around it
    pub cutout_radius: f32,
    /// Half-width of the notch where it meets the top edge
    pub edge_spread: f32,
    pub left_x: f32,
    pub right_x: f32,
}

impl CutoutGeometry {
    pub fn new(offset: f32, circle_radius: f32, circle_gap: f32) -> Self {
        let cutout_radius = circle_radius + circle_gap;
        let edge_spread = cutout_radius * EDGE_SPREAD_FACTOR;
        Self {
            offset,
            cutout_radius,
            edge_spread,
            left_x: offset - edge_spread,
            right_x: offset + edge_spread,
        }
    }
}

/// Builds bar outlines for a fixed set of pixel metrics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutoutPathBuilder {
    pub circle_radius: f32,
    pub corner_radius: f32,
    pub circle_gap: f32,
    pub corner_mode: CornerMode,
}

impl CutoutPathBuilder {
    pub fn new(circle_radius: f32, corner_radius: f32, circle_gap: f32) -> Self {
        Self {
            circle_radius,
            corner_radius,
            circle_gap,
            corner_mode: CornerMode::Degenerate,
        }
    }

    pub fn from_metrics(metrics: &NavBarMetrics) -> Self {
        Self::new(
            metrics.cutout_circle_radius,
            metrics.corner_radius,
            metrics.circle_gap,
        )
        .corner_mode(metrics.corner_mode)
    }

    pub fn corner_mode(mut self, mode: CornerMode) -> Self {
        self.corner_mode = mode;
        self
    }

    pub fn geometry(&self, offset: f32) -> CutoutGeometry {
        CutoutGeometry::new(offset, self.circle_radius, self.circle_gap)
    }

    /// Outline of a bar of `size` with the notch centred at `offset`
    ///
    /// Starts at the bottom-left corner, runs up and along the top edge through
    /// the notch, down the right side, and closes along the bottom. A notch
    /// reaching past either end skips that end's corner and is clipped by the
    /// bar edge.
    pub fn build(&self, offset: f32, size: Size) -> Path {
        let CutoutGeometry {
            offset,
            cutout_radius: r,
            left_x,
            right_x,
            ..
        } = self.geometry(offset);
        let width = size.width;
        let height = size.height;

        let mut path = Path::new().move_to(0.0, height);

        path = match self.corner_mode {
            CornerMode::Degenerate if left_x > 0.0 => {
                path.arc_to_oval(Rect::ZERO, 180.0, 90.0, false)
            }
            CornerMode::Rounded => {
                let corner = self.clamped_corner(size);
                if corner > 0.0 && left_x >= corner {
                    let oval = Rect::new(0.0, 0.0, corner * 2.0, corner * 2.0);
                    path.arc_to_oval(oval, 180.0, 90.0, false)
                } else {
                    path
                }
            }
            _ => path,
        };

        path = path
            .line_to(left_x, 0.0)
            .cubic_to(offset - r / 2.0, 0.0, offset - r, r, offset, r)
            .cubic_to(offset + r, r, offset + r / 2.0, 0.0, right_x, 0.0);

        path = match self.corner_mode {
            CornerMode::Degenerate if right_x < width => {
                path.arc_to_oval(Rect::from_ltrb(0.0, 0.0, width, 0.0), -90.0, 90.0, false)
            }
            CornerMode::Rounded => {
                let corner = self.clamped_corner(size);
                if corner > 0.0 && right_x <= width - corner {
                    let oval = Rect::new(width - corner * 2.0, 0.0, corner * 2.0, corner * 2.0);
                    path.arc_to_oval(oval, -90.0, 90.0, false)
                } else {
                    path
                }
            }
            _ => path,
        };

        path.line_to(width, height).close()
    }

    /// Corner radius limited to what fits in the bar
    fn clamped_corner(&self, size: Size) -> f32 {
        self.corner_radius
            .min(size.height)
            .min(size.width / 2.0)
            .max(0.0)
    }
}

/// Outline of a bar of `size` with a notch centred at `offset`
///
/// Uses the degenerate (sharp) corner mode.
pub fn build_outline(
    offset: f32,
    size: Size,
    circle_radius: f32,
    corner_radius: f32,
    circle_gap: f32,
) -> Path {
    CutoutPathBuilder::new(circle_radius, corner_radius, circle_gap).build(offset, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swoop_core::tessellate::{self, DEFAULT_TOLERANCE};
    use swoop_core::{PathCommand, Point};

    const BAR: Size = Size::new(400.0, 76.0);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_geometry_for_third_slot() {
        let geometry = CutoutGeometry::new(250.0, 45.0, 8.0);
        assert_eq!(geometry.cutout_radius, 53.0);
        assert!(approx(geometry.edge_spread, 68.9));
        assert!(approx(geometry.left_x, 181.1));
        assert!(approx(geometry.right_x, 318.9));
    }

    #[test]
    fn test_outline_commands() {
        let path = build_outline(250.0, BAR, 45.0, 25.0, 8.0);
        let cmds = path.commands();

        assert_eq!(cmds[0], PathCommand::MoveTo(Point::new(0.0, 76.0)));
        // Degenerate top-left corner collapses onto the origin
        assert_eq!(cmds[1], PathCommand::LineTo(Point::ZERO));

        match cmds[2] {
            PathCommand::LineTo(p) => assert!(approx(p.x, 181.1) && p.y == 0.0),
            ref other => panic!("expected LineTo, got {:?}", other),
        }
        match cmds[3] {
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                assert_eq!(control1, Point::new(223.5, 0.0));
                assert_eq!(control2, Point::new(197.0, 53.0));
                assert_eq!(end, Point::new(250.0, 53.0));
            }
            ref other => panic!("expected CubicTo, got {:?}", other),
        }
        match cmds[4] {
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                assert_eq!(control1, Point::new(303.0, 53.0));
                assert_eq!(control2, Point::new(276.5, 0.0));
                assert!(approx(end.x, 318.9) && end.y == 0.0);
            }
            ref other => panic!("expected CubicTo, got {:?}", other),
        }
        // Degenerate top-right corner: line to the top of the flat oval, then along it
        match cmds[5] {
            PathCommand::LineTo(p) => assert!(p.approx_eq(Point::new(200.0, 0.0), 1e-3)),
            ref other => panic!("expected LineTo, got {:?}", other),
        }
        match cmds[6] {
            PathCommand::ArcTo { end, .. } => assert!(end.approx_eq(Point::new(400.0, 0.0), 1e-3)),
            ref other => panic!("expected ArcTo, got {:?}", other),
        }
        assert_eq!(cmds[7], PathCommand::LineTo(Point::new(400.0, 76.0)));
        assert_eq!(cmds[8], PathCommand::Close);
        assert_eq!(cmds.len(), 9);
    }

    #[test]
    fn test_outline_is_closed_for_every_offset() {
        let builder = CutoutPathBuilder::new(45.0, 25.0, 8.0);
        for mode in [CornerMode::Degenerate, CornerMode::Rounded] {
            let builder = builder.corner_mode(mode);
            for i in 1..40 {
                let offset = BAR.width * i as f32 / 40.0;
                let path = builder.build(offset, BAR);
                assert!(path.is_closed());
                assert_eq!(path.start_point(), Some(Point::new(0.0, BAR.height)));
                assert_eq!(path.current_point(), path.start_point());

                let polylines = tessellate::flatten(&path, DEFAULT_TOLERANCE);
                assert_eq!(polylines.len(), 1);
                assert!(polylines[0].closed);
            }
        }
    }

    #[test]
    fn test_notch_bottom_is_cutout_radius_deep() {
        let path = build_outline(150.0, BAR, 45.0, 25.0, 8.0);
        let polylines = tessellate::flatten(&path, 0.01);
        let deepest_top = polylines[0]
            .points
            .iter()
            .filter(|p| p.y < BAR.height)
            .map(|p| p.y)
            .fold(0.0_f32, f32::max);
        assert!(approx(deepest_top, 53.0));
    }

    #[test]
    fn test_corners_skipped_near_edges() {
        // Notch hanging past the left edge: no corner, straight line up to the notch
        let left = build_outline(50.0, BAR, 45.0, 25.0, 8.0);
        assert!(matches!(left.commands()[1], PathCommand::LineTo(p) if p.x < 0.0));

        // Notch hanging past the right edge: the bowl runs straight into the side
        let right = build_outline(350.0, BAR, 45.0, 25.0, 8.0);
        let cmds = right.commands();
        assert!(!cmds.iter().any(|c| matches!(c, PathCommand::ArcTo { .. })));
        assert_eq!(cmds.len(), 7);
    }

    #[test]
    fn test_rounded_corners() {
        let builder = CutoutPathBuilder::new(45.0, 25.0, 8.0).corner_mode(CornerMode::Rounded);
        let path = builder.build(200.0, BAR);
        let arcs: Vec<_> = path
            .commands()
            .iter()
            .filter_map(|c| match c {
                PathCommand::ArcTo { radii, end, .. } => Some((*radii, *end)),
                _ => None,
            })
            .collect();

        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].0.x, 25.0);
        assert!(arcs[0].1.approx_eq(Point::new(25.0, 0.0), 1e-3));
        assert!(arcs[1].1.approx_eq(Point::new(400.0, 25.0), 1e-3));
    }

    #[test]
    fn test_rounded_outline_does_not_self_intersect() {
        let builder = CutoutPathBuilder::new(45.0, 25.0, 8.0).corner_mode(CornerMode::Rounded);
        for offset in [130.0, 200.0, 270.0] {
            let path = builder.build(offset, BAR);
            let points = &tessellate::flatten(&path, DEFAULT_TOLERANCE)[0].points;
            assert!(!has_self_intersection(points), "offset {}", offset);
        }
    }

    #[test]
    fn test_outline_fills() {
        let mesh = tessellate::tessellate_fill(&build_outline(250.0, BAR, 45.0, 25.0, 8.0));
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_zero_width_bar() {
        let path = build_outline(0.0, Size::new(0.0, 76.0), 45.0, 25.0, 8.0);
        assert!(path.is_closed());
    }

    /// Proper crossings between non-adjacent edges of a closed polygon
    fn has_self_intersection(points: &[Point]) -> bool {
        fn cross(o: Point, a: Point, b: Point) -> f32 {
            (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
        }
        fn crosses(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
            let d1 = cross(q1, q2, p1);
            let d2 = cross(q1, q2, p2);
            let d3 = cross(p1, p2, q1);
            let d4 = cross(p1, p2, q2);
            d1 * d2 < 0.0 && d3 * d4 < 0.0
        }

        let n = points.len();
        let edge = |i: usize| (points[i], points[(i + 1) % n]);
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a1, a2) = edge(i);
                let (b1, b2) = edge(j);
                if crosses(a1, a2, b1, b2) {
                    return true;
                }
            }
        }
        false
    }
}
