//! Easing curves for timed animations

/// Easing function mapping linear progress `t ∈ [0, 1]` to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Accelerate from rest, end at full speed (`cubic-bezier(0.4, 0, 1, 1)`)
    EaseIn,
    /// Start at full speed, decelerate to rest (`cubic-bezier(0, 0, 0.2, 1)`)
    EaseOut,
    /// Fast out, slow in (`cubic-bezier(0.4, 0, 0.2, 1)`)
    EaseInOut,
    /// Custom CSS-style cubic Bézier with control points `(x1, y1)` and `(x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing to linear progress `t`
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints always map to themselves.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// One coordinate of a unit cubic Bézier with endpoints 0 and 1
fn bezier_coord(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_coord_derivative(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Evaluate the curve's y at the parameter whose x equals `t`
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    const EPSILON: f32 = 1e-5;

    // Newton-Raphson first, it converges in a handful of steps for sane curves
    let mut s = t;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - t;
        if err.abs() < EPSILON {
            return bezier_coord(y1, y2, s);
        }
        let slope = bezier_coord_derivative(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    // Bisection fallback; x(s) is monotonic for x1, x2 in [0, 1]
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier_coord(x1, x2, s);
        if (x - t).abs() < EPSILON {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_coord(y1, y2, s)
}
