//! Motion of the cutout, indicator and icons
//!
//! The controller owns three spring channels (cutout offset, indicator x and
//! indicator y) that share one [`SpringConfig`], plus one opacity tween per bar
//! icon. The host retargets it when the selection or geometry changes and
//! advances it once per frame.

use smallvec::SmallVec;
use swoop_animation::{Easing, Spring, SpringConfig, Tween};
use swoop_core::Point;
use tracing::debug;

/// Offset target meaning "not laid out yet"
///
/// Moving away from it snaps instead of animating, so the bar does not sweep
/// in from the left edge on first layout.
pub const COLD_START_TARGET: f32 = 0.0;

/// Opacity of the icon that has been lifted into the indicator
pub const SELECTED_ICON_OPACITY: f32 = 0.0;
/// Opacity of every other icon
pub const UNSELECTED_ICON_OPACITY: f32 = 1.0;

fn icon_target(index: usize, selected: usize) -> f32 {
    if index == selected {
        SELECTED_ICON_OPACITY
    } else {
        UNSELECTED_ICON_OPACITY
    }
}

/// Animated state of a navigation bar
#[derive(Clone, Debug)]
pub struct MotionController {
    cutout: Spring,
    indicator_x: Spring,
    indicator_y: Spring,
    icons: SmallVec<[Tween; 5]>,
    icon_fade_ms: u32,
    indicator_radius: f32,
    indicator_lift: f32,
    last_target: f32,
}

impl MotionController {
    /// Create a controller resting at the cold-start position
    ///
    /// `indicator_radius` and `indicator_lift` are in pixels.
    pub fn new(
        config: SpringConfig,
        indicator_radius: f32,
        indicator_lift: f32,
        icon_fade_ms: u32,
    ) -> Self {
        let x = COLD_START_TARGET - indicator_radius;
        Self {
            cutout: Spring::new(config, COLD_START_TARGET),
            indicator_x: Spring::new(config, x),
            indicator_y: Spring::new(config, -indicator_lift),
            icons: SmallVec::new(),
            icon_fade_ms,
            indicator_radius,
            indicator_lift,
            last_target: COLD_START_TARGET,
        }
    }

    /// Move every channel towards the slot centred at `target_offset`
    ///
    /// From the cold-start target the channels jump straight to the new
    /// position and any icon fade finishes at once. Otherwise they animate
    /// from their in-flight value and velocity. Returns `true` if the target
    /// changed.
    pub fn retarget(&mut self, target_offset: f32) -> bool {
        if target_offset == self.last_target {
            return false;
        }

        if self.last_target == COLD_START_TARGET {
            debug!(target_offset, "cold start, snapping to target");
            self.cutout.snap_to(target_offset);
            self.indicator_x
                .snap_to(target_offset - self.indicator_radius);
            self.indicator_y.snap_to(-self.indicator_lift);
            for icon in &mut self.icons {
                icon.snap_to(icon.target());
            }
        } else {
            debug!(
                from = self.cutout.value(),
                to = target_offset,
                velocity = self.cutout.velocity(),
                "retargeting"
            );
            self.cutout.set_target(target_offset);
            self.indicator_x
                .set_target(target_offset - self.indicator_radius);
            self.indicator_y.set_target(-self.indicator_lift);
        }

        self.last_target = target_offset;
        true
    }

    /// Update the indicator's pixel metrics, e.g. after a density change
    pub fn set_indicator_metrics(&mut self, indicator_radius: f32, indicator_lift: f32) {
        if indicator_radius == self.indicator_radius && indicator_lift == self.indicator_lift {
            return;
        }
        self.indicator_radius = indicator_radius;
        self.indicator_lift = indicator_lift;

        let x = self.last_target - indicator_radius;
        let y = -indicator_lift;
        if self.last_target == COLD_START_TARGET {
            self.indicator_x.snap_to(x);
            self.indicator_y.snap_to(y);
        } else {
            self.indicator_x.set_target(x);
            self.indicator_y.set_target(y);
        }
    }

    /// Fade the selected icon out and every other icon in
    ///
    /// Icons seen for the first time start at their target opacity. Existing
    /// icons fade from wherever they currently are.
    pub fn set_selected_icon(&mut self, selected: usize, item_count: usize) {
        self.icons.truncate(item_count);
        while self.icons.len() < item_count {
            let index = self.icons.len();
            self.icons.push(Tween::new(
                icon_target(index, selected),
                self.icon_fade_ms,
                Easing::EaseInOut,
            ));
        }
        for (index, icon) in self.icons.iter_mut().enumerate() {
            icon.set_target(icon_target(index, selected));
        }
    }

    /// Advance every channel by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        for spring in [&mut self.cutout, &mut self.indicator_x, &mut self.indicator_y] {
            spring.step(dt);
            if spring.is_settled() {
                spring.snap_to(spring.target());
            }
        }
        let dt_ms = dt * 1000.0;
        for icon in &mut self.icons {
            icon.tick(dt_ms);
        }
    }

    /// True when nothing will move until the next retarget
    pub fn is_idle(&self) -> bool {
        self.cutout.is_settled()
            && self.indicator_x.is_settled()
            && self.indicator_y.is_settled()
            && self.icons.iter().all(Tween::is_finished)
    }

    /// Current cutout centre
    pub fn offset(&self) -> f32 {
        self.cutout.value()
    }

    pub fn target_offset(&self) -> f32 {
        self.last_target
    }

    /// Current cutout velocity in px/s
    pub fn velocity(&self) -> f32 {
        self.cutout.velocity()
    }

    /// Top-left corner of the indicator's bounding box, relative to the bar
    pub fn indicator_position(&self) -> Point {
        Point::new(self.indicator_x.value(), self.indicator_y.value())
    }

    pub fn indicator_radius(&self) -> f32 {
        self.indicator_radius
    }

    pub fn icon_opacity(&self, index: usize) -> Option<f32> {
        self.icons.get(index).map(Tween::value)
    }

    pub fn icon_opacities(&self) -> Vec<f32> {
        self.icons.iter().map(Tween::value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> MotionController {
        MotionController::new(SpringConfig::glide(), 28.0, 15.0, 300)
    }

    fn run_until_idle(motion: &mut MotionController) -> usize {
        let mut frames = 0;
        while !motion.is_idle() {
            motion.advance(DT);
            frames += 1;
            assert!(frames < 2_000, "motion never settled");
        }
        frames
    }

    #[test]
    fn test_cold_start_has_no_intermediate_frames() {
        let mut motion = controller();
        assert!(motion.retarget(250.0));

        assert_eq!(motion.offset(), 250.0);
        assert_eq!(motion.velocity(), 0.0);
        assert_eq!(motion.indicator_position(), Point::new(222.0, -15.0));
        assert!(motion.is_idle());
    }

    #[test]
    fn test_retarget_animates_and_settles() {
        let mut motion = controller();
        motion.retarget(50.0);
        motion.retarget(250.0);

        assert_eq!(motion.offset(), 50.0);
        assert!(!motion.is_idle());

        motion.advance(DT);
        let first = motion.offset();
        assert!(first > 50.0 && first < 250.0);

        run_until_idle(&mut motion);
        assert_eq!(motion.offset(), 250.0);
        assert_eq!(motion.indicator_position(), Point::new(222.0, -15.0));

        // Settled means settled
        for _ in 0..120 {
            motion.advance(DT);
            assert_eq!(motion.offset(), 250.0);
        }
    }

    #[test]
    fn test_indicator_tracks_cutout() {
        let mut motion = controller();
        motion.retarget(50.0);
        motion.retarget(350.0);
        for _ in 0..30 {
            motion.advance(DT);
            let indicator = motion.indicator_position();
            assert!((indicator.x - (motion.offset() - 28.0)).abs() < 1e-2);
            assert_eq!(indicator.y, -15.0);
        }
    }

    #[test]
    fn test_retarget_mid_flight_keeps_velocity() {
        let mut motion = controller();
        motion.retarget(50.0);
        motion.retarget(350.0);
        for _ in 0..20 {
            motion.advance(DT);
        }
        let position = motion.offset();
        let velocity = motion.velocity();
        assert!(velocity > 0.0);

        assert!(motion.retarget(150.0));
        assert_eq!(motion.offset(), position);
        assert_eq!(motion.velocity(), velocity);

        run_until_idle(&mut motion);
        assert_eq!(motion.offset(), 150.0);
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut motion = controller();
        motion.retarget(50.0);
        assert!(!motion.retarget(50.0));
    }

    #[test]
    fn test_returning_to_cold_target_snaps_next_move() {
        let mut motion = controller();
        motion.retarget(50.0);
        motion.retarget(COLD_START_TARGET);
        run_until_idle(&mut motion);

        motion.retarget(150.0);
        assert_eq!(motion.offset(), 150.0);
    }

    #[test]
    fn test_icon_opacities() {
        let mut motion = controller();
        motion.set_selected_icon(0, 4);
        assert_eq!(motion.icon_opacities(), vec![0.0, 1.0, 1.0, 1.0]);
        assert!(motion.is_idle());

        motion.set_selected_icon(2, 4);
        assert!(!motion.is_idle());
        motion.advance(0.15);
        let halfway = motion.icon_opacities();
        assert!(halfway[0] > 0.0 && halfway[0] < 1.0);
        assert!(halfway[2] > 0.0 && halfway[2] < 1.0);
        assert_eq!(halfway[1], 1.0);

        motion.advance(0.15);
        assert_eq!(motion.icon_opacities(), vec![1.0, 1.0, 0.0, 1.0]);
        assert!(motion.is_idle());
    }

    #[test]
    fn test_cold_start_finishes_icon_fade() {
        let mut motion = controller();
        motion.set_selected_icon(0, 3);
        motion.set_selected_icon(2, 3);
        assert!(!motion.is_idle());

        motion.retarget(250.0);
        assert_eq!(motion.icon_opacities(), vec![1.0, 1.0, 0.0]);
        assert!(motion.is_idle());
    }

    #[test]
    fn test_icon_count_change() {
        let mut motion = controller();
        motion.set_selected_icon(1, 3);
        motion.set_selected_icon(1, 5);
        assert_eq!(motion.icon_opacities(), vec![1.0, 0.0, 1.0, 1.0, 1.0]);

        motion.set_selected_icon(1, 2);
        assert_eq!(motion.icon_opacity(1), Some(0.0));
        assert_eq!(motion.icon_opacity(2), None);
    }

    #[test]
    fn test_density_change_moves_indicator() {
        let mut motion = controller();
        motion.retarget(100.0);
        motion.set_indicator_metrics(56.0, 20.0);
        assert!(!motion.is_idle());

        run_until_idle(&mut motion);
        assert_eq!(motion.indicator_position(), Point::new(44.0, -20.0));
    }

    #[test]
    fn test_non_positive_dt_ignored() {
        let mut motion = controller();
        motion.retarget(50.0);
        motion.retarget(250.0);
        motion.advance(0.0);
        motion.advance(-1.0);
        motion.advance(f32::NAN);
        assert_eq!(motion.offset(), 50.0);
    }
}
