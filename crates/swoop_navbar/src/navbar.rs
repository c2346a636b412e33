//! Navigation bar state
//!
//! [`NavBar`] is the single owner of everything the widget remembers between
//! frames. The host feeds it layout and input events and calls
//! [`NavBar::frame`] once per display frame; each frame runs
//! target → motion → outline in that order.
//!
//! ```rust
//! use swoop_navbar::{BarGeometry, NavBar, NavBarStyle, NavItem, NavItems};
//!
//! let items = NavItems::new([
//!     NavItem::new("home", "Home", "home"),
//!     NavItem::new("requests", "Requests", "mail_outline"),
//!     NavItem::new("new", "New", "add"),
//!     NavItem::new("profile", "Profile", "person"),
//! ])?;
//! let mut bar = NavBar::new(items, NavBarStyle::default())?;
//! bar.set_geometry(BarGeometry::new(400.0, 76.0));
//!
//! bar.navigate_to("new")?;
//! while !bar.is_idle() {
//!     bar.frame(1.0 / 60.0);
//! }
//! assert_eq!(bar.motion().offset(), 250.0);
//! # Ok::<(), swoop_navbar::NavBarError>(())
//! ```

use std::fmt;

use swoop_core::{Path, Point, Size};
use tracing::{debug, trace};

use crate::cutout::CutoutPathBuilder;
use crate::error::{NavBarError, Result};
use crate::item::{IconRef, NavItem, NavItems};
use crate::motion::MotionController;
use crate::position::compute_target_offset;
use crate::selection::{SavedSelection, SelectionState};
use crate::style::{NavBarMetrics, NavBarStyle};

/// Laid-out size of the bar in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarGeometry {
    pub width_px: f32,
    pub height_px: f32,
}

impl BarGeometry {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width_px, self.height_px)
    }
}

/// Where to draw the floating indicator this frame
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorFrame {
    /// Top-left of the indicator's bounding box, relative to the bar's top-left
    pub top_left: Point,
    pub center: Point,
    pub radius: f32,
    /// Filled circle to draw
    pub shape: Path,
    /// Item whose icon the indicator shows
    pub item_id: String,
    pub icon: IconRef,
}

/// Everything the host needs to draw one frame
#[derive(Clone, Debug)]
pub struct NavBarFrame {
    pub outline: Path,
    pub indicator: IndicatorFrame,
    /// Opacity of each bar icon, in slot order
    pub icon_opacities: Vec<f32>,
    /// False once every channel has settled
    pub animating: bool,
}

type SelectListener = Box<dyn FnMut(usize, &NavItem)>;

/// Bottom navigation bar with a floating indicator and a cutout outline
pub struct NavBar {
    items: NavItems,
    style: NavBarStyle,
    metrics: NavBarMetrics,
    outline: CutoutPathBuilder,
    geometry: BarGeometry,
    selection: SelectionState,
    motion: MotionController,
    listener: Option<SelectListener>,
}

impl NavBar {
    /// Create a bar with the first item selected
    ///
    /// Until [`NavBar::set_geometry`] is called the bar has zero width and the
    /// style's height.
    pub fn new(items: NavItems, style: NavBarStyle) -> Result<Self> {
        style.validate()?;
        let metrics = style.resolve();
        let mut motion = MotionController::new(
            style.spring.to_config(),
            metrics.indicator_radius,
            metrics.indicator_lift,
            style.icon_fade_ms,
        );
        let selection = SelectionState::new(0, &items);
        motion.set_selected_icon(selection.index(), items.len());

        Ok(Self {
            geometry: BarGeometry::new(0.0, metrics.bar_height),
            outline: CutoutPathBuilder::from_metrics(&metrics),
            items,
            style,
            metrics,
            selection,
            motion,
            listener: None,
        })
    }

    pub fn items(&self) -> &NavItems {
        &self.items
    }

    pub fn style(&self) -> &NavBarStyle {
        &self.style
    }

    pub fn metrics(&self) -> &NavBarMetrics {
        &self.metrics
    }

    pub fn geometry(&self) -> BarGeometry {
        self.geometry
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn selected_item(&self) -> Option<&NavItem> {
        self.items.get(self.selection.index())
    }

    /// Register the callback fired when a navigate event changes the selection
    ///
    /// Replaces any previous listener. Host-driven changes through
    /// [`NavBar::sync_selection`] and [`NavBar::restore_selection`] do not fire it.
    pub fn on_select<F>(&mut self, listener: F)
    where
        F: FnMut(usize, &NavItem) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Update the laid-out size
    pub fn set_geometry(&mut self, geometry: BarGeometry) {
        if geometry == self.geometry {
            return;
        }
        debug!(
            width = geometry.width_px,
            height = geometry.height_px,
            "bar geometry changed"
        );
        self.geometry = geometry;
        self.update_target();
    }

    /// Change the pixel density and re-resolve every length
    pub fn set_density(&mut self, density: f32) -> Result<()> {
        if !density.is_finite() || density <= 0.0 {
            return Err(NavBarError::InvalidStyle(format!(
                "density must be positive, got {density}"
            )));
        }
        self.style.density = density;
        self.metrics = self.style.resolve();
        self.outline = CutoutPathBuilder::from_metrics(&self.metrics);
        self.motion
            .set_indicator_metrics(self.metrics.indicator_radius, self.metrics.indicator_lift);
        debug!(density, "density changed");
        Ok(())
    }

    /// Select the slot at `index` in response to user input
    ///
    /// Out-of-range indices are clamped. Selecting the current item does
    /// nothing. Returns `true` and fires the listener if the selection changed.
    pub fn navigate_to_index(&mut self, index: usize) -> bool {
        if !self.selection.select(index, &self.items) {
            return false;
        }
        let index = self.selection.index();
        debug!(index, "selection changed by navigation");
        self.apply_selection();

        if let (Some(listener), Some(item)) = (self.listener.as_mut(), self.items.get(index)) {
            listener(index, item);
        }
        true
    }

    /// Select the item with `id` in response to user input
    pub fn navigate_to(&mut self, id: &str) -> Result<bool> {
        let index = self
            .items
            .index_of(id)
            .ok_or_else(|| NavBarError::UnknownItem(id.to_string()))?;
        Ok(self.navigate_to_index(index))
    }

    /// Follow a route change made by the host, without firing the listener
    pub fn sync_selection(&mut self, id: &str) -> Result<()> {
        let index = self
            .items
            .index_of(id)
            .ok_or_else(|| NavBarError::UnknownItem(id.to_string()))?;
        if self.selection.select(index, &self.items) {
            debug!(index, id, "selection synced from host");
            self.apply_selection();
        }
        Ok(())
    }

    /// Swap in a new item list
    ///
    /// The selection stays on the same item if its id survives; otherwise the
    /// old index is clamped into the new list.
    pub fn replace_items(&mut self, items: NavItems) {
        self.selection.carry_over(&self.items, &items);
        debug!(
            from = self.items.len(),
            to = items.len(),
            selected = self.selection.index(),
            "items replaced"
        );
        self.items = items;
        self.apply_selection();
    }

    pub fn save_selection(&self) -> SavedSelection {
        self.selection.save(&self.items)
    }

    /// Restore a previously saved selection, without firing the listener
    pub fn restore_selection(&mut self, saved: &SavedSelection) {
        self.selection = SelectionState::restore(saved, &self.items);
        debug!(index = self.selection.index(), "selection restored");
        self.apply_selection();
    }

    /// Advance by `dt` seconds and describe what to draw
    pub fn frame(&mut self, dt: f32) -> NavBarFrame {
        self.update_target();
        self.motion.advance(dt);

        let offset = self.motion.offset();
        let outline = self.outline.build(offset, self.geometry.size());

        let radius = self.motion.indicator_radius();
        let top_left = self.motion.indicator_position();
        let (item_id, icon) = match self.selected_item() {
            Some(item) => (item.id.clone(), item.icon.clone()),
            None => (String::new(), IconRef::new("")),
        };
        let animating = !self.motion.is_idle();

        trace!(offset, x = top_left.x, y = top_left.y, animating, "frame");

        let center = top_left.offset(radius, radius);

        NavBarFrame {
            outline,
            indicator: IndicatorFrame {
                top_left,
                center,
                radius,
                shape: Path::circle(center, radius),
                item_id,
                icon,
            },
            icon_opacities: self.motion.icon_opacities(),
            animating,
        }
    }

    /// True when no channel will move until the next event
    pub fn is_idle(&self) -> bool {
        self.motion.is_idle()
    }

    fn apply_selection(&mut self) {
        self.motion
            .set_selected_icon(self.selection.index(), self.items.len());
        self.update_target();
    }

    fn update_target(&mut self) {
        let target = compute_target_offset(
            self.selection.index(),
            self.items.len(),
            self.geometry.width_px,
        );
        self.motion.retarget(target);
    }
}

impl fmt::Debug for NavBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavBar")
            .field("items", &self.items)
            .field("style", &self.style)
            .field("geometry", &self.geometry)
            .field("selection", &self.selection)
            .field("motion", &self.motion)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
