use std::sync::Arc;

use egui::{Pos2, Rect, RectAlign, Vec2};

/// Decides where a floating panel goes, given the widget it belongs to.
///
/// Implement this to plug in your own positioning.
pub trait Placement: Send + Sync {
    /// Top-left corner of a panel of `panel_size` attached to `anchor`, kept inside `bounds`
    /// where possible.
    fn compute_placement(&self, anchor: Rect, panel_size: Vec2, bounds: Rect) -> Pos2;
}

/// Places the panel along an edge of the anchor using [`RectAlign`],
/// then shifts it back inside the bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignedPlacement {
    pub align: RectAlign,

    /// Distance between the anchor and the panel.
    pub gap: f32,
}

impl AlignedPlacement {
    /// Centered below the anchor, 8 points away.
    pub const BELOW: Self = Self {
        align: RectAlign::BOTTOM,
        gap: 8.0,
    };
}

impl Default for AlignedPlacement {
    fn default() -> Self {
        Self::BELOW
    }
}

impl Placement for AlignedPlacement {
    fn compute_placement(&self, anchor: Rect, panel_size: Vec2, bounds: Rect) -> Pos2 {
        let mut pos = self.align.align_rect(&anchor, panel_size, self.gap).min;

        // Right and bottom first, so a panel larger than the bounds sticks to the top left.
        pos.x = pos.x.min(bounds.right() - panel_size.x).max(bounds.left());
        pos.y = pos.y.min(bounds.bottom() - panel_size.y).max(bounds.top());
        pos
    }
}

/// Whether the calendar popover is showing, and where.
#[derive(Clone)]
pub struct PopoverController {
    visible: bool,
    placement: Arc<dyn Placement>,
}

impl Default for PopoverController {
    fn default() -> Self {
        Self::new(AlignedPlacement::BELOW)
    }
}

impl std::fmt::Debug for PopoverController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopoverController")
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl PopoverController {
    pub fn new(placement: impl Placement + 'static) -> Self {
        Self {
            visible: false,
            placement: Arc::new(placement),
        }
    }

    pub fn set_placement(&mut self, placement: impl Placement + 'static) {
        self.placement = Arc::new(placement);
    }

    pub fn set_shared_placement(&mut self, placement: Arc<dyn Placement>) {
        self.placement = placement;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::debug!("Date picker popover toggled, visible: {}", self.visible);
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        if self.visible {
            log::debug!("Date picker popover closed");
        }
        self.visible = false;
    }

    /// Where to put the panel this frame.
    pub fn place(&self, anchor: Rect, panel_size: Vec2, bounds: Rect) -> Pos2 {
        self.placement.compute_placement(anchor, panel_size, bounds)
    }
}
