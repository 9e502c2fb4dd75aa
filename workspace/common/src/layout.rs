use serde::{Deserialize, Serialize};

use crate::catalog::{SizeConstraints, WidgetId};

/// Placement (position + size, in grid cells) of one active widget.
///
/// Persisted as camelCase JSON. `i` is accepted in place of `widgetId` so
/// layouts exported by react-grid-layout style grids load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    #[serde(alias = "i")]
    pub widget_id: WidgetId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
    pub max_w: u32,
    pub max_h: u32,
}

impl LayoutEntry {
    pub fn new(widget_id: WidgetId, x: u32, y: u32, w: u32, h: u32, constraints: SizeConstraints) -> Self {
        Self {
            widget_id,
            x,
            y,
            w,
            h,
            min_w: constraints.min_w,
            min_h: constraints.min_h,
            max_w: constraints.max_w,
            max_h: constraints.max_h,
        }
    }

    pub fn constraints(&self) -> SizeConstraints {
        SizeConstraints::new(self.min_w, self.min_h, self.max_w, self.max_h)
    }

    /// Column just past the entry. Saturates, so stored coordinates near
    /// `u32::MAX` stay comparable instead of overflowing.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Row just below the entry; saturating like [`LayoutEntry::right`].
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Axis-aligned overlap on (x, x+w) x (y, y+h); touching edges do not overlap.
    pub fn overlaps(&self, other: &LayoutEntry) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}
