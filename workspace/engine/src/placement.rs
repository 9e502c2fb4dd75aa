//! First-fit placement of newly activated widgets.
//!
//! A widget that already has an entry keeps it untouched. Otherwise candidate
//! columns are scanned left to right at a row, and the first position that
//! does not collide with any existing entry wins. Dashboards hold only a
//! handful of widgets, so a deterministic scan is all that is needed.

use common::{LayoutEntry, Widget};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::layout::Layout;
use crate::size::effective_size;

/// What to do when the scanned row has no free slot wide enough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Advance one row at a time until the widget fits. Never overlaps as long
    /// as the widget is not wider than the grid.
    #[default]
    NextRow,
    /// Scan row 0 only and settle on the last scanned column, even if that
    /// overlaps another widget.
    AcceptOverlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The widget already had an entry, returned unchanged.
    Existing,
    /// A free slot was found.
    Placed,
    /// No free slot; the entry overlaps at least one other widget.
    Overlapping,
    /// The widget is wider than the grid; its width was cut to the column count.
    TooWide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub entry: LayoutEntry,
    pub outcome: PlacementOutcome,
}

impl Placement {
    /// True when the entry has to be appended to the layout by the caller.
    pub fn is_new(&self) -> bool {
        self.outcome != PlacementOutcome::Existing
    }

    /// True when placement could not honour the non-overlap or size rules.
    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, PlacementOutcome::Overlapping | PlacementOutcome::TooWide)
    }
}

/// Computes grid positions for widgets on a grid of `columns` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placer {
    columns: u32,
    policy: OverflowPolicy,
}

impl Placer {
    pub fn new(columns: u32, policy: OverflowPolicy) -> Self {
        Self {
            columns: columns.max(1),
            policy,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Places `widget` against `layout`. Idempotent: a widget already in the
    /// layout gets its current entry back.
    pub fn place(&self, widget: &Widget, layout: &Layout) -> Placement {
        if let Some(existing) = layout.get(&widget.id) {
            trace!(widget = %widget.id, "Widget already placed");
            return Placement {
                entry: existing.clone(),
                outcome: PlacementOutcome::Existing,
            };
        }

        let (w, h) = effective_size(widget);
        if w > self.columns {
            warn!(
                widget = %widget.id,
                width = w,
                columns = self.columns,
                "Widget is wider than the grid; placing it at column 0 with its width cut"
            );
            let entry = LayoutEntry::new(
                widget.id.clone(),
                0,
                layout.bottom(),
                self.columns,
                h,
                widget.constraints,
            );
            return Placement {
                entry,
                outcome: PlacementOutcome::TooWide,
            };
        }

        let candidate = |x: u32, y: u32| LayoutEntry::new(widget.id.clone(), x, y, w, h, widget.constraints);
        let last_x = self.columns - w;

        let placement = match self.policy {
            OverflowPolicy::AcceptOverlap => match self.scan_row(layout, 0, last_x, &candidate) {
                Some(entry) => Placement {
                    entry,
                    outcome: PlacementOutcome::Placed,
                },
                None => {
                    warn!(widget = %widget.id, "No free column in row 0; accepting overlap");
                    Placement {
                        entry: candidate(last_x, 0),
                        outcome: PlacementOutcome::Overlapping,
                    }
                }
            },
            OverflowPolicy::NextRow => {
                // The first free row is 0 or the bottom edge of some entry, and
                // nothing extends past `bottom`, so the scan succeeds by then.
                let bottom = layout.bottom();
                let entry = candidate_rows(layout)
                    .into_iter()
                    .find_map(|y| self.scan_row(layout, y, last_x, &candidate))
                    .unwrap_or_else(|| candidate(0, bottom));
                Placement {
                    entry,
                    outcome: PlacementOutcome::Placed,
                }
            }
        };

        debug!(
            widget = %widget.id,
            x = placement.entry.x,
            y = placement.entry.y,
            w = placement.entry.w,
            h = placement.entry.h,
            "Placed widget"
        );
        placement
    }

    fn scan_row<F>(&self, layout: &Layout, y: u32, last_x: u32, candidate: &F) -> Option<LayoutEntry>
    where
        F: Fn(u32, u32) -> LayoutEntry,
    {
        (0..=last_x)
            .map(|x| candidate(x, y))
            .find(|entry| layout.collision(entry).is_none())
    }
}

/// Rows where a free slot can first open up, ascending.
fn candidate_rows(layout: &Layout) -> Vec<u32> {
    let mut rows: Vec<u32> = std::iter::once(0)
        .chain(layout.entries().iter().map(LayoutEntry::bottom))
        .collect();
    rows.sort_unstable();
    rows.dedup();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{SizeClass, SizeConstraints, WidgetId};

    fn widget(id: &str, class: SizeClass) -> Widget {
        Widget::new(id, id, &["base"], class, SizeConstraints::new(1, 1, 12, 12))
    }

    fn entry(id: &str, x: u32, y: u32, w: u32, h: u32) -> LayoutEntry {
        LayoutEntry::new(WidgetId::from(id), x, y, w, h, SizeConstraints::new(1, 1, 12, 12))
    }

    #[test]
    fn test_place_is_idempotent() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let mut layout = Layout::new();
        let w = widget("w1", SizeClass::Medium);

        let first = placer.place(&w, &layout);
        assert!(first.is_new());
        layout.push_unique(first.entry.clone());

        let second = placer.place(&w, &layout);
        let third = placer.place(&w, &layout);
        assert_eq!(second.outcome, PlacementOutcome::Existing);
        assert_eq!(second.entry, first.entry);
        assert_eq!(third.entry, second.entry);
    }

    #[test]
    fn test_place_never_overwrites_manual_position() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let layout = Layout::from_entries(vec![entry("w1", 7, 9, 3, 2)]);
        let placement = placer.place(&widget("w1", SizeClass::Large), &layout);
        assert_eq!(placement.entry, entry("w1", 7, 9, 3, 2));
    }

    #[test]
    fn test_place_scans_left_to_right() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let layout = Layout::from_entries(vec![entry("a", 0, 0, 4, 3)]);
        let placement = placer.place(&widget("b", SizeClass::Small), &layout);
        assert_eq!((placement.entry.x, placement.entry.y), (4, 0));
        assert_eq!((placement.entry.w, placement.entry.h), (2, 2));
    }

    #[test]
    fn test_same_row_placements_do_not_overlap() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let mut layout = Layout::new();
        for (id, class) in [
            ("a", SizeClass::Medium),
            ("b", SizeClass::Small),
            ("c", SizeClass::Medium),
            ("d", SizeClass::Small),
        ] {
            let placement = placer.place(&widget(id, class), &layout);
            assert_eq!(placement.entry.y, 0, "{id} should fit in the first row");
            layout.push_unique(placement.entry);
        }
        assert!(layout.overlapping_pairs().is_empty());
    }

    #[test]
    fn test_next_row_policy_moves_down_when_row_is_full() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let layout = Layout::from_entries(vec![entry("a", 0, 0, 6, 2), entry("b", 6, 0, 6, 3)]);

        let placement = placer.place(&widget("c", SizeClass::Large), &layout);

        assert_eq!(placement.outcome, PlacementOutcome::Placed);
        assert_eq!((placement.entry.x, placement.entry.y), (0, 2));
        assert!(layout.collision(&placement.entry).is_none());
    }

    #[test]
    fn test_next_row_finds_gap_between_rows() {
        let placer = Placer::new(8, OverflowPolicy::NextRow);
        let layout = Layout::from_entries(vec![
            entry("a", 0, 0, 8, 2),
            entry("b", 0, 2, 4, 1),
            entry("c", 0, 6, 8, 2),
        ]);

        let placement = placer.place(&widget("d", SizeClass::Medium), &layout);

        assert_eq!((placement.entry.x, placement.entry.y), (4, 2));
        assert!(layout.collision(&placement.entry).is_none());
    }

    #[test]
    fn test_entry_at_the_last_row_does_not_stall_placement() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let layout = Layout::from_entries(vec![entry("a", 0, 0, 12, 2), entry("far", 0, u32::MAX, 12, 3)]);

        let placement = placer.place(&widget("b", SizeClass::Small), &layout);

        assert_eq!((placement.entry.x, placement.entry.y), (0, 2));
    }

    #[test]
    fn test_accept_overlap_policy_keeps_last_scanned_column() {
        let placer = Placer::new(12, OverflowPolicy::AcceptOverlap);
        let layout = Layout::from_entries(vec![entry("a", 0, 0, 12, 2)]);

        let placement = placer.place(&widget("b", SizeClass::Medium), &layout);

        assert_eq!(placement.outcome, PlacementOutcome::Overlapping);
        assert!(placement.is_degraded());
        assert_eq!((placement.entry.x, placement.entry.y), (8, 0));
    }

    #[test]
    fn test_widget_wider_than_grid_is_cut_and_reported() {
        let placer = Placer::new(4, OverflowPolicy::NextRow);
        let layout = Layout::from_entries(vec![entry("a", 0, 0, 4, 2)]);

        let placement = placer.place(&widget("big", SizeClass::Large), &layout);

        assert_eq!(placement.outcome, PlacementOutcome::TooWide);
        assert_eq!((placement.entry.x, placement.entry.y, placement.entry.w), (0, 2, 4));
    }

    #[test]
    fn test_placement_embeds_widget_constraints() {
        let placer = Placer::new(12, OverflowPolicy::NextRow);
        let w = Widget::new("w", "W", &["base"], SizeClass::Small, SizeConstraints::new(3, 3, 5, 6));
        let placement = placer.place(&w, &Layout::new());
        assert_eq!(placement.entry.constraints(), SizeConstraints::new(3, 3, 5, 6));
        assert_eq!((placement.entry.w, placement.entry.h), (3, 3));
    }
}
