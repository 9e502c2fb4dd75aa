//! The in-memory collection of placed widgets.

use std::collections::BTreeSet;

use common::{LayoutEntry, WidgetId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ordered collection of [`LayoutEntry`] with at most one entry per widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layout from arbitrary entries, keeping the first entry of each widget.
    pub fn from_entries(entries: Vec<LayoutEntry>) -> Self {
        let mut layout = Self::new();
        layout.replace(entries);
        layout
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LayoutEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &WidgetId) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| &e.widget_id == id)
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Appends `entry` unless its widget already has one. Returns whether it was added.
    pub fn push_unique(&mut self, entry: LayoutEntry) -> bool {
        if self.contains(&entry.widget_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, id: &WidgetId) -> Option<LayoutEntry> {
        let index = self.entries.iter().position(|e| &e.widget_id == id)?;
        Some(self.entries.remove(index))
    }

    /// Drops every entry whose widget is not in `active`; returns the dropped ids.
    pub fn retain_active(&mut self, active: &BTreeSet<WidgetId>) -> Vec<WidgetId> {
        let mut dropped = Vec::new();
        self.entries.retain(|entry| {
            let keep = active.contains(&entry.widget_id);
            if !keep {
                dropped.push(entry.widget_id.clone());
            }
            keep
        });
        if !dropped.is_empty() {
            debug!(?dropped, "Pruned inactive layout entries");
        }
        dropped
    }

    /// Replaces the whole collection; later duplicates of a widget are discarded.
    pub fn replace(&mut self, entries: Vec<LayoutEntry>) {
        self.entries.clear();
        for entry in entries {
            let id = entry.widget_id.clone();
            if !self.push_unique(entry) {
                warn!(widget = %id, "Discarding duplicate layout entry");
            }
        }
    }

    /// First free row below every entry (max of `y + h`).
    pub fn bottom(&self) -> u32 {
        self.entries.iter().map(LayoutEntry::bottom).max().unwrap_or(0)
    }

    /// Returns the first entry overlapping `candidate`, ignoring the candidate's own widget.
    pub fn collision(&self, candidate: &LayoutEntry) -> Option<&LayoutEntry> {
        self.entries
            .iter()
            .find(|e| e.widget_id != candidate.widget_id && e.overlaps(candidate))
    }

    /// Every pair of overlapping entries, mostly useful for diagnostics and tests.
    pub fn overlapping_pairs(&self) -> Vec<(WidgetId, WidgetId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.entries.iter().enumerate() {
            for b in &self.entries[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((a.widget_id.clone(), b.widget_id.clone()));
                }
            }
        }
        pairs
    }
}
