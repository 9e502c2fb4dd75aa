//! The reconciliation controller.
//!
//! [`Dashboard`] is an explicit state machine over the active profiles, the
//! active widgets and the layout. Each user action has one entry point; after
//! every transition the layout holds exactly one entry per active, visible
//! widget and nothing else. Manually placed widgets that stay active keep
//! their position.
//!
//! Persistence contract:
//! - `init` reads both keys once.
//! - Profile toggles write `activeProfiles` immediately.
//! - The layout is written by [`Dashboard::save_layout`], or after every
//!   layout-affecting event when [`PersistPolicy::Immediate`] is selected.
//! - Store failures never abort a transition; they are queued as [`Notice`]s.

use std::collections::BTreeSet;

use common::{DEFAULT_COLUMNS, LayoutEntry, ProfileId, Widget, WidgetId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::layout::Layout;
use crate::notice::Notice;
use crate::persistence::{self, ACTIVE_PROFILES_KEY, LAYOUT_KEY};
use crate::placement::{OverflowPolicy, Placer};
use crate::size::effective_size;
use crate::storage::KeyValueStore;
use crate::visibility::visible;

/// When layout changes reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Only on an explicit [`Dashboard::save_layout`].
    #[default]
    Deferred,
    /// After every layout-affecting transition.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub columns: u32,
    pub overflow: OverflowPolicy,
    pub persist: PersistPolicy,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            overflow: OverflowPolicy::default(),
            persist: PersistPolicy::default(),
        }
    }
}

/// The `(ActiveProfiles, ActiveWidgets, Layout)` tuple after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub active_profiles: BTreeSet<ProfileId>,
    pub active_widgets: BTreeSet<WidgetId>,
    pub layout: Layout,
}

/// Effect of one event on the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub changed: bool,
    /// Widgets that received a new layout entry.
    pub added: Vec<WidgetId>,
    /// Widgets whose layout entry was dropped.
    pub removed: Vec<WidgetId>,
}

impl Transition {
    fn unchanged() -> Self {
        Self::default()
    }
}

pub struct Dashboard<S: KeyValueStore> {
    catalog: Catalog,
    store: S,
    placer: Placer,
    persist: PersistPolicy,
    active_profiles: BTreeSet<ProfileId>,
    active_widgets: BTreeSet<WidgetId>,
    layout: Layout,
    notices: Vec<Notice>,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Restores the dashboard from `store`.
    ///
    /// Missing or corrupt values fall back to the base profile and a freshly
    /// placed layout; saved entries for widgets that are no longer active are
    /// dropped.
    #[instrument(skip_all, fields(columns = options.columns))]
    pub fn init(catalog: Catalog, store: S, options: DashboardOptions) -> Self {
        let mut dashboard = Self {
            catalog,
            store,
            placer: Placer::new(options.columns, options.overflow),
            persist: options.persist,
            active_profiles: BTreeSet::new(),
            active_widgets: BTreeSet::new(),
            layout: Layout::new(),
            notices: Vec::new(),
        };

        let stored_profiles = persistence::load_active_profiles(&dashboard.store);
        let stored_profiles = dashboard.recover(ACTIVE_PROFILES_KEY, stored_profiles);
        dashboard.active_profiles = dashboard.sanitize_profiles(stored_profiles.unwrap_or_default());

        dashboard.active_widgets = dashboard
            .catalog
            .widgets()
            .iter()
            .filter(|w| w.profiles.iter().any(|p| dashboard.active_profiles.contains(p)))
            .map(|w| w.id.clone())
            .collect();

        let stored_layout = persistence::load_layout(&dashboard.store);
        let mut layout = dashboard.recover(LAYOUT_KEY, stored_layout).unwrap_or_default();
        let dropped = layout.retain_active(&dashboard.active_widgets);
        dashboard.layout = layout;

        let added = place_missing(
            &dashboard.placer,
            &mut dashboard.layout,
            &mut dashboard.notices,
            dashboard
                .catalog
                .widgets()
                .iter()
                .filter(|w| dashboard.active_widgets.contains(&w.id)),
        );

        info!(
            profiles = ?dashboard.active_profiles,
            entries = dashboard.layout.len(),
            placed = added.len(),
            dropped = dropped.len(),
            "Dashboard initialized"
        );
        dashboard
    }

    /// Enables or disables a profile. The fixed profile cannot be toggled.
    #[instrument(skip(self), fields(profile = %id))]
    pub fn toggle_profile(&mut self, id: &ProfileId) -> Result<Transition> {
        let profile = self
            .catalog
            .profile(id)
            .ok_or_else(|| EngineError::UnknownProfile(id.clone()))?;
        if profile.fixed {
            debug!("Fixed profile cannot be toggled");
            return Ok(Transition::unchanged());
        }

        if self.active_profiles.insert(id.clone()) {
            for widget in self.catalog.widgets_of(id) {
                self.active_widgets.insert(widget.id.clone());
            }
            info!("Profile enabled");
        } else {
            self.active_profiles.remove(id);
            for widget in self.catalog.widgets_of(id) {
                let shared = widget
                    .profiles
                    .iter()
                    .any(|p| p != id && self.active_profiles.contains(p));
                if !shared {
                    self.active_widgets.remove(&widget.id);
                }
            }
            info!("Profile disabled");
        }

        let removed = self.layout.retain_active(&self.active_widgets);
        let added = place_missing(
            &self.placer,
            &mut self.layout,
            &mut self.notices,
            self.catalog
                .widgets_of(id)
                .filter(|w| self.active_widgets.contains(&w.id)),
        );

        self.persist_profiles();
        self.after_layout_change();

        Ok(Transition {
            changed: true,
            added,
            removed,
        })
    }

    /// Shows or hides a single widget. Base-profile widgets are always shown.
    ///
    /// A widget switched on while none of its profiles is active becomes
    /// active but gets no layout entry until one of its profiles is enabled.
    #[instrument(skip(self), fields(widget = %id))]
    pub fn toggle_widget(&mut self, id: &WidgetId) -> Result<Transition> {
        let widget = self
            .catalog
            .widget(id)
            .ok_or_else(|| EngineError::UnknownWidget(id.clone()))?;
        if self.catalog.is_base_widget(id) {
            debug!("Base widgets cannot be toggled");
            return Ok(Transition::unchanged());
        }

        let transition = if self.active_widgets.remove(id) {
            let removed = self.layout.remove(id).map(|e| vec![e.widget_id]).unwrap_or_default();
            info!("Widget hidden");
            Transition {
                changed: true,
                added: Vec::new(),
                removed,
            }
        } else {
            self.active_widgets.insert(id.clone());
            let gated = widget.profiles.iter().any(|p| self.active_profiles.contains(p));
            let added = if gated {
                place_missing(&self.placer, &mut self.layout, &mut self.notices, [widget])
            } else {
                debug!("Widget activated while none of its profiles is active");
                Vec::new()
            };
            info!("Widget shown");
            Transition {
                changed: true,
                added,
                removed: Vec::new(),
            }
        };

        self.after_layout_change();
        Ok(transition)
    }

    /// Discards the saved layout and lays the visible widgets out row-major,
    /// two columns apart, without collision checks.
    #[instrument(skip(self))]
    pub fn reset_layout(&mut self) -> Transition {
        if let Err(err) = persistence::clear_layout(&mut self.store) {
            self.write_failed(LAYOUT_KEY, err);
        }

        let entries = default_layout(&self.visible_widgets(), self.placer.columns());
        self.layout.replace(entries);
        info!(entries = self.layout.len(), "Layout reset");

        self.after_layout_change();
        Transition {
            changed: true,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Accepts a complete layout edited outside the engine (drag, resize).
    ///
    /// Positions and sizes are taken verbatim; entries for widgets that are
    /// not active are dropped.
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn replace_layout(&mut self, entries: Vec<LayoutEntry>) {
        let (kept, stray): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| self.active_widgets.contains(&e.widget_id));
        for entry in &stray {
            warn!(widget = %entry.widget_id, "Ignoring layout entry for inactive widget");
        }

        self.layout.replace(kept);
        debug!(entries = self.layout.len(), "Layout replaced");
        self.after_layout_change();
    }

    /// Moves a placed widget. The position is clamped so the widget stays on the grid.
    pub fn move_widget(&mut self, id: &WidgetId, x: u32, y: u32) -> Result<()> {
        let columns = self.placer.columns();
        self.edit_entry(id, |entry| {
            entry.x = x.min(columns.saturating_sub(entry.w));
            entry.y = y;
        })
    }

    /// Resizes a placed widget within its bounds and the grid width.
    pub fn resize_widget(&mut self, id: &WidgetId, w: u32, h: u32) -> Result<()> {
        let columns = self.placer.columns();
        self.edit_entry(id, |entry| {
            let (w, h) = entry.constraints().clamp(w, h);
            entry.w = w.min(columns);
            entry.h = h;
            entry.x = entry.x.min(columns - entry.w);
        })
    }

    fn edit_entry<F>(&mut self, id: &WidgetId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut LayoutEntry),
    {
        if self.catalog.widget(id).is_none() {
            return Err(EngineError::UnknownWidget(id.clone()));
        }
        let mut entries = self.layout.entries().to_vec();
        let entry = entries
            .iter_mut()
            .find(|e| &e.widget_id == id)
            .ok_or_else(|| EngineError::NotPlaced(id.clone()))?;
        edit(entry);
        self.replace_layout(entries);
        Ok(())
    }

    /// Writes the current layout. Returns false (and queues a notice) on failure.
    #[instrument(skip(self))]
    pub fn save_layout(&mut self) -> bool {
        match persistence::save_layout(&mut self.store, &self.layout) {
            Ok(()) => {
                info!(entries = self.layout.len(), "Layout saved");
                true
            }
            Err(err) => {
                self.write_failed(LAYOUT_KEY, err);
                false
            }
        }
    }

    /// Widgets the user switched off although one of their profiles is on.
    /// Profiles bring their widgets back at startup, so a front end that
    /// restarts between actions keeps this list itself.
    pub fn hidden_widgets(&self) -> Vec<WidgetId> {
        self.catalog
            .widgets()
            .iter()
            .filter(|w| !self.active_widgets.contains(&w.id))
            .filter(|w| w.profiles.iter().any(|p| self.active_profiles.contains(p)))
            .map(|w| w.id.clone())
            .collect()
    }

    /// Hides widgets remembered from an earlier session. Part of startup:
    /// nothing is written and no notice is raised. Unknown and base widgets
    /// are skipped. Returns the ids that were hidden.
    #[instrument(skip_all)]
    pub fn restore_hidden<'a, I>(&mut self, hidden: I) -> Vec<WidgetId>
    where
        I: IntoIterator<Item = &'a WidgetId>,
    {
        let mut restored = Vec::new();
        for id in hidden {
            if self.catalog.widget(id).is_none() || self.catalog.is_base_widget(id) {
                warn!(widget = %id, "Ignoring remembered hidden widget");
                continue;
            }
            if self.active_widgets.remove(id) {
                self.layout.remove(id);
                restored.push(id.clone());
            }
        }
        debug!(hidden = ?restored, "Hidden widgets restored");
        restored
    }

    pub fn visible_widgets(&self) -> Vec<&Widget> {
        visible(self.catalog.widgets(), &self.active_profiles, &self.active_widgets)
    }

    pub fn snapshot(&self) -> DashboardState {
        DashboardState {
            active_profiles: self.active_profiles.clone(),
            active_widgets: self.active_widgets.clone(),
            layout: self.layout.clone(),
        }
    }

    /// Drains the pending user notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn active_profiles(&self) -> &BTreeSet<ProfileId> {
        &self.active_profiles
    }

    pub fn active_widgets(&self) -> &BTreeSet<WidgetId> {
        &self.active_widgets
    }

    pub fn is_profile_active(&self, id: &ProfileId) -> bool {
        self.active_profiles.contains(id)
    }

    pub fn is_widget_active(&self, id: &WidgetId) -> bool {
        self.active_widgets.contains(id)
    }

    pub fn columns(&self) -> u32 {
        self.placer.columns()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Verifies the invariants every transition preserves.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let base = &self.catalog.base_profile().id;
        if !self.active_profiles.contains(base) {
            return Err(format!("base profile '{base}' is not active"));
        }
        if let Some(w) = self.catalog.widgets_of(base).find(|w| !self.active_widgets.contains(&w.id)) {
            return Err(format!("base widget '{}' is not active", w.id));
        }
        let mut seen = BTreeSet::new();
        for entry in self.layout.entries() {
            if !self.active_widgets.contains(&entry.widget_id) {
                return Err(format!("layout entry for inactive widget '{}'", entry.widget_id));
            }
            if !seen.insert(&entry.widget_id) {
                return Err(format!("duplicate layout entry for '{}'", entry.widget_id));
            }
        }
        Ok(())
    }

    /// Unknown ids are dropped; the fixed profile is always present.
    fn sanitize_profiles(&self, stored: Vec<ProfileId>) -> BTreeSet<ProfileId> {
        let mut profiles = BTreeSet::new();
        for id in stored {
            if self.catalog.profile(&id).is_some() {
                profiles.insert(id);
            } else {
                warn!(profile = %id, "Dropping unknown stored profile");
            }
        }
        profiles.insert(self.catalog.base_profile().id.clone());
        profiles
    }

    /// Turns a failed read into a notice. Corrupt values are removed so the
    /// next session starts clean.
    fn recover<T>(&mut self, key: &str, loaded: Result<Option<T>>) -> Option<T> {
        match loaded {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "Discarding unreadable stored value");
                if matches!(err, EngineError::Serialization(_)) {
                    if let Err(remove_err) = self.store.remove(key) {
                        warn!(key, error = %remove_err, "Could not remove corrupt value");
                    }
                }
                self.notices.push(Notice::PersistenceRead {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    fn persist_profiles(&mut self) {
        if let Err(err) = persistence::save_active_profiles(&mut self.store, self.active_profiles.iter()) {
            self.write_failed(ACTIVE_PROFILES_KEY, err);
        }
    }

    fn after_layout_change(&mut self) {
        if self.persist == PersistPolicy::Immediate {
            self.save_layout();
        }
    }

    fn write_failed(&mut self, key: &str, err: EngineError) {
        warn!(key, error = %err, "Write failed; keeping in-memory state");
        self.notices.push(Notice::PersistenceWrite {
            key: key.to_string(),
            reason: err.to_string(),
        });
    }
}

/// Places every widget lacking an entry and appends it. Returns the new ids.
fn place_missing<'a, I>(placer: &Placer, layout: &mut Layout, notices: &mut Vec<Notice>, widgets: I) -> Vec<WidgetId>
where
    I: IntoIterator<Item = &'a Widget>,
{
    let mut added = Vec::new();
    for widget in widgets {
        let placement = placer.place(widget, layout);
        if !placement.is_new() {
            continue;
        }
        if placement.is_degraded() {
            notices.push(Notice::PlacementDegraded {
                widget: widget.id.clone(),
                outcome: placement.outcome,
            });
        }
        if layout.push_unique(placement.entry) {
            added.push(widget.id.clone());
        }
    }
    added
}

/// Row-major default layout: widget `i` starts at `x = (2i) mod columns` on
/// row band `floor(2i / columns)` scaled by its own height.
///
/// Positions are not collision-checked. Widgets wider than two columns
/// overlap their right neighbour and may run past the grid edge; the grid
/// view resolves that, and an explicit move or resize pulls them back.
pub fn default_layout(widgets: &[&Widget], columns: u32) -> Vec<LayoutEntry> {
    let columns = columns.max(1);
    widgets
        .iter()
        .enumerate()
        .map(|(index, widget)| {
            let (w, h) = effective_size(widget);
            let w = w.min(columns);
            let offset = (index as u32).saturating_mul(2);
            let x = offset % columns;
            let y = (offset / columns).saturating_mul(h);
            LayoutEntry::new(widget.id.clone(), x, y, w, h, widget.constraints)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::{
        FailingStore, dashboard, entry_of, init_test_tracing, shared_widget_catalog, three_widget_catalog,
    };
    use common::{Profile, SizeClass, SizeConstraints};

    fn pid(id: &str) -> ProfileId {
        ProfileId::from(id)
    }

    fn wid(id: &str) -> WidgetId {
        WidgetId::from(id)
    }

    fn entry(id: &str, x: u32, y: u32, w: u32, h: u32) -> LayoutEntry {
        LayoutEntry::new(wid(id), x, y, w, h, SizeConstraints::new(1, 1, 12, 12))
    }

    #[test]
    fn test_init_defaults_to_base_profile() {
        init_test_tracing();
        let board = dashboard(three_widget_catalog());

        assert_eq!(board.active_profiles().iter().collect::<Vec<_>>(), vec![&pid("base")]);
        assert_eq!(board.active_widgets().len(), 2);
        assert_eq!(entry_of(&board, "w1"), Some(&entry("w1", 0, 0, 4, 3)));
        assert_eq!(entry_of(&board, "w2"), Some(&entry("w2", 4, 0, 4, 3)));
        assert!(entry_of(&board, "w3").is_none());
        assert!(board.store().raw(ACTIVE_PROFILES_KEY).is_none());
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_toggling_base_profile_is_a_no_op() {
        let mut board = dashboard(three_widget_catalog());
        let before = board.snapshot();

        let transition = board.toggle_profile(&pid("base")).unwrap();

        assert!(!transition.changed);
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_enabling_and_disabling_risk_profile() {
        let mut board = dashboard(three_widget_catalog());
        let w1 = entry_of(&board, "w1").cloned();
        let w2 = entry_of(&board, "w2").cloned();

        let enabled = board.toggle_profile(&pid("risk")).unwrap();
        assert_eq!(enabled.added, vec![wid("w3")]);
        assert!(board.is_widget_active(&wid("w3")));
        let w3 = entry_of(&board, "w3").cloned().unwrap();
        assert_eq!((w3.x, w3.y, w3.w, w3.h), (8, 0, 2, 2));
        assert!(board.layout().overlapping_pairs().is_empty());

        let disabled = board.toggle_profile(&pid("risk")).unwrap();
        assert_eq!(disabled.removed, vec![wid("w3")]);
        assert!(!board.is_widget_active(&wid("w3")));
        assert!(entry_of(&board, "w3").is_none());
        assert_eq!(entry_of(&board, "w1").cloned(), w1);
        assert_eq!(entry_of(&board, "w2").cloned(), w2);
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_disabling_profile_keeps_widgets_shared_with_active_profile() {
        let mut board = dashboard(shared_widget_catalog());
        board.toggle_profile(&pid("risk")).unwrap();
        board.toggle_profile(&pid("investment")).unwrap();
        board.move_widget(&wid("w4"), 6, 9).unwrap();
        let moved = entry_of(&board, "w4").cloned().unwrap();

        let transition = board.toggle_profile(&pid("risk")).unwrap();

        assert_eq!(transition.removed, vec![wid("w3")]);
        assert!(board.is_widget_active(&wid("w4")));
        assert_eq!(entry_of(&board, "w4"), Some(&moved));

        board.toggle_profile(&pid("investment")).unwrap();
        assert!(!board.is_widget_active(&wid("w4")));
        assert!(entry_of(&board, "w4").is_none());
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_profile_toggle_persists_profiles_but_not_layout() {
        let mut board = dashboard(three_widget_catalog());
        board.toggle_profile(&pid("risk")).unwrap();

        assert_eq!(board.store().raw(ACTIVE_PROFILES_KEY), Some(r#"["base","risk"]"#));
        assert!(board.store().raw(LAYOUT_KEY).is_none());

        assert!(board.save_layout());
        assert!(board.store().raw(LAYOUT_KEY).unwrap().contains("\"w3\""));
    }

    #[test]
    fn test_immediate_policy_saves_layout_after_each_event() {
        let options = DashboardOptions {
            persist: PersistPolicy::Immediate,
            ..DashboardOptions::default()
        };
        let mut board = Dashboard::init(three_widget_catalog(), MemoryStore::new(), options);
        board.toggle_profile(&pid("risk")).unwrap();
        assert!(board.store().raw(LAYOUT_KEY).unwrap().contains("\"w3\""));

        board.toggle_widget(&wid("w3")).unwrap();
        assert!(!board.store().raw(LAYOUT_KEY).unwrap().contains("\"w3\""));
    }

    #[test]
    fn test_toggle_widget() {
        let mut board = dashboard(three_widget_catalog());
        let before = board.snapshot();
        assert!(!board.toggle_widget(&wid("w1")).unwrap().changed);
        assert_eq!(board.snapshot(), before);

        board.toggle_profile(&pid("risk")).unwrap();
        let hidden = board.toggle_widget(&wid("w3")).unwrap();
        assert_eq!(hidden.removed, vec![wid("w3")]);
        assert!(!board.is_widget_active(&wid("w3")));
        assert!(board.visible_widgets().iter().all(|w| w.id != wid("w3")));

        let shown = board.toggle_widget(&wid("w3")).unwrap();
        assert_eq!(shown.added, vec![wid("w3")]);
        assert!(entry_of(&board, "w3").is_some());
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_hidden_widgets_survive_a_restart() {
        let mut board = dashboard(three_widget_catalog());
        board.toggle_profile(&pid("risk")).unwrap();
        board.toggle_widget(&wid("w3")).unwrap();
        assert!(board.save_layout());
        let hidden = board.hidden_widgets();
        assert_eq!(hidden, vec![wid("w3")]);

        let mut restarted = Dashboard::init(three_widget_catalog(), board.into_store(), DashboardOptions::default());
        assert!(restarted.is_widget_active(&wid("w3")));
        let writes_before = restarted.store().clone();

        let restored = restarted.restore_hidden(&hidden);

        assert_eq!(restored, vec![wid("w3")]);
        assert!(!restarted.is_widget_active(&wid("w3")));
        assert!(entry_of(&restarted, "w3").is_none());
        assert_eq!(restarted.hidden_widgets(), hidden);
        assert_eq!(restarted.store(), &writes_before);
        assert!(restarted.take_notices().is_empty());
        restarted.check_invariants().unwrap();
    }

    #[test]
    fn test_restore_hidden_skips_base_and_unknown_widgets() {
        let mut board = dashboard(three_widget_catalog());

        let restored = board.restore_hidden(&[wid("w1"), wid("w99")]);

        assert!(restored.is_empty());
        assert!(board.is_widget_active(&wid("w1")));
        assert!(board.hidden_widgets().is_empty());
    }

    #[test]
    fn test_widget_shown_without_active_profile_gets_no_entry() {
        let mut board = dashboard(three_widget_catalog());
        let transition = board.toggle_widget(&wid("w3")).unwrap();

        assert!(transition.added.is_empty());
        assert!(board.is_widget_active(&wid("w3")));
        assert!(entry_of(&board, "w3").is_none());

        board.toggle_profile(&pid("risk")).unwrap();
        assert!(entry_of(&board, "w3").is_some());
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let mut board = dashboard(three_widget_catalog());
        assert!(matches!(board.toggle_profile(&pid("ghost")), Err(EngineError::UnknownProfile(_))));
        assert!(matches!(board.toggle_widget(&wid("w99")), Err(EngineError::UnknownWidget(_))));
        assert!(matches!(board.move_widget(&wid("w3"), 0, 0), Err(EngineError::NotPlaced(_))));
    }

    #[test]
    fn test_saved_layout_is_restored_filtered_to_active_widgets() {
        let saved = Layout::from_entries(vec![
            entry("w2", 0, 0, 5, 4),
            entry("w3", 5, 0, 2, 2),
            entry("w1", 0, 4, 6, 3),
        ]);
        let mut store = MemoryStore::new().with_value(ACTIVE_PROFILES_KEY, r#"["base"]"#);
        persistence::save_layout(&mut store, &saved).unwrap();

        let mut board = Dashboard::init(three_widget_catalog(), store, DashboardOptions::default());

        assert_eq!(
            board.layout().entries(),
            &[entry("w2", 0, 0, 5, 4), entry("w1", 0, 4, 6, 3)]
        );
        assert!(board.take_notices().is_empty());
    }

    #[test]
    fn test_corrupt_layout_is_discarded_and_widgets_are_placed() {
        init_test_tracing();
        let store = MemoryStore::new().with_value(LAYOUT_KEY, "{definitely not json");

        let mut board = Dashboard::init(three_widget_catalog(), store, DashboardOptions::default());

        assert_eq!(board.layout().len(), 2);
        assert_eq!(entry_of(&board, "w1"), Some(&entry("w1", 0, 0, 4, 3)));
        assert!(board.store().raw(LAYOUT_KEY).is_none());
        let notices = board.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(matches!(&notices[0], Notice::PersistenceRead { key, .. } if key == LAYOUT_KEY));
        assert!(board.take_notices().is_empty());
    }

    #[test]
    fn test_corrupt_or_unknown_profiles_fall_back_to_base() {
        let corrupt = MemoryStore::new().with_value(ACTIVE_PROFILES_KEY, "[\"base\",");
        let board = Dashboard::init(three_widget_catalog(), corrupt, DashboardOptions::default());
        assert_eq!(board.active_profiles().len(), 1);

        let unknown = MemoryStore::new().with_value(ACTIVE_PROFILES_KEY, r#"["ghost","risk"]"#);
        let board = Dashboard::init(three_widget_catalog(), unknown, DashboardOptions::default());
        let profiles: Vec<_> = board.active_profiles().iter().map(ProfileId::as_str).collect();
        assert_eq!(profiles, vec!["base", "risk"]);
        assert!(board.is_widget_active(&wid("w3")));
    }

    #[test]
    fn test_unreadable_store_yields_defaults_with_notices() {
        let store = FailingStore::failing_reads(MemoryStore::new());
        let mut board = Dashboard::init(three_widget_catalog(), store, DashboardOptions::default());

        assert_eq!(board.layout().len(), 2);
        let notices = board.take_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| matches!(n, Notice::PersistenceRead { .. })));
    }

    #[test]
    fn test_write_failures_keep_in_memory_state() {
        let store = FailingStore::failing_writes(MemoryStore::new());
        let mut board = Dashboard::init(three_widget_catalog(), store, DashboardOptions::default());

        board.toggle_profile(&pid("risk")).unwrap();
        assert!(!board.save_layout());

        assert!(board.is_profile_active(&pid("risk")));
        assert!(entry_of(&board, "w3").is_some());
        let notices = board.take_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| matches!(n, Notice::PersistenceWrite { .. })));
    }

    #[test]
    fn test_reset_layout_stacks_visible_widgets_row_major() {
        let catalog = Catalog::new(
            vec![Profile::new("base", "Base", true)],
            vec![
                Widget::new("a", "A", &["base"], SizeClass::Small, SizeConstraints::new(1, 1, 4, 4)),
                Widget::new("b", "B", &["base"], SizeClass::Small, SizeConstraints::new(1, 1, 4, 4)),
                Widget::new("c", "C", &["base"], SizeClass::Small, SizeConstraints::new(1, 1, 4, 4)),
            ],
        )
        .unwrap();
        let store = MemoryStore::new().with_value(LAYOUT_KEY, "[]");
        let mut board = Dashboard::init(catalog, store, DashboardOptions::default());
        board.move_widget(&wid("b"), 9, 7).unwrap();

        board.reset_layout();

        let positions: Vec<_> = board.layout().entries().iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(positions, vec![(0, 0), (2, 0), (4, 0)]);
        assert!(board.store().raw(LAYOUT_KEY).is_none());
    }

    #[test]
    fn test_default_layout_wraps_rows() {
        let widgets: Vec<Widget> = (0..8)
            .map(|i| {
                Widget::new(
                    &format!("w{i}"),
                    "W",
                    &["base"],
                    SizeClass::Small,
                    SizeConstraints::new(1, 1, 4, 4),
                )
            })
            .collect();
        let refs: Vec<&Widget> = widgets.iter().collect();

        let entries = default_layout(&refs, 12);

        assert_eq!((entries[5].x, entries[5].y), (10, 0));
        assert_eq!((entries[6].x, entries[6].y), (0, 2));
        assert_eq!((entries[7].x, entries[7].y), (2, 2));
    }

    #[test]
    fn test_default_layout_keeps_formula_for_wide_widgets() {
        let widgets: Vec<Widget> = (0..5)
            .map(|i| {
                Widget::new(
                    &format!("m{i}"),
                    "M",
                    &["base"],
                    SizeClass::Medium,
                    SizeConstraints::new(1, 1, 6, 6),
                )
            })
            .collect();
        let refs: Vec<&Widget> = widgets.iter().collect();

        let entries = default_layout(&refs, 8);

        let positions: Vec<_> = entries.iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(positions, vec![(0, 0), (2, 0), (4, 0), (6, 0), (0, 3)]);
        assert!(entries.iter().all(|e| (e.w, e.h) == (4, 3)));

        // No two entries share an origin cell
        let mut origins = positions.clone();
        origins.sort_unstable();
        origins.dedup();
        assert_eq!(origins.len(), positions.len());
    }

    #[test]
    fn test_far_away_stored_entry_does_not_break_placement() {
        let mut board = dashboard(three_widget_catalog());
        board.move_widget(&wid("w1"), 0, u32::MAX).unwrap();

        board.toggle_profile(&pid("risk")).unwrap();

        let w3 = entry_of(&board, "w3").unwrap();
        assert_eq!((w3.x, w3.y), (0, 0));
        assert_eq!(board.layout().bottom(), u32::MAX);
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_replace_layout_takes_positions_verbatim() {
        let mut board = dashboard(three_widget_catalog());

        board.replace_layout(vec![
            entry("w2", 1, 1, 3, 3),
            entry("w3", 5, 5, 2, 2),
            entry("w1", 6, 0, 6, 4),
        ]);

        assert_eq!(
            board.layout().entries(),
            &[entry("w2", 1, 1, 3, 3), entry("w1", 6, 0, 6, 4)]
        );
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_move_and_resize_clamp_to_grid_and_bounds() {
        let mut board = dashboard(three_widget_catalog());
        board.toggle_profile(&pid("risk")).unwrap();

        board.move_widget(&wid("w3"), 20, 3).unwrap();
        let moved = entry_of(&board, "w3").unwrap();
        assert_eq!((moved.x, moved.y), (10, 3));

        board.resize_widget(&wid("w3"), 30, 0).unwrap();
        let resized = entry_of(&board, "w3").unwrap();
        assert_eq!((resized.x, resized.w, resized.h), (0, 12, 1));
    }

    #[test]
    fn test_invariants_hold_across_event_sequences() {
        let mut board = dashboard(shared_widget_catalog());
        let events: [(&str, &str); 10] = [
            ("p", "risk"),
            ("w", "w4"),
            ("p", "investment"),
            ("w", "w3"),
            ("p", "risk"),
            ("w", "w5"),
            ("p", "base"),
            ("w", "w5"),
            ("p", "investment"),
            ("w", "w1"),
        ];

        for (kind, id) in events {
            match kind {
                "p" => board.toggle_profile(&pid(id)).unwrap(),
                _ => board.toggle_widget(&wid(id)).unwrap(),
            };
            board.check_invariants().unwrap();
            let visible: BTreeSet<_> = board.visible_widgets().iter().map(|w| w.id.clone()).collect();
            let placed: BTreeSet<_> = board.layout().entries().iter().map(|e| e.widget_id.clone()).collect();
            assert_eq!(visible, placed, "after {kind}:{id}");
        }
    }
}
