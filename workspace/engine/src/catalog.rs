//! The fixed list of profiles and widgets the dashboard can show.
//!
//! A [`Catalog`] is immutable once built. Construction validates it and fails
//! fast with [`EngineError::Configuration`], since a broken catalog cannot be
//! recovered from at runtime.

use std::collections::HashSet;

use common::{Profile, ProfileId, SizeClass, SizeConstraints, Widget, WidgetId};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::size::resolve;

/// Only built through [`Catalog::new`], [`Catalog::from_json`] or
/// [`Catalog::banking`], so every instance is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    profiles: Vec<Profile>,
    widgets: Vec<Widget>,
}

/// Catalog document as written on disk, before validation.
#[derive(Deserialize)]
struct CatalogDocument {
    profiles: Vec<Profile>,
    widgets: Vec<Widget>,
}

impl Catalog {
    /// Builds a validated catalog.
    pub fn new(profiles: Vec<Profile>, widgets: Vec<Widget>) -> Result<Self> {
        let catalog = Self { profiles, widgets };
        catalog.validate()?;
        debug!(
            profiles = catalog.profiles.len(),
            widgets = catalog.widgets.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses a catalog document (`{"profiles": [...], "widgets": [...]}`).
    ///
    /// Unknown size classes and malformed documents are configuration errors.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("invalid catalog document: {e}")))?;
        Self::new(document.profiles, document.widgets)
    }

    /// The catalog of the banking dashboard.
    pub fn banking() -> Self {
        let profiles = vec![
            Profile::new("base", "Base Profile", true),
            Profile::new("risk", "Risk Management", false),
            Profile::new("investment", "Investment", false),
        ];
        let widgets = vec![
            Widget::new("w1", "Account Summary", &["base"], SizeClass::Medium, SizeConstraints::new(3, 3, 6, 5)),
            Widget::new("w2", "Recent Transactions", &["base"], SizeClass::Medium, SizeConstraints::new(3, 2, 8, 6)),
            Widget::new("w3", "Currency Tracker", &["risk"], SizeClass::Small, SizeConstraints::new(2, 2, 4, 4)),
            Widget::new(
                "w4",
                "Stock Market",
                &["risk", "investment"],
                SizeClass::VMedium,
                SizeConstraints::new(2, 3, 4, 6),
            ),
            Widget::new(
                "w5",
                "Investment Portfolio",
                &["investment"],
                SizeClass::Medium,
                SizeConstraints::new(3, 3, 6, 5),
            ),
            Widget::new("w6", "Total Balance", &["base"], SizeClass::Large, SizeConstraints::new(4, 4, 8, 6)),
            Widget::new(
                "w7",
                "Financial News",
                &["risk", "investment"],
                SizeClass::VLarge,
                SizeConstraints::new(3, 4, 6, 8),
            ),
            Widget::new("w8", "Watched Topics", &["investment"], SizeClass::VXl, SizeConstraints::new(3, 4, 6, 8)),
        ];

        // The built-in catalog is covered by tests; validation cannot fail here.
        Self { profiles, widgets }
    }

    fn validate(&self) -> Result<()> {
        let mut profile_ids = HashSet::new();
        for profile in &self.profiles {
            if !profile_ids.insert(&profile.id) {
                return Err(EngineError::Configuration(format!("duplicate profile '{}'", profile.id)));
            }
        }

        let fixed = self.profiles.iter().filter(|p| p.fixed).count();
        if fixed != 1 {
            return Err(EngineError::Configuration(format!(
                "catalog must have exactly one fixed profile, found {fixed}"
            )));
        }

        let mut widget_ids = HashSet::new();
        for widget in &self.widgets {
            if !widget_ids.insert(&widget.id) {
                return Err(EngineError::Configuration(format!("duplicate widget '{}'", widget.id)));
            }
            if widget.profiles.is_empty() {
                return Err(EngineError::Configuration(format!("widget '{}' has no profiles", widget.id)));
            }
            if let Some(missing) = widget.profiles.iter().find(|p| !profile_ids.contains(p)) {
                return Err(EngineError::Configuration(format!(
                    "widget '{}' references unknown profile '{}'",
                    widget.id, missing
                )));
            }

            let c = widget.constraints;
            if c.min_w == 0 || c.min_h == 0 || c.min_w > c.max_w || c.min_h > c.max_h {
                return Err(EngineError::Configuration(format!(
                    "widget '{}' has invalid size bounds {}x{}..{}x{}",
                    widget.id, c.min_w, c.min_h, c.max_w, c.max_h
                )));
            }

            let (w, h) = resolve(widget.size_class);
            if !c.contains(w, h) {
                warn!(
                    widget = %widget.id,
                    size_class = %widget.size_class,
                    "Size class {}x{} outside widget bounds; placement will clamp it",
                    w,
                    h
                );
            }
        }

        Ok(())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn profile(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    /// The single fixed profile.
    pub fn base_profile(&self) -> &Profile {
        // Validation guarantees exactly one fixed profile.
        self.profiles.iter().find(|p| p.fixed).unwrap_or(&self.profiles[0])
    }

    /// Widgets gated by `profile`, in catalog order.
    pub fn widgets_of<'a>(&'a self, profile: &'a ProfileId) -> impl Iterator<Item = &'a Widget> + 'a {
        self.widgets.iter().filter(move |w| w.belongs_to(profile))
    }

    /// Base-profile widgets are always active and cannot be toggled.
    pub fn is_base_widget(&self, id: &WidgetId) -> bool {
        let base = &self.base_profile().id;
        self.widget(id).is_some_and(|w| w.belongs_to(base))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::banking()
    }
}
