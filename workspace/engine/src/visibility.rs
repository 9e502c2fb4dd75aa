use std::collections::BTreeSet;

use common::{ProfileId, Widget, WidgetId};

/// Widgets the dashboard renders: active and gated by at least one active
/// profile. Catalog order is preserved.
pub fn visible<'a>(
    widgets: &'a [Widget],
    active_profiles: &BTreeSet<ProfileId>,
    active_widgets: &BTreeSet<WidgetId>,
) -> Vec<&'a Widget> {
    widgets
        .iter()
        .filter(|w| active_widgets.contains(&w.id))
        .filter(|w| w.profiles.iter().any(|p| active_profiles.contains(p)))
        .collect()
}
