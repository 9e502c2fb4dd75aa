//! JSON snapshots of the dashboard state in a [`KeyValueStore`].
//!
//! Two keys are used: `activeProfiles` (array of profile ids) and
//! `dashboardLayout` (array of layout entries). Reads distinguish an absent
//! value (`Ok(None)`) from a failing or corrupt one (`Err`), so the caller can
//! decide how to recover.

use common::{LayoutEntry, ProfileId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::Result;
use crate::layout::Layout;
use crate::storage::KeyValueStore;

pub const ACTIVE_PROFILES_KEY: &str = "activeProfiles";
pub const LAYOUT_KEY: &str = "dashboardLayout";

fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        trace!(key, "No stored value");
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)?;
    debug!(key, bytes = raw.len(), "Loaded stored value");
    Ok(Some(value))
}

fn write_json<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)?;
    debug!(key, bytes = raw.len(), "Stored value");
    Ok(())
}

pub fn load_active_profiles(store: &dyn KeyValueStore) -> Result<Option<Vec<ProfileId>>> {
    read_json(store, ACTIVE_PROFILES_KEY)
}

pub fn save_active_profiles<'a, I>(store: &mut dyn KeyValueStore, profiles: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ProfileId>,
{
    let profiles: Vec<&ProfileId> = profiles.into_iter().collect();
    write_json(store, ACTIVE_PROFILES_KEY, &profiles)
}

/// Loads the saved layout. Duplicate entries for a widget keep the first one.
pub fn load_layout(store: &dyn KeyValueStore) -> Result<Option<Layout>> {
    let entries: Option<Vec<LayoutEntry>> = read_json(store, LAYOUT_KEY)?;
    Ok(entries.map(Layout::from_entries))
}

pub fn save_layout(store: &mut dyn KeyValueStore, layout: &Layout) -> Result<()> {
    write_json(store, LAYOUT_KEY, layout.entries())
}

pub fn clear_layout(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove(LAYOUT_KEY)?;
    debug!(key = LAYOUT_KEY, "Removed stored value");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::storage::MemoryStore;
    use common::{SizeConstraints, WidgetId};

    #[test]
    fn test_absent_values_load_as_none() {
        let store = MemoryStore::new();
        assert!(load_active_profiles(&store).unwrap().is_none());
        assert!(load_layout(&store).unwrap().is_none());
    }

    #[test]
    fn test_layout_round_trip_keeps_field_values() {
        let mut store = MemoryStore::new();
        let layout = Layout::from_entries(vec![
            LayoutEntry::new(WidgetId::from("w1"), 3, 1, 4, 3, SizeConstraints::new(3, 3, 6, 5)),
            LayoutEntry::new(WidgetId::from("w2"), 0, 4, 5, 2, SizeConstraints::new(3, 2, 8, 6)),
        ]);

        save_layout(&mut store, &layout).unwrap();
        let loaded = load_layout(&store).unwrap().unwrap();

        assert_eq!(loaded, layout);
        assert!(store.raw(LAYOUT_KEY).unwrap().contains("\"widgetId\":\"w1\""));
    }

    #[test]
    fn test_profiles_are_stored_as_json_array() {
        let mut store = MemoryStore::new();
        let profiles = [ProfileId::from("base"), ProfileId::from("risk")];
        save_active_profiles(&mut store, profiles.iter()).unwrap();
        assert_eq!(store.raw(ACTIVE_PROFILES_KEY), Some(r#"["base","risk"]"#));
    }

    #[test]
    fn test_corrupt_value_is_a_serialization_error() {
        let store = MemoryStore::new().with_value(LAYOUT_KEY, "[{not json");
        assert!(matches!(load_layout(&store), Err(EngineError::Serialization(_))));
    }

    #[test]
    fn test_clear_layout_removes_key() {
        let mut store = MemoryStore::new().with_value(LAYOUT_KEY, "[]");
        clear_layout(&mut store).unwrap();
        assert!(store.raw(LAYOUT_KEY).is_none());
    }
}
