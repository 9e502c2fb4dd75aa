//! Layout reconciliation engine of the banking dashboard.
//!
//! Keeps a persisted, user-editable grid layout consistent with the set of
//! active widgets as profiles and individual widgets are switched on and off.

pub mod catalog;
pub mod error;
pub mod layout;
pub mod notice;
pub mod persistence;
pub mod placement;
pub mod reconcile;
pub mod size;
pub mod sources;
pub mod storage;
pub mod visibility;

#[cfg(test)]
pub mod testing;

pub use catalog::Catalog;
pub use error::{EngineError, Result, StoreError};
pub use layout::Layout;
pub use notice::Notice;
pub use placement::{OverflowPolicy, Placement, PlacementOutcome, Placer};
pub use reconcile::{Dashboard, DashboardOptions, DashboardState, PersistPolicy, Transition};
pub use storage::{KeyValueStore, MemoryStore};

/// Returns a dashboard over the built-in banking catalog with default options.
///
/// This is the configuration the frontend and the CLI start from unless told otherwise.
pub fn default_dashboard<S: KeyValueStore>(store: S) -> Dashboard<S> {
    Dashboard::init(Catalog::banking(), store, DashboardOptions::default())
}
