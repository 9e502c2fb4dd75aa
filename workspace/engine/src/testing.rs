//! Fixtures shared by the engine's test suites.

use common::{LayoutEntry, Profile, SizeClass, SizeConstraints, Widget, WidgetId};

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::reconcile::{Dashboard, DashboardOptions};
use crate::storage::{KeyValueStore, MemoryStore};

/// Routes engine logs to the test harness. Repeated calls are harmless.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn bounds() -> SizeConstraints {
    SizeConstraints::new(1, 1, 12, 12)
}

/// `w1`, `w2` on the base profile, `w3` on `risk` only.
pub fn three_widget_catalog() -> Catalog {
    Catalog::new(
        vec![Profile::new("base", "Base", true), Profile::new("risk", "Risk", false)],
        vec![
            Widget::new("w1", "Summary", &["base"], SizeClass::Medium, bounds()),
            Widget::new("w2", "Transactions", &["base"], SizeClass::Medium, bounds()),
            Widget::new("w3", "Currency", &["risk"], SizeClass::Small, bounds()),
        ],
    )
    .expect("fixture catalog is valid")
}

/// Adds `investment` and a widget `w4` shared by `risk` and `investment`.
pub fn shared_widget_catalog() -> Catalog {
    Catalog::new(
        vec![
            Profile::new("base", "Base", true),
            Profile::new("risk", "Risk", false),
            Profile::new("investment", "Investment", false),
        ],
        vec![
            Widget::new("w1", "Summary", &["base"], SizeClass::Medium, bounds()),
            Widget::new("w2", "Transactions", &["base"], SizeClass::Medium, bounds()),
            Widget::new("w3", "Currency", &["risk"], SizeClass::Small, bounds()),
            Widget::new("w4", "Stocks", &["risk", "investment"], SizeClass::Small, bounds()),
            Widget::new("w5", "Portfolio", &["investment"], SizeClass::Small, bounds()),
        ],
    )
    .expect("fixture catalog is valid")
}

pub fn dashboard(catalog: Catalog) -> Dashboard<MemoryStore> {
    Dashboard::init(catalog, MemoryStore::new(), DashboardOptions::default())
}

pub fn entry_of<'a, S: KeyValueStore>(dashboard: &'a Dashboard<S>, id: &str) -> Option<&'a LayoutEntry> {
    dashboard.layout().get(&WidgetId::from(id))
}

/// Store whose reads and/or writes fail, to exercise recovery paths.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FailingStore {
    pub fn failing_writes(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_reads: false,
            fail_writes: true,
        }
    }

    pub fn failing_reads(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_reads: true,
            fail_writes: false,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("storage disabled".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::QuotaExceeded { key: key.to_string() });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("storage disabled".to_string()));
        }
        self.inner.remove(key)
    }
}
