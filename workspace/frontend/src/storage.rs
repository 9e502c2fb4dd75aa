use engine::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::{Storage, window};

/// Browser `localStorage` as the dashboard's key/value store.
///
/// When the browser denies access (private mode, disabled storage) every
/// operation fails with [`StoreError::Unavailable`] and the dashboard keeps
/// working from memory.
#[derive(Clone, Default)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is not available; dashboard changes will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_string()))
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Io(describe(e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Browsers only fail this on a full quota
        self.storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::QuotaExceeded { key: key.to_string() })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Io(describe(e)))
    }
}
