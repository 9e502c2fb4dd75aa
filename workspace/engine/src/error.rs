use common::{ProfileId, UnknownSizeClass, WidgetId};
use thiserror::Error;

/// Failure reported by a [`crate::storage::KeyValueStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store refused the write (browser quota, full disk, ...).
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// The backing store could not be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Any other I/O failure of the backend.
    #[error("storage I/O error: {0}")]
    Io(String),
}

/// Error types for the dashboard engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The catalog is inconsistent; fatal at load time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown profile: {0}")]
    UnknownProfile(ProfileId),

    #[error("Unknown widget: {0}")]
    UnknownWidget(WidgetId),

    /// The widget exists but has no entry on the current layout.
    #[error("Widget {0} is not on the layout")]
    NotPlaced(WidgetId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A data source could not produce its records.
    #[error("Data source error: {0}")]
    Source(String),
}

impl From<UnknownSizeClass> for EngineError {
    fn from(error: UnknownSizeClass) -> Self {
        EngineError::Configuration(error.to_string())
    }
}

/// Type alias for Result with EngineError
pub type Result<T> = std::result::Result<T, EngineError>;
