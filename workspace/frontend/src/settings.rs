use std::cell::RefCell;

use engine::{DashboardOptions, OverflowPolicy, PersistPolicy};
use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Default log level for the application
    pub log_level: Level,

    /// Width of the dashboard grid in columns
    pub grid_columns: u32,

    /// Save the layout after every change instead of on "Save"
    pub autosave_layout: bool,

    /// Accept overlapping widgets instead of moving them to a free row
    pub accept_overlap: bool,

    /// Simulated latency of the data feeds in milliseconds
    pub feed_latency_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: Level::Info,
            grid_columns: common::DEFAULT_COLUMNS,
            autosave_layout: false,
            accept_overlap: false,
            feed_latency_ms: 500,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

pub fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(log_level)) = storage.get_item("bankboard_log_level") {
                settings.log_level = parse_level(&log_level).unwrap_or(settings.log_level);
            }

            if let Ok(Some(columns)) = storage.get_item("bankboard_grid_columns") {
                if let Ok(columns) = columns.parse::<u32>() {
                    settings.grid_columns = columns.max(1);
                }
            }

            if let Ok(Some(autosave)) = storage.get_item("bankboard_autosave_layout") {
                settings.autosave_layout = autosave.to_lowercase() == "true";
            }

            if let Ok(Some(overlap)) = storage.get_item("bankboard_accept_overlap") {
                settings.accept_overlap = overlap.to_lowercase() == "true";
            }

            if let Ok(Some(latency)) = storage.get_item("bankboard_feed_latency_ms") {
                if let Ok(latency) = latency.parse::<u32>() {
                    settings.feed_latency_ms = latency;
                }
            }
        }

        settings
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item("bankboard_log_level", &self.log_level.as_str().to_lowercase())?;
                storage.set_item("bankboard_grid_columns", &self.grid_columns.to_string())?;
                storage.set_item("bankboard_autosave_layout", &self.autosave_layout.to_string())?;
                storage.set_item("bankboard_accept_overlap", &self.accept_overlap.to_string())?;
                storage.set_item("bankboard_feed_latency_ms", &self.feed_latency_ms.to_string())?;
            }
        }
        Ok(())
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            columns: self.grid_columns,
            overflow: if self.accept_overlap {
                OverflowPolicy::AcceptOverlap
            } else {
                OverflowPolicy::NextRow
            },
            persist: if self.autosave_layout {
                PersistPolicy::Immediate
            } else {
                PersistPolicy::Deferred
            },
        }
    }
}

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_level("warn"), Some(Level::Warn));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_dashboard_options_follow_flags() {
        let settings = AppSettings {
            grid_columns: 8,
            autosave_layout: true,
            accept_overlap: true,
            ..AppSettings::default()
        };
        let options = settings.dashboard_options();
        assert_eq!(options.columns, 8);
        assert_eq!(options.overflow, OverflowPolicy::AcceptOverlap);
        assert_eq!(options.persist, PersistPolicy::Immediate);

        assert_eq!(AppSettings::default().dashboard_options(), DashboardOptions::default());
    }
}
