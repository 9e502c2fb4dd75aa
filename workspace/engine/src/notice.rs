use std::fmt;

use common::WidgetId;

use crate::placement::PlacementOutcome;

/// A recoverable problem the user should hear about. The session continues
/// with the in-memory state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A stored value could not be read or parsed and was replaced by the default.
    PersistenceRead { key: String, reason: String },
    /// A write failed; changes may not survive a reload.
    PersistenceWrite { key: String, reason: String },
    /// A widget could not be placed without overlap or had to be shrunk.
    PlacementDegraded { widget: WidgetId, outcome: PlacementOutcome },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PersistenceRead { key, reason } => {
                write!(f, "Saved '{key}' could not be restored ({reason}); defaults were used")
            }
            Notice::PersistenceWrite { key, reason } => {
                write!(f, "Could not save '{key}' ({reason}); changes may be lost on reload")
            }
            Notice::PlacementDegraded { widget, outcome } => match outcome {
                PlacementOutcome::TooWide => write!(f, "Widget {widget} is wider than the grid and was shrunk"),
                _ => write!(f, "No free space for widget {widget}; it overlaps another widget"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        let read = Notice::PersistenceRead {
            key: "dashboardLayout".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(read.to_string().starts_with("Saved 'dashboardLayout' could not be restored"));

        let degraded = Notice::PlacementDegraded {
            widget: WidgetId::from("w6"),
            outcome: PlacementOutcome::TooWide,
        };
        assert_eq!(degraded.to_string(), "Widget w6 is wider than the grid and was shrunk");
    }
}
