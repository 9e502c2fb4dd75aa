//! Size class resolution.
//!
//! Every [`SizeClass`] maps to a fixed span of grid cells. Horizontal classes
//! grow in width, the `v_*` classes are tall panels.

use common::{SizeClass, Widget};

/// Resolves a size class to its (width, height) in grid cells.
pub fn resolve(size_class: SizeClass) -> (u32, u32) {
    match size_class {
        SizeClass::Small => (2, 2),
        SizeClass::Medium => (4, 3),
        SizeClass::Large => (6, 4),
        SizeClass::VMedium => (2, 4),
        SizeClass::VLarge => (3, 5),
        SizeClass::VXl => (4, 6),
        SizeClass::VXxl => (4, 8),
    }
}

/// Size a widget actually occupies: the resolved size widened to the widget's
/// minimum and capped at its maximum.
pub fn effective_size(widget: &Widget) -> (u32, u32) {
    let (w, h) = resolve(widget.size_class);
    widget.constraints.clamp(w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SizeConstraints;

    #[test]
    fn test_resolve_is_total_and_positive() {
        for class in SizeClass::ALL {
            let (w, h) = resolve(class);
            assert!(w >= 1 && h >= 1, "{class} resolved to {w}x{h}");
        }
    }

    #[test]
    fn test_effective_size_widens_to_minimum() {
        let widget = Widget::new("w", "W", &["base"], SizeClass::Small, SizeConstraints::new(3, 4, 6, 6));
        assert_eq!(effective_size(&widget), (3, 4));
    }

    #[test]
    fn test_effective_size_caps_at_maximum() {
        let widget = Widget::new("w", "W", &["base"], SizeClass::Large, SizeConstraints::new(1, 1, 4, 3));
        assert_eq!(effective_size(&widget), (4, 3));
    }

    #[test]
    fn test_effective_size_keeps_resolved_size_within_bounds() {
        let widget = Widget::new("w", "W", &["base"], SizeClass::Medium, SizeConstraints::new(2, 2, 6, 6));
        assert_eq!(effective_size(&widget), resolve(SizeClass::Medium));
    }
}
