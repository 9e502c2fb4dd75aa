use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a profile (role-based view), e.g. `base` or `risk`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a dashboard widget, e.g. `w1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A named role-based view gating which widgets may be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    /// A fixed profile can never be deactivated (the base profile).
    #[serde(default)]
    pub fixed: bool,
}

impl Profile {
    pub fn new(id: &str, name: &str, fixed: bool) -> Self {
        Self {
            id: ProfileId::from(id),
            name: name.to_string(),
            fixed,
        }
    }
}

/// Symbolic widget size, resolved to a fixed cell span by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "large")]
    Large,
    #[serde(rename = "v_medium")]
    VMedium,
    #[serde(rename = "v_large")]
    VLarge,
    #[serde(rename = "v_xl")]
    VXl,
    #[serde(rename = "v_xxl")]
    VXxl,
}

impl SizeClass {
    pub const ALL: [SizeClass; 7] = [
        SizeClass::Small,
        SizeClass::Medium,
        SizeClass::Large,
        SizeClass::VMedium,
        SizeClass::VLarge,
        SizeClass::VXl,
        SizeClass::VXxl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
            SizeClass::VMedium => "v_medium",
            SizeClass::VLarge => "v_large",
            SizeClass::VXl => "v_xl",
            SizeClass::VXxl => "v_xxl",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a size class label is not one of [`SizeClass::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSizeClass(pub String);

impl fmt::Display for UnknownSizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown size class '{}'", self.0)
    }
}

impl std::error::Error for UnknownSizeClass {}

impl FromStr for SizeClass {
    type Err = UnknownSizeClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeClass::ALL
            .into_iter()
            .find(|class| class.label() == s)
            .ok_or_else(|| UnknownSizeClass(s.to_string()))
    }
}

/// Min/max bounds of a widget in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeConstraints {
    pub min_w: u32,
    pub min_h: u32,
    pub max_w: u32,
    pub max_h: u32,
}

impl SizeConstraints {
    pub fn new(min_w: u32, min_h: u32, max_w: u32, max_h: u32) -> Self {
        Self {
            min_w,
            min_h,
            max_w,
            max_h,
        }
    }

    /// Clamps a (w, h) pair into the bounds. The minimum wins if the bounds are inverted.
    pub fn clamp(&self, w: u32, h: u32) -> (u32, u32) {
        (w.min(self.max_w).max(self.min_w), h.min(self.max_h).max(self.min_h))
    }

    pub fn contains(&self, w: u32, h: u32) -> bool {
        (self.min_w..=self.max_w).contains(&w) && (self.min_h..=self.max_h).contains(&h)
    }
}

/// A dashboard panel, shown when one of its profiles is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    pub name: String,
    pub profiles: Vec<ProfileId>,
    pub size_class: SizeClass,
    #[serde(flatten)]
    pub constraints: SizeConstraints,
}

impl Widget {
    pub fn new(
        id: &str,
        name: &str,
        profiles: &[&str],
        size_class: SizeClass,
        constraints: SizeConstraints,
    ) -> Self {
        Self {
            id: WidgetId::from(id),
            name: name.to_string(),
            profiles: profiles.iter().map(|p| ProfileId::from(*p)).collect(),
            size_class,
            constraints,
        }
    }

    pub fn belongs_to(&self, profile: &ProfileId) -> bool {
        self.profiles.contains(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_labels_round_trip_through_from_str() {
        for class in SizeClass::ALL {
            assert_eq!(class.label().parse::<SizeClass>(), Ok(class));
        }
    }

    #[test]
    fn test_unknown_size_class_is_rejected() {
        let err = "huge".parse::<SizeClass>().unwrap_err();
        assert_eq!(err, UnknownSizeClass("huge".to_string()));
        assert_eq!(err.to_string(), "unknown size class 'huge'");
    }

    #[test]
    fn test_widget_deserializes_from_catalog_json() {
        let json = r#"{
            "id": "w4",
            "name": "Stock Market",
            "profiles": ["risk", "investment"],
            "sizeClass": "v_large",
            "minW": 3, "minH": 4, "maxW": 6, "maxH": 8
        }"#;
        let widget: Widget = serde_json::from_str(json).unwrap();

        assert_eq!(widget.id, WidgetId::from("w4"));
        assert_eq!(widget.size_class, SizeClass::VLarge);
        assert_eq!(widget.constraints, SizeConstraints::new(3, 4, 6, 8));
        assert!(widget.belongs_to(&ProfileId::from("investment")));
        assert!(!widget.belongs_to(&ProfileId::from("base")));
    }

    #[test]
    fn test_widget_with_unknown_size_class_fails_to_deserialize() {
        let json = r#"{"id": "w9", "name": "X", "profiles": ["base"], "sizeClass": "gigantic",
                       "minW": 1, "minH": 1, "maxW": 2, "maxH": 2}"#;
        assert!(serde_json::from_str::<Widget>(json).is_err());
    }

    #[test]
    fn test_constraints_clamp() {
        let bounds = SizeConstraints::new(2, 2, 4, 6);
        assert_eq!(bounds.clamp(1, 9), (2, 6));
        assert_eq!(bounds.clamp(3, 3), (3, 3));
        assert!(bounds.contains(4, 2));
        assert!(!bounds.contains(5, 2));
    }
}
