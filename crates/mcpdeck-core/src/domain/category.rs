//! Category types: named, orderable collections of servers.

use serde::{Deserialize, Serialize};

use super::envelope::{Envelope, Versioned};

/// Closed icon set for categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryIcon {
    Code,
    Database,
    Globe,
    #[default]
    Layers,
    Settings,
}

impl CategoryIcon {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Database => "Database",
            Self::Globe => "Globe",
            Self::Layers => "Layers",
            Self::Settings => "Settings",
        }
    }

    /// Strict lookup by name. `None` for anything outside the set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Code" => Some(Self::Code),
            "Database" => Some(Self::Database),
            "Globe" => Some(Self::Globe),
            "Layers" => Some(Self::Layers),
            "Settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

impl From<String> for CategoryIcon {
    /// Lenient conversion for documents: unknown names fall back to the
    /// default icon instead of failing the whole store load.
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or_default()
    }
}

impl From<CategoryIcon> for String {
    fn from(icon: CategoryIcon) -> Self {
        icon.as_str().to_string()
    }
}

impl std::fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which config targets a category applies to: one specific target, or
/// every target. Serialized as the target id or the literal `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetScope {
    #[default]
    All,
    Target(String),
}

impl TargetScope {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Target(id) => id,
        }
    }

    /// Whether a category with this scope applies to the given target.
    pub fn applies_to(&self, target_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Target(id) => id == target_id,
        }
    }
}

impl From<String> for TargetScope {
    fn from(raw: String) -> Self {
        if raw == "all" {
            Self::All
        } else {
            Self::Target(raw)
        }
    }
}

impl From<TargetScope> for String {
    fn from(scope: TargetScope) -> Self {
        scope.as_str().to_string()
    }
}

impl std::fmt::Display for TargetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named collection of MCP servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub name: String,
    pub description: String,
    pub icon: CategoryIcon,
    /// Target scope. The authoritative "active" state lives in the
    /// store's `active_categories` map, not here.
    pub target: TargetScope,
    /// Advisory flag only.
    pub is_active: bool,
}

impl Versioned for Category {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

/// A category to be inserted into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: CategoryIcon,
    #[serde(default)]
    pub target: TargetScope,
    #[serde(default)]
    pub is_active: bool,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: CategoryIcon::default(),
            target: TargetScope::All,
            is_active: false,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the icon.
    #[must_use]
    pub const fn with_icon(mut self, icon: CategoryIcon) -> Self {
        self.icon = icon;
        self
    }

    /// Set the target scope.
    #[must_use]
    pub fn with_target(mut self, target: TargetScope) -> Self {
        self.target = target;
        self
    }
}

/// Partial update for a category. Only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<CategoryIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_serializes_as_string() {
        let all = serde_json::to_string(&TargetScope::All).unwrap();
        assert_eq!(all, "\"all\"");
        let claude = serde_json::to_string(&TargetScope::Target("claude".into())).unwrap();
        assert_eq!(claude, "\"claude\"");
    }

    #[test]
    fn test_scope_applies_to() {
        assert!(TargetScope::All.applies_to("claude"));
        assert!(TargetScope::Target("claude".into()).applies_to("claude"));
        assert!(!TargetScope::Target("cursor".into()).applies_to("claude"));
    }

    #[test]
    fn test_unknown_icon_falls_back_to_layers() {
        let icon: CategoryIcon = serde_json::from_str("\"Rocket\"").unwrap();
        assert_eq!(icon, CategoryIcon::Layers);
    }

    #[test]
    fn test_new_category_builder() {
        let category = NewCategory::new("Dev tools")
            .with_icon(CategoryIcon::Code)
            .with_target(TargetScope::Target("claude".into()))
            .with_description("Everyday coding servers");
        assert_eq!(category.name, "Dev tools");
        assert_eq!(category.icon, CategoryIcon::Code);
        assert_eq!(category.target, TargetScope::Target("claude".into()));
        assert!(!category.is_active);
    }
}
