//! Config target types: the external tools whose config files get written.

use serde::{Deserialize, Serialize};

use super::envelope::{Envelope, Versioned};

/// Fixed id of the built-in Claude Desktop target.
pub const CLAUDE_TARGET_ID: &str = "claude";
/// Fixed id of the built-in Cursor target.
pub const CURSOR_TARGET_ID: &str = "cursor";

/// Default config path for the built-in Claude Desktop target. The
/// `%APPDATA%` placeholder expands at materialization time.
pub const CLAUDE_DEFAULT_CONFIG_PATH: &str = r"%APPDATA%\Claude\claude_desktop_config.json";
/// Default config path for the built-in Cursor target.
pub const CURSOR_DEFAULT_CONFIG_PATH: &str = r"%APPDATA%\Cursor\config.json";

/// One external tool's config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTarget {
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Display name.
    pub name: String,
    /// Filesystem path of the tool's config file. May embed environment
    /// placeholders (`%NAME%`, `${NAME}`) expanded at write time.
    pub config_path: String,
    /// Built-in targets reject update and delete unconditionally.
    pub is_built_in: bool,
}

impl ConfigTarget {
    /// Construct a built-in target with a fixed id.
    pub fn built_in(
        id: impl Into<String>,
        name: impl Into<String>,
        config_path: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_id(id),
            name: name.into(),
            config_path: config_path.into(),
            is_built_in: true,
        }
    }
}

impl Versioned for ConfigTarget {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

/// A config target to be inserted into the store. User-created targets
/// are never built-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConfigTarget {
    pub name: String,
    pub config_path: String,
}

impl NewConfigTarget {
    pub fn new(name: impl Into<String>, config_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_path: config_path.into(),
        }
    }
}

/// Partial update for a config target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_has_fixed_id() {
        let target = ConfigTarget::built_in(CLAUDE_TARGET_ID, "Claude Desktop", CLAUDE_DEFAULT_CONFIG_PATH);
        assert_eq!(target.id(), "claude");
        assert!(target.is_built_in);
        assert_eq!(target.envelope.version, 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let target = ConfigTarget::built_in(CURSOR_TARGET_ID, "Cursor", CURSOR_DEFAULT_CONFIG_PATH);
        let json = serde_json::to_string(&target).unwrap();
        assert!(json.contains("\"configPath\""));
        assert!(json.contains("\"isBuiltIn\":true"));
    }
}
