//! MCP server definition types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::{Envelope, Versioned};

/// An MCP server definition held in the store.
///
/// The `value` field is the serialized configuration blob. The store never
/// parses it; callers parse on demand via [`ServerBlob::parse`] and must
/// tolerate failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Display and lookup name. Becomes the key in materialized output;
    /// not required to be globally unique.
    pub name: String,
    /// Opaque serialized configuration blob.
    pub value: String,
}

impl Server {
    /// Parse the configuration blob. Never fails; malformed blobs come
    /// back as [`ServerBlob::Unparsed`].
    pub fn blob(&self) -> ServerBlob {
        ServerBlob::parse(&self.value)
    }
}

impl Versioned for Server {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

/// A server to be inserted into the store (no envelope yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServer {
    pub name: String,
    pub value: String,
}

impl NewServer {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build from a parsed spec, serializing it into the opaque blob form.
    pub fn from_spec(name: impl Into<String>, spec: &ServerSpec) -> serde_json::Result<Self> {
        Ok(Self {
            name: name.into(),
            value: serde_json::to_string(spec)?,
        })
    }
}

/// Partial update for a server. `name` and `value` are replaced wholesale;
/// there is no store-level merge of the parsed sub-fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The parsed shape of a server configuration blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSpec {
    /// Command to execute (e.g. "npx").
    pub command: String,
    /// Arguments to pass to the command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Environment variables for the server process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields this tool does not model, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ServerSpec {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: None,
            description: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A server blob, either parsed or carried as the raw string it failed to
/// parse from. The materializer branches on this instead of catching
/// parse errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerBlob {
    Parsed(ServerSpec),
    Unparsed(String),
}

impl ServerBlob {
    /// Parse a raw blob. Empty and `{}` values are treated as unusable,
    /// matching how callers have always handled them.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "{}" {
            return Self::Unparsed(raw.to_string());
        }
        match serde_json::from_str::<ServerSpec>(trimmed) {
            Ok(spec) => Self::Parsed(spec),
            Err(_) => Self::Unparsed(raw.to_string()),
        }
    }

    pub const fn as_spec(&self) -> Option<&ServerSpec> {
        match self {
            Self::Parsed(spec) => Some(spec),
            Self::Unparsed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_blob() {
        let blob = ServerBlob::parse(r#"{"command":"npx","args":["-y","server-fs"]}"#);
        let spec = blob.as_spec().unwrap();
        assert_eq!(spec.command, "npx");
        assert_eq!(spec.args, vec!["-y", "server-fs"]);
        assert!(spec.env.is_none());
    }

    #[test]
    fn test_parse_garbage_degrades() {
        let blob = ServerBlob::parse("not json");
        assert_eq!(blob, ServerBlob::Unparsed("not json".to_string()));
    }

    #[test]
    fn test_empty_and_braces_are_unparsed() {
        assert!(ServerBlob::parse("").as_spec().is_none());
        assert!(ServerBlob::parse("  ").as_spec().is_none());
        assert!(ServerBlob::parse("{}").as_spec().is_none());
    }

    #[test]
    fn test_unknown_fields_carry_through() {
        let blob = ServerBlob::parse(r#"{"command":"node","cwd":"/srv"}"#);
        let spec = blob.as_spec().unwrap();
        assert_eq!(spec.extra.get("cwd").unwrap(), "/srv");

        let rendered = serde_json::to_string(spec).unwrap();
        assert!(rendered.contains("\"cwd\":\"/srv\""));
    }

    #[test]
    fn test_spec_without_args_round_trips_without_args() {
        let blob = ServerBlob::parse(r#"{"command":"node"}"#);
        let rendered = serde_json::to_string(blob.as_spec().unwrap()).unwrap();
        assert_eq!(rendered, r#"{"command":"node"}"#);
    }

    #[test]
    fn test_from_spec_builds_blob_value() {
        let spec = ServerSpec::new("npx", vec!["-y".into(), "server-fs".into()]);
        let new = NewServer::from_spec("fs", &spec).unwrap();
        assert_eq!(new.name, "fs");
        assert!(matches!(ServerBlob::parse(&new.value), ServerBlob::Parsed(_)));
    }
}
