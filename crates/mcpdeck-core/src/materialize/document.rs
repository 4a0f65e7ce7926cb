//! Assembly of the `mcpServers` document.

use serde_json::{Map, Value, json};

use crate::domain::{ServerBlob, Store, Versioned};
use crate::ops::queries::{category_servers, server_env_for};

/// Entry substituted for a server whose blob fails to parse. One
/// malformed server must not block materialization of the rest.
fn degraded_entry() -> Value {
    json!({
        "command": "echo",
        "args": ["Server configuration error"],
    })
}

/// Assemble the external config document for a category.
///
/// Servers are visited in relation order. Parsed blobs get their key
/// bindings injected as `env` (replacing any `env` the blob carried)
/// when at least one binding resolves; unparsable blobs degrade to a
/// placeholder entry. Entries are keyed by server name, so a later
/// server with the same name overwrites an earlier one.
pub fn assemble(store: &Store, category_id: &str) -> Value {
    let mut servers = Map::new();

    for server in category_servers(store, category_id) {
        let entry = match server.blob() {
            ServerBlob::Parsed(mut spec) => {
                let env = server_env_for(store, server.id());
                if !env.is_empty() {
                    spec.env = Some(env);
                }
                serde_json::to_value(&spec).unwrap_or_else(|_| degraded_entry())
            }
            ServerBlob::Unparsed(_) => degraded_entry(),
        };
        servers.insert(server.name.clone(), entry);
    }

    json!({ "mcpServers": servers })
}

/// Render a document the way external tools expect it: pretty-printed
/// with 2-space indentation, one trailing newline.
pub fn render(document: &Value) -> String {
    let mut text =
        serde_json::to_string_pretty(document).unwrap_or_else(|_| String::from("{}"));
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewCategory, NewKey, NewServer, Store};
    use crate::ops::mutations::{
        attach_key_to_server, attach_server_to_category, create_category, create_key,
        create_server,
    };

    fn category_with(
        servers: &[(&str, &str)],
    ) -> (Store, String) {
        let mut store = Store::with_defaults();
        let (next, category) = create_category(&store, NewCategory::new("Dev")).unwrap();
        store = next;
        for (order, (name, value)) in servers.iter().enumerate() {
            let (next, server) = create_server(&store, NewServer::new(*name, *value)).unwrap();
            let (next, _) =
                attach_server_to_category(&next, category.id(), server.id(), order as i64)
                    .unwrap();
            store = next;
        }
        (store, category.id().to_string())
    }

    #[test]
    fn test_materializes_single_server_without_env() {
        let (store, category_id) =
            category_with(&[("fs", r#"{"command":"npx","args":["-y","server-fs"]}"#)]);

        let document = assemble(&store, &category_id);
        assert_eq!(
            document,
            json!({
                "mcpServers": {
                    "fs": { "command": "npx", "args": ["-y", "server-fs"] }
                }
            })
        );
        assert!(document["mcpServers"]["fs"].get("env").is_none());
    }

    #[test]
    fn test_env_injection_overwrites_blob_env() {
        let (store, category_id) = category_with(&[(
            "fs",
            r#"{"command":"npx","args":["-y","server-fs"],"env":{"STALE":"x"}}"#,
        )]);
        let server_id = store.servers.values().next().unwrap().id().to_string();

        let (store, key) = create_key(&store, NewKey::new("api", "secret123")).unwrap();
        let (store, _) = attach_key_to_server(&store, &server_id, key.id(), "API_KEY").unwrap();

        let document = assemble(&store, &category_id);
        assert_eq!(
            document["mcpServers"]["fs"]["env"],
            json!({ "API_KEY": "secret123" })
        );
    }

    #[test]
    fn test_blob_env_survives_when_no_bindings() {
        let (store, category_id) =
            category_with(&[("fs", r#"{"command":"npx","env":{"KEPT":"y"}}"#)]);
        let document = assemble(&store, &category_id);
        assert_eq!(document["mcpServers"]["fs"]["env"], json!({ "KEPT": "y" }));
    }

    #[test]
    fn test_malformed_server_degrades_without_blocking_others() {
        let (store, category_id) = category_with(&[
            ("broken", "not json"),
            ("fs", r#"{"command":"npx","args":["-y","server-fs"]}"#),
        ]);

        let document = assemble(&store, &category_id);
        assert_eq!(
            document["mcpServers"]["broken"],
            json!({ "command": "echo", "args": ["Server configuration error"] })
        );
        assert_eq!(document["mcpServers"]["fs"]["command"], "npx");
    }

    #[test]
    fn test_same_named_servers_last_wins() {
        let (store, category_id) = category_with(&[
            ("dup", r#"{"command":"first"}"#),
            ("dup", r#"{"command":"second"}"#),
        ]);

        let document = assemble(&store, &category_id);
        assert_eq!(document["mcpServers"]["dup"]["command"], "second");
        assert_eq!(document["mcpServers"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_category_yields_empty_map() {
        let (store, category_id) = category_with(&[]);
        let document = assemble(&store, &category_id);
        assert_eq!(document, json!({ "mcpServers": {} }));
    }

    #[test]
    fn test_render_is_pretty_with_trailing_newline() {
        let text = render(&json!({ "mcpServers": {} }));
        assert!(text.starts_with("{\n  \"mcpServers\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_materialization_is_idempotent() {
        let (store, category_id) =
            category_with(&[("fs", r#"{"command":"npx","args":["-y","server-fs"]}"#)]);
        let first = render(&assemble(&store, &category_id));
        let second = render(&assemble(&store, &category_id));
        assert_eq!(first, second);
    }
}
