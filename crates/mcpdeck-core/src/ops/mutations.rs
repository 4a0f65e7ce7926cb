//! Pure mutation transforms.
//!
//! Every function here reads one store snapshot and produces the next
//! one. Version bumps, soft deletion and `metadata.lastUpdated` stamping
//! all happen in this module and nowhere else.

use crate::domain::{
    Category, CategoryServerRelation, ConfigTarget, EntityKind, Envelope, NewCategory,
    NewConfigTarget, NewKey, NewServer, SecretKey, Server, ServerKeyRelation, Store,
    UpdateCategory, UpdateConfigTarget, UpdateServer, Versioned,
};

use super::StoreError;

fn require_non_empty(value: &str, what: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Servers
// ─────────────────────────────────────────────────────────────────────────────

/// Create a server. Requires a non-empty name and value.
pub fn create_server(store: &Store, new: NewServer) -> Result<(Store, Server), StoreError> {
    require_non_empty(&new.name, "server name")?;
    require_non_empty(&new.value, "server value")?;

    let server = Server {
        envelope: Envelope::stamp(),
        name: new.name,
        value: new.value,
    };

    let mut next = store.clone();
    next.servers.insert(server.id().to_string(), server.clone());
    next.metadata.touch();
    Ok((next, server))
}

/// Update a server's name and/or value. The value blob is replaced
/// wholesale; parsed sub-fields are never merged at this layer.
pub fn update_server(
    store: &Store,
    id: &str,
    updates: UpdateServer,
) -> Result<(Store, Server), StoreError> {
    let mut next = store.clone();
    let server = next
        .servers
        .get_mut(id)
        .filter(|s| s.is_active())
        .ok_or_else(|| StoreError::not_found(EntityKind::Server, id))?;

    if let Some(name) = updates.name {
        server.name = name;
    }
    if let Some(value) = updates.value {
        server.value = value;
    }
    server.envelope.touch();

    let server = server.clone();
    next.metadata.touch();
    Ok((next, server))
}

/// Soft-delete a server. Relations referencing it are left in place; the
/// query layer hides the dangling references.
pub fn soft_delete_server(store: &Store, id: &str) -> Result<(Store, Server), StoreError> {
    let mut next = store.clone();
    let server = next
        .servers
        .get_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Server, id))?;
    server.envelope.retire();

    let server = server.clone();
    next.metadata.touch();
    Ok((next, server))
}

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

/// Create a category. Requires a non-empty name.
pub fn create_category(store: &Store, new: NewCategory) -> Result<(Store, Category), StoreError> {
    require_non_empty(&new.name, "category name")?;

    let category = Category {
        envelope: Envelope::stamp(),
        name: new.name,
        description: new.description,
        icon: new.icon,
        target: new.target,
        is_active: new.is_active,
    };

    let mut next = store.clone();
    next.categories
        .insert(category.id().to_string(), category.clone());
    next.metadata.touch();
    Ok((next, category))
}

/// Update a category in place.
pub fn update_category(
    store: &Store,
    id: &str,
    updates: UpdateCategory,
) -> Result<(Store, Category), StoreError> {
    let mut next = store.clone();
    let category = next
        .categories
        .get_mut(id)
        .filter(|c| c.is_active())
        .ok_or_else(|| StoreError::not_found(EntityKind::Category, id))?;

    if let Some(name) = updates.name {
        category.name = name;
    }
    if let Some(description) = updates.description {
        category.description = description;
    }
    if let Some(icon) = updates.icon {
        category.icon = icon;
    }
    if let Some(target) = updates.target {
        category.target = target;
    }
    if let Some(is_active) = updates.is_active {
        category.is_active = is_active;
    }
    category.envelope.touch();

    let category = category.clone();
    next.metadata.touch();
    Ok((next, category))
}

/// Soft-delete a category. Its relations and any `active_categories`
/// reference survive; consumers treat the dangling reference as "no
/// active category".
pub fn soft_delete_category(store: &Store, id: &str) -> Result<(Store, Category), StoreError> {
    let mut next = store.clone();
    let category = next
        .categories
        .get_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Category, id))?;
    category.envelope.retire();

    let category = category.clone();
    next.metadata.touch();
    Ok((next, category))
}

// ─────────────────────────────────────────────────────────────────────────────
// Config targets
// ─────────────────────────────────────────────────────────────────────────────

/// Create a user-defined config target. Requires name and path.
pub fn create_config_target(
    store: &Store,
    new: NewConfigTarget,
) -> Result<(Store, ConfigTarget), StoreError> {
    require_non_empty(&new.name, "target name")?;
    require_non_empty(&new.config_path, "target config path")?;

    let target = ConfigTarget {
        envelope: Envelope::stamp(),
        name: new.name,
        config_path: new.config_path,
        is_built_in: false,
    };

    let mut next = store.clone();
    next.config_targets
        .insert(target.id().to_string(), target.clone());
    next.metadata.touch();
    Ok((next, target))
}

/// Update a config target. Built-in targets are immutable.
pub fn update_config_target(
    store: &Store,
    id: &str,
    updates: UpdateConfigTarget,
) -> Result<(Store, ConfigTarget), StoreError> {
    let mut next = store.clone();
    let target = next
        .config_targets
        .get_mut(id)
        .filter(|t| t.is_active())
        .ok_or_else(|| StoreError::not_found(EntityKind::ConfigTarget, id))?;
    if target.is_built_in {
        return Err(StoreError::Immutable(id.to_string()));
    }

    if let Some(name) = updates.name {
        target.name = name;
    }
    if let Some(config_path) = updates.config_path {
        target.config_path = config_path;
    }
    target.envelope.touch();

    let target = target.clone();
    next.metadata.touch();
    Ok((next, target))
}

/// Soft-delete a config target. Built-in targets are undeletable.
pub fn soft_delete_config_target(
    store: &Store,
    id: &str,
) -> Result<(Store, ConfigTarget), StoreError> {
    let mut next = store.clone();
    let target = next
        .config_targets
        .get_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::ConfigTarget, id))?;
    if target.is_built_in {
        return Err(StoreError::Immutable(id.to_string()));
    }
    target.envelope.retire();

    let target = target.clone();
    next.metadata.touch();
    Ok((next, target))
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

/// Create a key. Requires a non-empty name and value.
pub fn create_key(store: &Store, new: NewKey) -> Result<(Store, SecretKey), StoreError> {
    require_non_empty(&new.name, "key name")?;
    require_non_empty(&new.value, "key value")?;

    let key = SecretKey {
        envelope: Envelope::stamp(),
        name: new.name,
        value: new.value,
    };

    let mut next = store.clone();
    next.keys.insert(key.id().to_string(), key.clone());
    next.metadata.touch();
    Ok((next, key))
}

/// Soft-delete a key. Server-key relations pointing at it are skipped by
/// the env projection from then on.
pub fn soft_delete_key(store: &Store, id: &str) -> Result<(Store, SecretKey), StoreError> {
    let mut next = store.clone();
    let key = next
        .keys
        .get_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Key, id))?;
    key.envelope.retire();

    let key = key.clone();
    next.metadata.touch();
    Ok((next, key))
}

// ─────────────────────────────────────────────────────────────────────────────
// Relations
// ─────────────────────────────────────────────────────────────────────────────

/// Attach a server to a category with the given order.
///
/// No uniqueness check: attaching the same pair twice yields two active
/// relations, and both contribute to materialization. Neither endpoint is
/// required to exist; the query layer hides dangling references.
pub fn attach_server_to_category(
    store: &Store,
    category_id: &str,
    server_id: &str,
    order: i64,
) -> Result<(Store, CategoryServerRelation), StoreError> {
    let relation = CategoryServerRelation::new(category_id, server_id, order);

    let mut next = store.clone();
    next.category_server_relations
        .insert(relation.id().to_string(), relation.clone());
    next.metadata.touch();
    Ok((next, relation))
}

/// Detach a server from a category: soft-deletes the first active
/// relation (in id order) matching the pair.
pub fn detach_server_from_category(
    store: &Store,
    category_id: &str,
    server_id: &str,
) -> Result<(Store, CategoryServerRelation), StoreError> {
    let relation_id = store
        .category_server_relations
        .values()
        .find(|rel| {
            rel.is_active() && rel.category_id == category_id && rel.server_id == server_id
        })
        .map(|rel| rel.id().to_string())
        .ok_or_else(|| {
            StoreError::not_found(
                EntityKind::CategoryServerRelation,
                format!("{category_id}/{server_id}"),
            )
        })?;

    let mut next = store.clone();
    let relation = next
        .category_server_relations
        .get_mut(&relation_id)
        .ok_or_else(|| StoreError::not_found(EntityKind::CategoryServerRelation, &relation_id))?;
    relation.envelope.retire();

    let relation = relation.clone();
    next.metadata.touch();
    Ok((next, relation))
}

/// Replace a relation's `order` and/or `is_enabled` flag.
pub fn update_relation(
    store: &Store,
    relation_id: &str,
    order: Option<i64>,
    is_enabled: Option<bool>,
) -> Result<(Store, CategoryServerRelation), StoreError> {
    let mut next = store.clone();
    let relation = next
        .category_server_relations
        .get_mut(relation_id)
        .filter(|rel| rel.is_active())
        .ok_or_else(|| StoreError::not_found(EntityKind::CategoryServerRelation, relation_id))?;

    if let Some(order) = order {
        relation.order = order;
    }
    if let Some(is_enabled) = is_enabled {
        relation.is_enabled = is_enabled;
    }
    relation.envelope.touch();

    let relation = relation.clone();
    next.metadata.touch();
    Ok((next, relation))
}

/// Bind a key to a server under the given environment-variable name.
/// Multiple bindings per server are allowed.
pub fn attach_key_to_server(
    store: &Store,
    server_id: &str,
    key_id: &str,
    key_name: &str,
) -> Result<(Store, ServerKeyRelation), StoreError> {
    require_non_empty(key_name, "key name")?;

    let relation = ServerKeyRelation::new(server_id, key_id, key_name);

    let mut next = store.clone();
    next.server_key_relations
        .insert(relation.id().to_string(), relation.clone());
    next.metadata.touch();
    Ok((next, relation))
}

/// Remove a key binding by relation id.
pub fn detach_key_from_server(
    store: &Store,
    relation_id: &str,
) -> Result<(Store, ServerKeyRelation), StoreError> {
    let mut next = store.clone();
    let relation = next
        .server_key_relations
        .get_mut(relation_id)
        .filter(|rel| rel.is_active())
        .ok_or_else(|| StoreError::not_found(EntityKind::ServerKeyRelation, relation_id))?;
    relation.envelope.retire();

    let relation = relation.clone();
    next.metadata.touch();
    Ok((next, relation))
}

// ─────────────────────────────────────────────────────────────────────────────
// Activation and selection
// ─────────────────────────────────────────────────────────────────────────────

/// Set (or clear) the active category for a target.
///
/// Unconditional overwrite — the category id is not checked for
/// existence, matching the invariant that `active_categories` may dangle.
pub fn set_active_category(store: &Store, target: &str, category_id: Option<String>) -> Store {
    let mut next = store.clone();
    next.active_categories
        .insert(target.to_string(), category_id);
    next.metadata.touch();
    next
}

/// Overwrite the UI's last-chosen target filter.
pub fn set_selected_target(store: &Store, target: Option<String>) -> Store {
    let mut next = store.clone();
    next.selected_target = target;
    next.metadata.touch();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CLAUDE_TARGET_ID, TargetScope};

    fn store_with_server() -> (Store, Server) {
        let store = Store::with_defaults();
        create_server(
            &store,
            NewServer::new("fs", r#"{"command":"npx","args":["-y","server-fs"]}"#),
        )
        .unwrap()
    }

    #[test]
    fn test_create_server_stamps_envelope() {
        let (store, server) = store_with_server();
        assert_eq!(server.envelope.version, 1);
        assert!(!server.envelope.deleted);
        assert!(store.servers.contains_key(server.id()));
    }

    #[test]
    fn test_create_server_rejects_empty_fields() {
        let store = Store::with_defaults();
        assert!(matches!(
            create_server(&store, NewServer::new("", "x")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            create_server(&store, NewServer::new("fs", "  ")),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_version_increases_by_one_per_mutation() {
        let (store, server) = store_with_server();
        let id = server.id().to_string();

        let (store, updated) = update_server(
            &store,
            &id,
            UpdateServer {
                name: Some("fs2".into()),
                value: None,
            },
        )
        .unwrap();
        assert_eq!(updated.envelope.version, 2);
        assert_eq!(updated.name, "fs2");
        // value untouched by a name-only update
        assert!(updated.value.contains("server-fs"));

        let (_, deleted) = soft_delete_server(&store, &id).unwrap();
        assert_eq!(deleted.envelope.version, 3);
        assert!(deleted.envelope.updated_at >= updated.envelope.updated_at);
    }

    #[test]
    fn test_update_missing_server_is_not_found() {
        let store = Store::with_defaults();
        let err = update_server(&store, "nope", UpdateServer::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_update_deleted_server_is_not_found() {
        let (store, server) = store_with_server();
        let (store, _) = soft_delete_server(&store, server.id()).unwrap();
        let err = update_server(&store, server.id(), UpdateServer::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_soft_delete_keeps_entity_addressable() {
        let (store, server) = store_with_server();
        let (store, _) = soft_delete_server(&store, server.id()).unwrap();
        let kept = store.servers.get(server.id()).unwrap();
        assert!(kept.envelope.deleted);
    }

    #[test]
    fn test_built_in_target_rejects_update_and_delete() {
        let store = Store::with_defaults();

        let update_err = update_config_target(
            &store,
            CLAUDE_TARGET_ID,
            UpdateConfigTarget {
                name: Some("x".into()),
                config_path: None,
            },
        )
        .unwrap_err();
        assert!(matches!(update_err, StoreError::Immutable(_)));

        let delete_err = soft_delete_config_target(&store, CLAUDE_TARGET_ID).unwrap_err();
        assert!(matches!(delete_err, StoreError::Immutable(_)));
    }

    #[test]
    fn test_failed_mutation_leaves_snapshot_unchanged() {
        let store = Store::with_defaults();
        let before = store.clone();
        let _ = soft_delete_config_target(&store, CLAUDE_TARGET_ID);
        assert_eq!(store, before);
    }

    #[test]
    fn test_duplicate_attach_is_permitted() {
        let (store, server) = store_with_server();
        let (store, category) = create_category(&store, NewCategory::new("Dev")).unwrap();

        let (store, first) =
            attach_server_to_category(&store, category.id(), server.id(), 0).unwrap();
        let (store, second) =
            attach_server_to_category(&store, category.id(), server.id(), 1).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(store.category_server_relations.len(), 2);
    }

    #[test]
    fn test_detach_removes_first_active_match_only() {
        let (store, server) = store_with_server();
        let (store, category) = create_category(&store, NewCategory::new("Dev")).unwrap();
        let (store, _) = attach_server_to_category(&store, category.id(), server.id(), 0).unwrap();
        let (store, _) = attach_server_to_category(&store, category.id(), server.id(), 1).unwrap();

        let (store, detached) =
            detach_server_from_category(&store, category.id(), server.id()).unwrap();
        assert!(detached.envelope.deleted);

        let still_active = store
            .category_server_relations
            .values()
            .filter(|rel| rel.is_active())
            .count();
        assert_eq!(still_active, 1);
    }

    #[test]
    fn test_detach_without_relation_is_not_found() {
        let store = Store::with_defaults();
        let err = detach_server_from_category(&store, "c1", "s1").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_set_active_category_accepts_dangling_id() {
        let store = Store::with_defaults();
        let before = store.metadata.last_updated;
        let store = set_active_category(&store, CLAUDE_TARGET_ID, Some("ghost".into()));
        assert_eq!(
            store.active_categories.get(CLAUDE_TARGET_ID).unwrap(),
            &Some("ghost".to_string())
        );
        assert!(store.metadata.last_updated >= before);
    }

    #[test]
    fn test_category_create_defaults() {
        let store = Store::with_defaults();
        let (_, category) = create_category(&store, NewCategory::new("Everything")).unwrap();
        assert_eq!(category.target, TargetScope::All);
        assert!(!category.is_active);
    }
}
