//! Read-only projections over a store snapshot.
//!
//! All functions here are total: absent or dangling input yields empty
//! results, never errors.

use std::collections::BTreeMap;

use crate::domain::{Category, CategoryServerRelation, Server, Store, TargetScope, Versioned};

/// All non-deleted values of an entity map, in id order.
pub fn active_of<T: Versioned>(map: &BTreeMap<String, T>) -> impl Iterator<Item = &T> {
    map.values().filter(|entity| entity.is_active())
}

/// Active categories visible under a target filter.
///
/// The `All` filter returns every active category; a specific target
/// returns categories scoped to it plus the all-targets ones.
pub fn categories_for_target<'a>(store: &'a Store, filter: &TargetScope) -> Vec<&'a Category> {
    active_of(&store.categories)
        .filter(|category| match filter {
            TargetScope::All => true,
            TargetScope::Target(id) => category.target.applies_to(id),
        })
        .collect()
}

/// The ordered, enabled servers of a category.
///
/// Active, enabled relations are sorted ascending by `order` (stable, so
/// ties keep id order), then resolved to servers. Relations pointing at
/// missing or soft-deleted servers are dropped. The result order becomes
/// the merge order during materialization.
pub fn category_servers<'a>(store: &'a Store, category_id: &str) -> Vec<&'a Server> {
    let mut relations: Vec<&CategoryServerRelation> = store
        .category_server_relations
        .values()
        .filter(|rel| rel.is_active() && rel.is_enabled && rel.category_id == category_id)
        .collect();
    relations.sort_by_key(|rel| rel.order);

    relations
        .into_iter()
        .filter_map(|rel| store.servers.get(&rel.server_id))
        .filter(|server| server.is_active())
        .collect()
}

/// The active category for a target, if any.
///
/// A missing entry, a `None` entry, a dangling id and a soft-deleted
/// category all come back as `None`.
pub fn active_category_for<'a>(store: &'a Store, target: &str) -> Option<&'a Category> {
    let category_id = store.active_categories.get(target)?.as_ref()?;
    store
        .categories
        .get(category_id)
        .filter(|category| category.is_active())
}

/// Environment variables to inject into a server's materialized config.
///
/// Resolves the server's active key bindings through the store's key
/// map; bindings whose key is missing or soft-deleted are skipped. An
/// empty result means the `env` field is omitted entirely downstream.
pub fn server_env_for(store: &Store, server_id: &str) -> BTreeMap<String, String> {
    store
        .server_key_relations
        .values()
        .filter(|rel| rel.is_active() && rel.server_id == server_id)
        .filter_map(|rel| {
            store
                .keys
                .get(&rel.key_id)
                .filter(|key| key.is_active())
                .map(|key| (rel.key_name.clone(), key.value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewCategory, NewKey, NewServer};
    use crate::ops::mutations::{
        attach_key_to_server, attach_server_to_category, create_category, create_key,
        create_server, set_active_category, soft_delete_category, soft_delete_key,
        soft_delete_server, update_relation,
    };

    fn add_server(store: &Store, name: &str) -> (Store, Server) {
        create_server(
            store,
            NewServer::new(name, format!(r#"{{"command":"{name}"}}"#)),
        )
        .unwrap()
    }

    #[test]
    fn test_active_of_excludes_deleted() {
        let (store, a) = add_server(&Store::with_defaults(), "a");
        let (store, _) = soft_delete_server(&store, a.id()).unwrap();

        let names: Vec<&str> = active_of(&store.servers).map(|s| s.name.as_str()).collect();
        assert!(names.is_empty());
        assert!(store.servers.contains_key(a.id()));
    }

    #[test]
    fn test_category_servers_sorted_by_order() {
        let (store, a) = add_server(&Store::with_defaults(), "a");
        let (store, b) = add_server(&store, "b");
        let (store, c) = add_server(&store, "c");
        let (store, category) = create_category(&store, NewCategory::new("Dev")).unwrap();

        let (store, _) = attach_server_to_category(&store, category.id(), a.id(), 2).unwrap();
        let (store, _) = attach_server_to_category(&store, category.id(), b.id(), 0).unwrap();
        let (store, _) = attach_server_to_category(&store, category.id(), c.id(), 1).unwrap();

        let names: Vec<&str> = category_servers(&store, category.id())
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_category_servers_drops_deleted_servers() {
        let (store, s) = add_server(&Store::with_defaults(), "s");
        let (store, category) = create_category(&store, NewCategory::new("Dev")).unwrap();
        let (store, relation) =
            attach_server_to_category(&store, category.id(), s.id(), 0).unwrap();
        let (store, _) = soft_delete_server(&store, s.id()).unwrap();

        assert!(category_servers(&store, category.id()).is_empty());
        // The relation itself is still active.
        assert!(
            store
                .category_server_relations
                .get(relation.id())
                .unwrap()
                .is_active()
        );
    }

    #[test]
    fn test_category_servers_skips_disabled_relations() {
        let (store, s) = add_server(&Store::with_defaults(), "s");
        let (store, category) = create_category(&store, NewCategory::new("Dev")).unwrap();
        let (store, relation) =
            attach_server_to_category(&store, category.id(), s.id(), 0).unwrap();
        let (store, _) = update_relation(&store, relation.id(), None, Some(false)).unwrap();

        assert!(category_servers(&store, category.id()).is_empty());
    }

    #[test]
    fn test_categories_for_target_includes_all_scoped() {
        let store = Store::with_defaults();
        let (store, _) = create_category(
            &store,
            NewCategory::new("claude only").with_target(TargetScope::Target("claude".into())),
        )
        .unwrap();
        let (store, _) = create_category(
            &store,
            NewCategory::new("cursor only").with_target(TargetScope::Target("cursor".into())),
        )
        .unwrap();
        let (store, _) = create_category(&store, NewCategory::new("everywhere")).unwrap();

        let filter = TargetScope::Target("claude".into());
        let names: Vec<&str> = categories_for_target(&store, &filter)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"claude only"));
        assert!(names.contains(&"everywhere"));

        assert_eq!(categories_for_target(&store, &TargetScope::All).len(), 3);
    }

    #[test]
    fn test_active_category_for_tolerates_dangling() {
        let store = Store::with_defaults();
        assert!(active_category_for(&store, "claude").is_none());

        let store = set_active_category(&store, "claude", Some("ghost".into()));
        assert!(active_category_for(&store, "claude").is_none());

        let (store, category) = create_category(&store, NewCategory::new("Dev")).unwrap();
        let store = set_active_category(&store, "claude", Some(category.id().to_string()));
        assert_eq!(active_category_for(&store, "claude").unwrap().name, "Dev");

        let (store, _) = soft_delete_category(&store, category.id()).unwrap();
        assert!(active_category_for(&store, "claude").is_none());
    }

    #[test]
    fn test_server_env_resolves_active_keys_only() {
        let (store, s) = add_server(&Store::with_defaults(), "s");
        let (store, live) = create_key(&store, NewKey::new("api", "secret123")).unwrap();
        let (store, dead) = create_key(&store, NewKey::new("old", "gone")).unwrap();

        let (store, _) = attach_key_to_server(&store, s.id(), live.id(), "API_KEY").unwrap();
        let (store, _) = attach_key_to_server(&store, s.id(), dead.id(), "OLD_KEY").unwrap();
        let (store, _) = attach_key_to_server(&store, s.id(), "missing", "GHOST").unwrap();
        let (store, _) = soft_delete_key(&store, dead.id()).unwrap();

        let env = server_env_for(&store, s.id());
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("API_KEY").unwrap(), "secret123");
    }
}
