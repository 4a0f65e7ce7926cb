//! Store service - the single owner of the current store document.
//!
//! All mutations funnel through here as synchronous, non-overlapping
//! read-modify-write cycles: apply a pure transform to the held
//! snapshot, persist the new document, swap it in, emit the change
//! event. On any failure the held snapshot (and the persisted document)
//! stay as they were.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    Category, CategoryServerRelation, ConfigTarget, NewCategory, NewConfigTarget, NewKey,
    NewServer, SecretKey, Server, ServerKeyRelation, Store, UpdateCategory, UpdateConfigTarget,
    UpdateServer, Versioned,
};
use crate::events::{CategorySummary, ServerSummary, StoreEvent, TargetSummary};
use crate::ops::{StoreError, mutations};
use crate::ports::{CoreError, StoreEventEmitter, StoreRepository};

/// One step of a batch attachment edit.
#[derive(Debug, Clone)]
pub enum AttachmentChange {
    Attach { server_id: String, order: i64 },
    Detach { server_id: String },
}

/// Result of one batch step.
#[derive(Debug)]
pub struct BatchOutcome {
    pub change: AttachmentChange,
    pub result: Result<(), CoreError>,
}

/// Per-step outcomes of a batch attachment edit.
///
/// There is no multi-operation transaction: steps before a failure have
/// already been durably applied and are not rolled back. Callers surface
/// which steps succeeded.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.applied()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Owns the current store and commits every accepted mutation.
pub struct StoreService {
    repo: Arc<dyn StoreRepository>,
    events: Arc<dyn StoreEventEmitter>,
    current: Mutex<Store>,
}

impl StoreService {
    /// Load the persisted store and take ownership of it.
    pub async fn init(
        repo: Arc<dyn StoreRepository>,
        events: Arc<dyn StoreEventEmitter>,
    ) -> Result<Self, CoreError> {
        let current = repo.load().await?;
        Ok(Self {
            repo,
            events,
            current: Mutex::new(current),
        })
    }

    /// A clone of the current store snapshot.
    pub async fn snapshot(&self) -> Store {
        self.current.lock().await.clone()
    }

    /// One read-modify-write round trip. The new document is persisted
    /// before it replaces the held snapshot, so a save failure leaves
    /// both sides on the old state.
    async fn commit<T>(
        &self,
        mutate: impl FnOnce(&Store) -> Result<(Store, T), StoreError>,
        event: impl FnOnce(&T) -> Option<StoreEvent>,
    ) -> Result<T, CoreError> {
        let mut guard = self.current.lock().await;
        let (next, outcome) = mutate(&guard)?;
        self.repo.save(&next).await?;
        *guard = next;
        drop(guard);

        if let Some(event) = event(&outcome) {
            self.events.emit(event);
        }
        Ok(outcome)
    }

    // ── Servers ──────────────────────────────────────────────────────────

    pub async fn create_server(&self, new: NewServer) -> Result<Server, CoreError> {
        self.commit(
            |store| mutations::create_server(store, new),
            |server| {
                Some(StoreEvent::ServerCreated {
                    server: ServerSummary::of(server),
                })
            },
        )
        .await
    }

    pub async fn update_server(
        &self,
        id: &str,
        updates: UpdateServer,
    ) -> Result<Server, CoreError> {
        self.commit(
            |store| mutations::update_server(store, id, updates),
            |server| {
                Some(StoreEvent::ServerUpdated {
                    server: ServerSummary::of(server),
                })
            },
        )
        .await
    }

    pub async fn delete_server(&self, id: &str) -> Result<(), CoreError> {
        self.commit(
            |store| mutations::soft_delete_server(store, id),
            |server| {
                Some(StoreEvent::ServerDeleted {
                    server_id: server.id().to_string(),
                })
            },
        )
        .await
        .map(|_| ())
    }

    // ── Categories ───────────────────────────────────────────────────────

    pub async fn create_category(&self, new: NewCategory) -> Result<Category, CoreError> {
        self.commit(
            |store| mutations::create_category(store, new),
            |category| {
                Some(StoreEvent::CategoryCreated {
                    category: CategorySummary::of(category),
                })
            },
        )
        .await
    }

    pub async fn update_category(
        &self,
        id: &str,
        updates: UpdateCategory,
    ) -> Result<Category, CoreError> {
        self.commit(
            |store| mutations::update_category(store, id, updates),
            |category| {
                Some(StoreEvent::CategoryUpdated {
                    category: CategorySummary::of(category),
                })
            },
        )
        .await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), CoreError> {
        self.commit(
            |store| mutations::soft_delete_category(store, id),
            |category| {
                Some(StoreEvent::CategoryDeleted {
                    category_id: category.id().to_string(),
                })
            },
        )
        .await
        .map(|_| ())
    }

    // ── Config targets ───────────────────────────────────────────────────

    pub async fn create_target(&self, new: NewConfigTarget) -> Result<ConfigTarget, CoreError> {
        self.commit(
            |store| mutations::create_config_target(store, new),
            |target| {
                Some(StoreEvent::TargetCreated {
                    target: TargetSummary::of(target),
                })
            },
        )
        .await
    }

    pub async fn update_target(
        &self,
        id: &str,
        updates: UpdateConfigTarget,
    ) -> Result<ConfigTarget, CoreError> {
        self.commit(
            |store| mutations::update_config_target(store, id, updates),
            |target| {
                Some(StoreEvent::TargetUpdated {
                    target: TargetSummary::of(target),
                })
            },
        )
        .await
    }

    pub async fn delete_target(&self, id: &str) -> Result<(), CoreError> {
        self.commit(
            |store| mutations::soft_delete_config_target(store, id),
            |target| {
                Some(StoreEvent::TargetDeleted {
                    target_id: target.id().to_string(),
                })
            },
        )
        .await
        .map(|_| ())
    }

    // ── Keys ─────────────────────────────────────────────────────────────

    pub async fn create_key(&self, new: NewKey) -> Result<SecretKey, CoreError> {
        self.commit(|store| mutations::create_key(store, new), |_| None)
            .await
    }

    pub async fn delete_key(&self, id: &str) -> Result<(), CoreError> {
        self.commit(|store| mutations::soft_delete_key(store, id), |_| None)
            .await
            .map(|_| ())
    }

    // ── Relations ────────────────────────────────────────────────────────

    pub async fn attach_server(
        &self,
        category_id: &str,
        server_id: &str,
        order: i64,
    ) -> Result<CategoryServerRelation, CoreError> {
        self.commit(
            |store| mutations::attach_server_to_category(store, category_id, server_id, order),
            |_| None,
        )
        .await
    }

    pub async fn detach_server(&self, category_id: &str, server_id: &str) -> Result<(), CoreError> {
        self.commit(
            |store| mutations::detach_server_from_category(store, category_id, server_id),
            |_| None,
        )
        .await
        .map(|_| ())
    }

    pub async fn set_relation(
        &self,
        relation_id: &str,
        order: Option<i64>,
        is_enabled: Option<bool>,
    ) -> Result<CategoryServerRelation, CoreError> {
        self.commit(
            |store| mutations::update_relation(store, relation_id, order, is_enabled),
            |_| None,
        )
        .await
    }

    pub async fn bind_key(
        &self,
        server_id: &str,
        key_id: &str,
        key_name: &str,
    ) -> Result<ServerKeyRelation, CoreError> {
        self.commit(
            |store| mutations::attach_key_to_server(store, server_id, key_id, key_name),
            |_| None,
        )
        .await
    }

    pub async fn unbind_key(&self, relation_id: &str) -> Result<(), CoreError> {
        self.commit(
            |store| mutations::detach_key_from_server(store, relation_id),
            |_| None,
        )
        .await
        .map(|_| ())
    }

    // ── Activation and selection ─────────────────────────────────────────

    pub async fn set_active_category(
        &self,
        target: &str,
        category_id: Option<String>,
    ) -> Result<(), CoreError> {
        let event_id = category_id.clone();
        self.commit(
            |store| Ok((mutations::set_active_category(store, target, category_id), ())),
            |()| {
                Some(StoreEvent::CategoryActivated {
                    target: target.to_string(),
                    category_id: event_id,
                })
            },
        )
        .await
    }

    pub async fn set_selected_target(&self, target: Option<String>) -> Result<(), CoreError> {
        self.commit(
            |store| Ok((mutations::set_selected_target(store, target), ())),
            |()| None,
        )
        .await
    }

    // ── Batch edits ──────────────────────────────────────────────────────

    /// Apply a sequence of attach/detach steps as independent
    /// round-trips. Failed steps are reported, not rolled back.
    pub async fn apply_attachments(
        &self,
        category_id: &str,
        changes: Vec<AttachmentChange>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for change in changes {
            let result = match &change {
                AttachmentChange::Attach { server_id, order } => self
                    .attach_server(category_id, server_id, *order)
                    .await
                    .map(|_| ()),
                AttachmentChange::Detach { server_id } => {
                    self.detach_server(category_id, server_id).await
                }
            };
            if let Err(ref error) = result {
                warn!(category_id, ?change, %error, "Batch attachment step failed");
            }
            report.outcomes.push(BatchOutcome { change, result });
        }
        report
    }

    /// Replace the whole store with a fresh default document.
    pub async fn reset(&self) -> Result<(), CoreError> {
        let mut guard = self.current.lock().await;
        let next = Store::with_defaults();
        self.repo.save(&next).await?;
        *guard = next;
        drop(guard);

        self.events.emit(StoreEvent::StoreReset);
        info!("Store reset to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CLAUDE_TARGET_ID;
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MemoryRepo {
        saved: StdMutex<Option<Store>>,
        fail_saves: StdMutex<bool>,
    }

    impl MemoryRepo {
        fn saved(&self) -> Option<Store> {
            self.saved.lock().unwrap().clone()
        }

        fn fail_next_saves(&self) {
            *self.fail_saves.lock().unwrap() = true;
        }
    }

    #[async_trait]
    impl StoreRepository for MemoryRepo {
        async fn load(&self) -> Result<Store, RepositoryError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(Store::with_defaults))
        }

        async fn save(&self, store: &Store) -> Result<(), RepositoryError> {
            if *self.fail_saves.lock().unwrap() {
                return Err(RepositoryError::Storage("disk full".into()));
            }
            *self.saved.lock().unwrap() = Some(store.clone());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CapturingEvents {
        seen: Arc<StdMutex<Vec<StoreEvent>>>,
    }

    impl StoreEventEmitter for CapturingEvents {
        fn emit(&self, event: StoreEvent) {
            self.seen.lock().unwrap().push(event);
        }

        fn clone_box(&self) -> Box<dyn StoreEventEmitter> {
            Box::new(self.clone())
        }
    }

    async fn service() -> (Arc<MemoryRepo>, CapturingEvents, StoreService) {
        let repo = Arc::new(MemoryRepo::default());
        let events = CapturingEvents::default();
        let service = StoreService::init(repo.clone(), Arc::new(events.clone()))
            .await
            .unwrap();
        (repo, events, service)
    }

    #[tokio::test]
    async fn test_create_server_persists_and_emits() {
        let (repo, events, service) = service().await;

        let server = service
            .create_server(NewServer::new("fs", r#"{"command":"npx"}"#))
            .await
            .unwrap();

        let saved = repo.saved().unwrap();
        assert!(saved.servers.contains_key(server.id()));

        let seen = events.seen.lock().unwrap();
        assert!(matches!(seen[0], StoreEvent::ServerCreated { .. }));
    }

    #[tokio::test]
    async fn test_rejected_mutation_changes_nothing() {
        let (repo, events, service) = service().await;
        let before = service.snapshot().await;

        let result = service.delete_target(CLAUDE_TARGET_ID).await;
        assert!(matches!(
            result,
            Err(CoreError::Store(StoreError::Immutable(_)))
        ));
        assert_eq!(service.snapshot().await, before);
        assert!(repo.saved().is_none());
        assert!(events.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_old_snapshot() {
        let (repo, _, service) = service().await;
        repo.fail_next_saves();

        let before = service.snapshot().await;
        let result = service
            .create_server(NewServer::new("fs", r#"{"command":"npx"}"#))
            .await;
        assert!(matches!(result, Err(CoreError::Repository(_))));
        assert_eq!(service.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_batch_reports_partial_failure() {
        let (_, _, service) = service().await;
        let server = service
            .create_server(NewServer::new("fs", r#"{"command":"npx"}"#))
            .await
            .unwrap();
        let category = service
            .create_category(NewCategory::new("Dev"))
            .await
            .unwrap();

        let report = service
            .apply_attachments(
                category.id(),
                vec![
                    AttachmentChange::Attach {
                        server_id: server.id().to_string(),
                        order: 0,
                    },
                    // No such relation to detach: this step fails alone.
                    AttachmentChange::Detach {
                        server_id: "ghost".into(),
                    },
                ],
            )
            .await;

        assert_eq!(report.applied(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());

        // The successful step stayed applied.
        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.category_server_relations.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_and_emits() {
        let (repo, events, service) = service().await;
        service
            .create_server(NewServer::new("fs", r#"{"command":"npx"}"#))
            .await
            .unwrap();

        service.reset().await.unwrap();

        assert!(service.snapshot().await.servers.is_empty());
        assert!(repo.saved().unwrap().servers.is_empty());
        let seen = events.seen.lock().unwrap();
        assert!(matches!(seen.last().unwrap(), StoreEvent::StoreReset));
    }

    #[tokio::test]
    async fn test_set_active_category_emits_activation() {
        let (_, events, service) = service().await;
        service
            .set_active_category(CLAUDE_TARGET_ID, Some("c1".into()))
            .await
            .unwrap();

        let seen = events.seen.lock().unwrap();
        assert!(matches!(
            seen.last().unwrap(),
            StoreEvent::CategoryActivated { .. }
        ));
    }
}
