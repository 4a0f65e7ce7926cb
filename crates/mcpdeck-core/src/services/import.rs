//! Category import: turn an existing external `mcpServers` document into
//! a category, creating or reusing server definitions.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::{Category, CategoryIcon, NewCategory, NewServer, TargetScope, Versioned};
use crate::ops::queries::active_of;
use crate::ports::CoreError;

use super::StoreService;

/// What to import and what to call the resulting category.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub category_name: String,
    pub description: String,
    pub icon: CategoryIcon,
    pub target: TargetScope,
    /// The external config document text (must contain `mcpServers`).
    pub config_text: String,
}

impl ImportRequest {
    pub fn new(category_name: impl Into<String>, config_text: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
            description: String::new(),
            icon: CategoryIcon::default(),
            target: TargetScope::All,
            config_text: config_text.into(),
        }
    }
}

/// What an import produced.
#[derive(Debug)]
pub struct ImportReport {
    pub category: Category,
    /// Names of servers created by this import.
    pub created_servers: Vec<String>,
    /// Names of pre-existing servers reused by name match.
    pub reused_servers: Vec<String>,
}

/// Builds a category from an external config document.
///
/// Applies each step as an independent round-trip through the store
/// service; a failure partway leaves the earlier steps applied.
pub struct ImportService {
    store: Arc<StoreService>,
}

impl ImportService {
    pub fn new(store: Arc<StoreService>) -> Self {
        Self { store }
    }

    pub async fn import_category(&self, request: ImportRequest) -> Result<ImportReport, CoreError> {
        let parsed: Value = serde_json::from_str(&request.config_text)
            .map_err(|e| CoreError::Validation(format!("invalid JSON: {e}")))?;
        let entries = parsed
            .get("mcpServers")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                CoreError::Validation("config document has no \"mcpServers\" object".to_string())
            })?;

        let category = self
            .store
            .create_category(NewCategory {
                name: request.category_name,
                description: request.description,
                icon: request.icon,
                target: request.target,
                is_active: false,
            })
            .await?;

        let mut created_servers = Vec::new();
        let mut reused_servers = Vec::new();

        for (index, (name, entry)) in entries.iter().enumerate() {
            let snapshot = self.store.snapshot().await;
            let existing = active_of(&snapshot.servers)
                .find(|server| server.name == *name)
                .map(|server| server.id().to_string());

            let server_id = match existing {
                Some(id) => {
                    reused_servers.push(name.clone());
                    id
                }
                None => {
                    let value = serde_json::to_string(entry)
                        .map_err(|e| CoreError::Internal(e.to_string()))?;
                    let server = self
                        .store
                        .create_server(NewServer::new(name.clone(), value))
                        .await?;
                    created_servers.push(name.clone());
                    server.id().to_string()
                }
            };

            self.store
                .attach_server(category.id(), &server_id, index as i64)
                .await?;
        }

        info!(
            category = %category.name,
            created = created_servers.len(),
            reused = reused_servers.len(),
            "Imported category from config document"
        );

        Ok(ImportReport {
            category,
            created_servers,
            reused_servers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Store;
    use crate::ops::queries::category_servers;
    use crate::ports::{NoopStoreEvents, RepositoryError, StoreEventEmitter, StoreRepository};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    struct MemoryRepo(StdMutex<Option<Store>>);

    #[async_trait]
    impl StoreRepository for MemoryRepo {
        async fn load(&self) -> Result<Store, RepositoryError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(Store::with_defaults))
        }

        async fn save(&self, store: &Store) -> Result<(), RepositoryError> {
            *self.0.lock().unwrap() = Some(store.clone());
            Ok(())
        }
    }

    async fn service() -> (Arc<StoreService>, ImportService) {
        let repo = Arc::new(MemoryRepo(StdMutex::new(None)));
        let events: Arc<dyn StoreEventEmitter> = Arc::new(NoopStoreEvents::new());
        let store = Arc::new(StoreService::init(repo, events).await.unwrap());
        (store.clone(), ImportService::new(store))
    }

    const DOC: &str = r#"{
        "mcpServers": {
            "fs": { "command": "npx", "args": ["-y", "server-fs"] },
            "github": { "command": "npx", "args": ["-y", "server-github"] }
        }
    }"#;

    #[tokio::test]
    async fn test_import_creates_category_and_servers() {
        let (store, import) = service().await;

        let report = import
            .import_category(ImportRequest::new("Imported", DOC))
            .await
            .unwrap();

        assert_eq!(report.created_servers.len(), 2);
        assert!(report.reused_servers.is_empty());

        let snapshot = store.snapshot().await;
        let servers = category_servers(&snapshot, report.category.id());
        assert_eq!(servers.len(), 2);
    }

    #[tokio::test]
    async fn test_import_reuses_existing_server_by_name() {
        let (store, import) = service().await;
        store
            .create_server(NewServer::new("fs", r#"{"command":"old"}"#))
            .await
            .unwrap();

        let report = import
            .import_category(ImportRequest::new("Imported", DOC))
            .await
            .unwrap();

        assert_eq!(report.reused_servers, vec!["fs"]);
        assert_eq!(report.created_servers, vec!["github"]);

        // The reused server's value is left alone.
        let snapshot = store.snapshot().await;
        let fs = active_of(&snapshot.servers)
            .find(|s| s.name == "fs")
            .unwrap();
        assert_eq!(fs.value, r#"{"command":"old"}"#);
    }

    #[tokio::test]
    async fn test_import_rejects_documents_without_mcp_servers() {
        let (_, import) = service().await;

        let bad_json = import
            .import_category(ImportRequest::new("x", "not json"))
            .await;
        assert!(matches!(bad_json, Err(CoreError::Validation(_))));

        let wrong_shape = import
            .import_category(ImportRequest::new("x", r#"{"servers":{}}"#))
            .await;
        assert!(matches!(wrong_shape, Err(CoreError::Validation(_))));
    }
}
