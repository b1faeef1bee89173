use crate::error::Error;
use crate::ConnectionId;
use async_trait::async_trait;
use entity_api::connection as ConnectionApi;
use log::*;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Durable key-value store backing the connection registry.
/// Every call goes to the store; implementations must not cache.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Inserts or overwrites the record keyed by `connection_id`.
    async fn put(&self, connection_id: &str) -> Result<(), Error>;

    /// Deletes the record keyed by `connection_id`. Absent keys are not an error.
    async fn delete(&self, connection_id: &str) -> Result<(), Error>;

    /// Returns every stored connection id, unordered and unpaginated.
    async fn scan_all(&self) -> Result<Vec<ConnectionId>, Error>;
}

/// [`ConnectionStore`] over the `connections` table.
#[derive(Clone)]
pub struct DatabaseConnectionStore {
    db: Arc<DatabaseConnection>,
}

impl DatabaseConnectionStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConnectionStore for DatabaseConnectionStore {
    async fn put(&self, connection_id: &str) -> Result<(), Error> {
        Ok(ConnectionApi::put(&self.db, connection_id).await?)
    }

    async fn delete(&self, connection_id: &str) -> Result<(), Error> {
        Ok(ConnectionApi::delete(&self.db, connection_id).await?)
    }

    async fn scan_all(&self) -> Result<Vec<ConnectionId>, Error> {
        Ok(ConnectionApi::find_all_ids(&self.db).await?)
    }
}

/// The set of live connections.
///
/// Registration and removal never fail from the caller's point of view: a
/// store outage is logged and the gateway handshake carries on. Enumeration
/// does return store errors, since a broadcast without a recipient list has
/// to be abandoned.
pub struct Registry {
    store: Arc<dyn ConnectionStore>,
}

impl Registry {
    pub fn new(store: Arc<dyn ConnectionStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, connection_id: &str) {
        match self.store.put(connection_id).await {
            Ok(()) => info!("Registered connection {connection_id}"),
            Err(e) => warn!("Failed to register connection {connection_id}: {e}"),
        }
    }

    pub async fn unregister(&self, connection_id: &str) {
        match self.store.delete(connection_id).await {
            Ok(()) => info!("Unregistered connection {connection_id}"),
            Err(e) => warn!("Failed to unregister connection {connection_id}: {e}"),
        }
    }

    /// Snapshot of the registered connection ids at the time of the call.
    pub async fn list_all(&self) -> Result<Vec<ConnectionId>, Error> {
        let connection_ids = self.store.scan_all().await?;
        debug!("Registry holds {} connection(s)", connection_ids.len());
        Ok(connection_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
    use crate::test_support::MemoryStore;
    use mockall::predicate::function;

    fn store_unavailable() -> Error {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Unavailable,
            )),
        }
    }

    #[tokio::test]
    async fn register_writes_through_to_the_store() {
        let mut store = MockConnectionStore::new();
        store
            .expect_put()
            .with(function(|id: &str| id == "conn-1"))
            .times(1)
            .returning(|_| Ok(()));

        Registry::new(Arc::new(store)).register("conn-1").await;
    }

    #[tokio::test]
    async fn registering_twice_leaves_one_record() {
        let store = Arc::new(MemoryStore::default());
        let registry = Registry::new(store.clone());

        registry.register("X").await;
        registry.register("X").await;

        assert_eq!(store.ids(), vec!["X"]);
    }

    #[tokio::test]
    async fn unregistering_an_absent_connection_changes_nothing() {
        let store = Arc::new(MemoryStore::with(&["A"]));
        let registry = Registry::new(store.clone());

        registry.unregister("X").await;

        assert_eq!(store.ids(), vec!["A"]);
    }

    #[tokio::test]
    async fn register_swallows_store_failures() {
        let mut store = MockConnectionStore::new();
        store
            .expect_put()
            .times(1)
            .returning(|_| Err(store_unavailable()));

        // Completing without a panic or error is the contract.
        Registry::new(Arc::new(store)).register("conn-1").await;
    }

    #[tokio::test]
    async fn unregister_swallows_store_failures() {
        let mut store = MockConnectionStore::new();
        store
            .expect_delete()
            .with(function(|id: &str| id == "conn-1"))
            .times(1)
            .returning(|_| Err(store_unavailable()));

        Registry::new(Arc::new(store)).unregister("conn-1").await;
    }

    #[tokio::test]
    async fn list_all_returns_store_contents() -> Result<(), Error> {
        let mut store = MockConnectionStore::new();
        store
            .expect_scan_all()
            .times(1)
            .returning(|| Ok(vec!["A".to_string(), "B".to_string()]));

        let ids = Registry::new(Arc::new(store)).list_all().await?;

        assert_eq!(ids, vec!["A", "B"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_all_surfaces_store_failures() {
        let mut store = MockConnectionStore::new();
        store
            .expect_scan_all()
            .times(1)
            .returning(|| Err(store_unavailable()));

        let result = Registry::new(Arc::new(store)).list_all().await;

        assert!(result.is_err());
    }
}
