use crate::AppState;
use async_trait::async_trait;
use clap::Parser;
use domain::error::Error as DomainError;
use domain::{ConnectionId, ConnectionStore, PushChannel};
use hub::ConnectionHub;
use service::config::Config;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

pub(crate) fn test_config() -> Config {
    Config::parse_from(["ws_broadcaster"])
}

pub(crate) fn app_state(store: Arc<MemoryStore>, push: Arc<RecordingPushChannel>) -> AppState {
    AppState::with_push_channel(test_config(), store, push, Arc::new(ConnectionHub::new()))
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    ids: Mutex<BTreeSet<ConnectionId>>,
}

impl MemoryStore {
    pub(crate) fn with(ids: &[&str]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(|id| id.to_string()).collect()),
        }
    }

    pub(crate) fn ids(&self) -> Vec<ConnectionId> {
        self.ids.lock().unwrap().iter().cloned().collect()
    }
}

#[async_trait]
impl ConnectionStore for MemoryStore {
    async fn put(&self, connection_id: &str) -> core::result::Result<(), DomainError> {
        self.ids.lock().unwrap().insert(connection_id.to_string());
        Ok(())
    }

    async fn delete(&self, connection_id: &str) -> core::result::Result<(), DomainError> {
        self.ids.lock().unwrap().remove(connection_id);
        Ok(())
    }

    async fn scan_all(&self) -> core::result::Result<Vec<ConnectionId>, DomainError> {
        Ok(self.ids())
    }
}

/// Records every delivery; fails deliveries to the ids in `unreachable`.
#[derive(Default)]
pub(crate) struct RecordingPushChannel {
    pub(crate) unreachable: Vec<String>,
    pub(crate) deliveries: Mutex<Vec<(ConnectionId, String)>>,
}

impl RecordingPushChannel {
    pub(crate) fn deliveries(&self) -> Vec<(ConnectionId, String)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushChannel for RecordingPushChannel {
    async fn send(
        &self,
        connection_id: &str,
        data: &[u8],
    ) -> core::result::Result<(), DomainError> {
        self.deliveries.lock().unwrap().push((
            connection_id.to_string(),
            String::from_utf8_lossy(data).into_owned(),
        ));
        if self.unreachable.iter().any(|id| id == connection_id) {
            return Err(DomainError::stale_connection());
        }
        Ok(())
    }
}
