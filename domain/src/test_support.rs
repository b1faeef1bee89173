use crate::connection::ConnectionStore;
use crate::error::Error;
use crate::push::PushChannel;
use crate::ConnectionId;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// Ordered in-memory store so fan-out order is deterministic in assertions.
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
    async fn put(&self, connection_id: &str) -> Result<(), Error> {
        self.ids.lock().unwrap().insert(connection_id.to_string());
        Ok(())
    }

    async fn delete(&self, connection_id: &str) -> Result<(), Error> {
        self.ids.lock().unwrap().remove(connection_id);
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<ConnectionId>, Error> {
        Ok(self.ids())
    }
}

#[derive(Default)]
pub(crate) struct RecordingPushChannel {
    deliveries: Mutex<Vec<(ConnectionId, Vec<u8>)>>,
}

impl RecordingPushChannel {
    pub(crate) fn deliveries(&self) -> Vec<(ConnectionId, Vec<u8>)> {
        self.deliveries.lock().unwrap().clone()
    }

    pub(crate) fn recipients(&self) -> Vec<ConnectionId> {
        self.deliveries().into_iter().map(|(id, _)| id).collect()
    }
}

#[async_trait]
impl PushChannel for RecordingPushChannel {
    async fn send(&self, connection_id: &str, data: &[u8]) -> Result<(), Error> {
        self.deliveries
            .lock()
            .unwrap()
            .push((connection_id.to_string(), data.to_vec()));
        Ok(())
    }
}
