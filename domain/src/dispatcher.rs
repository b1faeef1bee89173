use crate::connection::Registry;
use crate::error::Error;
use crate::message::Message;
use crate::push::PushChannel;
use crate::ConnectionId;
use futures::future::join_all;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Outcome of one broadcast, for logging and tests. Never reported back to the
/// transport gateway.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<ConnectionId>,
    pub failed: Vec<ConnectionId>,
}

impl BroadcastReport {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Fans a message out to every registered connection except its sender.
///
/// Recipients come from a single registry snapshot taken when the broadcast
/// starts. Deliveries run concurrently, each bounded by `delivery_timeout`,
/// and each is attempted exactly once. A failed delivery is logged and
/// dropped.
pub struct Dispatcher {
    registry: Arc<Registry>,
    push: Arc<dyn PushChannel>,
    delivery_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<Registry>,
        push: Arc<dyn PushChannel>,
        delivery_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            push,
            delivery_timeout,
        }
    }

    /// Returns an error only when the broadcast could not start: the message
    /// could not be encoded or the registry could not be enumerated.
    pub async fn broadcast(
        &self,
        sender_id: &str,
        payload: &str,
    ) -> Result<BroadcastReport, Error> {
        let data = serde_json::to_vec(&Message::new(payload, sender_id))?;

        let recipients: Vec<ConnectionId> = self
            .registry
            .list_all()
            .await?
            .into_iter()
            .filter(|connection_id| connection_id != sender_id)
            .collect();

        debug!(
            "Broadcasting from {sender_id} to {} connection(s)",
            recipients.len()
        );

        let deliveries = recipients.into_iter().map(|connection_id| {
            let data = &data;
            async move {
                let outcome = self.deliver(&connection_id, data).await;
                (connection_id, outcome)
            }
        });

        let mut report = BroadcastReport::default();
        for (connection_id, outcome) in join_all(deliveries).await {
            match outcome {
                Ok(()) => report.delivered.push(connection_id),
                Err(e) => {
                    if e.is_stale_connection() {
                        debug!("Skipping stale connection {connection_id}");
                    } else {
                        warn!("Failed to deliver message to connection {connection_id}: {e}");
                    }
                    report.failed.push(connection_id);
                }
            }
        }

        info!(
            "Broadcast from {sender_id}: {} delivered, {} failed",
            report.delivered.len(),
            report.failed.len()
        );

        Ok(report)
    }

    async fn deliver(&self, connection_id: &str, data: &[u8]) -> Result<(), Error> {
        match timeout(self.delivery_timeout, self.push.send(connection_id, data)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(Error::timeout()),
        }
    }
}
