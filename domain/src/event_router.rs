use crate::connection::Registry;
use crate::dispatcher::Dispatcher;
use crate::message::{CONNECTED, DISCONNECTED};
use async_trait::async_trait;
use events::{EventHandler, GatewayEvent};
use log::*;
use std::sync::Arc;

/// Routes classified gateway events to registry mutations and broadcasts.
///
/// | event      | registry         | broadcast                     |
/// |------------|------------------|-------------------------------|
/// | Connect    | `register(id)`   | `"connected"` from `id`       |
/// | Disconnect | `unregister(id)` | `"disconnected"` from `id`    |
/// | Message    | none             | the body, verbatim, from `id` |
///
/// Unsupported and malformed events cause no side effects.
pub struct EventRouter {
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
}

impl EventRouter {
    pub fn new(registry: Arc<Registry>, dispatcher: Dispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    async fn broadcast(&self, sender_id: &str, payload: &str) {
        if let Err(e) = self.dispatcher.broadcast(sender_id, payload).await {
            warn!("Abandoned broadcast from connection {sender_id}: {e}");
        }
    }
}

#[async_trait]
impl EventHandler for EventRouter {
    async fn handle(&self, event: &GatewayEvent) {
        match event {
            GatewayEvent::Connect { connection_id } => {
                debug!("Handling CONNECT for {connection_id}");
                self.registry.register(connection_id).await;
                self.broadcast(connection_id, CONNECTED).await;
            }
            GatewayEvent::Disconnect { connection_id } => {
                debug!("Handling DISCONNECT for {connection_id}");
                self.registry.unregister(connection_id).await;
                self.broadcast(connection_id, DISCONNECTED).await;
            }
            GatewayEvent::Message {
                connection_id,
                body,
            } => {
                debug!("Handling MESSAGE from {connection_id}");
                self.broadcast(connection_id, body).await;
            }
            GatewayEvent::Unsupported {
                event_type,
                connection_id,
            } => {
                debug!("Ignoring {event_type} event from {connection_id}");
            }
            GatewayEvent::Malformed { reason } => {
                warn!("Ignoring malformed gateway event: {reason}");
            }
        }
    }
}
