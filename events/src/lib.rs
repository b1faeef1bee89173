//! Inbound gateway events for the broadcaster.
//!
//! The transport gateway notifies us of every connection lifecycle change and
//! every frame a client sends, as a JSON proxy event:
//!
//! ```json
//! { "requestContext": { "eventType": "MESSAGE", "connectionId": "abc=" }, "body": "hello" }
//! ```
//!
//! # Architecture
//!
//! - **ProxyEvent**: the wire shape, decoded with serde
//! - **GatewayEvent**: the classified event the rest of the system routes on
//! - **EventHandler**: trait for whatever reacts to classified events
//!
//! Decoding and classification happen in one step, [`GatewayEvent::decode`], so
//! callers never string-match event types themselves. This crate has no
//! dependencies on internal crates.

use async_trait::async_trait;
use serde::Deserialize;

/// Identifier the transport gateway assigned to a connection.
pub type ConnectionId = String;

pub const CONNECT: &str = "CONNECT";
pub const DISCONNECT: &str = "DISCONNECT";
pub const MESSAGE: &str = "MESSAGE";

/// Wire shape of a gateway proxy event. Only the fields the broadcaster
/// consumes are modelled; anything else in the payload is ignored.
///
/// Absent fields decode to empty values, so an object missing its
/// `requestContext` classifies as an unsupported event rather than a
/// malformed one. Only non-objects and mistyped fields fail to decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    #[serde(default)]
    pub request_context: RequestContext,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub connection_id: ConnectionId,
}

/// A classified inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    /// A client finished its handshake.
    Connect { connection_id: ConnectionId },
    /// A client went away.
    Disconnect { connection_id: ConnectionId },
    /// A client sent a frame. `body` is used verbatim as the broadcast content.
    Message {
        connection_id: ConnectionId,
        body: String,
    },
    /// Well-formed, but an event type we don't act on (matching is case-sensitive).
    Unsupported {
        event_type: String,
        connection_id: ConnectionId,
    },
    /// The payload is not a JSON object or has a field of the wrong type.
    Malformed { reason: String },
}

impl GatewayEvent {
    /// Decodes raw request bytes and classifies the result.
    pub fn decode(raw: &[u8]) -> Self {
        match serde_json::from_slice::<ProxyEvent>(raw) {
            Ok(event) => event.into(),
            Err(err) => GatewayEvent::Malformed {
                reason: err.to_string(),
            },
        }
    }

    pub fn connection_id(&self) -> Option<&str> {
        match self {
            GatewayEvent::Connect { connection_id }
            | GatewayEvent::Disconnect { connection_id }
            | GatewayEvent::Message { connection_id, .. }
            | GatewayEvent::Unsupported { connection_id, .. } => Some(connection_id),
            GatewayEvent::Malformed { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, GatewayEvent::Malformed { .. })
    }
}

impl From<ProxyEvent> for GatewayEvent {
    fn from(event: ProxyEvent) -> Self {
        let RequestContext {
            event_type,
            connection_id,
        } = event.request_context;

        match event_type.as_str() {
            CONNECT => GatewayEvent::Connect { connection_id },
            DISCONNECT => GatewayEvent::Disconnect { connection_id },
            MESSAGE => GatewayEvent::Message {
                connection_id,
                body: event.body.unwrap_or_default(),
            },
            _ => GatewayEvent::Unsupported {
                event_type,
                connection_id,
            },
        }
    }
}

/// Trait for reacting to classified gateway events.
/// Implementations own every side effect (registry writes, fan-out) and must
/// not fail: problems are logged, never returned to the transport.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &GatewayEvent);
}
