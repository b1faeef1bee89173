use crate::ConnectionId;
use serde::{Deserialize, Serialize};

/// Status text broadcast when a connection registers.
pub const CONNECTED: &str = "connected";
/// Status text broadcast when a connection unregisters.
pub const DISCONNECTED: &str = "disconnected";

/// What every recipient of a broadcast receives. Built right before fan-out,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message: String,
    /// The originating connection.
    pub connection_id: ConnectionId,
}

impl Message {
    pub fn new(message: impl Into<String>, connection_id: impl Into<ConnectionId>) -> Self {
        Self {
            message: message.into(),
            connection_id: connection_id.into(),
        }
    }
}
