use dashmap::DashMap;
use log::*;
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

/// Unique identifier for a socket accepted by the built-in gateway (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ConnectionId> for String {
    fn from(id: ConnectionId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// No socket with this id is held by this process.
    NotFound,
    /// The socket's writer task has already gone away.
    Closed,
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubError::NotFound => write!(f, "connection not found"),
            HubError::Closed => write!(f, "connection closed"),
        }
    }
}

impl std::error::Error for HubError {}

/// Outbound channels of the sockets this process holds, keyed by connection id.
pub struct ConnectionHub {
    connections: DashMap<String, UnboundedSender<String>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a socket's outbound channel and return its new connection id
    pub fn register(&self, sender: UnboundedSender<String>) -> ConnectionId {
        let connection_id = ConnectionId::new();
        self.connections
            .insert(connection_id.as_str().to_owned(), sender);
        debug!("Hub registered socket {connection_id}");
        connection_id
    }

    /// Unregister a socket. Unknown ids are ignored.
    pub fn unregister(&self, connection_id: &str) {
        if self.connections.remove(connection_id).is_some() {
            debug!("Hub unregistered socket {connection_id}");
        }
    }

    /// Queue a text frame for one socket.
    pub fn send(&self, connection_id: &str, frame: String) -> Result<(), HubError> {
        let sender = self
            .connections
            .get(connection_id)
            .ok_or(HubError::NotFound)?;

        sender.send(frame).map_err(|_| {
            warn!("Socket {connection_id} is closed; dropping frame");
            HubError::Closed
        })
    }

    pub fn contains(&self, connection_id: &str) -> bool {
        self.connections.contains_key(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionHub {
    fn default() -> Self {
        Self::new()
    }
}
