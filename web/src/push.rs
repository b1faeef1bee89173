use async_trait::async_trait;
use domain::error::Error;
use domain::PushChannel;
use hub::{ConnectionHub, HubError};
use std::sync::Arc;

/// Delivers broadcasts straight to sockets held by the built-in gateway.
pub struct LocalPushChannel {
    hub: Arc<ConnectionHub>,
}

impl LocalPushChannel {
    pub fn new(hub: Arc<ConnectionHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl PushChannel for LocalPushChannel {
    async fn send(&self, connection_id: &str, data: &[u8]) -> Result<(), Error> {
        let frame = String::from_utf8_lossy(data).into_owned();

        self.hub
            .send(connection_id, frame)
            .map_err(|e| match e {
                // Registered in the store but not held here: the socket is gone
                // or belongs to another process.
                HubError::NotFound | HubError::Closed => Error::stale_connection(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn delivers_to_a_held_socket() {
        let hub = Arc::new(ConnectionHub::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx);

        LocalPushChannel::new(hub)
            .send(id.as_str(), br#"{"message":"hi","connectionId":"A"}"#)
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await.as_deref(),
            Some(r#"{"message":"hi","connectionId":"A"}"#)
        );
    }

    #[tokio::test]
    async fn unknown_socket_is_a_stale_connection() {
        let push = LocalPushChannel::new(Arc::new(ConnectionHub::new()));

        let err = push.send("gone", b"{}").await.unwrap_err();

        assert!(err.is_stale_connection());
    }
}
