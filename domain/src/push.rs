use crate::error::Error;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Delivers bytes to one already-established connection.
///
/// A failure means the target could not be reached, most often because it
/// closed after the registry snapshot was taken. Callers treat that as an
/// expected outcome, not a fault.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PushChannel: Send + Sync {
    async fn send(&self, connection_id: &str, data: &[u8]) -> Result<(), Error>;
}
