//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors are modeled as a tree with `domain::error::Error` at the root holding
/// a tree of `error_kind` enums. The `source` field keeps the original error.
/// `entity_api` errors are translated here so that `web` never depends on
/// `entity_api` directly.
///
/// None of these errors ever reach the transport gateway as a failed
/// invocation: the router logs them and reports success. They exist so each
/// layer can log precisely what went wrong.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Config,
    Other(String),
}

/// Registry store failures, reduced to what the domain layer cares about.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    /// The store could not be reached.
    Unavailable,
    /// The store answered with records that don't fit the registry.
    Invalid,
    Other(String),
}

/// Failures of the push channel.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// The target connection is gone. Expected whenever a client disconnects
    /// between the registry snapshot and the delivery.
    StaleConnection,
    /// The delivery did not complete within the per-delivery timeout.
    Timeout,
    Other(String),
}

impl Error {
    pub fn config(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Error {
            source: Some(reason.into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }

    pub fn stale_connection() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::StaleConnection),
        }
    }

    pub fn timeout() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Timeout),
        }
    }

    pub fn is_stale_connection(&self) -> bool {
        self.error_kind == DomainErrorKind::External(ExternalErrorKind::StaleConnection)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Domain Error: {:?} ({source})", self.error_kind),
            None => write!(f, "Domain Error: {:?}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::Unavailable => EntityErrorKind::Unavailable,
            EntityApiErrorKind::InvalidRecord => EntityErrorKind::Invalid,
            EntityApiErrorKind::SystemError | EntityApiErrorKind::Other => {
                EntityErrorKind::Other("EntityErrorKind".to_string())
            }
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        } else if err.is_timeout() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Timeout),
            }
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to serialize broadcast message".to_string(),
            )),
        }
    }
}
