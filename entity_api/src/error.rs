//! Error types for entity API
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use sea_orm::error::DbErr;

/// Errors while executing operations against the connection registry tables.
/// Registry writes are keyed upserts and deletes, so data-level failures
/// (missing rows) are not errors here; what remains is the database itself
/// being unreachable or rejecting a statement.
#[derive(Debug, PartialEq)]
pub struct Error {
    // Underlying error emitted from seaORM internals
    pub source: Option<DbErr>,
    // Enum representing which category of error
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // The database could not be reached or a connection could not be acquired
    Unavailable,
    // The database was reached but rejected the statement
    SystemError,
    // Rows came back in a shape that doesn't match the entity
    InvalidRecord,
    // Other errors
    Other,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity API Error: {:?}", self)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        let error_kind = match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => EntityApiErrorKind::Unavailable,
            DbErr::Exec(_) | DbErr::Query(_) => EntityApiErrorKind::SystemError,
            DbErr::Type(_) | DbErr::Json(_) | DbErr::TryIntoErr { .. } => {
                EntityApiErrorKind::InvalidRecord
            }
            _ => EntityApiErrorKind::Other,
        };

        Error {
            source: Some(err),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn connection_failures_are_reported_as_unavailable() {
        let err: Error = DbErr::Conn(RuntimeErr::Internal("connection refused".to_string())).into();

        assert_eq!(err.error_kind, EntityApiErrorKind::Unavailable);
        assert!(err.source.is_some());
    }

    #[test]
    fn rejected_statements_are_reported_as_system_errors() {
        let err: Error =
            DbErr::Exec(RuntimeErr::Internal("relation does not exist".to_string())).into();

        assert_eq!(err.error_kind, EntityApiErrorKind::SystemError);
    }

    #[test]
    fn mismatched_rows_are_reported_as_invalid_records() {
        let err: Error = DbErr::Type("expected text".to_string()).into();

        assert_eq!(err.error_kind, EntityApiErrorKind::InvalidRecord);
    }
}
