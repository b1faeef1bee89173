use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// The only handler error callers can act on is a gone connection; anything
// else is an internal fault.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::External(ExternalErrorKind::StaleConnection) => {
                (StatusCode::GONE, "GONE").into_response()
            }
            error_kind => {
                error!("Request failed: {error_kind:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_connection_maps_to_gone() {
        let response = Error(DomainError::stale_connection()).into_response();

        assert_eq!(response.status(), StatusCode::GONE);
    }

    #[test]
    fn other_failures_map_to_internal_server_error() {
        for err in [DomainError::timeout(), DomainError::config("missing")] {
            let response = Error(err).into_response();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
