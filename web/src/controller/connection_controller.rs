//! Management endpoint of the built-in gateway: pushes data to one held socket.

use crate::{AppState, Error};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use domain::error::Error as DomainError;
use log::*;

/// POST data to a connection held by the built-in gateway
#[utoipa::path(
    post,
    path = "/@connections/{connection_id}",
    params(
        ("connection_id" = String, Path, description = "Connection to push data to"),
    ),
    request_body(content = String, description = "Data to send as one text frame", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Data queued for the connection"),
        (status = 410, description = "Connection is gone"),
    )
)]
pub async fn post_to_connection(
    State(app_state): State<AppState>,
    Path(connection_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST @connections/{connection_id} with {} byte(s)",
        body.len()
    );

    app_state
        .hub
        .send(&connection_id, String::from_utf8_lossy(&body).into_owned())
        .map_err(|e| {
            info!("Cannot push to connection {connection_id}: {e}");
            DomainError::stale_connection()
        })?;

    Ok(StatusCode::OK)
}
