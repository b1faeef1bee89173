//! Entry point for gateway proxy events delivered by an external transport gateway.

use crate::AppState;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use domain::GatewayEvent;
use log::*;

/// POST a gateway proxy event
///
/// Connection events register or unregister the sender and announce it to every
/// other connection. Message events fan the body out to every other connection.
/// Delivery problems are logged and never surface in the response.
#[utoipa::path(
    post,
    path = "/events",
    request_body(content = String, description = "Gateway proxy event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Event handled", body = String),
        (status = 500, description = "Request is not a websocket gateway event", body = String),
    )
)]
pub async fn handle(State(app_state): State<AppState>, body: Bytes) -> impl IntoResponse {
    debug!("Gateway event received: {}", String::from_utf8_lossy(&body));

    let event = GatewayEvent::decode(&body);
    if let GatewayEvent::Malformed { reason } = &event {
        warn!("Rejecting gateway event: {reason}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "not a websocket request");
    }

    app_state.event_handler.handle(&event).await;

    (StatusCode::OK, "OK")
}
