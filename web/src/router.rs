use crate::controller::{connection_controller, event_controller, health_check_controller};
use crate::ws::handler::ws_handler;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "WebSocket Broadcaster API"
        ),
        paths(
            connection_controller::post_to_connection,
            event_controller::handle,
            health_check_controller::health_check,
        ),
        tags(
            (name = "ws_broadcaster", description = "WebSocket connection registry and broadcast fan-out")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(event_routes(app_state.clone()))
        .merge(gateway_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn event_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(event_controller::handle))
        .with_state(app_state)
}

// Built-in gateway: socket upgrade plus its management endpoint
fn gateway_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route(
            "/@connections/{connection_id}",
            post(connection_controller::post_to_connection),
        )
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state, MemoryStore, RecordingPushChannel};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        define_routes(app_state(
            Arc::new(MemoryStore::default()),
            Arc::new(RecordingPushChannel::default()),
        ))
    }

    #[tokio::test]
    async fn health_check_responds() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_lists_the_event_endpoint() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/events"));
        assert!(doc.paths.paths.contains_key("/@connections/{connection_id}"));
    }

    #[tokio::test]
    async fn plain_get_on_ws_is_not_upgraded() {
        let request = Request::builder().uri("/ws").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
    }
}
