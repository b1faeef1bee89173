//! HTTP and WebSocket surface of the broadcaster.
//!
//! - `POST /events` receives gateway proxy events from an external transport gateway
//! - `GET /ws` is the built-in gateway: it terminates WebSockets itself and
//!   turns socket lifecycle and frames into gateway events
//! - `POST /@connections/{connection_id}` is the management endpoint that pushes
//!   data to a socket held by the built-in gateway
//! - `GET /health` for liveness probes

use axum::http::HeaderValue;
use domain::gateway::management_api::ManagementApiClient;
use domain::{ConnectionStore, Dispatcher, EventHandler, EventRouter, PushChannel, Registry};
use hub::ConnectionHub;
use log::*;
use service::config::{Config, PushChannelKind};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod controller;
mod error;
mod push;
mod router;
mod ws;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use push::LocalPushChannel;

/// Web-layer state: configuration plus the collaborators each request needs.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_handler: Arc<dyn EventHandler>,
    pub hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Wires the registry, dispatcher and router over `store`, choosing the push
    /// channel from `config.push_channel`.
    pub fn new(
        config: Config,
        store: Arc<dyn ConnectionStore>,
    ) -> core::result::Result<Self, domain::error::Error> {
        let hub = Arc::new(ConnectionHub::new());

        let push: Arc<dyn PushChannel> = match config.push_channel {
            PushChannelKind::Local => Arc::new(LocalPushChannel::new(Arc::clone(&hub))),
            PushChannelKind::ManagementApi => Arc::new(ManagementApiClient::new(&config)?),
        };
        info!("Pushing broadcasts via the {} channel", config.push_channel);

        Ok(Self::with_push_channel(config, store, push, hub))
    }

    pub fn with_push_channel(
        config: Config,
        store: Arc<dyn ConnectionStore>,
        push: Arc<dyn PushChannel>,
        hub: Arc<ConnectionHub>,
    ) -> Self {
        let registry = Arc::new(Registry::new(store));
        let dispatcher = Dispatcher::new(Arc::clone(&registry), push, config.delivery_timeout());

        Self {
            event_handler: Arc::new(EventRouter::new(registry, dispatcher)),
            hub,
            config,
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let host = format!("{}:{}", interface, app_state.config.port);

    info!("Server starting... listening for connections on http://{host}");

    let cors = cors_layer(&app_state.config);
    let listener = TcpListener::bind(&host).await?;

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins)
}
