use domain::DatabaseConnectionStore;
use log::*;
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!(
        "Starting up WebSocket Broadcaster in {} mode",
        config.runtime_env()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config, &db);
    let store = DatabaseConnectionStore::new(service_state.db_conn());

    let app_state = match web::AppState::new(service_state.config, Arc::new(store)) {
        Ok(app_state) => app_state,
        Err(e) => {
            error!("Failed to initialize the broadcaster: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
    }
}
