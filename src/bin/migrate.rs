use log::{error, info};
use migration::{Migrator, MigratorTrait};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Migrating database [{}]...", config.database_url());

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config, &db);

    let schema = service_state.config.db_schema.clone();
    if let Err(e) = migration::create_schema(service_state.db_conn_ref(), &schema).await {
        error!("Failed to create schema {schema}: {e}");
        std::process::exit(1);
    }

    match Migrator::up(service_state.db_conn_ref(), None).await {
        Ok(()) => info!("Database is up to date"),
        Err(e) => {
            error!("Migration failed: {e}");
            std::process::exit(1);
        }
    }
}
