use log::*;
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting FitCoach Platform API (env: {})",
        config.runtime_env()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to the database: {e:?}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, &Arc::new(db));

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e:?}");
        std::process::exit(1);
    }
}
