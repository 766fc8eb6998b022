use entity_api::seed::seed_database;
use log::*;
use service::{config::Config, logging::Logger};

/// Populates a development database with demo data. Never run this against
/// a production database.
#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    if config.is_production() {
        error!("Refusing to seed a production database");
        std::process::exit(1);
    }

    let db = service::init_database(&config)
        .await
        .expect("Failed to connect to the database");

    info!("Seeding database...");
    seed_database(&db).await;
    info!("Done.");
}
