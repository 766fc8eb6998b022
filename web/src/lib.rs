use axum_login::AuthManagerLayerBuilder;
use log::*;
use std::net::SocketAddr;
use time::Duration;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod protect;
mod response;
pub mod router;

/// Starts the API server: session store, auth layer, CORS and the router.
pub async fn init_server(app_state: AppState) -> Result<()> {
    // Sessions are stored in the same Postgres the entities live in.
    let pool = app_state
        .database_connection
        .get_postgres_connection_pool()
        .clone();
    let session_store = PostgresStore::new(pool).with_schema_name("fitcoach_platform").map_err(
        |e| {
            error!("Invalid session store schema name: {e:?}");
            Error::from(domain::error::Error {
                source: Some(e.into()),
                error_kind: domain::error::DomainErrorKind::Internal(
                    domain::error::InternalErrorKind::Config,
                ),
            })
        },
    )?;
    session_store.migrate().await.map_err(|e| {
        error!("Failed to run session store migration: {e:?}");
        Error::from(domain::error::Error {
            source: Some(Box::new(e)),
            error_kind: domain::error::DomainErrorKind::Internal(
                domain::error::InternalErrorKind::Other("session store migration".to_string()),
            ),
        })
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(app_state.config.is_production())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            app_state.config.backend_session_expiry_seconds as i64,
        )));

    let backend = domain::user::Backend::new(&app_state.database_connection);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let cors_layer = build_cors_layer(&app_state.config.allowed_origins);

    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let listen_addr = format!("{host}:{port}");

    let router = router::define_routes(app_state)
        .layer(auth_layer)
        .layer(cors_layer);

    info!("Server starting... listening for connections on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| {
            error!("Failed to bind {listen_addr}: {e:?}");
            Error::from(domain::error::Error {
                source: Some(Box::new(e)),
                error_kind: domain::error::DomainErrorKind::Internal(
                    domain::error::InternalErrorKind::Other("TCP bind".to_string()),
                ),
            })
        })?;

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        error!("Server error: {e:?}");
        Error::from(domain::error::Error {
            source: Some(Box::new(e)),
            error_kind: domain::error::DomainErrorKind::Internal(
                domain::error::InternalErrorKind::Other("server".to_string()),
            ),
        })
    })?;

    Ok(())
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<axum::http::HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!("Skipping invalid CORS origin {origin}: {e:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::HeaderName::from_static("x-version"),
        ])
}
