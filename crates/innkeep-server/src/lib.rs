//! Innkeep Server: REST API for hotel search, booking and management.
//!
//! # Layout
//! - `/api/users`, `/api/auth`: registration and cookie sessions
//! - `/api/hotels`: public search, detail and the booking workflow
//! - `/api/my-hotels`, `/api/my-bookings`: signed-in host and guest views
//! - everything else: the prebuilt frontend, when `STATIC_DIR` is set

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use innkeep_db::{DbError, DbManager};
use innkeep_gateway::{CloudinaryMediaStore, GatewayError, StripePaymentGateway};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use config::{AppConfig, ConfigError, ServerConfig};
use state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Connect(#[from] surrealdb::Error),

    #[error(transparent)]
    Migration(#[from] DbError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn cors(server: &ServerConfig) -> CorsLayer {
    let origin = match server
        .frontend_url
        .as_deref()
        .map(|url| HeaderValue::from_str(url.trim_end_matches('/')))
    {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(e)) => {
            warn!("Invalid FRONTEND_URL ({e}), mirroring request origin");
            AllowOrigin::mirror_request()
        }
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

/// Build the full application router.
pub fn app(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let mut router = Router::new().nest("/api", routes::api());

    if let Some(dir) = &server.static_dir {
        info!(dir = %dir.display(), "Serving static frontend");
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router
        .layer(cors(server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("innkeep=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();
}

pub async fn start_server(config: AppConfig) -> Result<(), StartupError> {
    let db = DbManager::connect(&config.db).await?;
    innkeep_db::run_migrations(db.client()).await?;

    let payments = Arc::new(StripePaymentGateway::new(config.stripe)?);
    let media = Arc::new(CloudinaryMediaStore::new(config.cloudinary)?);

    let state = AppState::new(
        db.client().clone(),
        config.auth,
        payments,
        media,
        config.server.production,
    );
    let app = app(state, &config.server);

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
