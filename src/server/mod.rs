// src/server/mod.rs

//! HTTP server for the certificate search page.
//!
//! Routes live under `/api`; any other path is served from the static
//! directory, falling back to its `index.html`.

mod handlers;
pub mod response;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{Config, ServerConfig};
use crate::server::response::ApiError;
use crate::services::{CertificateService, MondayClient, Normalizer};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CertificateService>,
    /// Echo internal error messages to clients
    pub development: bool,
}

impl AppState {
    pub fn new(service: CertificateService, development: bool) -> Self {
        Self {
            service: Arc::new(service),
            development,
        }
    }

    fn error(&self, err: AppError, summary: &str) -> ApiError {
        ApiError::from_app(err, summary, self.development)
    }
}

/// Build the application router.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/certificates",
            get(handlers::list).post(handlers::search),
        )
        .route("/certificates/search", post(handlers::search))
        .route("/certificates/{name}", get(handlers::by_name))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(state);

    let static_dir = Path::new(&server.static_dir);
    let site = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api)
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin.trim_end_matches('/')).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Run the HTTP server until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let client = MondayClient::new(&config.monday)?;
    let service = CertificateService::new(
        Arc::new(client),
        Normalizer::new(config.fallback_expiry.clone()),
    );
    let state = AppState::new(service, config.server.is_development());
    let app = router(state, &config.server);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Certificate Tracker server running on port {}", config.server.port);
    info!("Frontend: http://localhost:{}", config.server.port);
    info!("API: http://localhost:{}/api", config.server.port);
    info!("Health check: http://localhost:{}/api/health", config.server.port);
    info!("Environment: {}", config.server.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
