//! Example Server
//!
//! Serves the log viewer, the diagnostics endpoints and one endpoint per
//! example operation.

mod error;
mod handlers;
pub mod logging_middleware;

pub use error::ServerError;
pub use handlers::AppState;

use anyhow::Context as _;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use responsum_core::branding::DEFAULT_SERVER_PORT;
use responsum_core::ExampleConfig;

/// Example server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl From<&ExampleConfig> for ServerConfig {
    fn from(config: &ExampleConfig) -> Self {
        Self {
            port: config.server_port,
            ..Self::default()
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid address {}:{}", self.host, self.port))
    }
}

/// Router with every route and layer of the example server
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Log viewer
        .route("/", get(handlers::index))
        .route("/index.js", get(handlers::index_js))
        .route("/index.css", get(handlers::index_css))
        .route("/log", get(handlers::get_log))
        .route("/clearLog", post(handlers::clear_log))
        // Diagnostics
        .route("/ping", post(handlers::ping))
        .route("/webhook", post(handlers::webhook))
        // Operations
        .route("/getUuids", post(handlers::get_uuids))
        .route("/getCountriesByFilter", post(handlers::get_countries_by_filter))
        .route("/createNewIMS", post(handlers::create_new_ims))
        .route("/updateIMS", post(handlers::update_ims))
        .route(
            "/createNewUserWithPermissions",
            post(handlers::create_new_user_with_permissions),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            logging_middleware::http_logging_middleware,
        ))
        .layer(cors)
}

pub struct ExampleServer {
    config: ServerConfig,
    state: AppState,
}

impl ExampleServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown` is cancelled
    pub async fn run(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let addr = self.config.addr()?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let port = listener.local_addr()?.port();

        info!("[Server] Listening on {}", addr);
        self.state.logger.info(format!("Running on port {}", port), ());

        let router = build_router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .context("Server error")?;

        info!("[Server] Stopped");
        Ok(())
    }

    /// Start the server in the background
    pub fn spawn(self, shutdown: CancellationToken) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
