//! Responsum API example
//!
//! Start-up order: diagnostics, configuration, the application logger and
//! its file flusher, the API client, then the web server until Ctrl-C.

use anyhow::Context as _;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use responsum_api::ResponsumClient;
use responsum_core::ExampleConfig;
use responsum_logging::{AppLogger, ErrorInfo, LoggerConfig};
use responsum_server::{AppState, ExampleServer, ServerConfig};

/// Framework diagnostics; `RUST_LOG` overrides the defaults
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // Note: crate names use underscores in tracing (responsum-api → responsum_api)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "info,responsum_core=debug,responsum_logging=debug,responsum_api=debug,responsum_server=debug,responsum_example=debug",
        )
    });

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ExampleConfig::from_env().context("Failed to load configuration")?;
    info!(
        "Tenant API: {} (port {})",
        config.tenant_base_url(),
        config.server_port
    );

    // The only logger of the process; everything else borrows it
    let logger = Arc::new(AppLogger::new(LoggerConfig::from(&config)));

    let shutdown = CancellationToken::new();
    let flusher = logger.spawn_file_flusher(shutdown.clone());

    let result = run(&config, logger.clone(), shutdown.clone()).await;
    if let Err(e) = &result {
        logger.error("Example server core error", ErrorInfo::from(e));
    }

    shutdown.cancel();
    if let Some(flusher) = flusher {
        if let Err(e) = flusher.await {
            warn!("File log flusher did not stop cleanly: {}", e);
        }
    }

    result
}

async fn run(
    config: &ExampleConfig,
    logger: Arc<AppLogger>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let client = ResponsumClient::from_config(config).context("Failed to create API client")?;
    let state = AppState {
        logger,
        client: Arc::new(client),
    };

    let server = ExampleServer::new(ServerConfig::from(config), state);
    let mut handle = server.spawn(shutdown.clone());

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Shutting down");
            shutdown.cancel();
            handle.await.context("Server task failed")?
        }
        result = &mut handle => result.context("Server task failed")?,
    }
}
