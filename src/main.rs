// src/main.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use exec_healthcheck::{
    config,
    probe::ShellRunner,
    server::{health_service, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("exec_healthcheck=info".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Every argument is a probe command
    let config = config::load_config(std::env::args().skip(1))
        .context("Failed to load configuration")?;

    info!(
        probes = config.probes.len(),
        timeout = ?config.settings.request_timeout(),
        "Configured probes: {:?}",
        config.probes
    );

    let runner = Arc::new(ShellRunner::new(config.settings.shell.clone()));
    let service = health_service(&config, runner);

    ServerBuilder::new(config.settings.listen_addr)
        .with_handler(service)
        .serve_with_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
