//! Daemon initialization functions.
//!
//! Handles setting up logging, the compositor backend, the bus registration
//! and waiting for a shutdown signal.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use zbus::Connection;

use crate::compositor::{Compositor, detect_compositor};
use crate::config::AppConfig;
use crate::service::{ServiceDispatcher, serve};

/// Initialize the tracing subscriber for logging.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // By default, only log from this crate at info level
    // Users can override with RUST_LOG environment variable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("window_control=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Detect and return the compositor.
pub fn init_compositor(config: &AppConfig) -> Result<Arc<dyn Compositor>> {
    let compositor = detect_compositor(config.backend, config.headless.clone())
        .with_context(|| format!("Failed to start the {:?} backend", config.backend))?;
    info!(backend = compositor.name(), "Compositor ready");
    Ok(compositor)
}

/// Export the service on the session bus.
///
/// Fails if the bus is unreachable or the name is held by another instance
/// and `replace_existing` is off.
pub async fn start_dbus_service(
    dispatcher: ServiceDispatcher,
    config: &AppConfig,
) -> Result<Connection> {
    match serve(dispatcher, config).await {
        Ok(connection) => Ok(connection),
        Err(zbus::Error::NameTaken) => {
            error!(name = %config.bus_name, "Service already running");
            anyhow::bail!(
                "{} is owned by another process (set replace_existing = true to take it over)",
                config.bus_name
            )
        }
        Err(e) => Err(e).with_context(|| {
            format!(
                "Failed to export {} at {} on the session bus",
                config.bus_name, config.object_path
            )
        }),
    }
}

/// Wait for SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.context("Failed to listen for SIGINT")?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

/// Wait for Ctrl-C.
#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")
}
