//! Daemon module for window-control.
//!
//! The daemon is the long-running process that owns the bus name and serves
//! window control calls until it receives SIGINT or SIGTERM.

mod init;

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::service::ServiceDispatcher;

pub use init::init_logging;

/// Run the window control daemon.
///
/// This is the entry point for `serve` and for running without a subcommand.
/// Logging must already be initialized.
pub async fn run(config_path: Option<&Path>) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting window-control daemon"
    );

    // Initialize config from file (single source of truth)
    let config = crate::config::init_config(config_path);

    let compositor = init::init_compositor(config)?;
    let dispatcher = ServiceDispatcher::new(compositor);

    // Dropping the connection unregisters the interface
    let _connection = init::start_dbus_service(dispatcher, config).await?;

    init::wait_for_shutdown().await?;
    info!("Shutting down");
    Ok(())
}
