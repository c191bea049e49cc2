//! Compositor-specific error types.

use thiserror::Error;

use super::WindowId;

/// Errors that can occur during compositor operations.
#[derive(Error, Debug)]
pub enum CompositorError {
    /// Failed to reach the window-management subsystem.
    #[error("Failed to connect to compositor: {0}")]
    ConnectionFailed(#[source] std::io::Error),

    /// A helper command ran but reported failure.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse a tool's output.
    #[error("Failed to parse compositor response: {0}")]
    ParseError(String),

    /// The window vanished or never existed.
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),

    /// The monitor index does not exist.
    #[error("Monitor not found: {0}")]
    MonitorNotFound(usize),

    /// The subsystem is temporarily unable to answer.
    #[error("Compositor unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for CompositorError {
    fn from(err: std::io::Error) -> Self {
        CompositorError::ConnectionFailed(err)
    }
}
