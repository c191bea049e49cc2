//! Domain-specific error types for window-control.
//!
//! Service errors never cross the D-Bus boundary: the dispatcher maps every
//! one of them to the failing method's documented failure value.

use thiserror::Error;

use crate::compositor::{CompositorError, WindowId};

/// Errors raised inside the window query-and-command core.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No window matched the lookup.
    #[error("Window not found: {0}")]
    WindowNotFound(String),

    /// The monitor index is outside the live monitor range.
    #[error("Monitor {index} out of range (have {count})")]
    MonitorOutOfRange { index: i64, count: usize },

    /// An argument failed validation; nothing was changed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The window-management subsystem failed during a read or mutation.
    #[error("Compositor failure: {0}")]
    Subsystem(#[from] CompositorError),

    /// A JSON response could not be encoded.
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    /// A backend panicked while servicing the call.
    #[error("Compositor panicked: {0}")]
    Panicked(String),
}

impl ServiceError {
    pub fn window(id: WindowId) -> Self {
        ServiceError::WindowNotFound(format!("id {id}"))
    }

    /// Whether this is an ordinary lookup miss rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::WindowNotFound(_)
                | ServiceError::MonitorOutOfRange { .. }
                | ServiceError::Subsystem(CompositorError::WindowNotFound(_))
                | ServiceError::Subsystem(CompositorError::MonitorNotFound(_))
        )
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory could not be determined.
    #[error("Config directory not found")]
    NoDirFound,

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Failed to parse the config file.
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[source] toml::de::Error),
}
