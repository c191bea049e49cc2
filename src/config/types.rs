//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::compositor::BackendKind;
use crate::compositor::headless::HeadlessSeed;
use crate::service::{DEFAULT_BUS_NAME, DEFAULT_OBJECT_PATH};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which compositor backend to use.
    pub backend: BackendKind,
    /// Well-known name claimed on the session bus.
    pub bus_name: String,
    /// Object path the interface is exported at.
    pub object_path: String,
    /// Take over the bus name from a running instance.
    pub replace_existing: bool,
    /// Initial window table for the headless backend.
    pub headless: HeadlessSeed,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Auto,
            bus_name: DEFAULT_BUS_NAME.to_string(),
            object_path: DEFAULT_OBJECT_PATH.to_string(),
            replace_existing: false,
            headless: HeadlessSeed::default(),
        }
    }
}
