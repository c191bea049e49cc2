//! Configuration management for window-control.
//!
//! The config lives at `~/.config/window-control/config.toml`. Every field
//! is optional; a missing or broken file leaves the defaults in place.

mod service;
mod types;
mod validation;

pub use service::{config_dir, config_path, init_config, load_app_config, load_config_from};
pub use types::AppConfig;
pub use validation::{ValidationWarning, is_valid_bus_name, is_valid_object_path, validate_config};
