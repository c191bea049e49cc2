//! Configuration validation utilities.
//!
//! Provides validation for configuration values, returning warnings for
//! non-fatal issues that should be logged but don't prevent startup.

use std::collections::HashSet;
use zbus::names::WellKnownName;
use zbus::zvariant::ObjectPath;

use crate::compositor::headless::HeadlessSeed;

use super::types::AppConfig;

/// Non-fatal validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    /// The field that has an issue.
    pub field: String,
    /// A description of the issue.
    pub message: String,
}

impl ValidationWarning {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate the entire config, returning warnings for non-fatal issues.
///
/// This function checks for:
/// - Malformed bus names and object paths (registration will fail)
/// - A headless seed with windows but no monitors
/// - Duplicate window ids, bad monitor geometry and a dangling focus id
pub fn validate_config(config: &AppConfig) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    if !is_valid_bus_name(&config.bus_name) {
        warnings.push(ValidationWarning::new(
            "bus_name",
            format!(
                "'{}' is not a valid well-known bus name. Registration will fail.",
                config.bus_name
            ),
        ));
    }

    if !is_valid_object_path(&config.object_path) {
        warnings.push(ValidationWarning::new(
            "object_path",
            format!(
                "'{}' is not a valid object path. Registration will fail.",
                config.object_path
            ),
        ));
    }

    warnings.extend(validate_seed(&config.headless));
    warnings
}

/// Validate the headless seed.
fn validate_seed(seed: &HeadlessSeed) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    if seed.monitors.is_empty() && !seed.windows.is_empty() {
        warnings.push(ValidationWarning::new(
            "headless.monitors",
            "Seed has windows but no monitors. A 1920x1080 monitor will be used.",
        ));
    }

    for (i, monitor) in seed.monitors.iter().enumerate() {
        if monitor.rect.width <= 0 || monitor.rect.height <= 0 {
            warnings.push(ValidationWarning::new(
                format!("headless.monitors.{i}.rect"),
                format!(
                    "Monitor size {}x{} must be positive.",
                    monitor.rect.width, monitor.rect.height
                ),
            ));
        }
        if !(monitor.scale.is_finite() && monitor.scale > 0.0) {
            warnings.push(ValidationWarning::new(
                format!("headless.monitors.{i}.scale"),
                format!("Scale {} must be a positive number.", monitor.scale),
            ));
        }
    }

    if seed.monitors.iter().filter(|m| m.primary).count() > 1 {
        warnings.push(ValidationWarning::new(
            "headless.monitors",
            "More than one monitor is marked primary. The first one wins.",
        ));
    }

    let mut seen = HashSet::new();
    for window in &seed.windows {
        if !seen.insert(window.id) {
            warnings.push(ValidationWarning::new(
                "headless.windows",
                format!(
                    "Duplicate window id {}. Lookups by id will only find the first.",
                    window.id
                ),
            ));
        }
    }

    if let Some(focused) = seed.focused
        && !seen.contains(&focused)
    {
        warnings.push(ValidationWarning::new(
            "headless.focused",
            format!("Focused window {focused} is not in the seed."),
        ));
    }

    warnings
}

/// Whether `name` can be requested as a well-known bus name.
pub fn is_valid_bus_name(name: &str) -> bool {
    WellKnownName::try_from(name).is_ok()
}

/// Whether `path` is a syntactically valid object path.
pub fn is_valid_object_path(path: &str) -> bool {
    ObjectPath::try_from(path).is_ok()
}
