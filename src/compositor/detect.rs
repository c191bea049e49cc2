//! Compositor detection logic.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::{Compositor, CompositorError, Result};
use super::ewmh::EwmhCompositor;
use super::headless::{HeadlessCompositor, HeadlessSeed};

/// Which compositor backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Probe the session and fall back to headless.
    #[default]
    Auto,
    /// EWMH window manager via the X11 tools.
    Ewmh,
    /// In-process window table.
    Headless,
}

/// Detect and create the appropriate compositor client.
///
/// Detection order for `Auto`:
/// 1. EWMH window manager (via DISPLAY and a working `wmctrl -m`)
/// 2. Fallback to the headless compositor
///
/// An explicitly requested EWMH backend that cannot be reached is an error.
pub fn detect_compositor(kind: BackendKind, seed: HeadlessSeed) -> Result<Arc<dyn Compositor>> {
    select_backend(kind, seed, || {
        EwmhCompositor::new().map(|c| Arc::new(c) as Arc<dyn Compositor>)
    })
}

fn select_backend(
    kind: BackendKind,
    seed: HeadlessSeed,
    probe_ewmh: impl FnOnce() -> Option<Arc<dyn Compositor>>,
) -> Result<Arc<dyn Compositor>> {
    match kind {
        BackendKind::Headless => {
            info!(windows = seed.windows.len(), "Using headless compositor");
            Ok(Arc::new(HeadlessCompositor::from_seed(seed)))
        }
        BackendKind::Ewmh => probe_ewmh().ok_or_else(|| {
            CompositorError::Unavailable(
                "EWMH backend requested but no window manager answered wmctrl".to_string(),
            )
        }),
        BackendKind::Auto => {
            if let Some(compositor) = probe_ewmh() {
                info!("Detected EWMH window manager");
                return Ok(compositor);
            }
            warn!("No supported window manager detected, using headless compositor");
            Ok(Arc::new(HeadlessCompositor::from_seed(seed)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_headless() {
        let compositor =
            detect_compositor(BackendKind::Headless, HeadlessSeed::default()).unwrap();
        assert_eq!(compositor.name(), "Headless");
    }

    #[test]
    fn test_explicit_ewmh_without_window_manager_fails() {
        let result = select_backend(BackendKind::Ewmh, HeadlessSeed::default(), || None);
        assert!(matches!(result, Err(CompositorError::Unavailable(_))));
    }

    #[test]
    fn test_auto_falls_back_to_headless() {
        let compositor =
            select_backend(BackendKind::Auto, HeadlessSeed::default(), || None).unwrap();
        assert_eq!(compositor.name(), "Headless");

        let picked = select_backend(BackendKind::Auto, HeadlessSeed::default(), || {
            Some(Arc::new(HeadlessCompositor::new()) as Arc<dyn Compositor>)
        })
        .unwrap();
        assert_eq!(picked.name(), "Headless");
    }

    #[test]
    fn test_backend_kind_parse() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: BackendKind,
        }
        let w: Wrapper = toml::from_str("backend = \"ewmh\"").unwrap();
        assert_eq!(w.backend, BackendKind::Ewmh);
        assert_eq!(BackendKind::default(), BackendKind::Auto);
    }
}
