//! Enumeration of user-visible top-level windows.

use std::sync::Arc;
use tracing::trace;

use crate::compositor::{Compositor, CompositorError, WindowId, WindowType};

/// A resolved window. Only the id is held, never a live object: the window
/// may vanish at any time and every use goes back through the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(WindowId);

impl WindowHandle {
    pub fn id(self) -> WindowId {
        self.0
    }
}

/// Reads the live window set from the compositor.
#[derive(Clone)]
pub struct WindowSource {
    compositor: Arc<dyn Compositor>,
}

impl WindowSource {
    pub fn new(compositor: Arc<dyn Compositor>) -> Self {
        Self { compositor }
    }

    /// All normal windows in the compositor's natural order.
    ///
    /// Actors without a backing window and windows whose type can't be read
    /// are skipped. An enumeration failure yields an empty snapshot.
    pub fn snapshot(&self) -> Vec<WindowHandle> {
        self.try_snapshot().unwrap_or_default()
    }

    /// Like [`snapshot`](Self::snapshot), but hands enumeration failures to
    /// the caller so the dispatcher can log them.
    pub fn try_snapshot(&self) -> Result<Vec<WindowHandle>, CompositorError> {
        let actors = self.compositor.window_actors()?;
        let total = actors.len();

        let windows: Vec<WindowHandle> = actors
            .into_iter()
            .filter_map(|actor| actor.window)
            .filter(|&id| matches!(self.compositor.window_type(id), Ok(WindowType::Normal)))
            .map(WindowHandle)
            .collect();

        trace!(actors = total, normal = windows.len(), "Window snapshot");
        Ok(windows)
    }

    pub fn compositor(&self) -> &Arc<dyn Compositor> {
        &self.compositor
    }
}
