//! Compositor abstraction for window management.
//!
//! This module provides a trait-based abstraction over the window-management
//! subsystem of the running session. The service core only reads window state
//! and issues mutation requests through [`Compositor`]; it never owns window
//! objects. Implementations are provided for EWMH window managers (X11 tools)
//! and an in-process headless window table.

mod detect;
pub mod error;
pub mod ewmh;
pub mod headless;

pub use detect::{BackendKind, detect_compositor};
pub use error::CompositorError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque window identifier assigned by the compositor.
///
/// Unique among currently open windows and never reused while the window
/// exists. It is the only field usable to re-identify a window across calls.
pub type WindowId = u64;

/// Result alias for compositor operations.
pub type Result<T> = std::result::Result<T, CompositorError>;

/// A rectangle in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside the rectangle (right/bottom edges excluded).
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && (px as i64) < self.x as i64 + self.width as i64
            && (py as i64) < self.y as i64 + self.height as i64
    }

    /// Centre point, rounded toward the origin and clamped to the `i32` range.
    pub fn center(&self) -> (i32, i32) {
        let cx = self.x as i64 + self.width as i64 / 2;
        let cy = self.y as i64 + self.height as i64 / 2;
        (clamp_i32(cx), clamp_i32(cy))
    }

    /// Overlapping area of two rectangles, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x) as i64;
        let y1 = self.y.max(other.y) as i64;
        let x2 = (self.x as i64 + self.width as i64).min(other.x as i64 + other.width as i64);
        let y2 = (self.y as i64 + self.height as i64).min(other.y as i64 + other.height as i64);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Rect::new(
            x1 as i32,
            y1 as i32,
            clamp_i32(x2 - x1),
            clamp_i32(y2 - y1),
        ))
    }

    /// `(x, y, width, height)`, the wire form of a rectangle.
    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Window kind as reported by the compositor.
///
/// Codes follow the fixed table used on the wire (`List` returns the raw
/// code, `ListDetailed` returns the lowercase name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    #[default]
    Normal,
    Desktop,
    Dock,
    Dialog,
    ModalDialog,
    Toolbar,
    Menu,
    Utility,
    Splashscreen,
    DropdownMenu,
    PopupMenu,
    Tooltip,
    Notification,
    Combo,
    Dnd,
    OverrideOther,
    /// A code outside the known table.
    #[serde(untagged)]
    Other(i32),
}

impl WindowType {
    const TABLE: [(WindowType, &'static str); 16] = [
        (WindowType::Normal, "normal"),
        (WindowType::Desktop, "desktop"),
        (WindowType::Dock, "dock"),
        (WindowType::Dialog, "dialog"),
        (WindowType::ModalDialog, "modal_dialog"),
        (WindowType::Toolbar, "toolbar"),
        (WindowType::Menu, "menu"),
        (WindowType::Utility, "utility"),
        (WindowType::Splashscreen, "splashscreen"),
        (WindowType::DropdownMenu, "dropdown_menu"),
        (WindowType::PopupMenu, "popup_menu"),
        (WindowType::Tooltip, "tooltip"),
        (WindowType::Notification, "notification"),
        (WindowType::Combo, "combo"),
        (WindowType::Dnd, "dnd"),
        (WindowType::OverrideOther, "override_other"),
    ];

    /// Numeric code of this window type.
    pub fn code(self) -> i32 {
        match self {
            WindowType::Other(code) => code,
            known => Self::TABLE
                .iter()
                .position(|(t, _)| *t == known)
                .map(|i| i as i32)
                .unwrap_or(-1),
        }
    }

    /// Window type for a numeric code.
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::TABLE.get(i))
            .map(|(t, _)| *t)
            .unwrap_or(WindowType::Other(code))
    }

    /// Lowercase name, `unknown` for codes outside the table.
    pub fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

/// Maximization state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maximized {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

/// A top-level window actor. Actors can exist briefly without a backing
/// window during creation and teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowActor {
    pub window: Option<WindowId>,
}

/// Raw readable properties of one window, as the compositor reports them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowProps {
    pub title: Option<String>,
    pub wm_class: Option<String>,
    pub wm_class_instance: Option<String>,
    pub sandboxed_app_id: Option<String>,
    pub gtk_application_id: Option<String>,
    pub has_focus: bool,
    pub is_hidden: bool,
    pub is_minimized: bool,
    pub maximized: Maximized,
    pub is_fullscreen: bool,
    pub is_above: bool,
    pub is_on_all_workspaces: bool,
    pub is_skip_taskbar: bool,
    /// Index of the workspace the window is on, if any.
    pub workspace: Option<i32>,
    pub monitor: i32,
    pub pid: i32,
    pub window_type: WindowType,
    pub frame_rect: Rect,
}

/// Geometry and properties of one physical display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub rect: Rect,
    pub scale: f64,
    /// Output connector name, when the compositor exposes it.
    #[serde(default)]
    pub connector: Option<String>,
}

/// Capability interface onto the window-management subsystem.
///
/// Implementations must be thread-safe (Send + Sync) as the compositor is
/// shared between the D-Bus interface object and the daemon.
pub trait Compositor: Send + Sync {
    /// Enumerate all top-level window actors in the subsystem's natural
    /// (stacking) order.
    fn window_actors(&self) -> Result<Vec<WindowActor>>;

    /// Kind of the given window.
    fn window_type(&self, id: WindowId) -> Result<WindowType>;

    /// Read every property of the given window.
    fn window_props(&self, id: WindowId) -> Result<WindowProps>;

    /// Timestamp the subsystem considers "now", used for focus-stealing
    /// prevention.
    fn current_time(&self) -> u32;

    /// Focus and raise.
    fn activate(&self, id: WindowId, timestamp: u32) -> Result<()>;

    /// Set input focus without changing stacking.
    fn focus(&self, id: WindowId, timestamp: u32) -> Result<()>;

    /// Reposition the frame, preserving size.
    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()>;

    /// Move and resize the frame in one request.
    fn move_resize_frame(&self, id: WindowId, rect: Rect) -> Result<()>;

    fn minimize(&self, id: WindowId) -> Result<()>;
    fn unminimize(&self, id: WindowId) -> Result<()>;

    /// Maximize in both axes.
    fn maximize(&self, id: WindowId) -> Result<()>;
    fn unmaximize(&self, id: WindowId) -> Result<()>;

    fn make_fullscreen(&self, id: WindowId) -> Result<()>;
    fn unmake_fullscreen(&self, id: WindowId) -> Result<()>;

    fn set_above(&self, id: WindowId, above: bool) -> Result<()>;

    /// Pin the window to all workspaces, or unpin it.
    fn set_sticky(&self, id: WindowId, sticky: bool) -> Result<()>;

    /// Send a polite close request. The application may refuse or prompt.
    fn delete(&self, id: WindowId, timestamp: u32) -> Result<()>;

    /// All monitors, indexed in subsystem order.
    fn monitors(&self) -> Result<Vec<MonitorInfo>>;

    /// Index of the primary monitor.
    fn primary_monitor(&self) -> Result<usize>;

    /// Usable area of the active workspace on the given monitor.
    fn work_area(&self, monitor: usize) -> Result<Rect>;

    /// Get the compositor name for logging/debugging.
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compositor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_type_codes() {
        assert_eq!(WindowType::Normal.code(), 0);
        assert_eq!(WindowType::Dock.code(), 2);
        assert_eq!(WindowType::OverrideOther.code(), 15);
        assert_eq!(WindowType::from_code(4), WindowType::ModalDialog);
        assert_eq!(WindowType::from_code(42), WindowType::Other(42));
        assert_eq!(WindowType::Other(42).code(), 42);
    }

    #[test]
    fn test_window_type_names() {
        assert_eq!(WindowType::Normal.name(), "normal");
        assert_eq!(WindowType::DropdownMenu.name(), "dropdown_menu");
        assert_eq!(WindowType::Other(99).name(), "unknown");
        assert_eq!(WindowType::from_code(-1).name(), "unknown");
    }

    #[test]
    fn test_rect_contains_and_center() {
        let r = Rect::new(0, 0, 1920, 1080);
        assert!(r.contains(0, 0));
        assert!(r.contains(1919, 1079));
        assert!(!r.contains(1920, 0));
        assert_eq!(r.center(), (960, 540));
        assert_eq!(
            Rect::new(i32::MAX, i32::MIN, 800, -600).center(),
            (i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 1920, 1080);
        let b = Rect::new(0, 32, 3840, 1048);
        assert_eq!(a.intersect(&b), Some(Rect::new(0, 32, 1920, 1048)));
        assert_eq!(a.intersect(&Rect::new(1920, 0, 100, 100)), None);
        let far = Rect::new(i32::MAX, 0, 800, 600);
        assert_eq!(far.intersect(&a), None);
        assert_eq!(
            Rect::new(i32::MAX - 10, 0, 800, 600).intersect(&Rect::new(0, 0, i32::MAX, 600)),
            Some(Rect::new(i32::MAX - 10, 0, 10, 600))
        );
    }
}
