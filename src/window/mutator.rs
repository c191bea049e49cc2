//! Window state changes.
//!
//! Commands are validated in full before the target is resolved, so an
//! invalid argument never reaches the compositor and never causes a partial
//! change.

use std::fmt;

use crate::compositor::Rect;
use crate::error::ServiceError;

use super::resolver::{Lookup, WindowResolver};
use super::source::WindowHandle;

/// A state change a client can request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCommand {
    /// Focus and raise.
    Activate,
    /// Set input focus without raising.
    Focus,
    Move { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
    MoveResize { x: f64, y: f64, width: f64, height: f64 },
    Minimize,
    Unminimize,
    Maximize,
    Unmaximize,
    Fullscreen,
    Unfullscreen,
    SetAbove(bool),
    SetSticky(bool),
    /// Polite close request; the application may refuse.
    Close,
}

/// A command whose arguments passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidCommand {
    Activate,
    Focus,
    Move { x: i32, y: i32 },
    Resize { width: i32, height: i32 },
    MoveResize(Rect),
    Minimize,
    Unminimize,
    Maximize,
    Unmaximize,
    Fullscreen,
    Unfullscreen,
    SetAbove(bool),
    SetSticky(bool),
    Close,
}

impl WindowCommand {
    /// Check argument shape. Fractional values are truncated toward zero.
    pub fn validate(self) -> Result<ValidCommand, ServiceError> {
        Ok(match self {
            WindowCommand::Activate => ValidCommand::Activate,
            WindowCommand::Focus => ValidCommand::Focus,
            WindowCommand::Move { x, y } => ValidCommand::Move {
                x: coordinate("x", x)?,
                y: coordinate("y", y)?,
            },
            WindowCommand::Resize { width, height } => ValidCommand::Resize {
                width: extent("width", width)?,
                height: extent("height", height)?,
            },
            WindowCommand::MoveResize {
                x,
                y,
                width,
                height,
            } => ValidCommand::MoveResize(Rect::new(
                coordinate("x", x)?,
                coordinate("y", y)?,
                extent("width", width)?,
                extent("height", height)?,
            )),
            WindowCommand::Minimize => ValidCommand::Minimize,
            WindowCommand::Unminimize => ValidCommand::Unminimize,
            WindowCommand::Maximize => ValidCommand::Maximize,
            WindowCommand::Unmaximize => ValidCommand::Unmaximize,
            WindowCommand::Fullscreen => ValidCommand::Fullscreen,
            WindowCommand::Unfullscreen => ValidCommand::Unfullscreen,
            WindowCommand::SetAbove(above) => ValidCommand::SetAbove(above),
            WindowCommand::SetSticky(sticky) => ValidCommand::SetSticky(sticky),
            WindowCommand::Close => ValidCommand::Close,
        })
    }
}

impl fmt::Display for WindowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowCommand::Move { x, y } => write!(f, "move to ({x}, {y})"),
            WindowCommand::Resize { width, height } => write!(f, "resize to {width}x{height}"),
            WindowCommand::MoveResize {
                x,
                y,
                width,
                height,
            } => write!(f, "move-resize to ({x}, {y}) {width}x{height}"),
            WindowCommand::SetAbove(v) => write!(f, "set above {v}"),
            WindowCommand::SetSticky(v) => write!(f, "set sticky {v}"),
            other => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}

fn coordinate(name: &str, value: f64) -> Result<i32, ServiceError> {
    if !value.is_finite() {
        return Err(ServiceError::InvalidArgument(format!(
            "{name} must be finite, got {value}"
        )));
    }
    let truncated = value.trunc();
    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return Err(ServiceError::InvalidArgument(format!(
            "{name} out of range: {value}"
        )));
    }
    Ok(truncated as i32)
}

fn extent(name: &str, value: f64) -> Result<i32, ServiceError> {
    let v = coordinate(name, value)?;
    if value <= 0.0 || v < 1 {
        return Err(ServiceError::InvalidArgument(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(v)
}

/// Applies commands to resolved windows.
#[derive(Clone)]
pub struct WindowMutator {
    resolver: WindowResolver,
}

impl WindowMutator {
    pub fn new(resolver: WindowResolver) -> Self {
        Self { resolver }
    }

    /// Validate, resolve, then apply.
    pub fn execute(&self, lookup: &Lookup, command: WindowCommand) -> Result<(), ServiceError> {
        let command = command.validate()?;
        let handle = self
            .resolver
            .resolve(lookup)?
            .ok_or_else(|| ServiceError::WindowNotFound(lookup.to_string()))?;
        self.apply(handle, command)
    }

    /// Apply a validated command. A window that vanished since it was
    /// resolved surfaces as a compositor error.
    pub fn apply(&self, handle: WindowHandle, command: ValidCommand) -> Result<(), ServiceError> {
        let compositor = self.resolver.compositor();
        let id = handle.id();

        match command {
            ValidCommand::Activate => compositor.activate(id, compositor.current_time())?,
            ValidCommand::Focus => compositor.focus(id, compositor.current_time())?,
            ValidCommand::Move { x, y } => compositor.move_frame(id, x, y)?,
            ValidCommand::Resize { width, height } => {
                let frame = compositor.window_props(id)?.frame_rect;
                compositor.move_resize_frame(id, Rect::new(frame.x, frame.y, width, height))?
            }
            ValidCommand::MoveResize(rect) => compositor.move_resize_frame(id, rect)?,
            ValidCommand::Minimize => compositor.minimize(id)?,
            ValidCommand::Unminimize => compositor.unminimize(id)?,
            ValidCommand::Maximize => compositor.maximize(id)?,
            ValidCommand::Unmaximize => compositor.unmaximize(id)?,
            ValidCommand::Fullscreen => compositor.make_fullscreen(id)?,
            ValidCommand::Unfullscreen => compositor.unmake_fullscreen(id)?,
            ValidCommand::SetAbove(above) => compositor.set_above(id, above)?,
            ValidCommand::SetSticky(sticky) => compositor.set_sticky(id, sticky)?,
            ValidCommand::Close => compositor.delete(id, compositor.current_time())?,
        }
        Ok(())
    }
}
