//! Request dispatcher with a single failure boundary.
//!
//! Every public method here has a total return value: errors and panics from
//! anywhere below are logged and replaced by the method's failure value, so
//! nothing ever reaches the transport as an error.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::compositor::{Compositor, WindowId};
use crate::error::ServiceError;
use crate::window::{
    CompactWindow, Inspector, Lookup, WindowCommand, WindowMutator, WindowResolver, WindowSource,
};

/// `(x, y, width, height)`.
pub type Geometry = (i32, i32, i32, i32);

/// `(id, title, wm_class)` of the focused window.
pub type FocusedWindow = (WindowId, String, String);

/// The value a method returns when it fails.
pub trait FailureValue {
    fn failure() -> Self;
}

impl FailureValue for bool {
    fn failure() -> Self {
        false
    }
}

impl<T> FailureValue for Vec<T> {
    fn failure() -> Self {
        Vec::new()
    }
}

/// JSON array responses fail as an empty array.
impl FailureValue for String {
    fn failure() -> Self {
        "[]".to_string()
    }
}

impl FailureValue for Geometry {
    fn failure() -> Self {
        (-1, -1, -1, -1)
    }
}

impl FailureValue for FocusedWindow {
    fn failure() -> Self {
        (0, String::new(), String::new())
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Entry point for every window-control request.
#[derive(Clone)]
pub struct ServiceDispatcher {
    source: WindowSource,
    resolver: WindowResolver,
    mutator: WindowMutator,
    inspector: Inspector,
}

impl ServiceDispatcher {
    pub fn new(compositor: Arc<dyn Compositor>) -> Self {
        let source = WindowSource::new(compositor);
        let resolver = WindowResolver::new(source.clone());
        Self {
            mutator: WindowMutator::new(resolver.clone()),
            inspector: Inspector::new(resolver.clone()),
            resolver,
            source,
        }
    }

    /// Run one call inside the boundary.
    fn guard<T, F>(&self, method: &'static str, args: fmt::Arguments<'_>, call: F) -> T
    where
        T: FailureValue + fmt::Debug,
        F: FnOnce() -> Result<T, ServiceError>,
    {
        info!(method, %args, "Call");

        let outcome = panic::catch_unwind(AssertUnwindSafe(call))
            .unwrap_or_else(|payload| Err(ServiceError::Panicked(panic_message(payload))));

        match outcome {
            Ok(value) => {
                info!(method, "Call succeeded");
                debug!(method, result = ?value);
                value
            }
            Err(e) if e.is_not_found() => {
                info!(method, %args, reason = %e, "Call found nothing");
                T::failure()
            }
            Err(e @ ServiceError::InvalidArgument(_)) => {
                warn!(method, %args, error = %e, "Call rejected");
                T::failure()
            }
            Err(e) => {
                error!(method, %args, error = %e, "Call failed");
                T::failure()
            }
        }
    }

    fn command(&self, method: &'static str, lookup: Lookup, command: WindowCommand) -> bool {
        self.guard(method, format_args!("{lookup}, {command}"), || {
            self.mutator.execute(&lookup, command).map(|()| true)
        })
    }

    /// Compact tuples for every normal window.
    pub fn list(&self) -> Vec<CompactWindow> {
        self.guard("List", format_args!(""), || {
            let handles = self.source.try_snapshot()?;
            Ok(self.inspector.project_compact(&handles))
        })
    }

    /// JSON array of full window records.
    pub fn list_detailed(&self) -> String {
        self.guard("ListDetailed", format_args!(""), || {
            let handles = self.source.try_snapshot()?;
            Ok(serde_json::to_string(&self.inspector.project_all(&handles))?)
        })
    }

    /// JSON array of monitor records.
    pub fn list_monitors(&self) -> String {
        self.guard("ListMonitors", format_args!(""), || {
            Ok(serde_json::to_string(&self.inspector.list_monitors()?)?)
        })
    }

    pub fn activate(&self, id: WindowId) -> bool {
        self.command("Activate", Lookup::Id(id), WindowCommand::Activate)
    }

    pub fn activate_by_title(&self, title: &str) -> bool {
        self.command(
            "ActivateByTitle",
            Lookup::Title(title.to_string()),
            WindowCommand::Activate,
        )
    }

    pub fn activate_by_title_substring(&self, substring: &str) -> bool {
        self.command(
            "ActivateByTitleSubstring",
            Lookup::TitleSubstring(substring.to_string()),
            WindowCommand::Activate,
        )
    }

    pub fn activate_by_wm_class(&self, wm_class: &str) -> bool {
        self.command(
            "ActivateByWmClass",
            Lookup::WmClass(wm_class.to_string()),
            WindowCommand::Activate,
        )
    }

    pub fn activate_by_pid(&self, pid: i32) -> bool {
        self.command("ActivateByPid", Lookup::Pid(pid), WindowCommand::Activate)
    }

    pub fn focus(&self, id: WindowId) -> bool {
        self.command("Focus", Lookup::Id(id), WindowCommand::Focus)
    }

    /// The focused window, `(0, "", "")` when none is.
    pub fn get_focused(&self) -> FocusedWindow {
        self.guard("GetFocused", format_args!(""), || {
            let Some(handle) = self.resolver.resolve(&Lookup::Focused)? else {
                return Ok(FocusedWindow::failure());
            };
            let record = self.inspector.project(handle)?;
            Ok((record.id, record.title, record.wm_class))
        })
    }

    pub fn move_window(&self, id: WindowId, x: f64, y: f64) -> bool {
        self.command("Move", Lookup::Id(id), WindowCommand::Move { x, y })
    }

    pub fn resize(&self, id: WindowId, width: f64, height: f64) -> bool {
        self.command("Resize", Lookup::Id(id), WindowCommand::Resize { width, height })
    }

    pub fn move_resize(&self, id: WindowId, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.command(
            "MoveResize",
            Lookup::Id(id),
            WindowCommand::MoveResize {
                x,
                y,
                width,
                height,
            },
        )
    }

    pub fn get_geometry(&self, id: WindowId) -> Geometry {
        self.guard("GetGeometry", format_args!("id {id}"), || {
            Ok(self.inspector.geometry(id)?.as_tuple())
        })
    }

    pub fn get_workarea(&self, monitor: i64) -> Geometry {
        self.guard("GetWorkarea", format_args!("monitor {monitor}"), || {
            Ok(self.inspector.work_area(monitor)?.as_tuple())
        })
    }

    pub fn minimize(&self, id: WindowId) -> bool {
        self.command("Minimize", Lookup::Id(id), WindowCommand::Minimize)
    }

    pub fn unminimize(&self, id: WindowId) -> bool {
        self.command("Unminimize", Lookup::Id(id), WindowCommand::Unminimize)
    }

    pub fn maximize(&self, id: WindowId) -> bool {
        self.command("Maximize", Lookup::Id(id), WindowCommand::Maximize)
    }

    pub fn unmaximize(&self, id: WindowId) -> bool {
        self.command("Unmaximize", Lookup::Id(id), WindowCommand::Unmaximize)
    }

    pub fn fullscreen(&self, id: WindowId) -> bool {
        self.command("Fullscreen", Lookup::Id(id), WindowCommand::Fullscreen)
    }

    pub fn unfullscreen(&self, id: WindowId) -> bool {
        self.command("Unfullscreen", Lookup::Id(id), WindowCommand::Unfullscreen)
    }

    pub fn set_above(&self, id: WindowId, above: bool) -> bool {
        self.command("SetAbove", Lookup::Id(id), WindowCommand::SetAbove(above))
    }

    pub fn set_sticky(&self, id: WindowId, sticky: bool) -> bool {
        self.command("SetSticky", Lookup::Id(id), WindowCommand::SetSticky(sticky))
    }

    /// Polite close request. `true` means the request was delivered, not that
    /// the window went away.
    pub fn close(&self, id: WindowId) -> bool {
        self.command("Close", Lookup::Id(id), WindowCommand::Close)
    }
}
