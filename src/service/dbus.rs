//! Session-bus interface object.
//!
//! Thin adapter from D-Bus method calls onto [`ServiceDispatcher`]. The
//! methods are synchronous and the connection runs on a single-threaded
//! runtime, so calls are processed one at a time.

use tracing::info;
use zbus::fdo::{RequestNameFlags, RequestNameReply};
use zbus::{Connection, connection, interface};

use super::dispatcher::{FocusedWindow, Geometry, ServiceDispatcher};
use crate::config::AppConfig;
use crate::window::CompactWindow;

/// The exported `org.gnome.Shell.Extensions.WindowControl` object.
pub struct WindowControlService {
    dispatcher: ServiceDispatcher,
}

impl WindowControlService {
    pub fn new(dispatcher: ServiceDispatcher) -> Self {
        Self { dispatcher }
    }
}

#[interface(name = "org.gnome.Shell.Extensions.WindowControl")]
impl WindowControlService {
    fn list(&self) -> Vec<CompactWindow> {
        self.dispatcher.list()
    }

    fn list_detailed(&self) -> String {
        self.dispatcher.list_detailed()
    }

    fn list_monitors(&self) -> String {
        self.dispatcher.list_monitors()
    }

    fn activate(&self, id: u64) -> bool {
        self.dispatcher.activate(id)
    }

    fn activate_by_title(&self, title: &str) -> bool {
        self.dispatcher.activate_by_title(title)
    }

    fn activate_by_title_substring(&self, substring: &str) -> bool {
        self.dispatcher.activate_by_title_substring(substring)
    }

    fn activate_by_wm_class(&self, wm_class: &str) -> bool {
        self.dispatcher.activate_by_wm_class(wm_class)
    }

    fn activate_by_pid(&self, pid: i32) -> bool {
        self.dispatcher.activate_by_pid(pid)
    }

    fn focus(&self, id: u64) -> bool {
        self.dispatcher.focus(id)
    }

    fn get_focused(&self) -> FocusedWindow {
        self.dispatcher.get_focused()
    }

    #[zbus(name = "Move")]
    fn move_window(&self, id: u64, x: i32, y: i32) -> bool {
        self.dispatcher.move_window(id, x.into(), y.into())
    }

    fn resize(&self, id: u64, width: i32, height: i32) -> bool {
        self.dispatcher.resize(id, width.into(), height.into())
    }

    fn move_resize(&self, id: u64, x: i32, y: i32, width: i32, height: i32) -> bool {
        self.dispatcher
            .move_resize(id, x.into(), y.into(), width.into(), height.into())
    }

    fn get_geometry(&self, id: u64) -> Geometry {
        self.dispatcher.get_geometry(id)
    }

    fn get_workarea(&self, monitor_index: i32) -> Geometry {
        self.dispatcher.get_workarea(monitor_index.into())
    }

    fn minimize(&self, id: u64) -> bool {
        self.dispatcher.minimize(id)
    }

    fn unminimize(&self, id: u64) -> bool {
        self.dispatcher.unminimize(id)
    }

    fn maximize(&self, id: u64) -> bool {
        self.dispatcher.maximize(id)
    }

    fn unmaximize(&self, id: u64) -> bool {
        self.dispatcher.unmaximize(id)
    }

    fn fullscreen(&self, id: u64) -> bool {
        self.dispatcher.fullscreen(id)
    }

    fn unfullscreen(&self, id: u64) -> bool {
        self.dispatcher.unfullscreen(id)
    }

    fn set_above(&self, id: u64, above: bool) -> bool {
        self.dispatcher.set_above(id, above)
    }

    fn set_sticky(&self, id: u64, sticky: bool) -> bool {
        self.dispatcher.set_sticky(id, sticky)
    }

    fn close(&self, id: u64) -> bool {
        self.dispatcher.close(id)
    }
}

/// Export the interface on the session bus and claim the well-known name.
///
/// The returned connection keeps serving until it is dropped.
pub async fn serve(dispatcher: ServiceDispatcher, config: &AppConfig) -> zbus::Result<Connection> {
    let connection = connection::Builder::session()?
        .serve_at(
            config.object_path.as_str(),
            WindowControlService::new(dispatcher),
        )?
        .build()
        .await?;

    let mut flags = RequestNameFlags::AllowReplacement | RequestNameFlags::DoNotQueue;
    if config.replace_existing {
        flags = flags | RequestNameFlags::ReplaceExisting;
    }

    match connection
        .request_name_with_flags(config.bus_name.as_str(), flags)
        .await?
    {
        RequestNameReply::PrimaryOwner | RequestNameReply::AlreadyOwner => {}
        RequestNameReply::InQueue | RequestNameReply::Exists => {
            return Err(zbus::Error::NameTaken);
        }
    }

    info!(
        name = %config.bus_name,
        path = %config.object_path,
        "Serving window control interface"
    );
    Ok(connection)
}
