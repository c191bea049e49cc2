//! The window control service: dispatcher, D-Bus interface and client proxy.

mod dbus;
mod dispatcher;
pub mod proxy;

pub use dbus::{WindowControlService, serve};
pub use dispatcher::{FailureValue, FocusedWindow, Geometry, ServiceDispatcher};
pub use proxy::WindowControlProxy;

/// Well-known bus name the service claims by default.
pub const DEFAULT_BUS_NAME: &str = "org.gnome.Shell.Extensions.WindowControl";

/// Object path the interface is exported at by default.
pub const DEFAULT_OBJECT_PATH: &str = "/org/gnome/Shell/Extensions/WindowControl";
