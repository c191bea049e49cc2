//! Client proxy for the window control interface.

use zbus::proxy;

use crate::window::CompactWindow;

#[proxy(
    interface = "org.gnome.Shell.Extensions.WindowControl",
    default_service = "org.gnome.Shell.Extensions.WindowControl",
    default_path = "/org/gnome/Shell/Extensions/WindowControl",
    gen_blocking = false
)]
pub trait WindowControl {
    fn list(&self) -> zbus::Result<Vec<CompactWindow>>;
    fn list_detailed(&self) -> zbus::Result<String>;
    fn list_monitors(&self) -> zbus::Result<String>;

    fn activate(&self, id: u64) -> zbus::Result<bool>;
    fn activate_by_title(&self, title: &str) -> zbus::Result<bool>;
    fn activate_by_title_substring(&self, substring: &str) -> zbus::Result<bool>;
    fn activate_by_wm_class(&self, wm_class: &str) -> zbus::Result<bool>;
    fn activate_by_pid(&self, pid: i32) -> zbus::Result<bool>;
    fn focus(&self, id: u64) -> zbus::Result<bool>;
    fn get_focused(&self) -> zbus::Result<(u64, String, String)>;

    #[zbus(name = "Move")]
    fn move_window(&self, id: u64, x: i32, y: i32) -> zbus::Result<bool>;
    fn resize(&self, id: u64, width: i32, height: i32) -> zbus::Result<bool>;
    fn move_resize(&self, id: u64, x: i32, y: i32, width: i32, height: i32)
    -> zbus::Result<bool>;
    fn get_geometry(&self, id: u64) -> zbus::Result<(i32, i32, i32, i32)>;
    fn get_workarea(&self, monitor_index: i32) -> zbus::Result<(i32, i32, i32, i32)>;

    fn minimize(&self, id: u64) -> zbus::Result<bool>;
    fn unminimize(&self, id: u64) -> zbus::Result<bool>;
    fn maximize(&self, id: u64) -> zbus::Result<bool>;
    fn unmaximize(&self, id: u64) -> zbus::Result<bool>;
    fn fullscreen(&self, id: u64) -> zbus::Result<bool>;
    fn unfullscreen(&self, id: u64) -> zbus::Result<bool>;
    fn set_above(&self, id: u64, above: bool) -> zbus::Result<bool>;
    fn set_sticky(&self, id: u64, sticky: bool) -> zbus::Result<bool>;
    fn close(&self, id: u64) -> zbus::Result<bool>;
}
