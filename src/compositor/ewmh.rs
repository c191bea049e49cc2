//! EWMH window manager backend for X11 sessions.
//!
//! Talks to the window manager through the standard X11 command line tools:
//! `wmctrl` for enumeration and most requests, `xprop` for window types,
//! state atoms and root properties, `xdotool` for focus and minimize, and
//! `xrandr` for monitor topology.

use regex::Regex;
use std::process::Command;
use std::sync::OnceLock;
use tracing::debug;

use super::{
    Compositor, CompositorError, Maximized, MonitorInfo, Rect, Result, WindowActor, WindowId,
    WindowProps, WindowType,
};

/// EWMH compositor client driving the X11 command line tools.
pub struct EwmhCompositor {
    _private: (),
}

impl EwmhCompositor {
    /// Create a new EWMH compositor client.
    ///
    /// Returns None if there is no X display or no EWMH window manager
    /// answering `wmctrl -m`.
    pub fn new() -> Option<Self> {
        if std::env::var("DISPLAY").is_err() {
            return None;
        }

        let output = Command::new("wmctrl").arg("-m").output().ok()?;
        if !output.status.success() {
            return None;
        }

        Some(Self { _private: () })
    }

    /// Run a tool and return its stdout.
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        debug!(program, ?args, "Running window manager tool");
        let output = Command::new(program).args(args).output()?;

        if !output.status.success() {
            return Err(CompositorError::CommandFailed(format!(
                "{} {}: {}",
                program,
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn list_clients(&self) -> Result<Vec<WmctrlClient>> {
        let stdout = self.run("wmctrl", &["-l", "-p", "-G", "-x"])?;
        Ok(parse_wmctrl_list(&stdout))
    }

    fn client(&self, id: WindowId) -> Result<WmctrlClient> {
        self.list_clients()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(CompositorError::WindowNotFound(id))
    }

    fn active_window(&self) -> Result<Option<WindowId>> {
        let stdout = self.run("xprop", &["-root", "_NET_ACTIVE_WINDOW"])?;
        Ok(parse_active_window(&stdout))
    }

    fn window_atoms(&self, id: WindowId) -> Result<XpropWindow> {
        let hex = hex_id(id);
        let stdout = self.run(
            "xprop",
            &[
                "-id",
                &hex,
                "_NET_WM_WINDOW_TYPE",
                "_NET_WM_STATE",
                "_GTK_APPLICATION_ID",
                "WM_CLASS",
            ],
        )?;
        Ok(parse_xprop_window(&stdout))
    }

    /// Monitors from `xrandr`. An X screen always has at least one, so an
    /// empty result means the output format wasn't understood.
    fn xrandr_monitors(&self) -> Result<Vec<XrandrMonitor>> {
        let stdout = self.run("xrandr", &["--listmonitors"])?;
        let monitors = parse_listmonitors(&stdout);
        if monitors.is_empty() {
            return Err(CompositorError::ParseError(format!(
                "no monitors in xrandr output: {:?}",
                stdout.lines().next().unwrap_or_default()
            )));
        }
        Ok(monitors)
    }

    /// Change `_NET_WM_STATE` atoms on a window.
    fn change_state(&self, id: WindowId, action: &str, props: &str) -> Result<()> {
        let hex = hex_id(id);
        let spec = format!("{action},{props}");
        self.run("wmctrl", &["-i", "-r", &hex, "-b", &spec])?;
        Ok(())
    }

    /// Make sure the window still exists before issuing a request that the
    /// tools would silently ignore for unknown ids.
    fn ensure_exists(&self, id: WindowId) -> Result<()> {
        self.client(id).map(|_| ())
    }
}

impl Compositor for EwmhCompositor {
    fn window_actors(&self) -> Result<Vec<WindowActor>> {
        Ok(self
            .list_clients()?
            .into_iter()
            .map(|c| WindowActor { window: Some(c.id) })
            .collect())
    }

    fn window_type(&self, id: WindowId) -> Result<WindowType> {
        Ok(self.window_atoms(id)?.window_type)
    }

    fn window_props(&self, id: WindowId) -> Result<WindowProps> {
        let client = self.client(id)?;
        let atoms = self.window_atoms(id)?;
        let focused = self.active_window()?;
        let monitors = self.monitors().unwrap_or_default();

        let (cx, cy) = client.rect.center();
        let monitor = monitors
            .iter()
            .position(|m| m.rect.contains(cx, cy))
            .unwrap_or(0) as i32;
        let sticky = client.desktop < 0 || atoms.state.sticky;

        Ok(WindowProps {
            title: Some(client.title),
            wm_class: atoms.wm_class.or(client.wm_class),
            wm_class_instance: atoms.wm_class_instance.or(client.wm_class_instance),
            sandboxed_app_id: flatpak_app_id(client.pid),
            gtk_application_id: atoms.gtk_application_id,
            has_focus: focused == Some(id),
            is_hidden: atoms.state.hidden,
            is_minimized: atoms.state.hidden,
            maximized: atoms.state.maximized,
            is_fullscreen: atoms.state.fullscreen,
            is_above: atoms.state.above,
            is_on_all_workspaces: sticky,
            is_skip_taskbar: atoms.state.skip_taskbar,
            workspace: (!sticky).then_some(client.desktop),
            monitor,
            pid: client.pid,
            window_type: atoms.window_type,
            frame_rect: client.rect,
        })
    }

    fn current_time(&self) -> u32 {
        // X11 CurrentTime; the tools stamp their own client messages.
        0
    }

    fn activate(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        self.ensure_exists(id)?;
        self.run("wmctrl", &["-i", "-a", &hex_id(id)])?;
        Ok(())
    }

    fn focus(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        self.ensure_exists(id)?;
        self.run("xdotool", &["windowfocus", &id.to_string()])?;
        Ok(())
    }

    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()> {
        self.ensure_exists(id)?;
        let spec = format!("0,{x},{y},-1,-1");
        self.run("wmctrl", &["-i", "-r", &hex_id(id), "-e", &spec])?;
        Ok(())
    }

    fn move_resize_frame(&self, id: WindowId, rect: Rect) -> Result<()> {
        self.ensure_exists(id)?;
        let spec = format!("0,{},{},{},{}", rect.x, rect.y, rect.width, rect.height);
        self.run("wmctrl", &["-i", "-r", &hex_id(id), "-e", &spec])?;
        Ok(())
    }

    fn minimize(&self, id: WindowId) -> Result<()> {
        self.ensure_exists(id)?;
        self.run("xdotool", &["windowminimize", &id.to_string()])?;
        Ok(())
    }

    fn unminimize(&self, id: WindowId) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, "remove", "hidden")
    }

    fn maximize(&self, id: WindowId) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, "add", "maximized_vert,maximized_horz")
    }

    fn unmaximize(&self, id: WindowId) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, "remove", "maximized_vert,maximized_horz")
    }

    fn make_fullscreen(&self, id: WindowId) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, "add", "fullscreen")
    }

    fn unmake_fullscreen(&self, id: WindowId) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, "remove", "fullscreen")
    }

    fn set_above(&self, id: WindowId, above: bool) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, if above { "add" } else { "remove" }, "above")
    }

    fn set_sticky(&self, id: WindowId, sticky: bool) -> Result<()> {
        self.ensure_exists(id)?;
        self.change_state(id, if sticky { "add" } else { "remove" }, "sticky")
    }

    fn delete(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        self.ensure_exists(id)?;
        // _NET_CLOSE_WINDOW, which the window manager turns into WM_DELETE_WINDOW
        self.run("wmctrl", &["-i", "-c", &hex_id(id)])?;
        Ok(())
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        Ok(self
            .xrandr_monitors()?
            .into_iter()
            .map(|m| m.info)
            .collect())
    }

    fn primary_monitor(&self) -> Result<usize> {
        Ok(self
            .xrandr_monitors()?
            .iter()
            .position(|m| m.primary)
            .unwrap_or(0))
    }

    fn work_area(&self, monitor: usize) -> Result<Rect> {
        let monitors = self.monitors()?;
        let bounds = monitors
            .get(monitor)
            .map(|m| m.rect)
            .ok_or(CompositorError::MonitorNotFound(monitor))?;

        let stdout = self.run("xprop", &["-root", "_NET_CURRENT_DESKTOP", "_NET_WORKAREA"])?;
        let desktop = parse_cardinals(&stdout, "_NET_CURRENT_DESKTOP")
            .first()
            .copied()
            .unwrap_or(0);
        let areas = parse_workareas(&parse_cardinals(&stdout, "_NET_WORKAREA"));

        // _NET_WORKAREA spans the whole screen; clip it to the monitor.
        let area = areas
            .get(desktop.max(0) as usize)
            .or_else(|| areas.first())
            .and_then(|a| a.intersect(&bounds))
            .unwrap_or(bounds);
        Ok(area)
    }

    fn name(&self) -> &'static str {
        "EWMH"
    }
}

fn hex_id(id: WindowId) -> String {
    format!("0x{id:08x}")
}

/// One line of `wmctrl -l -p -G -x` output.
#[derive(Debug, Clone, PartialEq)]
pub struct WmctrlClient {
    pub id: WindowId,
    /// Desktop index, `-1` for sticky windows.
    pub desktop: i32,
    pub pid: i32,
    pub rect: Rect,
    pub wm_class_instance: Option<String>,
    pub wm_class: Option<String>,
    pub title: String,
}

/// Parse `wmctrl -l -p -G -x` output.
///
/// Line format: `<id> <desktop> <pid> <x> <y> <w> <h> <instance.Class> <host> <title...>`.
/// Lines that don't parse are skipped.
pub fn parse_wmctrl_list(stdout: &str) -> Vec<WmctrlClient> {
    stdout.lines().filter_map(parse_wmctrl_line).collect()
}

fn wmctrl_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(0x[0-9a-fA-F]+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(\S+)\s+\S+(?:\s+(.*))?$",
        )
        .expect("wmctrl pattern is valid")
    })
}

fn parse_wmctrl_line(line: &str) -> Option<WmctrlClient> {
    let caps = wmctrl_line_regex().captures(line)?;
    let int = |i: usize| caps.get(i)?.as_str().parse::<i32>().ok();
    let id = parse_hex(caps.get(1)?.as_str())?;
    let class_field = caps.get(8)?.as_str();
    // The host column is padded to a common width, so the title starts at
    // the first non-blank after it. Inner whitespace is kept verbatim.
    let title = caps.get(9).map_or("", |m| m.as_str()).to_string();

    let (wm_class_instance, wm_class) = if class_field == "N/A" {
        (None, None)
    } else {
        let (instance, class) = split_class_field(class_field);
        (instance.map(str::to_string), Some(class.to_string()))
    };

    Some(WmctrlClient {
        id,
        desktop: int(2)?,
        pid: int(3)?,
        rect: Rect::new(int(4)?, int(5)?, int(6)?, int(7)?),
        wm_class_instance,
        wm_class,
        title,
    })
}

/// Split wmctrl's `instance.Class` column.
///
/// Both halves may contain dots, so the field is ambiguous in general. When
/// it is two case-insensitively equal halves (`org.gnome.Nautilus.Org.gnome.Nautilus`)
/// it splits in the middle, otherwise at the last dot. `WM_CLASS` from
/// `xprop` takes precedence wherever it is available.
fn split_class_field(field: &str) -> (Option<&str>, &str) {
    let mid = field.len() / 2;
    if field.len() % 2 == 1 && field.as_bytes().get(mid) == Some(&b'.') {
        let (instance, class) = (&field[..mid], &field[mid + 1..]);
        if instance.eq_ignore_ascii_case(class) {
            return (Some(instance), class);
        }
    }
    match field.rsplit_once('.') {
        Some((instance, class)) => (Some(instance), class),
        None => (None, field),
    }
}

fn parse_hex(s: &str) -> Option<u64> {
    u64::from_str_radix(s.trim().trim_start_matches("0x"), 16).ok()
}

/// Parse `xprop -root _NET_ACTIVE_WINDOW`.
pub fn parse_active_window(stdout: &str) -> Option<WindowId> {
    let line = stdout
        .lines()
        .find(|l| l.starts_with("_NET_ACTIVE_WINDOW"))?;
    let id = parse_hex(line.rsplit('#').next()?.split(',').next()?)?;
    (id != 0).then_some(id)
}

/// `_NET_WM_STATE` flags of interest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WmState {
    pub hidden: bool,
    pub maximized: Maximized,
    pub fullscreen: bool,
    pub above: bool,
    pub sticky: bool,
    pub skip_taskbar: bool,
}

/// The parts of `xprop -id` output this backend reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XpropWindow {
    pub window_type: WindowType,
    pub state: WmState,
    pub gtk_application_id: Option<String>,
    pub wm_class_instance: Option<String>,
    pub wm_class: Option<String>,
}

/// Parse `xprop -id <id> _NET_WM_WINDOW_TYPE _NET_WM_STATE _GTK_APPLICATION_ID WM_CLASS`.
///
/// Missing properties leave the defaults in place: a window without a type
/// hint is a normal window.
pub fn parse_xprop_window(stdout: &str) -> XpropWindow {
    let mut window = XpropWindow::default();
    let mut vert = false;
    let mut horz = false;

    for line in stdout.lines() {
        let Some((name, value)) = line.split_once(" = ") else {
            continue;
        };

        if name.starts_with("_NET_WM_WINDOW_TYPE") {
            // The first listed type is the preferred one.
            if let Some(atom) = value.split(',').next() {
                window.window_type = window_type_from_atom(atom.trim());
            }
        } else if name.starts_with("_NET_WM_STATE") {
            for atom in value.split(',').map(str::trim) {
                match atom {
                    "_NET_WM_STATE_HIDDEN" => window.state.hidden = true,
                    "_NET_WM_STATE_MAXIMIZED_VERT" => vert = true,
                    "_NET_WM_STATE_MAXIMIZED_HORZ" => horz = true,
                    "_NET_WM_STATE_FULLSCREEN" => window.state.fullscreen = true,
                    "_NET_WM_STATE_ABOVE" => window.state.above = true,
                    "_NET_WM_STATE_STICKY" => window.state.sticky = true,
                    "_NET_WM_STATE_SKIP_TASKBAR" => window.state.skip_taskbar = true,
                    _ => {}
                }
            }
        } else if name.starts_with("_GTK_APPLICATION_ID") {
            let id = value.trim().trim_matches('"');
            if !id.is_empty() {
                window.gtk_application_id = Some(id.to_string());
            }
        } else if name.starts_with("WM_CLASS") {
            let mut strings = parse_xprop_strings(value).into_iter();
            window.wm_class_instance = strings.next();
            window.wm_class = strings.next();
        }
    }

    window.state.maximized = match (horz, vert) {
        (true, true) => Maximized::Both,
        (true, false) => Maximized::Horizontal,
        (false, true) => Maximized::Vertical,
        (false, false) => Maximized::None,
    };
    window
}

/// Quoted strings of an xprop `STRING` list, e.g. `"navigator", "Firefox"`.
fn parse_xprop_strings(value: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("xprop string pattern is valid")
    });
    re.captures_iter(value)
        .map(|c| c[1].replace("\\\"", "\"").replace("\\\\", "\\"))
        .collect()
}

fn window_type_from_atom(atom: &str) -> WindowType {
    match atom.trim_start_matches("_NET_WM_WINDOW_TYPE_") {
        "NORMAL" => WindowType::Normal,
        "DESKTOP" => WindowType::Desktop,
        "DOCK" => WindowType::Dock,
        "DIALOG" => WindowType::Dialog,
        "TOOLBAR" => WindowType::Toolbar,
        "MENU" => WindowType::Menu,
        "UTILITY" => WindowType::Utility,
        "SPLASH" => WindowType::Splashscreen,
        "DROPDOWN_MENU" => WindowType::DropdownMenu,
        "POPUP_MENU" => WindowType::PopupMenu,
        "TOOLTIP" => WindowType::Tooltip,
        "NOTIFICATION" => WindowType::Notification,
        "COMBO" => WindowType::Combo,
        "DND" => WindowType::Dnd,
        _ => WindowType::OverrideOther,
    }
}

/// One entry of `xrandr --listmonitors`.
#[derive(Debug, Clone, PartialEq)]
pub struct XrandrMonitor {
    pub info: MonitorInfo,
    pub primary: bool,
}

fn listmonitors_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\d+:\s+\+?(\*?)(\S+)\s+(\d+)/\d+x(\d+)/\d+\+(-?\d+)\+(-?\d+)")
            .expect("listmonitors pattern is valid")
    })
}

/// Parse `xrandr --listmonitors`.
///
/// Entry format: ` 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1`.
pub fn parse_listmonitors(stdout: &str) -> Vec<XrandrMonitor> {
    let re = listmonitors_regex();
    stdout
        .lines()
        .filter_map(|line| {
            let caps = re.captures(line)?;
            let rect = Rect::new(
                caps[5].parse().ok()?,
                caps[6].parse().ok()?,
                caps[3].parse().ok()?,
                caps[4].parse().ok()?,
            );
            Some(XrandrMonitor {
                info: MonitorInfo {
                    rect,
                    scale: 1.0,
                    connector: Some(caps[2].to_string()),
                },
                primary: !caps[1].is_empty(),
            })
        })
        .collect()
}

/// Extract the numbers of one `CARDINAL` root property from xprop output.
pub fn parse_cardinals(stdout: &str, property: &str) -> Vec<i32> {
    stdout
        .lines()
        .find(|l| l.starts_with(&format!("{property}(")))
        .and_then(|l| l.split_once(" = "))
        .map(|(_, values)| {
            values
                .split(',')
                .filter_map(|v| v.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Group `_NET_WORKAREA` values into one rectangle per desktop.
pub fn parse_workareas(values: &[i32]) -> Vec<Rect> {
    values
        .chunks_exact(4)
        .map(|c| Rect::new(c[0], c[1], c[2], c[3]))
        .collect()
}

/// Read the Flatpak application id of a sandboxed process.
fn flatpak_app_id(pid: i32) -> Option<String> {
    if pid <= 0 {
        return None;
    }
    let info = std::fs::read_to_string(format!("/proc/{pid}/root/.flatpak-info")).ok()?;
    parse_flatpak_info(&info)
}

/// Extract `name=` from the `[Application]` group of a `.flatpak-info` file.
pub fn parse_flatpak_info(content: &str) -> Option<String> {
    let mut in_application = false;
    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_application = line == "[Application]";
        } else if in_application && let Some(name) = line.strip_prefix("name=") {
            return Some(name.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const WMCTRL_LIST: &str = "\
0x04000007  0 4242   10   20   800  600  code.Code  laptop main.rs - window-control
0x05a00003 -1 1717   0    0    1920 32   N/A  laptop top panel
0x06200004  1 9001   1920 0    1280 1024 Navigator.firefox  laptop Mozilla Firefox
garbage line
";

    #[test]
    fn test_parse_wmctrl_list() {
        let clients = parse_wmctrl_list(WMCTRL_LIST);
        assert_eq!(clients.len(), 3);

        assert_eq!(clients[0].id, 0x04000007);
        assert_eq!(clients[0].desktop, 0);
        assert_eq!(clients[0].pid, 4242);
        assert_eq!(clients[0].rect, Rect::new(10, 20, 800, 600));
        assert_eq!(clients[0].wm_class.as_deref(), Some("Code"));
        assert_eq!(clients[0].wm_class_instance.as_deref(), Some("code"));
        assert_eq!(clients[0].title, "main.rs - window-control");

        assert_eq!(clients[1].desktop, -1);
        assert_eq!(clients[1].wm_class, None);

        assert_eq!(clients[2].wm_class.as_deref(), Some("firefox"));
        assert_eq!(clients[2].title, "Mozilla Firefox");
    }

    #[test]
    fn test_parse_wmctrl_keeps_title_spacing_and_dotted_classes() {
        let clients = parse_wmctrl_list(
            "0x04000007  0 4242 10 20 800 600 org.gnome.Nautilus.Org.gnome.Nautilus  laptop Report  (draft)  - Files\n\
             0x04000008  0 4243 0 0 100 100 Navigator.org.mozilla.firefox  laptop \n",
        );
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].title, "Report  (draft)  - Files");
        assert_eq!(
            clients[0].wm_class_instance.as_deref(),
            Some("org.gnome.Nautilus")
        );
        assert_eq!(clients[0].wm_class.as_deref(), Some("Org.gnome.Nautilus"));
        assert_eq!(clients[1].title, "");
        assert_eq!(clients[1].wm_class.as_deref(), Some("firefox"));
    }

    #[test]
    fn test_parse_active_window() {
        let out = "_NET_ACTIVE_WINDOW(WINDOW): window id # 0x4000007\n";
        assert_eq!(parse_active_window(out), Some(0x4000007));
        let none = "_NET_ACTIVE_WINDOW(WINDOW): window id # 0x0\n";
        assert_eq!(parse_active_window(none), None);
        assert_eq!(parse_active_window(""), None);
    }

    #[test]
    fn test_parse_xprop_window() {
        let out = "\
_NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_NORMAL
_NET_WM_STATE(ATOM) = _NET_WM_STATE_MAXIMIZED_VERT, _NET_WM_STATE_MAXIMIZED_HORZ, _NET_WM_STATE_ABOVE
_GTK_APPLICATION_ID(UTF8_STRING) = \"org.gnome.Nautilus\"
WM_CLASS(STRING) = \"org.gnome.Nautilus\", \"Org.gnome.Nautilus\"
";
        let window = parse_xprop_window(out);
        assert_eq!(window.window_type, WindowType::Normal);
        assert_eq!(window.state.maximized, Maximized::Both);
        assert!(window.state.above);
        assert!(!window.state.hidden);
        assert_eq!(
            window.gtk_application_id.as_deref(),
            Some("org.gnome.Nautilus")
        );
        assert_eq!(
            window.wm_class_instance.as_deref(),
            Some("org.gnome.Nautilus")
        );
        assert_eq!(window.wm_class.as_deref(), Some("Org.gnome.Nautilus"));
    }

    #[test]
    fn test_parse_xprop_window_missing_properties() {
        let out = "\
_NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_DOCK
_NET_WM_STATE:  not found.
_GTK_APPLICATION_ID:  not found.
";
        let window = parse_xprop_window(out);
        assert_eq!(window.window_type, WindowType::Dock);
        assert_eq!(window.state, WmState::default());
        assert_eq!(window.gtk_application_id, None);
        assert_eq!(window.wm_class, None);

        assert_eq!(parse_xprop_window("").window_type, WindowType::Normal);
    }

    #[test]
    fn test_parse_listmonitors() {
        let out = "\
Monitors: 2
 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1
 1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1
";
        let monitors = parse_listmonitors(out);
        assert_eq!(monitors.len(), 2);
        assert!(monitors[0].primary);
        assert!(!monitors[1].primary);
        assert_eq!(monitors[1].info.rect, Rect::new(1920, 0, 2560, 1440));
        assert_eq!(monitors[1].info.connector.as_deref(), Some("HDMI-1"));
    }

    #[test]
    fn test_parse_workarea() {
        let out = "\
_NET_CURRENT_DESKTOP(CARDINAL) = 1
_NET_WORKAREA(CARDINAL) = 0, 32, 4480, 1408, 0, 0, 4480, 1440
";
        assert_eq!(parse_cardinals(out, "_NET_CURRENT_DESKTOP"), vec![1]);
        let areas = parse_workareas(&parse_cardinals(out, "_NET_WORKAREA"));
        assert_eq!(
            areas,
            vec![Rect::new(0, 32, 4480, 1408), Rect::new(0, 0, 4480, 1440)]
        );
    }

    #[test]
    fn test_parse_flatpak_info() {
        let info = "\
[Application]
name=org.mozilla.firefox
runtime=runtime/org.freedesktop.Platform/x86_64/23.08

[Instance]
name=ignored
";
        assert_eq!(
            parse_flatpak_info(info).as_deref(),
            Some("org.mozilla.firefox")
        );
        assert_eq!(parse_flatpak_info("[Instance]\nname=x\n"), None);
    }

    #[test]
    fn test_hex_id() {
        assert_eq!(hex_id(0x4000007), "0x04000007");
    }
}
