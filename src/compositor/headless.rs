//! Headless compositor backed by an in-process window table.
//!
//! Used as the fallback when no supported window manager is detected, as a
//! config-seeded sandbox, and as the compositor behind the test suite.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    Compositor, CompositorError, Maximized, MonitorInfo, Rect, Result, WindowActor, WindowId,
    WindowProps, WindowType,
};

/// A window owned by the headless compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessWindow {
    pub id: WindowId,
    pub title: String,
    pub wm_class: String,
    pub wm_class_instance: String,
    pub sandboxed_app_id: String,
    pub gtk_application_id: String,
    pub pid: i32,
    pub window_type: WindowType,
    pub frame_rect: Rect,
    /// Workspace index, `-1` when pinned to all workspaces.
    pub workspace: i32,
    pub minimized: bool,
    pub maximized: Maximized,
    pub fullscreen: bool,
    pub above: bool,
    pub skip_taskbar: bool,
    /// Whether the application intercepts close requests (e.g. to ask about
    /// unsaved changes) and stays open.
    pub prompts_on_close: bool,
    /// Property reads fail for this window.
    #[serde(skip)]
    pub unreadable: bool,
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            wm_class: String::new(),
            wm_class_instance: String::new(),
            sandboxed_app_id: String::new(),
            gtk_application_id: String::new(),
            pid: 0,
            window_type: WindowType::Normal,
            frame_rect: Rect::new(0, 0, 800, 600),
            workspace: 0,
            minimized: false,
            maximized: Maximized::None,
            fullscreen: false,
            above: false,
            skip_taskbar: false,
            prompts_on_close: false,
            unreadable: false,
        }
    }
}

impl HeadlessWindow {
    /// Create a normal window with the given identity.
    pub fn new(id: WindowId, title: &str, wm_class: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            wm_class: wm_class.to_string(),
            wm_class_instance: wm_class.to_lowercase(),
            ..Self::default()
        }
    }
}

/// A monitor description in a headless seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessMonitor {
    pub rect: Rect,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub connector: Option<String>,
    #[serde(default)]
    pub primary: bool,
    /// Usable area on the active workspace, defaults to the full monitor.
    #[serde(default)]
    pub work_area: Option<Rect>,
}

fn default_scale() -> f64 {
    1.0
}

/// Initial state for a headless compositor, loadable from the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessSeed {
    pub monitors: Vec<HeadlessMonitor>,
    /// Windows in stacking order (bottom first).
    pub windows: Vec<HeadlessWindow>,
    pub focused: Option<WindowId>,
}

#[derive(Debug)]
enum Actor {
    Window(HeadlessWindow),
    Detached,
}

#[derive(Debug)]
struct State {
    actors: Vec<Actor>,
    focus: Option<WindowId>,
    monitors: Vec<MonitorInfo>,
    work_areas: Vec<Rect>,
    /// Frame to restore when leaving the maximized or fullscreen state.
    restore: HashMap<WindowId, Rect>,
    primary: usize,
    active_workspace: i32,
    clock: u32,
    failing: bool,
}

impl State {
    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(CompositorError::Unavailable(
                "headless compositor is failing".to_string(),
            ));
        }
        Ok(())
    }

    fn position(&self, id: WindowId) -> Result<usize> {
        self.actors
            .iter()
            .position(|a| matches!(a, Actor::Window(w) if w.id == id))
            .ok_or(CompositorError::WindowNotFound(id))
    }

    fn window_mut(&mut self, id: WindowId) -> Result<&mut HeadlessWindow> {
        self.check()?;
        let pos = self.position(id)?;
        match &mut self.actors[pos] {
            Actor::Window(w) => Ok(w),
            Actor::Detached => Err(CompositorError::WindowNotFound(id)),
        }
    }

    fn monitor_for(&self, rect: &Rect) -> usize {
        let (cx, cy) = rect.center();
        self.monitors
            .iter()
            .position(|m| m.rect.contains(cx, cy))
            .unwrap_or(0)
    }
}

/// In-process compositor holding a window table.
pub struct HeadlessCompositor {
    state: Mutex<State>,
}

impl HeadlessCompositor {
    /// Create an empty session with one 1920x1080 primary monitor.
    pub fn new() -> Self {
        Self::from_seed(HeadlessSeed::default())
    }

    /// Create a session from a seed. An empty monitor list gets the default
    /// 1920x1080 monitor.
    pub fn from_seed(seed: HeadlessSeed) -> Self {
        let mut monitors = seed.monitors;
        if monitors.is_empty() {
            monitors.push(HeadlessMonitor {
                rect: Rect::new(0, 0, 1920, 1080),
                scale: 1.0,
                connector: None,
                primary: true,
                work_area: None,
            });
        }

        let primary = monitors.iter().position(|m| m.primary).unwrap_or(0);
        let work_areas = monitors
            .iter()
            .map(|m| m.work_area.unwrap_or(m.rect))
            .collect();
        let monitors = monitors
            .into_iter()
            .map(|m| MonitorInfo {
                rect: m.rect,
                scale: m.scale,
                connector: m.connector,
            })
            .collect();

        Self {
            state: Mutex::new(State {
                actors: seed.windows.into_iter().map(Actor::Window).collect(),
                focus: seed.focused,
                monitors,
                work_areas,
                restore: HashMap::new(),
                primary,
                active_workspace: 0,
                clock: 1,
                failing: false,
            }),
        }
    }

    /// Lock the window table. A panic in an earlier call leaves the table
    /// consistent between mutations, so a poisoned lock is taken over.
    fn state(&self) -> Result<MutexGuard<'_, State>> {
        Ok(self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Add a window on top of the stacking order.
    pub fn add_window(&self, window: HeadlessWindow) -> Result<()> {
        self.state()?.actors.push(Actor::Window(window));
        Ok(())
    }

    /// Add an actor with no backing window.
    pub fn add_detached_actor(&self) -> Result<()> {
        self.state()?.actors.push(Actor::Detached);
        Ok(())
    }

    /// Move input focus directly, bypassing activation.
    pub fn set_focus(&self, id: Option<WindowId>) -> Result<()> {
        self.state()?.focus = id;
        Ok(())
    }

    /// Make every call fail until switched off again.
    pub fn set_failing(&self, failing: bool) -> Result<()> {
        self.state()?.failing = failing;
        Ok(())
    }

    /// Make property reads of one window fail.
    pub fn set_unreadable(&self, id: WindowId, unreadable: bool) -> Result<()> {
        let mut state = self.state()?;
        let pos = state.position(id)?;
        if let Actor::Window(w) = &mut state.actors[pos] {
            w.unreadable = unreadable;
        }
        Ok(())
    }

    /// Override the work area of one monitor.
    pub fn set_work_area(&self, monitor: usize, rect: Rect) -> Result<()> {
        let mut state = self.state()?;
        let slot = state
            .work_areas
            .get_mut(monitor)
            .ok_or(CompositorError::MonitorNotFound(monitor))?;
        *slot = rect;
        Ok(())
    }

    /// A copy of the window's current state, if it still exists.
    pub fn window(&self, id: WindowId) -> Option<HeadlessWindow> {
        let state = self.state().ok()?;
        state.actors.iter().find_map(|a| match a {
            Actor::Window(w) if w.id == id => Some(w.clone()),
            _ => None,
        })
    }

    /// Ids of all windows in stacking order.
    pub fn stacking(&self) -> Vec<WindowId> {
        self.state()
            .map(|s| {
                s.actors
                    .iter()
                    .filter_map(|a| match a {
                        Actor::Window(w) => Some(w.id),
                        Actor::Detached => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Currently focused window.
    pub fn focused(&self) -> Option<WindowId> {
        self.state().ok()?.focus
    }
}

impl Default for HeadlessCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor for HeadlessCompositor {
    fn window_actors(&self) -> Result<Vec<WindowActor>> {
        let state = self.state()?;
        state.check()?;
        Ok(state
            .actors
            .iter()
            .map(|a| WindowActor {
                window: match a {
                    Actor::Window(w) => Some(w.id),
                    Actor::Detached => None,
                },
            })
            .collect())
    }

    fn window_type(&self, id: WindowId) -> Result<WindowType> {
        let mut state = self.state()?;
        Ok(state.window_mut(id)?.window_type)
    }

    fn window_props(&self, id: WindowId) -> Result<WindowProps> {
        let mut state = self.state()?;
        let focus = state.focus;
        let window = state.window_mut(id)?.clone();
        if window.unreadable {
            return Err(CompositorError::Unavailable(format!(
                "window {id} is not readable"
            )));
        }
        let monitor = state.monitor_for(&window.frame_rect) as i32;
        let sticky = window.workspace < 0;

        Ok(WindowProps {
            title: Some(window.title),
            wm_class: Some(window.wm_class),
            wm_class_instance: Some(window.wm_class_instance),
            sandboxed_app_id: Some(window.sandboxed_app_id),
            gtk_application_id: Some(window.gtk_application_id),
            has_focus: focus == Some(id),
            is_hidden: window.minimized,
            is_minimized: window.minimized,
            maximized: window.maximized,
            is_fullscreen: window.fullscreen,
            is_above: window.above,
            is_on_all_workspaces: sticky,
            is_skip_taskbar: window.skip_taskbar,
            workspace: (!sticky).then_some(window.workspace),
            monitor,
            pid: window.pid,
            window_type: window.window_type,
            frame_rect: window.frame_rect,
        })
    }

    fn current_time(&self) -> u32 {
        match self.state() {
            Ok(mut state) => {
                state.clock = state.clock.wrapping_add(1);
                state.clock
            }
            Err(_) => 0,
        }
    }

    fn activate(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        let mut state = self.state()?;
        let window = state.window_mut(id)?;
        window.minimized = false;
        let pos = state.position(id)?;
        let actor = state.actors.remove(pos);
        state.actors.push(actor);
        state.focus = Some(id);
        Ok(())
    }

    fn focus(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        let mut state = self.state()?;
        state.window_mut(id)?;
        state.focus = Some(id);
        Ok(())
    }

    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()> {
        let mut state = self.state()?;
        let window = state.window_mut(id)?;
        window.frame_rect.x = x;
        window.frame_rect.y = y;
        Ok(())
    }

    fn move_resize_frame(&self, id: WindowId, rect: Rect) -> Result<()> {
        let mut state = self.state()?;
        state.window_mut(id)?.frame_rect = rect;
        Ok(())
    }

    fn minimize(&self, id: WindowId) -> Result<()> {
        let mut state = self.state()?;
        state.window_mut(id)?.minimized = true;
        if state.focus == Some(id) {
            state.focus = None;
        }
        Ok(())
    }

    fn unminimize(&self, id: WindowId) -> Result<()> {
        let mut state = self.state()?;
        state.window_mut(id)?.minimized = false;
        Ok(())
    }

    fn maximize(&self, id: WindowId) -> Result<()> {
        let mut state = self.state()?;
        let rect = state.window_mut(id)?.frame_rect;
        let monitor = state.monitor_for(&rect);
        let area = state.work_areas.get(monitor).copied().unwrap_or(rect);
        let window = state.window_mut(id)?;
        if window.maximized != Maximized::Both {
            window.maximized = Maximized::Both;
            window.frame_rect = area;
            state.restore.entry(id).or_insert(rect);
        }
        Ok(())
    }

    fn unmaximize(&self, id: WindowId) -> Result<()> {
        let mut state = self.state()?;
        let window = state.window_mut(id)?;
        if window.maximized != Maximized::None {
            window.maximized = Maximized::None;
            if let Some(rect) = state.restore.remove(&id) {
                state.window_mut(id)?.frame_rect = rect;
            }
        }
        Ok(())
    }

    fn make_fullscreen(&self, id: WindowId) -> Result<()> {
        let mut state = self.state()?;
        let rect = state.window_mut(id)?.frame_rect;
        let monitor = state.monitor_for(&rect);
        let bounds = state.monitors.get(monitor).map(|m| m.rect).unwrap_or(rect);
        let window = state.window_mut(id)?;
        if !window.fullscreen {
            window.fullscreen = true;
            window.frame_rect = bounds;
            state.restore.entry(id).or_insert(rect);
        }
        Ok(())
    }

    fn unmake_fullscreen(&self, id: WindowId) -> Result<()> {
        let mut state = self.state()?;
        let window = state.window_mut(id)?;
        if window.fullscreen {
            window.fullscreen = false;
            if window.maximized == Maximized::None
                && let Some(rect) = state.restore.remove(&id)
            {
                state.window_mut(id)?.frame_rect = rect;
            }
        }
        Ok(())
    }

    fn set_above(&self, id: WindowId, above: bool) -> Result<()> {
        let mut state = self.state()?;
        state.window_mut(id)?.above = above;
        Ok(())
    }

    fn set_sticky(&self, id: WindowId, sticky: bool) -> Result<()> {
        let mut state = self.state()?;
        let active = state.active_workspace;
        let window = state.window_mut(id)?;
        if sticky {
            window.workspace = -1;
        } else if window.workspace < 0 {
            window.workspace = active;
        }
        Ok(())
    }

    fn delete(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        let mut state = self.state()?;
        if state.window_mut(id)?.prompts_on_close {
            return Ok(());
        }
        let pos = state.position(id)?;
        state.actors.remove(pos);
        state.restore.remove(&id);
        if state.focus == Some(id) {
            state.focus = None;
        }
        Ok(())
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        let state = self.state()?;
        state.check()?;
        Ok(state.monitors.clone())
    }

    fn primary_monitor(&self) -> Result<usize> {
        let state = self.state()?;
        state.check()?;
        Ok(state.primary)
    }

    fn work_area(&self, monitor: usize) -> Result<Rect> {
        let state = self.state()?;
        state.check()?;
        state
            .work_areas
            .get(monitor)
            .copied()
            .ok_or(CompositorError::MonitorNotFound(monitor))
    }

    fn name(&self) -> &'static str {
        "Headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_windows() -> HeadlessCompositor {
        let compositor = HeadlessCompositor::new();
        compositor
            .add_window(HeadlessWindow::new(100, "Editor", "Code"))
            .unwrap();
        compositor
            .add_window(HeadlessWindow::new(200, "Browser", "Firefox"))
            .unwrap();
        compositor
    }

    #[test]
    fn test_activate_raises_and_focuses() {
        let c = two_windows();
        c.minimize(100).unwrap();
        c.activate(100, c.current_time()).unwrap();
        assert_eq!(c.stacking(), vec![200, 100]);
        assert_eq!(c.focused(), Some(100));
        assert!(!c.window(100).unwrap().minimized);
    }

    #[test]
    fn test_focus_does_not_raise() {
        let c = two_windows();
        c.focus(100, 0).unwrap();
        assert_eq!(c.stacking(), vec![100, 200]);
        assert_eq!(c.focused(), Some(100));
    }

    #[test]
    fn test_sticky_keeps_workspace_consistent() {
        let c = two_windows();
        c.set_sticky(100, true).unwrap();
        let props = c.window_props(100).unwrap();
        assert!(props.is_on_all_workspaces);
        assert_eq!(props.workspace, None);

        c.set_sticky(100, false).unwrap();
        let props = c.window_props(100).unwrap();
        assert!(!props.is_on_all_workspaces);
        assert_eq!(props.workspace, Some(0));
    }

    #[test]
    fn test_maximize_fills_work_area_and_restores() {
        let c = two_windows();
        c.set_work_area(0, Rect::new(0, 32, 1920, 1048)).unwrap();
        c.move_resize_frame(100, Rect::new(10, 50, 640, 480)).unwrap();

        c.maximize(100).unwrap();
        let w = c.window(100).unwrap();
        assert_eq!(w.maximized, Maximized::Both);
        assert_eq!(w.frame_rect, Rect::new(0, 32, 1920, 1048));

        c.unmaximize(100).unwrap();
        assert_eq!(c.window(100).unwrap().frame_rect, Rect::new(10, 50, 640, 480));
    }

    #[test]
    fn test_delete_respects_close_prompt() {
        let c = two_windows();
        c.add_window(HeadlessWindow {
            prompts_on_close: true,
            ..HeadlessWindow::new(300, "Unsaved", "Writer")
        })
        .unwrap();

        c.delete(300, 0).unwrap();
        assert!(c.window(300).is_some());

        c.delete(100, 0).unwrap();
        assert!(c.window(100).is_none());
    }

    #[test]
    fn test_failing_switch() {
        let c = two_windows();
        c.set_failing(true).unwrap();
        assert!(c.window_actors().is_err());
        assert!(c.move_frame(100, 0, 0).is_err());
        c.set_failing(false).unwrap();
        assert!(c.window_actors().is_ok());
    }

    #[test]
    fn test_monitor_assignment_by_center() {
        let c = HeadlessCompositor::from_seed(HeadlessSeed {
            monitors: vec![
                HeadlessMonitor {
                    rect: Rect::new(0, 0, 1920, 1080),
                    scale: 1.0,
                    connector: None,
                    primary: false,
                    work_area: None,
                },
                HeadlessMonitor {
                    rect: Rect::new(1920, 0, 2560, 1440),
                    scale: 2.0,
                    connector: Some("DP-1".to_string()),
                    primary: true,
                    work_area: None,
                },
            ],
            windows: vec![HeadlessWindow {
                frame_rect: Rect::new(2000, 100, 800, 600),
                ..HeadlessWindow::new(1, "Right", "Term")
            }],
            focused: None,
        });
        assert_eq!(c.window_props(1).unwrap().monitor, 1);
        assert_eq!(c.primary_monitor().unwrap(), 1);
    }

    #[test]
    fn test_extreme_frame_keeps_monitor_zero() {
        let c = two_windows();
        c.move_frame(100, i32::MAX, i32::MIN).unwrap();
        let props = c.window_props(100).unwrap();
        assert_eq!(props.frame_rect.x, i32::MAX);
        assert_eq!(props.monitor, 0);
    }

    #[test]
    fn test_poisoned_state_is_recovered() {
        let c = two_windows();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = c.state.lock();
            panic!("holder panicked");
        }));
        assert!(result.is_err());
        assert!(c.state.is_poisoned());
        assert_eq!(c.window_actors().unwrap().len(), 2);
        assert_eq!(c.window_props(200).unwrap().title.as_deref(), Some("Browser"));
    }
}
