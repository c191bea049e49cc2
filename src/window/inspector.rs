//! Projection of windows and monitors into the records the service returns.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zbus::zvariant::Type;

use crate::compositor::{Maximized, Rect, WindowId, WindowProps};
use crate::error::ServiceError;

use super::resolver::WindowResolver;
use super::source::WindowHandle;

/// Full detail of one window, serialized for `ListDetailed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub wm_class: String,
    pub wm_class_instance: String,
    pub sandboxed_app_id: String,
    pub gtk_application_id: String,
    pub has_focus: bool,
    pub appears_focused: bool,
    pub is_hidden: bool,
    pub is_minimized: bool,
    /// Maximized in both axes.
    pub is_maximized: bool,
    pub is_fullscreen: bool,
    pub is_above: bool,
    pub is_on_all_workspaces: bool,
    pub is_skip_taskbar: bool,
    /// `-1` means visible on all workspaces.
    pub workspace_index: i32,
    pub monitor_index: i32,
    pub pid: i32,
    pub window_type: i32,
    pub window_type_name: String,
    pub frame_rect: Rect,
}

impl WindowRecord {
    /// Normalize raw compositor properties into a record.
    pub fn from_props(id: WindowId, props: WindowProps) -> Self {
        let workspace_index = if props.is_on_all_workspaces {
            -1
        } else {
            props.workspace.unwrap_or(-1)
        };

        Self {
            id,
            title: props.title.unwrap_or_default(),
            wm_class: props.wm_class.unwrap_or_default(),
            wm_class_instance: props.wm_class_instance.unwrap_or_default(),
            sandboxed_app_id: props.sandboxed_app_id.unwrap_or_default(),
            gtk_application_id: props.gtk_application_id.unwrap_or_default(),
            has_focus: props.has_focus,
            appears_focused: props.has_focus,
            is_hidden: props.is_hidden,
            is_minimized: props.is_minimized,
            is_maximized: props.maximized == Maximized::Both,
            is_fullscreen: props.is_fullscreen,
            is_above: props.is_above,
            // A window without a workspace is visible on all of them.
            is_on_all_workspaces: workspace_index == -1,
            is_skip_taskbar: props.is_skip_taskbar,
            workspace_index,
            monitor_index: props.monitor,
            pid: props.pid,
            window_type: props.window_type.code(),
            window_type_name: props.window_type.name().to_string(),
            frame_rect: props.frame_rect,
        }
    }

    pub fn compact(&self) -> CompactWindow {
        CompactWindow {
            id: self.id,
            title: self.title.clone(),
            wm_class: self.wm_class.clone(),
            wm_class_instance: self.wm_class_instance.clone(),
            sandboxed_app_id: self.sandboxed_app_id.clone(),
            has_focus: self.has_focus,
            workspace_index: self.workspace_index,
            monitor_index: self.monitor_index,
            pid: self.pid,
            window_type: self.window_type,
        }
    }

    fn clear_focus(&mut self) {
        self.has_focus = false;
        self.appears_focused = false;
    }
}

/// The compact tuple returned by `List`, D-Bus signature `(tssssbiiii)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct CompactWindow {
    pub id: WindowId,
    pub title: String,
    pub wm_class: String,
    pub wm_class_instance: String,
    pub sandboxed_app_id: String,
    pub has_focus: bool,
    pub workspace_index: i32,
    pub monitor_index: i32,
    pub pid: i32,
    pub window_type: i32,
}

/// One physical display, serialized for `ListMonitors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorRecord {
    pub index: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub is_primary: bool,
    /// Empty when the compositor doesn't expose connector names.
    pub connector: String,
    pub scale: f64,
}

/// Clear `has_focus` on every record after the first focused one.
pub fn keep_first_focus(records: &mut [WindowRecord]) {
    let mut seen = false;
    for record in records.iter_mut().filter(|r| r.has_focus) {
        if seen {
            record.clear_focus();
        }
        seen = true;
    }
}

/// Projects live windows and topology into records.
#[derive(Clone)]
pub struct Inspector {
    resolver: WindowResolver,
}

impl Inspector {
    pub fn new(resolver: WindowResolver) -> Self {
        Self { resolver }
    }

    /// Full record of one window.
    pub fn project(&self, handle: WindowHandle) -> Result<WindowRecord, ServiceError> {
        let props = self.resolver.compositor().window_props(handle.id())?;
        Ok(WindowRecord::from_props(handle.id(), props))
    }

    /// Compact tuples for a whole snapshot, same filtering as [`Self::project_all`].
    pub fn project_compact(&self, handles: &[WindowHandle]) -> Vec<CompactWindow> {
        self.project_all(handles)
            .iter()
            .map(WindowRecord::compact)
            .collect()
    }

    /// Records for a whole snapshot.
    ///
    /// Windows that can't be read are skipped.
    pub fn project_all(&self, handles: &[WindowHandle]) -> Vec<WindowRecord> {
        let mut records: Vec<WindowRecord> = handles
            .iter()
            .filter_map(|&h| match self.project(h) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(id = h.id(), error = %e, "Skipping unreadable window");
                    None
                }
            })
            .collect();
        keep_first_focus(&mut records);
        records
    }

    /// All monitors with exactly one marked primary.
    pub fn list_monitors(&self) -> Result<Vec<MonitorRecord>, ServiceError> {
        let compositor = self.resolver.compositor();
        let monitors = compositor.monitors()?;
        let primary = compositor.primary_monitor()?;
        let primary = if primary < monitors.len() { primary } else { 0 };

        Ok(monitors
            .into_iter()
            .enumerate()
            .map(|(i, m)| MonitorRecord {
                index: i as i32,
                x: m.rect.x,
                y: m.rect.y,
                width: m.rect.width,
                height: m.rect.height,
                is_primary: i == primary,
                connector: m.connector.unwrap_or_default(),
                scale: m.scale,
            })
            .collect())
    }

    /// Usable area of the active workspace on a monitor, validated against
    /// the live monitor count.
    pub fn work_area(&self, monitor: i64) -> Result<Rect, ServiceError> {
        let compositor = self.resolver.compositor();
        let count = compositor.monitors()?.len();
        let index = usize::try_from(monitor)
            .ok()
            .filter(|&i| i < count)
            .ok_or(ServiceError::MonitorOutOfRange {
                index: monitor,
                count,
            })?;
        Ok(compositor.work_area(index)?)
    }

    /// Current frame rect of a window.
    pub fn geometry(&self, id: WindowId) -> Result<Rect, ServiceError> {
        let handle = self
            .resolver
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::window(id))?;
        Ok(self.project(handle)?.frame_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::WindowType;
    use crate::compositor::headless::{HeadlessCompositor, HeadlessWindow};
    use crate::test_utils::{mock_props, two_window_inspector};

    #[test]
    fn test_workspace_and_sticky_are_consistent() {
        let sticky = WindowRecord::from_props(
            1,
            WindowProps {
                is_on_all_workspaces: true,
                workspace: Some(3),
                ..mock_props("Sticky", "Term")
            },
        );
        assert_eq!(sticky.workspace_index, -1);
        assert!(sticky.is_on_all_workspaces);

        let pinned = WindowRecord::from_props(
            2,
            WindowProps {
                workspace: Some(2),
                ..mock_props("Pinned", "Term")
            },
        );
        assert_eq!(pinned.workspace_index, 2);
        assert!(!pinned.is_on_all_workspaces);

        let nowhere = WindowRecord::from_props(
            3,
            WindowProps {
                workspace: None,
                ..mock_props("Nowhere", "Term")
            },
        );
        assert_eq!(nowhere.workspace_index, -1);
        assert!(nowhere.is_on_all_workspaces);
    }

    #[test]
    fn test_maximized_only_when_both_axes() {
        let half = WindowRecord::from_props(
            1,
            WindowProps {
                maximized: Maximized::Vertical,
                ..mock_props("Half", "Term")
            },
        );
        assert!(!half.is_maximized);
        let full = WindowRecord::from_props(
            1,
            WindowProps {
                maximized: Maximized::Both,
                ..mock_props("Full", "Term")
            },
        );
        assert!(full.is_maximized);
    }

    #[test]
    fn test_type_name_and_missing_strings() {
        let record = WindowRecord::from_props(
            9,
            WindowProps {
                title: None,
                wm_class: None,
                window_type: WindowType::Other(77),
                ..WindowProps::default()
            },
        );
        assert_eq!(record.title, "");
        assert_eq!(record.wm_class, "");
        assert_eq!(record.window_type, 77);
        assert_eq!(record.window_type_name, "unknown");
    }

    #[test]
    fn test_detailed_json_field_names() {
        let record = WindowRecord::from_props(5, mock_props("Editor", "Code"));
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "id",
            "wm_class",
            "gtk_application_id",
            "is_on_all_workspaces",
            "workspace_index",
            "window_type_name",
            "frame_rect",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["frame_rect"]["width"], 800);
        assert_eq!(json["window_type_name"], "normal");
    }

    #[test]
    fn test_keep_first_focus() {
        let mut records: Vec<_> = [(1, true), (2, false), (3, true)]
            .into_iter()
            .map(|(id, focus)| {
                WindowRecord::from_props(
                    id,
                    WindowProps {
                        has_focus: focus,
                        ..mock_props("W", "C")
                    },
                )
            })
            .collect();
        keep_first_focus(&mut records);
        let focus: Vec<_> = records.iter().map(|r| (r.has_focus, r.appears_focused)).collect();
        assert_eq!(focus, vec![(true, true), (false, false), (false, false)]);
    }

    #[test]
    fn test_project_all_reports_focus() {
        let (c, inspector, source) = two_window_inspector();
        c.set_focus(Some(200)).unwrap();
        let records = inspector.project_all(&source.snapshot());
        let focused: Vec<_> = records.iter().filter(|r| r.has_focus).map(|r| r.id).collect();
        assert_eq!(focused, vec![200]);
    }

    #[test]
    fn test_project_all_skips_unreadable() {
        let (c, inspector, source) = two_window_inspector();
        c.set_unreadable(100, true).unwrap();
        let records = inspector.project_all(&source.snapshot());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 200);
    }

    #[test]
    fn test_project_compact_matches_records() {
        let (c, inspector, source) = two_window_inspector();
        c.set_focus(Some(100)).unwrap();
        c.set_unreadable(200, true).unwrap();
        let compact = inspector.project_compact(&source.snapshot());
        assert_eq!(compact.len(), 1);
        assert_eq!(compact[0].id, 100);
        assert_eq!(compact[0].wm_class, "Code");
        assert_eq!(compact[0].pid, 1100);
        assert!(compact[0].has_focus);
    }

    #[test]
    fn test_work_area_bounds() {
        let (c, inspector, _source) = two_window_inspector();
        c.set_work_area(0, Rect::new(0, 32, 1920, 1048)).unwrap();
        assert_eq!(inspector.work_area(0).unwrap(), Rect::new(0, 32, 1920, 1048));
        assert!(inspector.work_area(-1).unwrap_err().is_not_found());
        assert!(inspector.work_area(1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_monitor_records() {
        let (_c, inspector, _source) = two_window_inspector();
        let monitors = inspector.list_monitors().unwrap();
        assert_eq!(monitors.len(), 1);
        assert!(monitors[0].is_primary);
        assert_eq!(monitors[0].connector, "");
        assert_eq!(monitors[0].scale, 1.0);
    }

    #[test]
    fn test_geometry() {
        let c = std::sync::Arc::new(HeadlessCompositor::new());
        c.add_window(HeadlessWindow {
            frame_rect: Rect::new(1, 2, 3, 4),
            ..HeadlessWindow::new(7, "Tiny", "X")
        })
        .unwrap();
        let inspector = Inspector::new(WindowResolver::new(
            crate::window::WindowSource::new(c),
        ));
        assert_eq!(inspector.geometry(7).unwrap(), Rect::new(1, 2, 3, 4));
        assert!(inspector.geometry(8).unwrap_err().is_not_found());
    }
}
