//! Test utilities and mock factories.
//!
//! This module provides common testing utilities including mock object factories
//! and test helpers. Only compiled in test builds.

use std::sync::Arc;

use crate::compositor::headless::{HeadlessCompositor, HeadlessWindow};
use crate::compositor::{
    Compositor, MonitorInfo, Rect, Result, WindowActor, WindowId, WindowProps, WindowType,
};
use crate::service::ServiceDispatcher;
use crate::window::{Inspector, WindowMutator, WindowResolver, WindowSource};

/// Create raw window properties for a normal window on workspace 0.
pub fn mock_props(title: &str, wm_class: &str) -> WindowProps {
    WindowProps {
        title: Some(title.to_string()),
        wm_class: Some(wm_class.to_string()),
        wm_class_instance: Some(wm_class.to_lowercase()),
        workspace: Some(0),
        pid: 1000,
        window_type: WindowType::Normal,
        frame_rect: Rect::new(0, 0, 800, 600),
        ..WindowProps::default()
    }
}

/// Create a headless window with a pid and a distinct frame.
pub fn mock_window(id: u64, title: &str, wm_class: &str) -> HeadlessWindow {
    HeadlessWindow {
        pid: id as i32 + 1000,
        frame_rect: Rect::new(id as i32, id as i32, 640, 480),
        ..HeadlessWindow::new(id, title, wm_class)
    }
}

/// A headless session with "Editor" (100, Code) and "Browser" (200, Firefox).
pub fn mock_compositor() -> Arc<HeadlessCompositor> {
    let compositor = Arc::new(HeadlessCompositor::new());
    compositor
        .add_window(mock_window(100, "Editor", "Code"))
        .expect("headless add_window");
    compositor
        .add_window(mock_window(200, "Browser", "Firefox"))
        .expect("headless add_window");
    compositor
}

fn source_for(compositor: &Arc<HeadlessCompositor>) -> WindowSource {
    WindowSource::new(compositor.clone())
}

/// The two-window session with a mutator over it.
pub fn two_window_session() -> (Arc<HeadlessCompositor>, WindowMutator) {
    let compositor = mock_compositor();
    let mutator = WindowMutator::new(WindowResolver::new(source_for(&compositor)));
    (compositor, mutator)
}

/// The two-window session with an inspector and the source it reads.
pub fn two_window_inspector() -> (Arc<HeadlessCompositor>, Inspector, WindowSource) {
    let compositor = mock_compositor();
    let source = source_for(&compositor);
    let inspector = Inspector::new(WindowResolver::new(source.clone()));
    (compositor, inspector, source)
}

/// A compositor whose every call panics.
pub struct PanickingCompositor;

impl Compositor for PanickingCompositor {
    fn window_actors(&self) -> Result<Vec<WindowActor>> {
        panic!("window_actors")
    }
    fn window_type(&self, _id: WindowId) -> Result<WindowType> {
        panic!("window_type")
    }
    fn window_props(&self, _id: WindowId) -> Result<WindowProps> {
        panic!("window_props")
    }
    fn current_time(&self) -> u32 {
        panic!("current_time")
    }
    fn activate(&self, _id: WindowId, _timestamp: u32) -> Result<()> {
        panic!("activate")
    }
    fn focus(&self, _id: WindowId, _timestamp: u32) -> Result<()> {
        panic!("focus")
    }
    fn move_frame(&self, _id: WindowId, _x: i32, _y: i32) -> Result<()> {
        panic!("move_frame")
    }
    fn move_resize_frame(&self, _id: WindowId, _rect: Rect) -> Result<()> {
        panic!("move_resize_frame")
    }
    fn minimize(&self, _id: WindowId) -> Result<()> {
        panic!("minimize")
    }
    fn unminimize(&self, _id: WindowId) -> Result<()> {
        panic!("unminimize")
    }
    fn maximize(&self, _id: WindowId) -> Result<()> {
        panic!("maximize")
    }
    fn unmaximize(&self, _id: WindowId) -> Result<()> {
        panic!("unmaximize")
    }
    fn make_fullscreen(&self, _id: WindowId) -> Result<()> {
        panic!("make_fullscreen")
    }
    fn unmake_fullscreen(&self, _id: WindowId) -> Result<()> {
        panic!("unmake_fullscreen")
    }
    fn set_above(&self, _id: WindowId, _above: bool) -> Result<()> {
        panic!("set_above")
    }
    fn set_sticky(&self, _id: WindowId, _sticky: bool) -> Result<()> {
        panic!("set_sticky")
    }
    fn delete(&self, _id: WindowId, _timestamp: u32) -> Result<()> {
        panic!("delete")
    }
    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        panic!("monitors")
    }
    fn primary_monitor(&self) -> Result<usize> {
        panic!("primary_monitor")
    }
    fn work_area(&self, _monitor: usize) -> Result<Rect> {
        panic!("work_area")
    }
    fn name(&self) -> &'static str {
        "Panicking"
    }
}

/// The two-window session behind a dispatcher.
pub fn mock_dispatcher() -> (Arc<HeadlessCompositor>, ServiceDispatcher) {
    let compositor = mock_compositor();
    let dispatcher = ServiceDispatcher::new(compositor.clone());
    (compositor, dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_compositor() {
        let compositor = mock_compositor();
        assert_eq!(compositor.stacking(), vec![100, 200]);
        assert_eq!(compositor.window(200).unwrap().wm_class, "Firefox");
    }

    #[test]
    fn test_mock_window() {
        let window = mock_window(100, "Editor", "Code");
        assert_eq!(window.pid, 1100);
        assert_eq!(window.wm_class_instance, "code");
        assert_eq!(window.frame_rect, Rect::new(100, 100, 640, 480));
    }

    #[test]
    fn test_mock_props() {
        let props = mock_props("Doc", "Writer");
        assert_eq!(props.title.as_deref(), Some("Doc"));
        assert_eq!(props.window_type, WindowType::Normal);
    }

    #[test]
    fn test_mock_dispatcher() {
        let (compositor, _dispatcher) = mock_dispatcher();
        assert_eq!(compositor.window_actors().unwrap().len(), 2);
    }
}
