//! Window lookup by id, title, class, process or focus.
//!
//! Every lookup scans a fresh snapshot. When several windows match, the
//! first one in the compositor's enumeration order wins; that order is not
//! guaranteed to be stable or to reflect z-order.

use std::fmt;
use std::sync::Arc;

use crate::compositor::{Compositor, CompositorError, WindowId, WindowProps};

use super::source::{WindowHandle, WindowSource};

/// The ways a client can name a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(WindowId),
    /// Exact title match.
    Title(String),
    /// Case-sensitive containment; the empty string matches every window.
    TitleSubstring(String),
    /// Exact WM class match.
    WmClass(String),
    Pid(i32),
    /// The window holding input focus.
    Focused,
}

impl Lookup {
    /// Whether a window with these properties satisfies the lookup.
    pub fn matches(&self, id: WindowId, props: &WindowProps) -> bool {
        match self {
            Lookup::Id(want) => id == *want,
            Lookup::Title(title) => props.title.as_deref().unwrap_or_default() == title,
            Lookup::TitleSubstring(needle) => props
                .title
                .as_deref()
                .unwrap_or_default()
                .contains(needle.as_str()),
            Lookup::WmClass(class) => props.wm_class.as_deref().unwrap_or_default() == class,
            Lookup::Pid(pid) => props.pid == *pid,
            Lookup::Focused => props.has_focus,
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id {id}"),
            Lookup::Title(t) => write!(f, "title {t:?}"),
            Lookup::TitleSubstring(s) => write!(f, "title containing {s:?}"),
            Lookup::WmClass(c) => write!(f, "wm class {c:?}"),
            Lookup::Pid(p) => write!(f, "pid {p}"),
            Lookup::Focused => write!(f, "focused window"),
        }
    }
}

/// Resolves lookups against the live window set.
#[derive(Clone)]
pub struct WindowResolver {
    source: WindowSource,
}

impl WindowResolver {
    pub fn new(source: WindowSource) -> Self {
        Self { source }
    }

    /// Find a window by id. Absent is not an error.
    pub fn find_by_id(&self, id: WindowId) -> Result<Option<WindowHandle>, CompositorError> {
        Ok(self
            .source
            .try_snapshot()?
            .into_iter()
            .find(|h| h.id() == id))
    }

    /// First window whose properties satisfy the predicate.
    ///
    /// Windows whose properties can't be read are skipped.
    pub fn find_by_predicate<F>(&self, predicate: F) -> Result<Option<WindowHandle>, CompositorError>
    where
        F: Fn(WindowId, &WindowProps) -> bool,
    {
        let compositor = self.source.compositor();
        Ok(self.source.try_snapshot()?.into_iter().find(|h| {
            compositor
                .window_props(h.id())
                .map(|props| predicate(h.id(), &props))
                .unwrap_or(false)
        }))
    }

    pub fn compositor(&self) -> &Arc<dyn Compositor> {
        self.source.compositor()
    }

    /// Resolve any lookup.
    pub fn resolve(&self, lookup: &Lookup) -> Result<Option<WindowHandle>, CompositorError> {
        match lookup {
            Lookup::Id(id) => self.find_by_id(*id),
            other => self.find_by_predicate(|id, props| other.matches(id, props)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::headless::{HeadlessCompositor, HeadlessWindow};

    fn resolver() -> (Arc<HeadlessCompositor>, WindowResolver) {
        let c = Arc::new(HeadlessCompositor::new());
        c.add_window(HeadlessWindow {
            pid: 10,
            ..HeadlessWindow::new(100, "Editor", "Code")
        })
        .unwrap();
        c.add_window(HeadlessWindow {
            pid: 20,
            ..HeadlessWindow::new(200, "Browser", "Firefox")
        })
        .unwrap();
        c.add_window(HeadlessWindow {
            pid: 20,
            ..HeadlessWindow::new(300, "Browser - Private", "Firefox")
        })
        .unwrap();
        let resolver = WindowResolver::new(WindowSource::new(c.clone()));
        (c, resolver)
    }

    fn resolved(r: &WindowResolver, lookup: Lookup) -> Option<WindowId> {
        r.resolve(&lookup).unwrap().map(WindowHandle::id)
    }

    #[test]
    fn test_find_by_id() {
        let (_c, r) = resolver();
        assert_eq!(resolved(&r, Lookup::Id(200)), Some(200));
        assert_eq!(resolved(&r, Lookup::Id(999)), None);
    }

    #[test]
    fn test_exact_title() {
        let (_c, r) = resolver();
        assert_eq!(resolved(&r, Lookup::Title("Browser".into())), Some(200));
        assert_eq!(resolved(&r, Lookup::Title("browser".into())), None);
    }

    #[test]
    fn test_first_match_wins() {
        let (_c, r) = resolver();
        assert_eq!(
            resolved(&r, Lookup::TitleSubstring("Browser".into())),
            Some(200)
        );
        assert_eq!(resolved(&r, Lookup::WmClass("Firefox".into())), Some(200));
        assert_eq!(resolved(&r, Lookup::Pid(20)), Some(200));
    }

    #[test]
    fn test_substring_is_case_sensitive() {
        let (_c, r) = resolver();
        assert_eq!(resolved(&r, Lookup::TitleSubstring("private".into())), None);
        assert_eq!(
            resolved(&r, Lookup::TitleSubstring("Private".into())),
            Some(300)
        );
    }

    #[test]
    fn test_empty_substring_matches_first_window() {
        let (_c, r) = resolver();
        assert_eq!(resolved(&r, Lookup::TitleSubstring(String::new())), Some(100));
    }

    #[test]
    fn test_focused() {
        let (c, r) = resolver();
        assert_eq!(resolved(&r, Lookup::Focused), None);
        c.set_focus(Some(300)).unwrap();
        assert_eq!(resolved(&r, Lookup::Focused), Some(300));
    }

    #[test]
    fn test_unreadable_window_is_skipped() {
        let (c, r) = resolver();
        c.set_unreadable(200, true).unwrap();
        assert_eq!(resolved(&r, Lookup::WmClass("Firefox".into())), Some(300));
    }

    #[test]
    fn test_lookup_is_fresh_each_call() {
        let (c, r) = resolver();
        assert_eq!(resolved(&r, Lookup::Title("Late".into())), None);
        c.add_window(HeadlessWindow::new(400, "Late", "Term")).unwrap();
        assert_eq!(resolved(&r, Lookup::Title("Late".into())), Some(400));
    }
}
