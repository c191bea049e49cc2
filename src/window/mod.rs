//! Window query-and-command core.
//!
//! [`WindowSource`] reads the live window set, [`WindowResolver`] picks one
//! window for a lookup key, [`WindowMutator`] changes it and [`Inspector`]
//! turns windows and monitors into serializable records. None of them keep
//! state between calls: every operation starts from a fresh snapshot.

pub mod inspector;
pub mod mutator;
pub mod resolver;
pub mod source;

pub use inspector::{CompactWindow, Inspector, MonitorRecord, WindowRecord};
pub use mutator::{ValidCommand, WindowCommand, WindowMutator};
pub use resolver::{Lookup, WindowResolver};
pub use source::{WindowHandle, WindowSource};
