//! Petit App
//!
//! Composition root: mounts every widget against its DOM anchors, routes
//! events and timer ticks, carries the stored theme preference, and keeps
//! a bounded crash log for uncaught errors.

mod app;
mod diagnostics;
mod storage;
mod theme;

pub use app::{App, KEYBOARD_CLASS, REDUCED_MOTION_CLASS};
pub use diagnostics::{CrashLog, ErrorReport, CRASH_LOG_CAPACITY};
pub use storage::{Storage, StorageError};
pub use theme::{Theme, ThemePreference, ThemeToggle, DARK_CLASS, THEME_KEY};
