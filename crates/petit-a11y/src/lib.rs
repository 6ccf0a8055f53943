//! Petit A11y
//!
//! Accessibility affordances shared by the widgets:
//! - screen-reader announcements via transient live regions
//! - focus trapping for modal-style containers
//! - reduced-motion preference

mod focus_trap;
mod live;
mod motion;

pub use focus_trap::FocusTrap;
pub use live::{announce, Politeness, ANNOUNCE_TTL};
pub use motion::prefers_reduced_motion;
