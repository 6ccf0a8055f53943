//! Petit Events
//!
//! The reactive plumbing under every widget:
//! - typed events carrying only what handlers read
//! - a listener registry whose handles double as disposers
//! - a timer scheduler driven by an explicit clock
//! - throttle/debounce rate limiting
//! - intersection and media-query observation

mod bus;
mod event;
mod observer;
mod rate;
mod timers;

pub use bus::{EventBus, EventTarget, ListenerId};
pub use event::{Event, EventKind, Key};
pub use observer::{
    IntersectionEntry, IntersectionObserver, MediaQuery, MediaWatcher, QueryId,
};
pub use rate::{Debounce, Throttle};
pub use timers::{Scheduler, Task, TimerId};
