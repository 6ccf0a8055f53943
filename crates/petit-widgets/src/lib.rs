//! Petit Widgets
//!
//! The interactive units of the site: disclosure (mobile nav, FAQ items),
//! scroll tracking (header shrink, scroll spy), and lazy image loading.
//! Each widget owns its listeners and cleans them up on destroy.

mod disclosure;
mod lazy;
mod scroll;
mod widget;

pub use disclosure::{Disclosure, DisclosureOptions, ToggleState, NAV_BREAKPOINT};
pub use lazy::{LazyImages, DATA_SRC_ATTR, LOADED_CLASS};
pub use scroll::{HeaderShrink, ScrollSpy, ACTIVE_CLASS, CONDENSED_CLASS};
pub use widget::Widget;
