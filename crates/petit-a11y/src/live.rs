//! Live-region announcements
//!
//! A transient visually-hidden element carries the message to assistive
//! tech, then removes itself. Callers must not hold on to the element.

use petit_dom::{NodeId, Page};
use petit_events::Scheduler;
use std::time::Instant;
use tracing::debug;

/// How long the live region stays in the tree
pub const ANNOUNCE_TTL: std::time::Duration = std::time::Duration::from_secs(1);

/// Live-region priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// Announced at the next graceful opportunity
    Polite,
    /// Interrupts current speech
    Assertive,
}

impl Politeness {
    fn live_value(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }

    fn role(&self) -> &'static str {
        match self {
            Self::Polite => "status",
            Self::Assertive => "alert",
        }
    }
}

/// Insert a transient announcement element under body; it detaches itself
/// after [`ANNOUNCE_TTL`].
pub fn announce(
    page: &mut Page,
    sched: &mut Scheduler,
    now: Instant,
    message: &str,
    politeness: Politeness,
) -> NodeId {
    let region = page.tree.create_element("div");
    page.tree.set_attr(region, "class", "sr-only");
    page.tree.set_attr(region, "aria-live", politeness.live_value());
    page.tree.set_attr(region, "aria-atomic", "true");
    page.tree.set_attr(region, "role", politeness.role());
    page.tree.set_text(region, message);
    let body = page.body();
    page.tree.append_child(body, region);

    debug!(message, ?politeness, "announced");

    sched.schedule(
        now + ANNOUNCE_TTL,
        Box::new(move |page, _| {
            page.tree.detach(region);
        }),
    );
    region
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announce_lifecycle() {
        let mut page = Page::new();
        let mut sched = Scheduler::new();
        let now = Instant::now();

        let region = announce(&mut page, &mut sched, now, "Menu ouvert", Politeness::Polite);

        assert!(page.tree.is_connected(region));
        assert_eq!(page.tree.text(region), "Menu ouvert");
        assert_eq!(page.tree.attr(region, "aria-live"), Some("polite"));
        assert_eq!(page.tree.attr(region, "role"), Some("status"));

        // Still present just before the TTL
        sched.run_due(now + ANNOUNCE_TTL - std::time::Duration::from_millis(1), &mut page);
        assert!(page.tree.is_connected(region));

        sched.run_due(now + ANNOUNCE_TTL, &mut page);
        assert!(!page.tree.is_connected(region));
    }

    #[test]
    fn test_assertive_role() {
        let mut page = Page::new();
        let mut sched = Scheduler::new();

        let region = announce(
            &mut page,
            &mut sched,
            Instant::now(),
            "Veuillez corriger les erreurs",
            Politeness::Assertive,
        );

        assert_eq!(page.tree.attr(region, "aria-live"), Some("assertive"));
        assert_eq!(page.tree.attr(region, "role"), Some("alert"));
    }
}
