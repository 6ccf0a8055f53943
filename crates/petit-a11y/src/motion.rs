//! Reduced-motion preference

use petit_dom::Viewport;

/// Whether the user asked for reduced motion; widgets use this to skip
/// smooth-scroll and transition effects.
pub fn prefers_reduced_motion(viewport: &Viewport) -> bool {
    viewport.reduced_motion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_flag() {
        let mut viewport = Viewport::default();
        assert!(!prefers_reduced_motion(&viewport));

        viewport.reduced_motion = true;
        assert!(prefers_reduced_motion(&viewport));
    }
}
