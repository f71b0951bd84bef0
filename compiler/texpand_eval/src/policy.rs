//! Callback policy.
//!
//! Suppressed regions are still traversed; only emission is switched off.
//! Renderer callbacks sit between the two: they are side effects, not
//! content. The policy decides whether they run inside a suppressed region.

/// Whether spliced callbacks run while emission is suppressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CallbackPolicy {
    /// Always invoke; only the `callback` event itself is suppressed.
    #[default]
    Always,
    /// Skip invocation while suppressed.
    FollowSuppression,
}

impl CallbackPolicy {
    /// Whether a callback reached with the given processing state runs.
    #[inline]
    pub fn invokes(self, processing: bool) -> bool {
        match self {
            CallbackPolicy::Always => true,
            CallbackPolicy::FollowSuppression => processing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_always_invokes() {
        assert_eq!(CallbackPolicy::default(), CallbackPolicy::Always);
        assert!(CallbackPolicy::Always.invokes(true));
        assert!(CallbackPolicy::Always.invokes(false));
    }

    #[test]
    fn follow_suppression_tracks_processing() {
        assert!(CallbackPolicy::FollowSuppression.invokes(true));
        assert!(!CallbackPolicy::FollowSuppression.invokes(false));
    }
}
