//! Activity signals and listener subscriptions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A user-input event treated as evidence the session is in active use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyDown,
    Scroll,
    TouchStart,
}

impl ActivityKind {
    /// The five global input events the controller listens for.
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::PointerDown,
        ActivityKind::PointerMove,
        ActivityKind::KeyDown,
        ActivityKind::Scroll,
        ActivityKind::TouchStart,
    ];
}

/// Scoped set of global input-event subscriptions.
///
/// Acquired when `(authenticated && enabled)` becomes true, released when
/// that predicate becomes false or the controller is torn down. Activity
/// signals for kinds that are not currently subscribed are dropped.
#[derive(Debug, Default)]
pub struct ActivitySubscriptions {
    kinds: HashSet<ActivityKind>,
}

impl ActivitySubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all activity listeners.
    pub fn acquire(&mut self) {
        self.kinds.extend(ActivityKind::ALL);
    }

    /// Unregister everything. Idempotent.
    pub fn release(&mut self) {
        self.kinds.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.kinds.is_empty()
    }

    pub fn handles(&self, kind: ActivityKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_registers_all_five_listeners() {
        let mut subs = ActivitySubscriptions::new();
        assert!(!subs.is_active());
        subs.acquire();
        assert_eq!(subs.len(), 5);
        for kind in ActivityKind::ALL {
            assert!(subs.handles(kind));
        }
    }

    #[test]
    fn release_drops_everything() {
        let mut subs = ActivitySubscriptions::new();
        subs.acquire();
        subs.release();
        assert!(subs.is_empty());
        assert!(!subs.handles(ActivityKind::KeyDown));
        // Releasing again is a no-op.
        subs.release();
        assert!(subs.is_empty());
    }

    #[test]
    fn acquire_is_idempotent() {
        let mut subs = ActivitySubscriptions::new();
        subs.acquire();
        subs.acquire();
        assert_eq!(subs.len(), 5);
    }
}
