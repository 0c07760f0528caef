use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::autolock::LockPhase;

/// Every auto-lock state change produces an Event.
/// The UI layer polls for events; the CLI watcher streams them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A fresh arm-timer was scheduled (initial attach, activity reset,
    /// or warning dismissal).
    TimerArmed {
        warning_delay_ms: u64,
        at: DateTime<Utc>,
    },
    /// The arm-timer fired; the blocking countdown is now visible.
    WarningShown {
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    WarningTick {
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    /// The user chose to stay logged in.
    WarningDismissed {
        at: DateTime<Utc>,
    },
    /// The countdown expired: session terminated, navigation issued.
    SessionLocked {
        at: DateTime<Utc>,
    },
    /// Auto-lock was switched off or authentication ended; all timers
    /// and listeners were torn down.
    AutoLockDisarmed {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: LockPhase,
        warning_visible: bool,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
}
