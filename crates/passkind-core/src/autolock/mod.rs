//! Inactivity auto-lock.
//!
//! Enforces that an authenticated session ends after a configured period
//! of inactivity, with a visible countdown and a chance to cancel before
//! the lock lands.

mod activity;
mod controller;
mod timer;

pub use activity::{ActivityKind, ActivitySubscriptions};
pub use controller::{AutoLockController, LockPhase, LockWarning, Navigator, LOGIN_PATH};
pub use timer::{ManualDriver, TimerDriver, TimerId, WallClockDriver};

use serde::{Deserialize, Serialize};

/// Auto-lock preferences. Owned by the session store and persisted with
/// it; the controller only ever reads these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoLockConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Inactivity timeout in minutes.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u64,
}

impl AutoLockConfig {
    /// Total timeout in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_minutes.saturating_mul(60_000)
    }
}

impl Default for AutoLockConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            duration_minutes: default_duration_minutes(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_duration_minutes() -> u64 {
    15
}
