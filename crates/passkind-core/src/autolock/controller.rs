//! Auto-lock controller implementation.
//!
//! A timer-driven state machine. It holds no threads and never reads the
//! OS clock -- the caller supplies a [`TimerDriver`] and feeds fired
//! timer ids back through [`AutoLockController::handle_timer`].
//!
//! ## State Transitions
//!
//! ```text
//! Disabled <-> Armed -> Warning -> Locked
//!                ^         |
//!                +---------+  (activity / dismiss)
//! ```
//!
//! At most one arm-timer and one tick-interval are ever pending: every
//! reschedule cancels the previous pair first, and that invariant lives
//! in exactly one place (`reset`/`disarm`).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::activity::{ActivityKind, ActivitySubscriptions};
use super::timer::{TimerDriver, TimerId};
use super::AutoLockConfig;
use crate::events::Event;
use crate::session::SessionHandle;

/// Warning window shown before the lock lands.
const WARNING_MS: u64 = 60_000;
/// Countdown tick period while the warning is visible.
const TICK_MS: u64 = 1_000;
/// Activity signals closer together than this are dropped.
const ACTIVITY_THROTTLE_MS: u64 = 1_000;
/// Navigation target on forced logout.
pub const LOGIN_PATH: &str = "/login";

/// Redirect side effect performed when the session locks.
pub trait Navigator {
    fn redirect_to(&mut self, path: &str);
}

/// Logical state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockPhase {
    /// Unauthenticated or auto-lock switched off; no timers armed.
    Disabled,
    /// Counting toward the warning threshold; nothing visible.
    Armed,
    /// Countdown visible, ticking once per second.
    Warning,
    /// The countdown expired and the session was terminated.
    Locked,
}

/// Render output while the warning is up: the literal remaining-seconds
/// count shown in the blocking modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockWarning {
    pub seconds_remaining: u64,
}

/// Inactivity auto-lock controller.
///
/// Collaborators are injected at construction: a [`SessionHandle`] for the
/// forced logout and a [`Navigator`] for the redirect to the login view.
pub struct AutoLockController<S, N> {
    session: S,
    navigator: N,
    config: AutoLockConfig,
    authenticated: bool,
    subscriptions: ActivitySubscriptions,
    last_activity_ms: u64,
    warning_visible: bool,
    seconds_remaining: u64,
    arm_timer: Option<TimerId>,
    tick_interval: Option<TimerId>,
    locked: bool,
}

impl<S: SessionHandle, N: Navigator> AutoLockController<S, N> {
    /// Create a detached controller. Nothing is scheduled until
    /// [`set_authenticated`](Self::set_authenticated) flips the predicate.
    pub fn new(session: S, navigator: N, config: AutoLockConfig) -> Self {
        Self {
            session,
            navigator,
            config,
            authenticated: false,
            subscriptions: ActivitySubscriptions::new(),
            last_activity_ms: 0,
            warning_visible: false,
            seconds_remaining: WARNING_MS / TICK_MS,
            arm_timer: None,
            tick_interval: None,
            locked: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> LockPhase {
        if self.locked {
            LockPhase::Locked
        } else if !self.subscriptions.is_active() {
            LockPhase::Disabled
        } else if self.warning_visible {
            LockPhase::Warning
        } else {
            LockPhase::Armed
        }
    }

    pub fn warning_visible(&self) -> bool {
        self.warning_visible
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn config(&self) -> AutoLockConfig {
        self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Hand the collaborators back, e.g. to persist the session after a lock.
    pub fn into_parts(self) -> (S, N) {
        (self.session, self.navigator)
    }

    /// The modal to render, or `None` while nothing is shown.
    pub fn overlay(&self) -> Option<LockWarning> {
        if self.warning_visible && self.authenticated {
            Some(LockWarning {
                seconds_remaining: self.seconds_remaining,
            })
        } else {
            None
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            warning_visible: self.warning_visible,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Push the authentication flag in. Attaches listeners and arms the
    /// timer when `(authenticated && enabled)` becomes true; tears
    /// everything down when it becomes false.
    pub fn set_authenticated<D: TimerDriver>(
        &mut self,
        driver: &mut D,
        authenticated: bool,
    ) -> Option<Event> {
        self.authenticated = authenticated;
        self.sync(driver)
    }

    /// Replace the auto-lock configuration and re-evaluate the predicate.
    /// A duration change while armed restarts the countdown from now.
    pub fn set_config<D: TimerDriver>(
        &mut self,
        driver: &mut D,
        config: AutoLockConfig,
    ) -> Option<Event> {
        let duration_changed = config.duration_minutes != self.config.duration_minutes;
        self.config = config;
        if let Some(event) = self.sync(driver) {
            return Some(event);
        }
        if duration_changed && self.subscriptions.is_active() {
            return Some(self.reset(driver));
        }
        None
    }

    /// Process one activity signal. Returns `None` when the signal is
    /// dropped (not subscribed, or inside the throttle window).
    pub fn record_activity<D: TimerDriver>(
        &mut self,
        driver: &mut D,
        kind: ActivityKind,
    ) -> Option<Event> {
        if !self.subscriptions.handles(kind) {
            return None;
        }
        if driver.now_ms().saturating_sub(self.last_activity_ms) <= ACTIVITY_THROTTLE_MS {
            return None;
        }
        Some(self.reset(driver))
    }

    /// The affirmative "stay logged in" action: Warning -> Armed.
    pub fn dismiss<D: TimerDriver>(&mut self, driver: &mut D) -> Option<Event> {
        if !self.warning_visible {
            return None;
        }
        let _ = self.reset(driver);
        Some(Event::WarningDismissed { at: Utc::now() })
    }

    /// Feed a fired timer id back in. Ids from timers that were cancelled
    /// before the fire was delivered are ignored.
    pub fn handle_timer<D: TimerDriver>(&mut self, driver: &mut D, id: TimerId) -> Option<Event> {
        if self.arm_timer == Some(id) {
            self.arm_timer = None;
            Some(self.enter_warning(driver))
        } else if self.tick_interval == Some(id) {
            self.tick(driver)
        } else {
            None
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn sync<D: TimerDriver>(&mut self, driver: &mut D) -> Option<Event> {
        let engaged = self.authenticated && self.config.enabled;
        if engaged && !self.subscriptions.is_active() {
            self.subscriptions.acquire();
            self.locked = false;
            Some(self.reset(driver))
        } else if !engaged && self.subscriptions.is_active() {
            self.teardown(driver);
            Some(Event::AutoLockDisarmed { at: Utc::now() })
        } else {
            None
        }
    }

    /// Cancel-before-reschedule lives here and nowhere else.
    fn reset<D: TimerDriver>(&mut self, driver: &mut D) -> Event {
        self.disarm(driver);
        self.last_activity_ms = driver.now_ms();
        self.warning_visible = false;
        self.seconds_remaining = WARNING_MS / TICK_MS;
        let delay = self.warning_delay_ms();
        self.arm_timer = Some(driver.set_timeout(delay));
        Event::TimerArmed {
            warning_delay_ms: delay,
            at: Utc::now(),
        }
    }

    fn disarm<D: TimerDriver>(&mut self, driver: &mut D) {
        if let Some(id) = self.arm_timer.take() {
            driver.clear(id);
        }
        if let Some(id) = self.tick_interval.take() {
            driver.clear(id);
        }
    }

    fn teardown<D: TimerDriver>(&mut self, driver: &mut D) {
        self.disarm(driver);
        self.warning_visible = false;
        self.subscriptions.release();
    }

    /// Delay from the last activity until the warning becomes visible.
    ///
    /// When the configured timeout fits the fixed 60s window the warning
    /// opens at `duration - 60s`; otherwise it opens at 75% of the
    /// timeout so the countdown still fits inside it.
    fn warning_delay_ms(&self) -> u64 {
        let duration_ms = self.config.duration_ms();
        if duration_ms > WARNING_MS {
            duration_ms - WARNING_MS
        } else {
            duration_ms.saturating_mul(3) / 4
        }
    }

    fn enter_warning<D: TimerDriver>(&mut self, driver: &mut D) -> Event {
        let duration_ms = self.config.duration_ms();
        self.warning_visible = true;
        self.seconds_remaining = duration_ms.saturating_sub(self.warning_delay_ms()) / 1000;
        self.tick_interval = Some(driver.set_interval(TICK_MS));
        Event::WarningShown {
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        }
    }

    fn tick<D: TimerDriver>(&mut self, driver: &mut D) -> Option<Event> {
        if self.seconds_remaining <= 1 {
            self.seconds_remaining = 0;
            Some(self.lock(driver))
        } else {
            self.seconds_remaining -= 1;
            Some(Event::WarningTick {
                seconds_remaining: self.seconds_remaining,
                at: Utc::now(),
            })
        }
    }

    /// Forced-logout sequence. Runs at most once per engagement: after
    /// it, the predicate is false and everything is torn down, so a
    /// straggling tick cannot trigger a second logout.
    fn lock<D: TimerDriver>(&mut self, driver: &mut D) -> Event {
        self.session.logout();
        self.navigator.redirect_to(LOGIN_PATH);
        self.authenticated = false;
        self.locked = true;
        self.teardown(driver);
        Event::SessionLocked { at: Utc::now() }
    }
}
