//! Timer scheduling primitives for the auto-lock controller.
//!
//! The controller never reads the OS clock directly. It schedules one-shot
//! timeouts and repeating intervals through [`TimerDriver`] and is handed
//! fired ids back, so the wall-clock driver used in production and the
//! virtual-time [`ManualDriver`] used in tests are interchangeable.

/// Handle to a pending timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Scheduling backend for the controller.
pub trait TimerDriver {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Schedule a one-shot timer that fires once after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;

    /// Schedule a repeating timer that fires every `period_ms`.
    fn set_interval(&mut self, period_ms: u64) -> TimerId;

    /// Cancel a pending timeout or interval. Unknown ids are ignored.
    fn clear(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    deadline_ms: u64,
    /// `Some` for intervals, `None` for one-shot timeouts.
    period_ms: Option<u64>,
}

/// Production driver backed by the system clock.
///
/// No internal thread -- the caller polls periodically, the same way the
/// UI event loop services `setTimeout`/`setInterval`.
#[derive(Debug, Default)]
pub struct WallClockDriver {
    next_id: u64,
    pending: Vec<Pending>,
}

impl WallClockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect timers due at the current wall-clock time.
    ///
    /// One-shot timers are removed; intervals are pushed forward by one
    /// period and fire at most once per poll.
    pub fn poll(&mut self) -> Vec<TimerId> {
        let now = self.now_ms();
        fire_due(&mut self.pending, now)
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            deadline_ms: self.now_ms().saturating_add(delay_ms),
            period_ms,
        });
        id
    }
}

impl TimerDriver for WallClockDriver {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.push(delay_ms, None)
    }

    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        self.push(period_ms, Some(period_ms))
    }

    fn clear(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}

fn fire_due(pending: &mut Vec<Pending>, now: u64) -> Vec<TimerId> {
    let mut fired = Vec::new();
    let mut i = 0;
    while i < pending.len() {
        if pending[i].deadline_ms <= now {
            fired.push(pending[i].id);
            match pending[i].period_ms {
                Some(period) => {
                    pending[i].deadline_ms = now.saturating_add(period);
                    i += 1;
                }
                None => {
                    pending.remove(i);
                }
            }
        } else {
            i += 1;
        }
    }
    fired
}

/// Deterministic driver with a virtual clock.
///
/// Time only moves when [`advance`](ManualDriver::advance) is called, and
/// the schedule/cancel call counts are recorded so tests can check the
/// no-duplicate-timers invariant directly.
#[derive(Debug, Default)]
pub struct ManualDriver {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
    timeouts_scheduled: u64,
    intervals_scheduled: u64,
    cancelled: u64,
}

impl ManualDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward, firing timers in deadline order.
    /// Intervals fire once per elapsed period.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let target = self.now_ms.saturating_add(ms);
        let mut fired = Vec::new();
        loop {
            let next = self
                .pending
                .iter()
                .filter(|p| p.deadline_ms <= target)
                .map(|p| p.deadline_ms)
                .min();
            let Some(deadline) = next else { break };
            self.now_ms = deadline;
            fired.extend(fire_due(&mut self.pending, deadline));
        }
        self.now_ms = target;
        fired
    }

    pub fn pending_timeouts(&self) -> usize {
        self.pending.iter().filter(|p| p.period_ms.is_none()).count()
    }

    pub fn pending_intervals(&self) -> usize {
        self.pending.iter().filter(|p| p.period_ms.is_some()).count()
    }

    pub fn timeouts_scheduled(&self) -> u64 {
        self.timeouts_scheduled
    }

    pub fn intervals_scheduled(&self) -> u64 {
        self.intervals_scheduled
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl TimerDriver for ManualDriver {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.timeouts_scheduled += 1;
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            deadline_ms: self.now_ms.saturating_add(delay_ms),
            period_ms: None,
        });
        id
    }

    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        self.intervals_scheduled += 1;
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            deadline_ms: self.now_ms.saturating_add(period_ms),
            period_ms: Some(period_ms),
        });
        id
    }

    fn clear(&mut self, id: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_fires_once() {
        let mut driver = ManualDriver::new();
        let id = driver.set_timeout(500);
        assert!(driver.advance(499).is_empty());
        assert_eq!(driver.advance(1), vec![id]);
        assert!(driver.advance(10_000).is_empty());
        assert_eq!(driver.pending_timeouts(), 0);
    }

    #[test]
    fn interval_fires_once_per_period() {
        let mut driver = ManualDriver::new();
        let id = driver.set_interval(1000);
        assert_eq!(driver.advance(3000), vec![id, id, id]);
        assert_eq!(driver.pending_intervals(), 1);
    }

    #[test]
    fn cleared_timer_never_fires() {
        let mut driver = ManualDriver::new();
        let id = driver.set_timeout(500);
        driver.clear(id);
        assert!(driver.advance(1000).is_empty());
        assert_eq!(driver.cancelled(), 1);
    }

    #[test]
    fn clearing_unknown_id_is_ignored() {
        let mut driver = ManualDriver::new();
        let id = driver.set_timeout(500);
        driver.clear(id);
        driver.clear(id);
        assert_eq!(driver.cancelled(), 1);
    }

    #[test]
    fn mixed_timers_fire_in_deadline_order() {
        let mut driver = ManualDriver::new();
        let slow = driver.set_timeout(2500);
        let tick = driver.set_interval(1000);
        assert_eq!(driver.advance(3000), vec![tick, tick, slow, tick]);
    }

    #[test]
    fn wall_clock_poll_fires_elapsed_timeout() {
        let mut driver = WallClockDriver::new();
        let id = driver.set_timeout(0);
        let fired = driver.poll();
        assert_eq!(fired, vec![id]);
    }
}
