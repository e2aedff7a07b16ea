//! Fire-once deferred timers.
//!
//! A [`Scheduler`] never runs code itself. It hands out a [`TimerHandle`] and
//! later reports, through the host, that the handle came due. The host passes
//! the handle to [`SpinController::fire`](crate::SpinController::fire), which
//! asks the scheduler via [`Scheduler::fired`] whether the timer is still live.
//! A cancelled timer therefore can never reach settlement.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub trait Scheduler {
    /// Arrange for `handle` to come due after `delay`. Handles are never reused.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Drop a timer before it is delivered. Returns `false` if it was unknown
    /// or already delivered.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Consume a due timer. Returns `true` exactly once for a live handle and
    /// `false` for cancelled, unknown or already consumed ones.
    fn fired(&mut self, handle: TimerHandle) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        (**self).cancel(handle)
    }

    fn fired(&mut self, handle: TimerHandle) -> bool {
        (**self).fired(handle)
    }
}

/// Scheduler driven by an explicit clock, for tests and stepped hosts.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerHandle, Duration>,
    due: BTreeSet<TimerHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Timers scheduled but not yet due.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.due.is_empty()
    }

    /// Move the clock forward and return every handle that came due, earliest
    /// deadline first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let now = self.now;
        let mut expired: Vec<(Duration, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(handle, deadline)| (*deadline, *handle))
            .collect();
        expired.sort();
        for (_, handle) in &expired {
            self.pending.remove(handle);
            self.due.insert(*handle);
        }
        expired.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.insert(handle, self.now + delay);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some() || self.due.remove(&handle)
    }

    fn fired(&mut self, handle: TimerHandle) -> bool {
        self.due.remove(&handle)
    }
}
