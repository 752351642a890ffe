//! Timer slot — the single live timer of one purpose, plus its guard.
//!
//! A light owns one slot per [`TimerPurpose`]. Re-arming cancels the previous
//! timer first, so at most one timer per purpose is ever outstanding. A fire
//! is only accepted when its handle matches the one the slot holds: a fire
//! that was already queued when the slot was re-armed or cancelled is stale
//! and is dropped.

use std::time::Duration;

use lumina_domain::timer::{TimerHandle, TimerPurpose};

use crate::ports::TimerService;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Armed<G> {
    handle: TimerHandle,
    guard: G,
}

/// At most one outstanding timer for a given purpose.
///
/// `G` is the guard captured at arm time; the fire-action re-evaluates it
/// against live state before acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSlot<G> {
    purpose: TimerPurpose,
    armed: Option<Armed<G>>,
}

impl<G> TimerSlot<G> {
    #[must_use]
    pub fn new(purpose: TimerPurpose) -> Self {
        Self {
            purpose,
            armed: None,
        }
    }

    #[must_use]
    pub fn purpose(&self) -> TimerPurpose {
        self.purpose
    }

    /// Cancel any outstanding timer and arm a new one.
    pub fn rearm<T: TimerService + ?Sized>(&mut self, timers: &T, after: Duration, guard: G) {
        self.cancel(timers);
        let handle = timers.arm(self.purpose, after);
        tracing::debug!(purpose = %self.purpose, %handle, ?after, "timer armed");
        self.armed = Some(Armed { handle, guard });
    }

    /// Cancel the outstanding timer, if any.
    pub fn cancel<T: TimerService + ?Sized>(&mut self, timers: &T) {
        if let Some(armed) = self.armed.take() {
            tracing::debug!(purpose = %self.purpose, handle = %armed.handle, "timer cancelled");
            timers.cancel(armed.handle);
        }
    }

    /// Claim a fire. Returns the guard when `handle` is the current arming,
    /// emptying the slot; returns `None` for a stale fire.
    pub fn take_fired(&mut self, handle: TimerHandle) -> Option<G> {
        match &self.armed {
            Some(armed) if armed.handle == handle => self.armed.take().map(|armed| armed.guard),
            _ => {
                tracing::debug!(purpose = %self.purpose, %handle, "stale timer fire dropped");
                None
            }
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed.as_ref().map(|armed| armed.handle)
    }
}
