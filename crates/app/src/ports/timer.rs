//! Timer port — one-shot timers whose expiry comes back as an event.

use std::time::Duration;

use lumina_domain::timer::{TimerHandle, TimerPurpose};

/// Arms and cancels one-shot timers for a single light.
///
/// Expiry is not a callback: the service delivers a
/// [`TimerFired`](lumina_domain::timer::TimerFired) event into the light's
/// mailbox, which is handled like any other event. A cancelled timer may
/// still be delivered if it had already elapsed, so consumers must check
/// the handle against the one they hold.
pub trait TimerService {
    /// Arm a timer that fires once after `after`.
    fn arm(&self, purpose: TimerPurpose, after: Duration) -> TimerHandle;

    /// Cancel a pending timer. Cancelling an elapsed or unknown handle is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

impl<T: TimerService + ?Sized> TimerService for &T {
    fn arm(&self, purpose: TimerPurpose, after: Duration) -> TimerHandle {
        (**self).arm(purpose, after)
    }

    fn cancel(&self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}
