//! Tokio-backed [`TimerService`] for one light.
//!
//! Every armed timer is a sleeping task. When it elapses it posts a
//! [`LightEvent::Timer`] into the light's own mailbox, so the fire is
//! handled in order with every other event. The service only keeps a weak
//! sender: pending timers never keep a light's event loop alive.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use lumina_domain::timer::{TimerFired, TimerHandle, TimerPurpose};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::decision::LightEvent;
use crate::ports::TimerService;

type Pending = Arc<Mutex<HashMap<TimerHandle, JoinHandle<()>>>>;

/// One-shot timers delivered as mailbox events.
pub struct TokioTimerService {
    mailbox: mpsc::WeakSender<LightEvent>,
    next: AtomicU64,
    pending: Pending,
}

impl TokioTimerService {
    /// Create a service posting into `mailbox`.
    #[must_use]
    pub fn new(mailbox: &mpsc::Sender<LightEvent>) -> Self {
        Self {
            mailbox: mailbox.downgrade(),
            next: AtomicU64::new(0),
            pending: Arc::default(),
        }
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl TimerService for TokioTimerService {
    fn arm(&self, purpose: TimerPurpose, after: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next.fetch_add(1, Ordering::Relaxed) + 1);
        let mailbox = self.mailbox.clone();
        let pending = Arc::clone(&self.pending);

        // held across spawn so the task cannot remove itself before it is registered
        let mut guard = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&handle);
            let Some(mailbox) = mailbox.upgrade() else {
                return;
            };
            let fired = LightEvent::Timer(TimerFired { purpose, handle });
            if mailbox.send(fired).await.is_err() {
                tracing::debug!(%handle, %purpose, "timer fired after its light stopped");
            }
        });
        guard.insert(handle, task);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let task = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle);
        if let Some(task) = task {
            task.abort();
        }
    }
}

impl Drop for TokioTimerService {
    fn drop(&mut self) {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        for task in pending.values() {
            task.abort();
        }
    }
}
