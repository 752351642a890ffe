//! Per-light event loop.
//!
//! Each light runs on its own task and owns its decision core outright.
//! Events arrive one at a time through a bounded mailbox; a handler runs to
//! completion before the next event is taken, so the core needs no locks.

use std::panic::{AssertUnwindSafe, catch_unwind};

use lumina_domain::status::LightStatus;
use tokio::sync::{mpsc, watch};

use crate::decision::{DecisionCore, LightEvent};
use crate::timer_service::TokioTimerService;

/// Mailbox capacity used when none is configured.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// The outside world's grip on a running light.
#[derive(Debug, Clone)]
pub struct LightHandle {
    name: String,
    mailbox: mpsc::Sender<LightEvent>,
    status: watch::Receiver<LightStatus>,
}

impl LightHandle {
    /// Assemble a handle from an existing mailbox and status channel.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        mailbox: mpsc::Sender<LightEvent>,
        status: watch::Receiver<LightStatus>,
    ) -> Self {
        Self {
            name: name.into(),
            mailbox,
            status,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mailbox(&self) -> &mpsc::Sender<LightEvent> {
        &self.mailbox
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn status(&self) -> LightStatus {
        self.status.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LightStatus> {
        self.status.clone()
    }
}

/// Drain `mailbox` into `core` until every sender is gone.
///
/// Handler errors and panics are logged and never stop the loop. The core's
/// snapshot is published after every event.
pub async fn run_light<D: DecisionCore>(
    name: String,
    mut core: D,
    mut mailbox: mpsc::Receiver<LightEvent>,
    status: watch::Sender<LightStatus>,
) {
    tracing::info!(light = %name, "event loop started");
    while let Some(event) = mailbox.recv().await {
        tracing::debug!(light = %name, %event, "handling event");
        match catch_unwind(AssertUnwindSafe(|| core.handle(event))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                tracing::error!(light = %name, %event, ?error, "event handling failed");
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("<non-string panic>");
                tracing::error!(light = %name, %event, panic = message, "event handler panicked");
            }
        }
        status.send_replace(core.status());
    }
    tracing::info!(light = %name, "event loop stopped");
}

/// Spawn the event loop of light `name`.
///
/// `build` receives the light's timer service, already wired to its mailbox,
/// and returns the decision core.
pub fn spawn_light<D, F>(name: impl Into<String>, capacity: usize, build: F) -> LightHandle
where
    D: DecisionCore + Send + 'static,
    F: FnOnce(TokioTimerService) -> D,
{
    let name = name.into();
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let core = build(TokioTimerService::new(&tx));
    let (status_tx, status_rx) = watch::channel(core.status());
    tokio::spawn(run_light(name.clone(), core, rx, status_tx));
    LightHandle::from_parts(name, tx, status_rx)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lumina_domain::error::LuminaError;
    use lumina_domain::input::{InputEvent, InputKind};
    use lumina_domain::schedule::ScheduleTrigger;
    use lumina_domain::error::TimeError;
    use lumina_domain::timer::TimerPurpose;

    use super::*;
    use crate::ports::TimerService;

    /// Counts events, fails on schedule triggers, panics on double press and
    /// arms a timer on long press.
    struct CountingCore {
        timers: TokioTimerService,
        handled: usize,
        fired: usize,
    }

    impl DecisionCore for CountingCore {
        fn handle(&mut self, event: LightEvent) -> Result<(), LuminaError> {
            self.handled += 1;
            match event {
                LightEvent::Schedule(_) => return Err(TimeError::Overflow.into()),
                LightEvent::Input(InputEvent {
                    kind: Some(InputKind::DoublePress),
                    ..
                }) => panic!("double press is not wired"),
                LightEvent::Input(InputEvent {
                    kind: Some(InputKind::LongPress),
                    ..
                }) => {
                    self.timers
                        .arm(TimerPurpose::AutoOff, Duration::from_secs(60));
                }
                LightEvent::Timer(_) => self.fired += 1,
                LightEvent::Input(_) => {}
            }
            Ok(())
        }

        fn status(&self) -> LightStatus {
            LightStatus::Remote {
                dimming_inputs: vec![
                    u8::try_from(self.handled).unwrap(),
                    u8::try_from(self.fired).unwrap(),
                ],
            }
        }
    }

    fn spawn() -> LightHandle {
        spawn_light("test", 4, |timers| CountingCore {
            timers,
            handled: 0,
            fired: 0,
        })
    }

    async fn wait_for(handle: &LightHandle, expected: LightStatus) {
        let mut rx = handle.subscribe();
        rx.wait_for(|status| *status == expected).await.unwrap();
    }

    #[tokio::test]
    async fn should_publish_initial_status() {
        let handle = spawn();
        assert_eq!(
            handle.status(),
            LightStatus::Remote {
                dimming_inputs: vec![0, 0]
            }
        );
        assert_eq!(handle.name(), "test");
    }

    #[tokio::test]
    async fn should_keep_handling_after_an_error() {
        let handle = spawn();
        let input = LightEvent::Input(InputEvent::new(0, InputKind::SinglePress));
        handle
            .mailbox()
            .send(LightEvent::Schedule(ScheduleTrigger::EveningOn))
            .await
            .unwrap();
        handle.mailbox().send(input).await.unwrap();
        wait_for(
            &handle,
            LightStatus::Remote {
                dimming_inputs: vec![2, 0],
            },
        )
        .await;
    }

    #[tokio::test]
    async fn should_keep_handling_after_a_panicking_handler() {
        let handle = spawn();
        handle
            .mailbox()
            .send(LightEvent::Input(InputEvent::new(0, InputKind::DoublePress)))
            .await
            .unwrap();
        handle
            .mailbox()
            .send(LightEvent::Input(InputEvent::new(0, InputKind::SinglePress)))
            .await
            .unwrap();
        wait_for(
            &handle,
            LightStatus::Remote {
                dimming_inputs: vec![2, 0],
            },
        )
        .await;
        assert!(!handle.mailbox().is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn should_feed_timer_fires_back_into_the_loop() {
        let handle = spawn();
        handle
            .mailbox()
            .send(LightEvent::Input(InputEvent::new(0, InputKind::LongPress)))
            .await
            .unwrap();
        wait_for(
            &handle,
            LightStatus::Remote {
                dimming_inputs: vec![2, 1],
            },
        )
        .await;
    }
}
