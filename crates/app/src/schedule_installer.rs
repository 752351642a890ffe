//! Schedule installer — rewrites an outdoor light's schedule slots.
//!
//! The controller only accepts a few RPC calls in flight, so the slots are
//! rewritten strictly one after the other: delete, settle, create, then the
//! next slot. A slot that did not exist counts as deleted. Any other failure
//! is logged and the chain moves on.

use std::time::Duration;

use lumina_domain::schedule::ScheduleEntry;

use crate::ports::{DeleteOutcome, ScheduleStore};

/// Default pause between a delete acknowledgment and the following create.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

/// Outcome of one installation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// `(slot, id assigned by the store)` of every created entry.
    pub installed: Vec<(u32, u32)>,
    /// Slots whose create failed.
    pub failed: Vec<u32>,
}

impl InstallReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Serialized delete/create pipeline over a [`ScheduleStore`].
pub struct ScheduleInstaller<S> {
    store: S,
    settle: Duration,
}

impl<S: ScheduleStore> ScheduleInstaller<S> {
    pub fn new(store: S, settle: Duration) -> Self {
        Self { store, settle }
    }

    /// Rewrite every entry of light `light`, in order.
    #[tracing::instrument(skip(self, entries), fields(entries = entries.len()))]
    pub async fn install(&self, light: &str, entries: &[ScheduleEntry]) -> InstallReport {
        let mut report = InstallReport::default();
        for entry in entries {
            match self.store.delete(entry.slot).await {
                Ok(DeleteOutcome::Deleted) => {
                    tracing::debug!(slot = entry.slot, "previous schedule deleted");
                }
                Ok(DeleteOutcome::NotFound) => {
                    tracing::debug!(slot = entry.slot, "no previous schedule");
                }
                Err(error) => {
                    tracing::warn!(slot = entry.slot, ?error, "could not delete schedule");
                }
            }

            tokio::time::sleep(self.settle).await;

            match self.store.create(light, entry).await {
                Ok(id) => {
                    tracing::info!(
                        slot = entry.slot,
                        id,
                        timespec = %entry.timespec,
                        trigger = %entry.trigger,
                        description = %entry.description,
                        "schedule created"
                    );
                    report.installed.push((entry.slot, id));
                }
                Err(error) => {
                    tracing::warn!(slot = entry.slot, ?error, "could not create schedule");
                    report.failed.push(entry.slot);
                }
            }
        }
        tracing::info!(
            installed = report.installed.len(),
            failed = report.failed.len(),
            "schedule setup complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use lumina_domain::error::{LuminaError, ValidationError};
    use lumina_domain::schedule::SchedulePlan;
    use tokio::time::Instant;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Delete(u32),
        Create(u32),
    }

    /// Records calls with their (paused) time and fails where told to.
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<(Call, Instant)>>,
        missing: Vec<u32>,
        broken_delete: Vec<u32>,
        broken_create: Vec<u32>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<Call> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(call, _)| call.clone())
                .collect()
        }
    }

    fn broken() -> LuminaError {
        LuminaError::Schedule(Box::new(ValidationError::EmptyHost))
    }

    impl ScheduleStore for RecordingStore {
        async fn delete(&self, slot: u32) -> Result<DeleteOutcome, LuminaError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.calls
                .lock()
                .unwrap()
                .push((Call::Delete(slot), Instant::now()));
            if self.broken_delete.contains(&slot) {
                return Err(broken());
            }
            if self.missing.contains(&slot) {
                return Ok(DeleteOutcome::NotFound);
            }
            Ok(DeleteOutcome::Deleted)
        }

        async fn create(&self, _light: &str, entry: &ScheduleEntry) -> Result<u32, LuminaError> {
            self.calls
                .lock()
                .unwrap()
                .push((Call::Create(entry.slot), Instant::now()));
            if self.broken_create.contains(&entry.slot) {
                return Err(broken());
            }
            Ok(entry.slot + 100)
        }
    }

    fn entries() -> Vec<ScheduleEntry> {
        SchedulePlan::default().entries()
    }

    #[tokio::test(start_paused = true)]
    async fn should_install_five_slots_in_order() {
        let installer = ScheduleInstaller::new(RecordingStore::default(), DEFAULT_SETTLE);
        let report = installer.install("porch", &entries()).await;
        let expected: Vec<Call> = (1..=5)
            .flat_map(|slot| [Call::Delete(slot), Call::Create(slot)])
            .collect();
        assert_eq!(installer.store.calls(), expected);
        assert!(report.is_complete());
        assert_eq!(report.installed[0], (1, 101));
        assert_eq!(report.installed.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_settle_delay_between_delete_and_create() {
        let installer = ScheduleInstaller::new(RecordingStore::default(), DEFAULT_SETTLE);
        installer.install("porch", &entries()).await;
        let calls = installer.store.calls.lock().unwrap();
        for pair in calls.chunks(2) {
            let deleted_at = pair[0].1;
            let created_at = pair[1].1;
            assert!(created_at - deleted_at >= DEFAULT_SETTLE);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_treat_missing_slot_as_deleted() {
        let store = RecordingStore {
            missing: vec![1, 2, 3, 4, 5],
            ..RecordingStore::default()
        };
        let installer = ScheduleInstaller::new(store, DEFAULT_SETTLE);
        let report = installer.install("porch", &entries()).await;
        assert!(report.is_complete());
        assert_eq!(installer.store.calls().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn should_continue_after_failures() {
        let store = RecordingStore {
            broken_delete: vec![2],
            broken_create: vec![3],
            ..RecordingStore::default()
        };
        let installer = ScheduleInstaller::new(store, DEFAULT_SETTLE);
        let report = installer.install("porch", &entries()).await;
        assert_eq!(report.failed, vec![3]);
        assert_eq!(
            report.installed.iter().map(|(slot, _)| *slot).collect::<Vec<_>>(),
            vec![1, 2, 4, 5]
        );
        assert_eq!(installer.store.calls().len(), 10);
    }
}
