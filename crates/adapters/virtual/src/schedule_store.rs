//! Virtual schedule store — an in-memory scheduler.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lumina_app::ports::{DeleteOutcome, ScheduleStore};
use lumina_domain::error::LuminaError;
use lumina_domain::schedule::ScheduleEntry;

/// A call received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Delete(u32),
    Create(u32),
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<u32, (String, ScheduleEntry)>,
    calls: Vec<StoreCall>,
}

/// A [`ScheduleStore`] keeping entries in memory.
#[derive(Debug, Default)]
pub struct VirtualScheduleStore {
    inner: Mutex<Inner>,
}

impl VirtualScheduleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installed entries with the light they belong to, by slot.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, ScheduleEntry)> {
        self.lock().entries.values().cloned().collect()
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScheduleStore for VirtualScheduleStore {
    async fn delete(&self, slot: u32) -> Result<DeleteOutcome, LuminaError> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Delete(slot));
        Ok(match inner.entries.remove(&slot) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::NotFound,
        })
    }

    async fn create(&self, light: &str, entry: &ScheduleEntry) -> Result<u32, LuminaError> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Create(entry.slot));
        inner
            .entries
            .insert(entry.slot, (light.to_string(), entry.clone()));
        tracing::info!(light, slot = entry.slot, timespec = %entry.timespec, "virtual schedule created");
        Ok(entry.slot)
    }
}
