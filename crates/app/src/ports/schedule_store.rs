//! Schedule store port — the controller's own calendar/cron subsystem.

use std::future::Future;
use std::sync::Arc;

use lumina_domain::error::LuminaError;
use lumina_domain::schedule::ScheduleEntry;

/// Result of deleting a schedule slot.
///
/// A slot that did not exist is a normal outcome, not an error: it is what
/// every first installation sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Writes schedule entries that call back into a light when they fire.
pub trait ScheduleStore {
    /// Delete slot `slot`.
    fn delete(&self, slot: u32) -> impl Future<Output = Result<DeleteOutcome, LuminaError>> + Send;

    /// Create `entry` for light `light`, returning the id the store assigned.
    fn create(
        &self,
        light: &str,
        entry: &ScheduleEntry,
    ) -> impl Future<Output = Result<u32, LuminaError>> + Send;
}

impl<T: ScheduleStore> ScheduleStore for Arc<T> {
    fn delete(&self, slot: u32) -> impl Future<Output = Result<DeleteOutcome, LuminaError>> + Send {
        (**self).delete(slot)
    }

    fn create(
        &self,
        light: &str,
        entry: &ScheduleEntry,
    ) -> impl Future<Output = Result<u32, LuminaError>> + Send {
        (**self).create(light, entry)
    }
}
