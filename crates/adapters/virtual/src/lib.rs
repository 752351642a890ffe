//! # lumina-adapter-virtual
//!
//! In-memory stand-ins for the controllers, used for dry runs and tests.
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`VirtualActuator`] | `Actuator` | Records every command and tracks each channel's on/off, brightness and dimming |
//! | [`VirtualScheduleStore`] | `ScheduleStore` | Keeps schedule entries in a map and records every call |
//!
//! ## Dependency rule
//!
//! Depends on `lumina-app` (port traits) and `lumina-domain` only.

mod actuator;
mod channel;
mod schedule_store;

pub use actuator::VirtualActuator;
pub use channel::ChannelState;
pub use schedule_store::{StoreCall, VirtualScheduleStore};
