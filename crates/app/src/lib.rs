//! # lumina-app
//!
//! Application layer — decision cores and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement (driven/outbound ports):
//!   - `Actuator` — sends one command to one controller channel
//!   - `ScheduleStore` — deletes/creates entries on the controller's scheduler
//! - Define the ports the decision cores consume synchronously:
//!   - `CommandSink` — fire-and-forget command dispatch
//!   - `TimerService` — arm/cancel one-shot timers
//!   - `Clock` — wall-clock time and local minute-of-day
//! - Implement the **decision cores** (indoor, outdoor, remote) as plain
//!   per-light state machines
//! - Provide **in-process infrastructure** that needs no IO: the per-light
//!   event loop, the light registry, the tokio timer service, the spawning
//!   dispatcher and the serialized schedule installer
//!
//! ## Dependency rule
//! Depends on `lumina-domain` only (plus `tokio` for channels, timers and
//! task spawning). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod decision;
pub mod dispatch;
pub mod ports;
pub mod registry;
pub mod runtime;
pub mod schedule_installer;
pub mod timer_service;
pub mod timer_slot;
