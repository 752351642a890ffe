//! # lumina-domain
//!
//! Pure domain model for the lumina lighting controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, minute-of-day
//! - Define **Light targets** (one controller channel, dimmable or switch-only)
//! - Define **Commands** (`set`, `toggle`, `dim_step`, `dim_stop`)
//! - Define **Input events** (button presses and occupancy transitions)
//! - Define the decision state: **Override mode** and **Sensor gate**
//! - Define **Schedules** (triggers, time specs, the outdoor five-slot plan)
//! - Define **Timers** identity (purpose + handle) and status snapshots
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod input;
pub mod override_mode;
pub mod schedule;
pub mod sensor_gate;
pub mod status;
pub mod target;
pub mod timer;
