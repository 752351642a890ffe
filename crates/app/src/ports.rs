//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the decision cores and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! `Actuator` and `ScheduleStore` are async and implemented by adapters.
//! `CommandSink`, `TimerService` and `Clock` are synchronous: the decision
//! cores call them from inside an event handler, which must never await.

pub mod actuator;
pub mod clock;
pub mod command_sink;
pub mod schedule_store;
pub mod timer;

pub use actuator::Actuator;
pub use clock::{Clock, SystemClock};
pub use command_sink::CommandSink;
pub use schedule_store::{DeleteOutcome, ScheduleStore};
pub use timer::TimerService;
