//! Decision cores — per-light state machines.
//!
//! A core consumes one [`LightEvent`] at a time through
//! [`DecisionCore::handle`], mutates its own state and reaches the outside
//! world only through the synchronous ports ([`CommandSink`],
//! [`TimerService`], [`Clock`]). Handlers never await: actuation is
//! dispatched fire-and-forget and timer expiry comes back as another event.
//!
//! [`CommandSink`]: crate::ports::CommandSink
//! [`TimerService`]: crate::ports::TimerService
//! [`Clock`]: crate::ports::Clock

pub mod indoor;
pub mod outdoor;
pub mod remote;

use std::fmt;

use lumina_domain::error::LuminaError;
use lumina_domain::input::InputEvent;
use lumina_domain::schedule::ScheduleTrigger;
use lumina_domain::status::LightStatus;
use lumina_domain::timer::TimerFired;

pub use indoor::{IndoorConfig, IndoorCore};
pub use outdoor::{OccupancyPolicy, OutdoorConfig, OutdoorCore};
pub use remote::{RemoteBinding, RemoteConfig, RemoteCore};

use crate::ports::{Clock, CommandSink, TimerService};

/// Everything a light can be told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    /// A button press or occupancy transition.
    Input(InputEvent),
    /// A schedule entry on the controller fired.
    Schedule(ScheduleTrigger),
    /// One of the light's own timers elapsed.
    Timer(TimerFired),
}

impl fmt::Display for LightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(input) => write!(f, "{input}"),
            Self::Schedule(trigger) => write!(f, "schedule {trigger}"),
            Self::Timer(fired) => write!(f, "timer {} ({})", fired.handle, fired.purpose),
        }
    }
}

/// A per-light state machine.
pub trait DecisionCore {
    /// Handle one event to completion.
    ///
    /// # Errors
    ///
    /// Returns an error when the event could not be applied. The core's
    /// state is left as it was before the failing step; the caller logs the
    /// error and keeps delivering events.
    fn handle(&mut self, event: LightEvent) -> Result<(), LuminaError>;

    /// Read-only snapshot of the current decision state.
    fn status(&self) -> LightStatus;
}

/// One of the three light variants, chosen at configuration time.
pub enum LightCore<S, T, C> {
    Indoor(IndoorCore<S, T, C>),
    Outdoor(OutdoorCore<S, T, C>),
    Remote(RemoteCore<S>),
}

impl<S, T, C> DecisionCore for LightCore<S, T, C>
where
    S: CommandSink,
    T: TimerService,
    C: Clock,
{
    fn handle(&mut self, event: LightEvent) -> Result<(), LuminaError> {
        match self {
            Self::Indoor(core) => core.handle(event),
            Self::Outdoor(core) => core.handle(event),
            Self::Remote(core) => core.handle(event),
        }
    }

    fn status(&self) -> LightStatus {
        match self {
            Self::Indoor(core) => core.status(),
            Self::Outdoor(core) => core.status(),
            Self::Remote(core) => core.status(),
        }
    }
}
