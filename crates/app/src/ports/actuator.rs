//! Actuation port — one-way commands to a controller channel.

use std::future::Future;
use std::sync::Arc;

use lumina_domain::command::{Brightness, DimDirection, LightCommand};
use lumina_domain::error::LuminaError;
use lumina_domain::target::LightTarget;

/// Sends a single command to one controller channel.
///
/// The result is only ever logged: callers never retry and never roll back
/// their own state on failure.
pub trait Actuator: Send + Sync {
    /// Send `command` to `target`.
    fn send(
        &self,
        target: &LightTarget,
        command: LightCommand,
    ) -> impl Future<Output = Result<(), LuminaError>> + Send;

    /// Convenience: set on/off, optionally at a brightness.
    fn set_light(
        &self,
        target: &LightTarget,
        on: bool,
        brightness: Option<Brightness>,
    ) -> impl Future<Output = Result<(), LuminaError>> + Send {
        self.send(target, LightCommand::Set { on, brightness })
    }

    /// Convenience: flip the output.
    fn toggle(&self, target: &LightTarget) -> impl Future<Output = Result<(), LuminaError>> + Send {
        self.send(target, LightCommand::Toggle)
    }

    /// Convenience: start dimming in `direction`.
    fn dim_step(
        &self,
        target: &LightTarget,
        direction: DimDirection,
    ) -> impl Future<Output = Result<(), LuminaError>> + Send {
        self.send(target, LightCommand::DimStep { direction })
    }

    /// Convenience: stop a running dim step.
    fn dim_stop(&self, target: &LightTarget) -> impl Future<Output = Result<(), LuminaError>> + Send {
        self.send(target, LightCommand::DimStop)
    }
}

impl<T: Actuator> Actuator for Arc<T> {
    fn send(
        &self,
        target: &LightTarget,
        command: LightCommand,
    ) -> impl Future<Output = Result<(), LuminaError>> + Send {
        (**self).send(target, command)
    }
}
