//! Spawning dispatcher — the [`CommandSink`] used by running lights.
//!
//! Each command is sent on its own task. The outcome is only logged: the
//! light has already moved on by the time the controller answers.

use std::sync::Arc;

use lumina_domain::command::LightCommand;
use lumina_domain::target::LightTarget;

use crate::ports::{Actuator, CommandSink};

/// Fire-and-forget bridge from a decision core to an [`Actuator`].
pub struct SpawningDispatcher<A> {
    actuator: Arc<A>,
    light: String,
}

impl<A> SpawningDispatcher<A> {
    pub fn new(actuator: Arc<A>, light: impl Into<String>) -> Self {
        Self {
            actuator,
            light: light.into(),
        }
    }
}

impl<A> Clone for SpawningDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            actuator: Arc::clone(&self.actuator),
            light: self.light.clone(),
        }
    }
}

impl<A: Actuator + 'static> CommandSink for SpawningDispatcher<A> {
    fn dispatch(&self, target: &LightTarget, command: LightCommand) {
        if target.is_disabled() {
            tracing::debug!(light = %self.light, %target, %command, "target disabled, command dropped");
            return;
        }
        if let Err(error) = command.validate_for(target.kind) {
            tracing::warn!(light = %self.light, %target, %error, "command rejected");
            return;
        }

        let actuator = Arc::clone(&self.actuator);
        let light = self.light.clone();
        let target = target.clone();
        tokio::spawn(async move {
            match actuator.send(&target, command).await {
                Ok(()) => tracing::info!(light = %light, %target, %command, "command delivered"),
                Err(error) => {
                    tracing::warn!(light = %light, %target, %command, ?error, "command failed");
                }
            }
        });
    }
}
