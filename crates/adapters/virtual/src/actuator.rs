//! Virtual actuator — records commands instead of sending them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lumina_app::ports::Actuator;
use lumina_domain::command::LightCommand;
use lumina_domain::error::LuminaError;
use lumina_domain::target::LightTarget;

use crate::channel::ChannelState;

#[derive(Debug, Default)]
struct Inner {
    channels: HashMap<(String, u8), ChannelState>,
    history: Vec<(LightTarget, LightCommand)>,
}

/// An [`Actuator`] backed by in-memory channel state.
#[derive(Debug, Default)]
pub struct VirtualActuator {
    inner: Mutex<Inner>,
}

impl VirtualActuator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `target`'s channel; untouched channels are off.
    #[must_use]
    pub fn state(&self, target: &LightTarget) -> ChannelState {
        self.lock()
            .channels
            .get(&(target.host.clone(), target.channel))
            .copied()
            .unwrap_or_default()
    }

    /// Every command received so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<(LightTarget, LightCommand)> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Actuator for VirtualActuator {
    async fn send(&self, target: &LightTarget, command: LightCommand) -> Result<(), LuminaError> {
        command.validate_for(target.kind)?;
        let mut inner = self.lock();
        inner
            .channels
            .entry((target.host.clone(), target.channel))
            .or_default()
            .apply(command);
        inner.history.push((target.clone(), command));
        tracing::info!(%target, %command, "virtual channel updated");
        Ok(())
    }
}
