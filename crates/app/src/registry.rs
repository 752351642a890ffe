//! Light registry — routes events to running lights by name.

use std::collections::BTreeMap;

use lumina_domain::error::{DeliveryError, LuminaError, NotFoundError, ValidationError};
use lumina_domain::status::LightStatus;

use crate::decision::LightEvent;
use crate::runtime::LightHandle;

/// Name and latest snapshot of one light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightSummary {
    pub name: String,
    pub status: LightStatus,
}

/// All running lights, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct LightRegistry {
    lights: BTreeMap<String, LightHandle>,
}

impl LightRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a running light.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateName`] if a light with the same
    /// name is already registered.
    pub fn register(&mut self, handle: LightHandle) -> Result<(), ValidationError> {
        if self.lights.contains_key(handle.name()) {
            return Err(ValidationError::DuplicateName(handle.name().to_string()));
        }
        self.lights.insert(handle.name().to_string(), handle);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<&LightHandle, NotFoundError> {
        self.lights.get(name).ok_or_else(|| NotFoundError {
            entity: "Light",
            id: name.to_string(),
        })
    }

    /// Queue `event` for light `name`, waiting while its mailbox is full.
    ///
    /// # Errors
    ///
    /// Returns [`LuminaError::NotFound`] for an unknown light and
    /// [`LuminaError::Delivery`] when its event loop has stopped.
    pub async fn deliver(&self, name: &str, event: LightEvent) -> Result<(), LuminaError> {
        let handle = self.get(name)?;
        handle.mailbox().send(event).await.map_err(|_| {
            LuminaError::from(DeliveryError::MailboxClosed {
                light: name.to_string(),
            })
        })?;
        tracing::debug!(light = %name, %event, "event queued");
        Ok(())
    }

    /// Latest snapshot of light `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LuminaError::NotFound`] for an unknown light.
    pub fn status(&self, name: &str) -> Result<LightStatus, LuminaError> {
        Ok(self.get(name)?.status())
    }

    /// Every light with its latest snapshot, ordered by name.
    #[must_use]
    pub fn summaries(&self) -> Vec<LightSummary> {
        self.lights
            .values()
            .map(|handle| LightSummary {
                name: handle.name().to_string(),
                status: handle.status(),
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use lumina_domain::command::LightCommand;
    use lumina_domain::input::{InputEvent, InputKind};
    use lumina_domain::target::{ActuationKind, LightTarget};

    use super::*;
    use crate::decision::{RemoteBinding, RemoteConfig, RemoteCore};
    use crate::ports::CommandSink;
    use crate::runtime::spawn_light;

    struct NullSink;

    impl CommandSink for NullSink {
        fn dispatch(&self, _target: &LightTarget, _command: LightCommand) {}
    }

    fn remote(name: &str) -> LightHandle {
        let config = RemoteConfig {
            bindings: vec![RemoteBinding {
                input: 0,
                target: LightTarget::new("store.local", 0, ActuationKind::Dimmer).unwrap(),
            }],
        };
        spawn_light(name, 4, |_timers| RemoteCore::new(config, NullSink))
    }

    #[tokio::test]
    async fn should_reject_duplicate_names() {
        let mut registry = LightRegistry::new();
        registry.register(remote("store")).unwrap();
        let result = registry.register(remote("store"));
        assert_eq!(result, Err(ValidationError::DuplicateName("store".into())));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn should_fail_delivery_to_unknown_light() {
        let registry = LightRegistry::new();
        let event = LightEvent::Input(InputEvent::new(0, InputKind::SinglePress));
        let result = registry.deliver("nope", event).await;
        assert!(matches!(result, Err(LuminaError::NotFound(_))));
        assert!(matches!(registry.status("nope"), Err(LuminaError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_deliver_and_publish_status() {
        let mut registry = LightRegistry::new();
        let handle = remote("store");
        let mut status = handle.subscribe();
        registry.register(handle).unwrap();

        let event = LightEvent::Input(InputEvent::new(0, InputKind::LongPress));
        registry.deliver("store", event).await.unwrap();
        status.changed().await.unwrap();

        assert_eq!(
            registry.status("store").unwrap(),
            LightStatus::Remote {
                dimming_inputs: vec![0]
            }
        );
        let summaries = registry.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "store");
    }

    #[tokio::test]
    async fn should_report_closed_mailbox() {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        drop(rx);
        let (_status_tx, status_rx) =
            tokio::sync::watch::channel(LightStatus::Remote {
                dimming_inputs: vec![],
            });
        let mut registry = LightRegistry::new();
        registry
            .register(LightHandle::from_parts("dead", tx, status_rx))
            .unwrap();
        let event = LightEvent::Input(InputEvent::new(0, InputKind::SinglePress));
        let result = registry.deliver("dead", event).await;
        assert!(matches!(result, Err(LuminaError::Delivery(_))));
    }
}
