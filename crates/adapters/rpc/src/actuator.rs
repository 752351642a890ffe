//! [`Actuator`] over the controller's per-channel RPC methods.

use lumina_app::ports::Actuator;
use lumina_domain::command::{DimDirection, LightCommand};
use lumina_domain::error::{LuminaError, ValidationError};
use lumina_domain::target::{ActuationKind, LightTarget};

use crate::client::RpcClient;
use crate::error::RpcError;

/// A single RPC call: method name plus flat parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub method: &'static str,
    pub params: Vec<(&'static str, String)>,
}

/// Translate `command` for `target` into an RPC call.
///
/// Dimmer channels use the `Light.*` methods and switch channels the
/// `Switch.*` ones. Brightness is only sent to dimmers.
///
/// # Errors
///
/// Returns [`ValidationError::UnsupportedCommand`] for a dim command aimed at
/// a switch.
pub fn command_request(
    target: &LightTarget,
    command: LightCommand,
) -> Result<RpcRequest, ValidationError> {
    command.validate_for(target.kind)?;
    let id = ("id", target.channel.to_string());
    let request = match (target.kind, command) {
        (ActuationKind::Dimmer, LightCommand::Set { on, brightness }) => {
            let mut params = vec![id, ("on", on.to_string())];
            if let Some(brightness) = brightness {
                params.push(("brightness", brightness.get().to_string()));
            }
            RpcRequest {
                method: "Light.Set",
                params,
            }
        }
        (ActuationKind::Switch, LightCommand::Set { on, .. }) => RpcRequest {
            method: "Switch.Set",
            params: vec![id, ("on", on.to_string())],
        },
        (ActuationKind::Dimmer, LightCommand::Toggle) => RpcRequest {
            method: "Light.Toggle",
            params: vec![id],
        },
        (ActuationKind::Switch, LightCommand::Toggle) => RpcRequest {
            method: "Switch.Toggle",
            params: vec![id],
        },
        (_, LightCommand::DimStep { direction }) => RpcRequest {
            method: match direction {
                DimDirection::Up => "Light.DimUp",
                DimDirection::Down => "Light.DimDown",
            },
            params: vec![id],
        },
        (_, LightCommand::DimStop) => RpcRequest {
            method: "Light.DimStop",
            params: vec![id],
        },
    };
    Ok(request)
}

/// Sends light commands to controllers.
#[derive(Debug, Clone)]
pub struct RpcActuator {
    client: RpcClient,
}

impl RpcActuator {
    #[must_use]
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

impl Actuator for RpcActuator {
    async fn send(&self, target: &LightTarget, command: LightCommand) -> Result<(), LuminaError> {
        let request = command_request(target, command)?;
        self.client
            .get(&target.host, request.method, &request.params)
            .await
            .map_err(RpcError::into_domain)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lumina_domain::command::Brightness;

    use super::*;

    fn dimmer() -> LightTarget {
        LightTarget::new("porch.local", 1, ActuationKind::Dimmer).unwrap()
    }

    fn switch() -> LightTarget {
        LightTarget::new("hall.local", 0, ActuationKind::Switch).unwrap()
    }

    #[test]
    fn should_set_dimmer_with_brightness() {
        let request = command_request(&dimmer(), LightCommand::on(Some(Brightness::FULL))).unwrap();
        assert_eq!(request.method, "Light.Set");
        assert_eq!(
            request.params,
            vec![
                ("id", "1".to_string()),
                ("on", "true".to_string()),
                ("brightness", "100".to_string()),
            ]
        );
    }

    #[test]
    fn should_turn_off_dimmer_without_brightness() {
        let request = command_request(&dimmer(), LightCommand::off()).unwrap();
        assert_eq!(
            request.params,
            vec![("id", "1".to_string()), ("on", "false".to_string())]
        );
    }

    #[test]
    fn should_use_switch_methods_for_switch_target() {
        let set = command_request(&switch(), LightCommand::on(Some(Brightness::FULL))).unwrap();
        assert_eq!(set.method, "Switch.Set");
        assert_eq!(
            set.params,
            vec![("id", "0".to_string()), ("on", "true".to_string())]
        );
        let toggle = command_request(&switch(), LightCommand::Toggle).unwrap();
        assert_eq!(toggle.method, "Switch.Toggle");
    }

    #[test]
    fn should_map_dim_commands() {
        let up = LightCommand::DimStep {
            direction: DimDirection::Up,
        };
        let down = LightCommand::DimStep {
            direction: DimDirection::Down,
        };
        assert_eq!(command_request(&dimmer(), up).unwrap().method, "Light.DimUp");
        assert_eq!(command_request(&dimmer(), down).unwrap().method, "Light.DimDown");
        assert_eq!(
            command_request(&dimmer(), LightCommand::DimStop).unwrap().method,
            "Light.DimStop"
        );
        assert_eq!(
            command_request(&dimmer(), LightCommand::Toggle).unwrap().method,
            "Light.Toggle"
        );
    }

    #[test]
    fn should_reject_dim_command_for_switch() {
        let result = command_request(&switch(), LightCommand::DimStop);
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedCommand { .. })
        ));
    }
}
