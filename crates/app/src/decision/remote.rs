//! Remote core — a multi-button remote driving independent channels.
//!
//! Each input is bound to its own target. Single press toggles, double press
//! switches on at full brightness, long press starts a dim step whose
//! direction alternates per input, and releasing the button stops it.

use std::collections::BTreeMap;

use lumina_domain::command::{Brightness, DimDirection, LightCommand};
use lumina_domain::error::{LuminaError, ValidationError};
use lumina_domain::input::{InputEvent, InputKind};
use lumina_domain::status::LightStatus;
use lumina_domain::target::LightTarget;

use super::{DecisionCore, LightEvent};
use crate::ports::CommandSink;

/// One input bound to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBinding {
    pub input: u8,
    pub target: LightTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub bindings: Vec<RemoteBinding>,
}

impl RemoteConfig {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank host or an input bound twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            binding.target.validate()?;
            if seen.contains(&binding.input) {
                return Err(ValidationError::DuplicateInput(binding.input));
            }
            seen.push(binding.input);
        }
        Ok(())
    }
}

/// Dim cycle of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DimCycle {
    dimming: bool,
    last: Option<DimDirection>,
}

impl DimCycle {
    /// Direction of the next long press: up first, then alternating.
    fn next_direction(&mut self) -> DimDirection {
        let direction = self.last.map_or(DimDirection::Up, DimDirection::flipped);
        self.last = Some(direction);
        self.dimming = true;
        direction
    }
}

struct Channel {
    target: LightTarget,
    cycle: DimCycle,
}

/// Decision core of a remote.
pub struct RemoteCore<S> {
    sink: S,
    channels: BTreeMap<u8, Channel>,
}

impl<S: CommandSink> RemoteCore<S> {
    /// Build a core from its bindings. Disabled targets (host `0.0.0.0`) are
    /// dropped here so their inputs are treated as unbound.
    pub fn new(config: RemoteConfig, sink: S) -> Self {
        let channels = config
            .bindings
            .into_iter()
            .filter(|binding| !binding.target.is_disabled())
            .map(|binding| {
                (
                    binding.input,
                    Channel {
                        target: binding.target,
                        cycle: DimCycle::default(),
                    },
                )
            })
            .collect();
        Self { sink, channels }
    }

    fn on_input(&mut self, input: InputEvent) {
        let Some(channel) = self.channels.get_mut(&input.input_id) else {
            tracing::debug!(input = input.input_id, "no target bound to input");
            return;
        };
        let Some(kind) = input.kind else {
            tracing::debug!(input = input.input_id, "input without recognized kind ignored");
            return;
        };
        let dimmable = channel.target.kind.is_dimmable();

        if kind == InputKind::ButtonUp && channel.cycle.dimming && dimmable {
            channel.cycle.dimming = false;
            tracing::info!(input = input.input_id, target = %channel.target, "dim stop");
            self.sink.dispatch(&channel.target, LightCommand::DimStop);
            return;
        }

        let command = match kind {
            InputKind::SinglePress => LightCommand::Toggle,
            InputKind::DoublePress => {
                LightCommand::on(dimmable.then_some(Brightness::FULL))
            }
            InputKind::LongPress if dimmable => LightCommand::DimStep {
                direction: channel.cycle.next_direction(),
            },
            _ => {
                tracing::debug!(%input, target = %channel.target, "unhandled input ignored");
                return;
            }
        };
        tracing::info!(input = input.input_id, target = %channel.target, %command, "remote command");
        self.sink.dispatch(&channel.target, command);
    }
}

impl<S: CommandSink> DecisionCore for RemoteCore<S> {
    fn handle(&mut self, event: LightEvent) -> Result<(), LuminaError> {
        match event {
            LightEvent::Input(input) => self.on_input(input),
            other => tracing::debug!(event = %other, "event ignored by remote"),
        }
        Ok(())
    }

    fn status(&self) -> LightStatus {
        LightStatus::Remote {
            dimming_inputs: self
                .channels
                .iter()
                .filter(|(_, channel)| channel.cycle.dimming)
                .map(|(input, _)| *input)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use lumina_domain::schedule::ScheduleTrigger;
    use lumina_domain::target::{ActuationKind, DISABLED_HOST};

    use super::*;
    use crate::decision::fakes::RecordingSink;

    fn binding(input: u8, host: &str, kind: ActuationKind) -> RemoteBinding {
        RemoteBinding {
            input,
            target: LightTarget::new(host, input, kind).unwrap(),
        }
    }

    fn remote(sink: &RecordingSink) -> RemoteCore<&RecordingSink> {
        let config = RemoteConfig {
            bindings: vec![
                binding(0, "store.local", ActuationKind::Dimmer),
                binding(1, "hall.local", ActuationKind::Switch),
                binding(2, DISABLED_HOST, ActuationKind::Dimmer),
            ],
        };
        RemoteCore::new(config, sink)
    }

    fn press(core: &mut RemoteCore<&RecordingSink>, input: u8, kind: InputKind) {
        core.handle(LightEvent::Input(InputEvent::new(input, kind)))
            .unwrap();
    }

    #[test]
    fn should_toggle_on_single_press() {
        let sink = RecordingSink::default();
        let mut core = remote(&sink);
        press(&mut core, 0, InputKind::SinglePress);
        press(&mut core, 1, InputKind::SinglePress);
        let sent = sink.sent.borrow();
        assert_eq!(sent[0].0.host, "store.local");
        assert_eq!(sent[0].1, LightCommand::Toggle);
        assert_eq!(sent[1].0.kind, ActuationKind::Switch);
        assert_eq!(sent[1].1, LightCommand::Toggle);
    }

    #[test]
    fn should_turn_on_full_on_double_press() {
        let sink = RecordingSink::default();
        let mut core = remote(&sink);
        press(&mut core, 0, InputKind::DoublePress);
        press(&mut core, 1, InputKind::DoublePress);
        assert_eq!(
            sink.commands(),
            vec![LightCommand::on(Some(Brightness::FULL)), LightCommand::on(None)]
        );
    }

    #[test]
    fn should_alternate_dim_direction_starting_up() {
        let sink = RecordingSink::default();
        let mut core = remote(&sink);
        press(&mut core, 0, InputKind::LongPress);
        press(&mut core, 0, InputKind::SinglePress);
        press(&mut core, 0, InputKind::DoublePress);
        press(&mut core, 0, InputKind::LongPress);
        press(&mut core, 0, InputKind::ButtonDown);
        press(&mut core, 0, InputKind::LongPress);
        let directions: Vec<_> = sink
            .commands()
            .into_iter()
            .filter_map(|command| match command {
                LightCommand::DimStep { direction } => Some(direction),
                _ => None,
            })
            .collect();
        assert_eq!(
            directions,
            vec![DimDirection::Up, DimDirection::Down, DimDirection::Up]
        );
    }

    #[test]
    fn should_stop_dimming_on_release() {
        let sink = RecordingSink::default();
        let mut core = remote(&sink);
        press(&mut core, 0, InputKind::LongPress);
        assert_eq!(
            core.status(),
            LightStatus::Remote {
                dimming_inputs: vec![0]
            }
        );
        press(&mut core, 0, InputKind::ButtonUp);
        press(&mut core, 0, InputKind::ButtonUp);
        assert_eq!(
            sink.commands(),
            vec![
                LightCommand::DimStep {
                    direction: DimDirection::Up
                },
                LightCommand::DimStop,
            ]
        );
        assert_eq!(
            core.status(),
            LightStatus::Remote {
                dimming_inputs: vec![]
            }
        );
    }

    #[test]
    fn should_ignore_long_press_on_switch() {
        let sink = RecordingSink::default();
        let mut core = remote(&sink);
        press(&mut core, 1, InputKind::LongPress);
        press(&mut core, 1, InputKind::ButtonUp);
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn should_ignore_disabled_and_unbound_inputs() {
        let sink = RecordingSink::default();
        let mut core = remote(&sink);
        press(&mut core, 2, InputKind::SinglePress);
        press(&mut core, 3, InputKind::SinglePress);
        core.handle(LightEvent::Schedule(ScheduleTrigger::EveningOn))
            .unwrap();
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn should_reject_input_bound_twice() {
        let config = RemoteConfig {
            bindings: vec![
                binding(0, "a.local", ActuationKind::Dimmer),
                binding(0, "b.local", ActuationKind::Dimmer),
            ],
        };
        assert_eq!(config.validate(), Err(ValidationError::DuplicateInput(0)));
    }
}
