//! Virtual channel — responds to set, toggle and dim commands.

use lumina_domain::command::{Brightness, DimDirection, LightCommand};

/// Simulated state of one controller channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelState {
    pub on: bool,
    pub brightness: Brightness,
    /// Direction of a running dim step.
    pub dimming: Option<DimDirection>,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: Brightness::FULL,
            dimming: None,
        }
    }
}

impl ChannelState {
    /// Apply a command the way a controller would.
    pub fn apply(&mut self, command: LightCommand) {
        match command {
            LightCommand::Set { on, brightness } => {
                self.on = on;
                if let Some(brightness) = brightness {
                    self.brightness = brightness;
                }
            }
            LightCommand::Toggle => self.on = !self.on,
            LightCommand::DimStep { direction } => {
                self.on = true;
                self.dimming = Some(direction);
            }
            LightCommand::DimStop => self.dimming = None,
        }
    }
}
