//! Command sink port — fire-and-forget dispatch from inside a handler.

use lumina_domain::command::LightCommand;
use lumina_domain::target::LightTarget;

/// Hands a command off for delivery without waiting for its outcome.
///
/// Implementations must return immediately; the outcome of the command is
/// observed (and logged) elsewhere.
pub trait CommandSink {
    fn dispatch(&self, target: &LightTarget, command: LightCommand);
}

impl<S: CommandSink + ?Sized> CommandSink for &S {
    fn dispatch(&self, target: &LightTarget, command: LightCommand) {
        (**self).dispatch(target, command);
    }
}
