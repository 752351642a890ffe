//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`LuminaError`] via `#[from]` (or an adapter-level `into_domain`).

/// Top-level error for everything that crosses a port boundary.
#[derive(Debug, thiserror::Error)]
pub enum LuminaError {
    /// A value failed domain validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced light, input or schedule does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A deadline or duration could not be represented.
    #[error("time computation failed")]
    Time(#[from] TimeError),

    /// An event could not be handed to a light's event loop.
    #[error("event delivery failed")]
    Delivery(#[from] DeliveryError),

    /// The controller rejected or never answered an actuation command.
    #[error("actuation failed")]
    Actuation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The schedule store failed for a reason other than not-found.
    #[error("schedule store error")]
    Schedule(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A light needs a non-empty name.
    #[error("light name must not be empty")]
    EmptyName,

    /// Light names appear in callback URLs.
    #[error("light name {0:?} may only contain ASCII letters, digits, '-' and '_'")]
    InvalidName(String),

    /// A light target needs a non-empty host.
    #[error("controller host must not be empty")]
    EmptyHost,

    /// Brightness is a percentage.
    #[error("brightness {0} is out of range 0..=100")]
    BrightnessOutOfRange(u8),

    /// Minute-of-day must be below 1440.
    #[error("minute of day {0} is out of range 0..1440")]
    MinuteOutOfRange(u16),

    /// A wall-clock time could not be parsed.
    #[error("invalid wall-clock time {0:?}, expected HH:MM")]
    InvalidTime(String),

    /// A schedule trigger tag is not one of the known five.
    #[error("unknown schedule trigger {0:?}")]
    UnknownTrigger(String),

    /// The command needs a dimmable target.
    #[error("command {command} is not supported by a switch target")]
    UnsupportedCommand {
        /// Display form of the rejected command.
        command: String,
    },

    /// Two roles of the same light were bound to one input.
    #[error("input {0} is bound more than once")]
    DuplicateInput(u8),

    /// The schedule slots of a plan run past the last slot id.
    #[error("schedule slots starting at {0} run past the last slot id")]
    SlotOutOfRange(u32),

    /// Two lights share a name.
    #[error("light {0:?} is configured more than once")]
    DuplicateName(String),
}

/// A lookup that returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of thing that was looked up (e.g. `"Light"`).
    pub entity: &'static str,
    /// The identifier that was requested.
    pub id: String,
}

/// Time arithmetic failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// The duration does not fit into a calendar delta.
    #[error("duration of {0:?} is out of range")]
    DurationOutOfRange(std::time::Duration),

    /// Adding the delta overflowed the representable date range.
    #[error("deadline overflowed the calendar range")]
    Overflow,
}

/// Mailbox delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The light's event loop has stopped.
    #[error("event loop of light {light} is closed")]
    MailboxClosed {
        /// Name of the light whose loop is gone.
        light: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_lumina_error() {
        let err: LuminaError = ValidationError::EmptyHost.into();
        assert!(matches!(err, LuminaError::Validation(ValidationError::EmptyHost)));
    }

    #[test]
    fn should_display_not_found_error_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Light",
            id: "garage".to_string(),
        };
        assert_eq!(err.to_string(), "Light not found: garage");
    }

    #[test]
    fn should_display_unsupported_command() {
        let err = ValidationError::UnsupportedCommand {
            command: "dim_step(up)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "command dim_step(up) is not supported by a switch target"
        );
    }

    #[test]
    fn should_keep_source_of_actuation_error() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = LuminaError::Actuation(Box::new(io));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("timed out"));
    }

    #[test]
    fn should_display_mailbox_closed() {
        let err = DeliveryError::MailboxClosed {
            light: "porch".to_string(),
        };
        assert_eq!(err.to_string(), "event loop of light porch is closed");
    }
}
