//! Light target — one channel of one networked controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Host value meaning "no controller configured for this slot".
pub const DISABLED_HOST: &str = "0.0.0.0";

/// How a channel can be driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuationKind {
    /// Dimmer output: on/off, brightness and dim stepping.
    #[default]
    Dimmer,
    /// Relay output: on/off only.
    Switch,
}

impl ActuationKind {
    #[must_use]
    pub fn is_dimmable(self) -> bool {
        matches!(self, Self::Dimmer)
    }
}

impl fmt::Display for ActuationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimmer => f.write_str("dimmer"),
            Self::Switch => f.write_str("switch"),
        }
    }
}

/// Identifies one controller channel. Immutable once configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightTarget {
    /// Hostname or IP address of the controller.
    pub host: String,
    /// Output channel index on that controller.
    #[serde(default)]
    pub channel: u8,
    #[serde(default)]
    pub kind: ActuationKind,
}

impl LightTarget {
    /// Create a validated target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHost`] if `host` is blank.
    pub fn new(
        host: impl Into<String>,
        channel: u8,
        kind: ActuationKind,
    ) -> Result<Self, ValidationError> {
        let target = Self {
            host: host.into(),
            channel,
            kind,
        };
        target.validate()?;
        Ok(target)
    }

    /// Check invariants on a deserialized target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHost`] if `host` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(())
    }

    /// A placeholder target that must never be actuated.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.host == DISABLED_HOST
    }
}

impl fmt::Display for LightTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} ({})", self.host, self.channel, self.kind)
    }
}
