//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `luminad.toml` in the working directory (`LUMINA_CONFIG`
//! selects another path). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use lumina_adapter_rpc::RpcConfig;
use lumina_app::decision::{
    IndoorConfig, OccupancyPolicy, OutdoorConfig, RemoteBinding, RemoteConfig,
};
use lumina_app::runtime::DEFAULT_MAILBOX_CAPACITY;
use lumina_domain::command::Brightness;
use lumina_domain::error::ValidationError;
use lumina_domain::schedule::SchedulePlan;
use lumina_domain::target::{ActuationKind, LightTarget};
use lumina_domain::time::MinuteOfDay;
use serde::Deserialize;

const DEFAULT_PATH: &str = "luminad.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Controller access settings.
    pub controller: ControllerConfig,
    /// Configured lights.
    pub lights: Vec<LightConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Base URL under which the controllers reach this server.
    pub callback_base_url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// How lumina talks to the controllers.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Use in-memory controllers instead of the network.
    pub dry_run: bool,
    /// Whole-request timeout, in milliseconds.
    pub request_timeout_ms: u64,
    /// TCP connect timeout, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Pause between a schedule delete and the following create, in milliseconds.
    pub schedule_settle_ms: u64,
    /// Events buffered per light before senders wait.
    pub mailbox_capacity: usize,
}

/// One `[[lights]]` entry.
#[derive(Debug, Deserialize)]
pub struct LightConfig {
    pub name: String,
    /// Controller host; unused by remotes, which bind a target per input.
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub channel: u8,
    #[serde(default)]
    pub kind: ActuationKind,
    pub variant: VariantConfig,
}

/// Variant-specific settings, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VariantConfig {
    Indoor(IndoorSection),
    Outdoor(OutdoorSection),
    Remote(RemoteSection),
}

/// `type = "indoor"`
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IndoorSection {
    pub sensor_input: u8,
    pub on_input: u8,
    pub off_input: u8,
    pub auto_off_secs: u64,
    pub suppression_secs: u64,
    pub brightness: Option<Brightness>,
}

/// `type = "outdoor"`
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutdoorSection {
    pub motion_input: u8,
    pub motion_on_secs: u64,
    pub brightness: Brightness,
    pub morning_grace_minutes: u16,
    pub occupancy: OccupancySection,
    pub schedule: SchedulePlan,
}

/// When motion is honored, tagged by `policy`. Defaults to the night window.
#[derive(Debug, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum OccupancySection {
    ScheduleWindow,
    FixedWindow {
        after: MinuteOfDay,
        before: MinuteOfDay,
    },
}

/// `type = "remote"`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    pub bindings: Vec<BindingSection>,
}

/// One remote input bound to one controller channel.
#[derive(Debug, Deserialize)]
pub struct BindingSection {
    pub input: u8,
    pub host: String,
    #[serde(default)]
    pub channel: u8,
    #[serde(default)]
    pub kind: ActuationKind,
}

/// A light's validated settings, ready to build a decision core from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightSpec {
    Indoor {
        target: LightTarget,
        config: IndoorConfig,
    },
    Outdoor {
        target: LightTarget,
        config: OutdoorConfig,
    },
    Remote {
        config: RemoteConfig,
    },
}

impl Config {
    /// Load configuration from `luminad.toml` (or `LUMINA_CONFIG`, if set)
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result does not validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("LUMINA_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LUMINA_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("LUMINA_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("LUMINA_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("LUMINA_CALLBACK_URL") {
            self.server.callback_base_url = val;
        }
        if let Ok(val) = std::env::var("LUMINA_DRY_RUN") {
            self.controller.dry_run = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Ok(val) = std::env::var("LUMINA_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let callback = &self.server.callback_base_url;
        if !(callback.starts_with("http://") || callback.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "callback_base_url must be an http(s) URL, got {callback:?}"
            )));
        }
        if self.controller.mailbox_capacity == 0 {
            return Err(ConfigError::Validation(
                "mailbox_capacity must be non-zero".to_string(),
            ));
        }

        let mut names = BTreeSet::new();
        let mut slots: BTreeMap<&str, BTreeSet<u32>> = BTreeMap::new();
        for light in &self.lights {
            if !names.insert(light.name.as_str()) {
                return Err(ConfigError::InvalidLight {
                    name: light.name.clone(),
                    source: ValidationError::DuplicateName(light.name.clone()),
                });
            }
            if let LightSpec::Outdoor { config, .. } = light.spec()? {
                let used = slots.entry(light.host.as_str()).or_default();
                for entry in config.plan.entries() {
                    if !used.insert(entry.slot) {
                        return Err(ConfigError::Validation(format!(
                            "schedule slot {} of {} is used by more than one light",
                            entry.slot, light.host
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ControllerConfig {
    /// Settings of the RPC client.
    #[must_use]
    pub fn rpc(&self) -> RpcConfig {
        RpcConfig {
            request_timeout_ms: self.request_timeout_ms,
            connect_timeout_ms: self.connect_timeout_ms,
            ..RpcConfig::default()
        }
    }

    #[must_use]
    pub fn schedule_settle(&self) -> Duration {
        Duration::from_millis(self.schedule_settle_ms)
    }
}

impl LightConfig {
    fn target(&self) -> Result<LightTarget, ValidationError> {
        LightTarget::new(self.host.clone(), self.channel, self.kind)
    }

    /// Validate the entry and convert it into decision-core settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLight`] when the name, target or inputs
    /// are invalid.
    pub fn spec(&self) -> Result<LightSpec, ConfigError> {
        self.try_spec().map_err(|source| ConfigError::InvalidLight {
            name: self.name.clone(),
            source,
        })
    }

    fn try_spec(&self) -> Result<LightSpec, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let url_safe = self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !url_safe {
            return Err(ValidationError::InvalidName(self.name.clone()));
        }
        match &self.variant {
            VariantConfig::Indoor(section) => {
                let config = section.to_config();
                config.validate()?;
                Ok(LightSpec::Indoor {
                    target: self.target()?,
                    config,
                })
            }
            VariantConfig::Outdoor(section) => {
                let config = section.to_config();
                config.plan.validate()?;
                Ok(LightSpec::Outdoor {
                    target: self.target()?,
                    config,
                })
            }
            VariantConfig::Remote(section) => {
                let config = section.to_config()?;
                config.validate()?;
                Ok(LightSpec::Remote { config })
            }
        }
    }
}

impl IndoorSection {
    fn to_config(&self) -> IndoorConfig {
        IndoorConfig {
            sensor_input: self.sensor_input,
            on_input: self.on_input,
            off_input: self.off_input,
            auto_off_after: Duration::from_secs(self.auto_off_secs),
            suppression_for: Duration::from_secs(self.suppression_secs),
            brightness: self.brightness,
        }
    }
}

impl OutdoorSection {
    fn to_config(&self) -> OutdoorConfig {
        OutdoorConfig {
            motion_input: self.motion_input,
            motion_on_for: Duration::from_secs(self.motion_on_secs),
            brightness: self.brightness,
            morning_grace_minutes: self.morning_grace_minutes,
            occupancy: match self.occupancy {
                OccupancySection::ScheduleWindow => OccupancyPolicy::ScheduleWindow,
                OccupancySection::FixedWindow { after, before } => {
                    OccupancyPolicy::FixedWindow { after, before }
                }
            },
            plan: self.schedule.clone(),
        }
    }
}

impl Default for OccupancySection {
    fn default() -> Self {
        Self::from(OccupancyPolicy::default())
    }
}

impl From<OccupancyPolicy> for OccupancySection {
    fn from(policy: OccupancyPolicy) -> Self {
        match policy {
            OccupancyPolicy::ScheduleWindow => Self::ScheduleWindow,
            OccupancyPolicy::FixedWindow { after, before } => Self::FixedWindow { after, before },
        }
    }
}

impl RemoteSection {
    fn to_config(&self) -> Result<RemoteConfig, ValidationError> {
        let bindings = self
            .bindings
            .iter()
            .map(|binding| {
                Ok(RemoteBinding {
                    input: binding.input,
                    target: LightTarget::new(binding.host.clone(), binding.channel, binding.kind)?,
                })
            })
            .collect::<Result<_, ValidationError>>()?;
        Ok(RemoteConfig { bindings })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            callback_base_url: "http://luminad.local:3000".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "luminad=info,lumina=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let rpc = RpcConfig::default();
        Self {
            dry_run: false,
            request_timeout_ms: rpc.request_timeout_ms,
            connect_timeout_ms: rpc.connect_timeout_ms,
            schedule_settle_ms: 100,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl Default for IndoorSection {
    fn default() -> Self {
        let defaults = IndoorConfig::default();
        Self {
            sensor_input: defaults.sensor_input,
            on_input: defaults.on_input,
            off_input: defaults.off_input,
            auto_off_secs: defaults.auto_off_after.as_secs(),
            suppression_secs: defaults.suppression_for.as_secs(),
            brightness: defaults.brightness,
        }
    }
}

impl Default for OutdoorSection {
    fn default() -> Self {
        let defaults = OutdoorConfig::default();
        Self {
            motion_input: defaults.motion_input,
            motion_on_secs: defaults.motion_on_for.as_secs(),
            brightness: defaults.brightness,
            morning_grace_minutes: defaults.morning_grace_minutes,
            occupancy: OccupancySection::from(defaults.occupancy),
            schedule: defaults.plan,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A `[[lights]]` entry failed domain validation.
    #[error("invalid light {name:?}")]
    InvalidLight {
        name: String,
        #[source]
        source: ValidationError,
    },
}
