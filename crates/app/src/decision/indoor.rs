//! Indoor core — occupancy sensor plus manual override buttons.
//!
//! | Input | Kind | Effect |
//! |---|---|---|
//! | sensor | occupancy on | (gate active) on, cancel auto-off |
//! | sensor | occupancy off | (gate active, automatic) arm auto-off |
//! | on button | single press | manual hold, cancel auto-off, on |
//! | on button | long press | gate active, automatic |
//! | off button | single press | automatic, off, cancel auto-off, suppress sensor |
//! | off button | long press | gate disabled, automatic, off, cancel both timers |

use std::time::Duration;

use lumina_domain::command::{Brightness, LightCommand};
use lumina_domain::error::{LuminaError, ValidationError};
use lumina_domain::input::{InputEvent, InputKind};
use lumina_domain::override_mode::OverrideMode;
use lumina_domain::sensor_gate::SensorGate;
use lumina_domain::status::LightStatus;
use lumina_domain::target::LightTarget;
use lumina_domain::time::{Timestamp, deadline_after};
use lumina_domain::timer::{TimerFired, TimerPurpose};

use super::{DecisionCore, LightEvent};
use crate::ports::{Clock, CommandSink, TimerService};
use crate::timer_slot::TimerSlot;

/// Input wiring and durations of an indoor light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndoorConfig {
    /// Input the occupancy sensor is wired to.
    pub sensor_input: u8,
    /// Input of the "on" button.
    pub on_input: u8,
    /// Input of the "off" button.
    pub off_input: u8,
    /// Delay between occupancy ending and the automatic off.
    pub auto_off_after: Duration,
    /// How long a manual off keeps the sensor suppressed.
    pub suppression_for: Duration,
    /// Brightness sent with "on" commands; `None` keeps the fixture's last level.
    pub brightness: Option<Brightness>,
}

impl Default for IndoorConfig {
    fn default() -> Self {
        Self {
            sensor_input: 2,
            on_input: 1,
            off_input: 3,
            auto_off_after: Duration::from_secs(5 * 60),
            suppression_for: Duration::from_secs(2 * 60),
            brightness: None,
        }
    }
}

impl IndoorConfig {
    /// Check that every role has its own input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateInput`] if two roles share an input.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sensor_input == self.on_input || self.sensor_input == self.off_input {
            return Err(ValidationError::DuplicateInput(self.sensor_input));
        }
        if self.on_input == self.off_input {
            return Err(ValidationError::DuplicateInput(self.on_input));
        }
        Ok(())
    }
}

/// Auto-off fire-action guard: only switch off under automatic control with
/// an active sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AutoOffGuard;

impl AutoOffGuard {
    fn still_holds(self, mode: OverrideMode, gate: SensorGate) -> bool {
        mode.is_automatic() && gate.honors_occupancy()
    }
}

/// Suppression reversion guard: only lift the suppression this timer was
/// armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SuppressionGuard {
    until: Timestamp,
}

impl SuppressionGuard {
    fn still_holds(self, gate: SensorGate) -> bool {
        gate == SensorGate::SuppressedUntil(self.until)
    }
}

/// Decision core of an indoor light.
pub struct IndoorCore<S, T, C> {
    config: IndoorConfig,
    target: LightTarget,
    sink: S,
    timers: T,
    clock: C,
    mode: OverrideMode,
    gate: SensorGate,
    auto_off: TimerSlot<AutoOffGuard>,
    suppression: TimerSlot<SuppressionGuard>,
}

impl<S, T, C> IndoorCore<S, T, C>
where
    S: CommandSink,
    T: TimerService,
    C: Clock,
{
    /// Build a core in automatic mode with an active sensor.
    pub fn new(config: IndoorConfig, target: LightTarget, sink: S, timers: T, clock: C) -> Self {
        Self {
            config,
            target,
            sink,
            timers,
            clock,
            mode: OverrideMode::Automatic,
            gate: SensorGate::Active,
            auto_off: TimerSlot::new(TimerPurpose::AutoOff),
            suppression: TimerSlot::new(TimerPurpose::SensorSuppression),
        }
    }

    #[must_use]
    pub fn mode(&self) -> OverrideMode {
        self.mode
    }

    #[must_use]
    pub fn gate(&self) -> SensorGate {
        self.gate
    }

    fn actuate(&self, on: bool) {
        let command = if on {
            LightCommand::on(self.config.brightness)
        } else {
            LightCommand::off()
        };
        self.sink.dispatch(&self.target, command);
    }

    fn on_input(&mut self, input: InputEvent) -> Result<(), LuminaError> {
        let Some(kind) = input.kind else {
            tracing::debug!(input = input.input_id, "input without recognized kind ignored");
            return Ok(());
        };
        match (input.input_id, kind) {
            (id, InputKind::OccupancyOn) if id == self.config.sensor_input => {
                self.occupancy_detected();
            }
            (id, InputKind::OccupancyOff) if id == self.config.sensor_input => {
                self.occupancy_ended();
            }
            (id, InputKind::SinglePress) if id == self.config.on_input => self.manual_on(),
            (id, InputKind::LongPress) if id == self.config.on_input => self.release_hold(),
            (id, InputKind::SinglePress) if id == self.config.off_input => self.manual_off()?,
            (id, InputKind::LongPress) if id == self.config.off_input => self.disable_sensor(),
            _ => tracing::debug!(%input, "unhandled input ignored"),
        }
        Ok(())
    }

    fn occupancy_detected(&mut self) {
        if !self.gate.honors_occupancy() {
            tracing::debug!(gate = %self.gate, "occupancy ignored while sensor is gated");
            return;
        }
        tracing::info!(light = %self.target, "occupancy detected, turning on");
        self.actuate(true);
        self.auto_off.cancel(&self.timers);
    }

    fn occupancy_ended(&mut self) {
        if !self.gate.honors_occupancy() {
            tracing::debug!(gate = %self.gate, "occupancy end ignored while sensor is gated");
            return;
        }
        if !self.mode.is_automatic() {
            tracing::debug!("occupancy ended under manual hold, no auto-off");
            return;
        }
        tracing::info!(after = ?self.config.auto_off_after, "occupancy ended, arming auto-off");
        self.auto_off
            .rearm(&self.timers, self.config.auto_off_after, AutoOffGuard);
    }

    fn manual_on(&mut self) {
        tracing::info!("manual on, holding light");
        self.mode = OverrideMode::ManualHold;
        self.auto_off.cancel(&self.timers);
        self.actuate(true);
    }

    fn release_hold(&mut self) {
        tracing::info!("long press on, sensor re-enabled");
        self.gate = SensorGate::Active;
        self.suppression.cancel(&self.timers);
        self.mode = OverrideMode::Automatic;
    }

    fn manual_off(&mut self) -> Result<(), LuminaError> {
        let until = deadline_after(self.clock.now(), self.config.suppression_for)?;
        tracing::info!(until = %until.to_rfc3339(), "manual off, suppressing sensor");
        self.mode = OverrideMode::Automatic;
        self.actuate(false);
        self.auto_off.cancel(&self.timers);
        self.gate = SensorGate::SuppressedUntil(until);
        self.suppression
            .rearm(&self.timers, self.config.suppression_for, SuppressionGuard { until });
        Ok(())
    }

    fn disable_sensor(&mut self) {
        tracing::info!("long press off, sensor disabled until re-enabled");
        self.gate = SensorGate::DisabledIndefinitely;
        self.mode = OverrideMode::Automatic;
        self.actuate(false);
        self.auto_off.cancel(&self.timers);
        self.suppression.cancel(&self.timers);
    }

    fn on_timer(&mut self, fired: TimerFired) {
        match fired.purpose {
            TimerPurpose::AutoOff => {
                let Some(guard) = self.auto_off.take_fired(fired.handle) else {
                    return;
                };
                if guard.still_holds(self.mode, self.gate) {
                    tracing::info!("auto-off elapsed, turning off");
                    self.actuate(false);
                } else {
                    tracing::debug!(mode = %self.mode, gate = %self.gate, "auto-off skipped");
                }
            }
            TimerPurpose::SensorSuppression => {
                let Some(guard) = self.suppression.take_fired(fired.handle) else {
                    return;
                };
                if guard.still_holds(self.gate) {
                    tracing::info!("sensor suppression elapsed, sensor active");
                    self.gate = SensorGate::Active;
                }
            }
            TimerPurpose::Motion => {
                tracing::debug!(handle = %fired.handle, "foreign timer purpose ignored");
            }
        }
    }
}

impl<S, T, C> DecisionCore for IndoorCore<S, T, C>
where
    S: CommandSink,
    T: TimerService,
    C: Clock,
{
    fn handle(&mut self, event: LightEvent) -> Result<(), LuminaError> {
        match event {
            LightEvent::Input(input) => self.on_input(input),
            LightEvent::Timer(fired) => {
                self.on_timer(fired);
                Ok(())
            }
            LightEvent::Schedule(trigger) => {
                tracing::debug!(%trigger, "schedule trigger ignored by indoor light");
                Ok(())
            }
        }
    }

    fn status(&self) -> LightStatus {
        LightStatus::Indoor {
            override_mode: self.mode,
            sensor_gate: self.gate,
            auto_off_armed: self.auto_off.is_armed(),
            suppression_armed: self.suppression.is_armed(),
        }
    }
}
