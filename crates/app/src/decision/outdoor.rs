//! Outdoor core — daily schedule window plus a motion sensor.
//!
//! Schedule triggers come from the controller's own scheduler (see
//! [`SchedulePlan`]). Every on/off trigger cancels a running motion timer
//! before it sets the window flag and actuates.

use std::time::Duration;

use lumina_domain::command::{Brightness, LightCommand};
use lumina_domain::error::LuminaError;
use lumina_domain::input::{InputEvent, InputKind};
use lumina_domain::schedule::{SchedulePlan, ScheduleTrigger, should_turn_on_morning_light};
use lumina_domain::status::LightStatus;
use lumina_domain::target::LightTarget;
use lumina_domain::time::MinuteOfDay;
use lumina_domain::timer::{TimerFired, TimerPurpose};

use super::{DecisionCore, LightEvent};
use crate::ports::{Clock, CommandSink, TimerService};
use crate::timer_slot::TimerSlot;

/// When motion is allowed to switch the light on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyPolicy {
    /// While the schedule window is open (between an on and an off trigger).
    ScheduleWindow,
    /// During a fixed wall-clock window, inclusive, possibly wrapping midnight.
    FixedWindow {
        after: MinuteOfDay,
        before: MinuteOfDay,
    },
}

impl OccupancyPolicy {
    /// The night window, 23:00 to 06:00.
    #[must_use]
    pub fn night() -> Self {
        Self::FixedWindow {
            after: MinuteOfDay::from_hm(23, 0).unwrap_or(MinuteOfDay::MIDNIGHT),
            before: MinuteOfDay::from_hm(6, 0).unwrap_or(MinuteOfDay::MIDNIGHT),
        }
    }
}

impl Default for OccupancyPolicy {
    fn default() -> Self {
        Self::night()
    }
}

/// Motion input, durations and schedule of an outdoor light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdoorConfig {
    /// Input the motion sensor is wired to.
    pub motion_input: u8,
    /// How long a motion-triggered on lasts.
    pub motion_on_for: Duration,
    /// Brightness for every "on"; ignored by switch targets.
    pub brightness: Brightness,
    /// Minutes after the captured sunrise during which the morning-on still fires.
    pub morning_grace_minutes: u16,
    pub occupancy: OccupancyPolicy,
    pub plan: SchedulePlan,
}

impl Default for OutdoorConfig {
    fn default() -> Self {
        Self {
            motion_input: 0,
            motion_on_for: Duration::from_secs(15 * 60),
            brightness: Brightness::FULL,
            morning_grace_minutes: 30,
            occupancy: OccupancyPolicy::default(),
            plan: SchedulePlan::default(),
        }
    }
}

/// Decision core of an outdoor light.
pub struct OutdoorCore<S, T, C> {
    config: OutdoorConfig,
    target: LightTarget,
    sink: S,
    timers: T,
    clock: C,
    time_window_active: bool,
    sunrise_minute: Option<MinuteOfDay>,
    motion: TimerSlot<()>,
}

impl<S, T, C> OutdoorCore<S, T, C>
where
    S: CommandSink,
    T: TimerService,
    C: Clock,
{
    /// Build a core with a closed window and no captured sunrise.
    pub fn new(config: OutdoorConfig, target: LightTarget, sink: S, timers: T, clock: C) -> Self {
        Self {
            config,
            target,
            sink,
            timers,
            clock,
            time_window_active: false,
            sunrise_minute: None,
            motion: TimerSlot::new(TimerPurpose::Motion),
        }
    }

    /// The schedule this light installs at startup.
    #[must_use]
    pub fn plan(&self) -> &SchedulePlan {
        &self.config.plan
    }

    #[must_use]
    pub fn time_window_active(&self) -> bool {
        self.time_window_active
    }

    #[must_use]
    pub fn sunrise_minute(&self) -> Option<MinuteOfDay> {
        self.sunrise_minute
    }

    fn turn_on(&self) {
        let brightness = self
            .target
            .kind
            .is_dimmable()
            .then_some(self.config.brightness);
        self.sink.dispatch(&self.target, LightCommand::on(brightness));
    }

    fn turn_off(&self) {
        self.sink.dispatch(&self.target, LightCommand::off());
    }

    fn on_schedule(&mut self, trigger: ScheduleTrigger) {
        if trigger == ScheduleTrigger::CaptureSunrise {
            let minute = self.clock.minute_of_day();
            tracing::info!(sunrise = %minute, "sunrise captured");
            self.sunrise_minute = Some(minute);
            return;
        }

        self.motion.cancel(&self.timers);
        match trigger {
            ScheduleTrigger::MorningOn => {
                let now = self.clock.minute_of_day();
                let on = should_turn_on_morning_light(
                    now,
                    self.sunrise_minute,
                    self.config.morning_grace_minutes,
                );
                self.time_window_active = on;
                if on {
                    tracing::info!(%now, sunrise = ?self.sunrise_minute, "morning on");
                    self.turn_on();
                } else {
                    tracing::info!(%now, sunrise = ?self.sunrise_minute, "morning light skipped, already bright");
                }
            }
            ScheduleTrigger::EveningOn => {
                tracing::info!("evening on");
                self.time_window_active = true;
                self.turn_on();
            }
            ScheduleTrigger::MorningOff | ScheduleTrigger::EveningOff => {
                tracing::info!(%trigger, "window closed, turning off");
                self.time_window_active = false;
                self.turn_off();
            }
            ScheduleTrigger::CaptureSunrise => {}
        }
    }

    fn occupancy_allowed(&self) -> bool {
        match self.config.occupancy {
            OccupancyPolicy::ScheduleWindow => self.time_window_active,
            OccupancyPolicy::FixedWindow { after, before } => {
                self.clock.minute_of_day().is_within(after, before)
            }
        }
    }

    fn on_input(&mut self, input: InputEvent) {
        let is_motion = input.input_id == self.config.motion_input
            && matches!(
                input.kind,
                Some(InputKind::OccupancyOn | InputKind::SinglePress)
            );
        if !is_motion {
            tracing::debug!(%input, "unhandled input ignored");
            return;
        }
        if !self.occupancy_allowed() {
            tracing::debug!("motion outside the active window ignored");
            return;
        }
        tracing::info!(duration = ?self.config.motion_on_for, "motion detected, turning on");
        self.turn_on();
        self.motion
            .rearm(&self.timers, self.config.motion_on_for, ());
    }

    fn on_timer(&mut self, fired: TimerFired) {
        if fired.purpose != TimerPurpose::Motion {
            tracing::debug!(handle = %fired.handle, "foreign timer purpose ignored");
            return;
        }
        if self.motion.take_fired(fired.handle).is_some() {
            tracing::info!("motion timer elapsed, turning off");
            self.turn_off();
        }
    }
}

impl<S, T, C> DecisionCore for OutdoorCore<S, T, C>
where
    S: CommandSink,
    T: TimerService,
    C: Clock,
{
    fn handle(&mut self, event: LightEvent) -> Result<(), LuminaError> {
        match event {
            LightEvent::Input(input) => self.on_input(input),
            LightEvent::Schedule(trigger) => self.on_schedule(trigger),
            LightEvent::Timer(fired) => self.on_timer(fired),
        }
        Ok(())
    }

    fn status(&self) -> LightStatus {
        LightStatus::Outdoor {
            time_window_active: self.time_window_active,
            sunrise_minute: self.sunrise_minute,
            motion_armed: self.motion.is_armed(),
        }
    }
}
