//! Builder pattern for SweepController.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Microsteps, Rpm};
use crate::config::{MotorConfig, SweepTiming, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motor::state::Idle;
use crate::motor::StepDriver;

use super::sweep::SweepController;

/// Builder for creating SweepController instances.
pub struct SweepControllerBuilder<STEP, DIR, ENA, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<ENA>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    steps_per_revolution: Option<u16>,
    microsteps: Option<Microsteps>,
    cruise_rpm: Option<Rpm>,
    accel_step_us: Option<u32>,
    decel_multiplier: Option<u32>,
    invert_direction: bool,
    report_every_steps: u32,
    timing: Option<SweepTiming>,
}

impl<STEP, DIR, ENA, DELAY> Default for SweepControllerBuilder<STEP, DIR, ENA, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, ENA, DELAY> SweepControllerBuilder<STEP, DIR, ENA, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            name: None,
            steps_per_revolution: None,
            microsteps: None,
            cruise_rpm: None,
            accel_step_us: None,
            decel_multiplier: None,
            invert_direction: false,
            report_every_steps: 0,
            timing: None,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the ENA pin.
    pub fn enable_pin(mut self, pin: ENA) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set steps per revolution (base motor steps before microstepping).
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set microstep configuration.
    pub fn microsteps(mut self, microsteps: Microsteps) -> Self {
        self.microsteps = Some(microsteps);
        self
    }

    /// Set cruise speed in RPM.
    pub fn cruise_rpm(mut self, rpm: Rpm) -> Self {
        self.cruise_rpm = Some(rpm);
        self
    }

    /// Set microseconds removed from the interval per accelerating step.
    pub fn accel_step_us(mut self, micros: u32) -> Self {
        self.accel_step_us = Some(micros);
        self
    }

    /// Set the slow-restart factor applied after each reversal.
    pub fn decel_multiplier(mut self, factor: u32) -> Self {
        self.decel_multiplier = Some(factor);
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the periodic telemetry cadence in steps (0 disables).
    pub fn report_every_steps(mut self, steps: u32) -> Self {
        self.report_every_steps = steps;
        self
    }

    /// Set a precomputed timing table, bypassing the per-field parameters.
    pub fn timing(mut self, timing: SweepTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.steps_per_revolution = Some(config.steps_per_revolution);
        self.microsteps = Some(config.microsteps);
        self.cruise_rpm = Some(config.cruise_rpm);
        self.accel_step_us = Some(config.accel_step_us);
        self.decel_multiplier = Some(config.decel_multiplier);
        self.invert_direction = config.invert_direction;
        self.report_every_steps = config.report_every_steps;
        self.timing = Some(SweepTiming::from_config(config));
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(motor_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the SweepController in the Idle state.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the derived cruise
    /// interval is zero.
    pub fn build(self) -> Result<SweepController<STEP, DIR, ENA, DELAY, Idle>> {
        let step_pin = self.step_pin.ok_or_else(|| missing("step_pin is required"))?;
        let dir_pin = self.dir_pin.ok_or_else(|| missing("dir_pin is required"))?;
        let enable_pin = self
            .enable_pin
            .ok_or_else(|| missing("enable_pin is required"))?;
        let delay = self.delay.ok_or_else(|| missing("delay is required"))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("sweep").unwrap());

        let timing = if let Some(t) = self.timing {
            t
        } else {
            // Build timing from individual fields
            let steps = self
                .steps_per_revolution
                .ok_or_else(|| missing("steps_per_revolution is required"))?;
            let microsteps = self.microsteps.unwrap_or(Microsteps::FULL);
            let cruise_rpm = self
                .cruise_rpm
                .ok_or_else(|| missing("cruise_rpm is required"))?;
            let accel_step_us = self
                .accel_step_us
                .ok_or_else(|| missing("accel_step_us is required"))?;
            let decel_multiplier = self
                .decel_multiplier
                .ok_or_else(|| missing("decel_multiplier is required"))?;

            let steps_per_rev = steps as u32 * microsteps.value() as u32;
            let target_interval_us = cruise_rpm.step_interval_us(steps_per_rev);
            SweepTiming::from_raw(steps_per_rev, target_interval_us, accel_step_us, decel_multiplier)
        };

        if timing.target_interval_us == 0 {
            return Err(Error::Config(ConfigError::CruiseIntervalZero {
                rpm: self.cruise_rpm.map(Rpm::value).unwrap_or(0),
                steps_per_rev: timing.steps_per_rev,
            }));
        }

        let driver = StepDriver::new(step_pin, dir_pin, enable_pin, delay, self.invert_direction);

        Ok(SweepController::new(
            driver,
            timing,
            name,
            self.report_every_steps,
        ))
    }
}

fn missing(msg: &str) -> Error {
    Error::Config(ConfigError::ParseError(
        heapless::String::try_from(msg).unwrap_or_default(),
    ))
}
