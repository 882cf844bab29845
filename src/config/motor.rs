//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Microsteps, Rpm};

/// Complete sweep-axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Base steps per revolution (typically 200 for 1.8 degree motors).
    pub steps_per_revolution: u16,

    /// Microstep setting (1, 2, 4, 8, 16, 32, etc.).
    pub microsteps: Microsteps,

    /// Cruise speed in revolutions per minute (the fastest the ramp reaches).
    pub cruise_rpm: Rpm,

    /// Microseconds subtracted from the step interval per accelerating step.
    #[serde(rename = "accel_step_us")]
    pub accel_step_us: u32,

    /// Factor applied to the cruise interval to obtain the slow restart
    /// interval after each reversal.
    pub decel_multiplier: u32,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Telemetry cadence: emit a periodic snapshot every N steps
    /// (0 disables periodic reports; reversal reports are always emitted).
    #[serde(default)]
    pub report_every_steps: u32,
}

impl MotorConfig {
    /// Calculate total steps per revolution (full steps x microsteps).
    pub fn total_steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution as u32 * self.microsteps.value() as u32
    }

    /// Step interval in microseconds at cruise speed.
    pub fn cruise_interval_us(&self) -> u32 {
        self.cruise_rpm
            .step_interval_us(self.total_steps_per_revolution())
    }
}
