//! Derived sweep timing computed from motor configuration.

use super::motor::MotorConfig;

/// Minimum STEP pulse width (high and low hold), microseconds.
///
/// From the TB6600 timing requirements.
pub const PULSE_WIDTH_US: u32 = 5;

/// Setup time required after a DIR or ENA level change before the next
/// STEP pulse is valid, microseconds.
pub const SETUP_TIME_US: u32 = 20;

/// Driver initialization delay after power-up/enable, milliseconds.
pub const INIT_DELAY_MS: u32 = 10;

/// Derived timing parameters computed once from motor configuration.
///
/// These are computed at initialization and used for all scheduling
/// decisions; no runtime reconfiguration exists.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepTiming {
    /// Total steps per revolution (full steps x microsteps).
    pub steps_per_rev: u32,

    /// Cruise (fastest) step interval in microseconds.
    pub target_interval_us: u32,

    /// Microseconds subtracted from the interval per accelerating step.
    pub accel_step_us: u32,

    /// Factor applied to the cruise interval for the slow restart after
    /// a reversal.
    pub decel_multiplier: u32,

    /// Slow restart interval: `target_interval_us * decel_multiplier`.
    pub start_interval_us: u32,
}

impl SweepTiming {
    /// Compute sweep timing from motor configuration.
    pub fn from_config(config: &MotorConfig) -> Self {
        let steps_per_rev = config.total_steps_per_revolution();
        let target_interval_us = config.cruise_interval_us();

        Self {
            steps_per_rev,
            target_interval_us,
            accel_step_us: config.accel_step_us,
            decel_multiplier: config.decel_multiplier,
            start_interval_us: target_interval_us.saturating_mul(config.decel_multiplier),
        }
    }

    /// Construct timing directly from raw values.
    ///
    /// Mostly useful for tests and hosts without a configuration layer.
    pub fn from_raw(
        steps_per_rev: u32,
        target_interval_us: u32,
        accel_step_us: u32,
        decel_multiplier: u32,
    ) -> Self {
        Self {
            steps_per_rev,
            target_interval_us,
            accel_step_us,
            decel_multiplier,
            start_interval_us: target_interval_us.saturating_mul(decel_multiplier),
        }
    }

    /// Number of accelerating steps needed to reach cruise speed from the
    /// slow restart interval (rounded up to the clamp).
    pub fn steps_to_cruise(&self) -> u32 {
        let span = self.start_interval_us.saturating_sub(self.target_interval_us);
        if self.accel_step_us == 0 {
            return 0;
        }
        (span + self.accel_step_us - 1) / self.accel_step_us
    }
}
