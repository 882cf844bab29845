//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Cruise RPM is positive
/// - Acceleration step is positive
/// - Deceleration multiplier is at least 1
/// - The derived cruise interval is non-zero (the axis is not configured
///   faster than the microsecond clock can schedule)
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, motor) in config.motors.iter() {
        validate_motor(name.as_str(), motor)?;
    }

    Ok(())
}

fn validate_motor(_name: &str, config: &super::MotorConfig) -> Result<()> {
    if config.cruise_rpm.value() == 0 {
        return Err(Error::Config(ConfigError::InvalidCruiseRpm(
            config.cruise_rpm.value(),
        )));
    }

    if config.accel_step_us == 0 {
        return Err(Error::Config(ConfigError::InvalidAccelStep(
            config.accel_step_us,
        )));
    }

    if config.decel_multiplier == 0 {
        return Err(Error::Config(ConfigError::InvalidDecelMultiplier(
            config.decel_multiplier,
        )));
    }

    // A zero interval would make every poll a due step
    if config.cruise_interval_us() == 0 {
        return Err(Error::Config(ConfigError::CruiseIntervalZero {
            rpm: config.cruise_rpm.value(),
            steps_per_rev: config.total_steps_per_revolution(),
        }));
    }

    Ok(())
}
