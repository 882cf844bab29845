//! Configuration module for stepper-sweep.
//!
//! Provides types for loading and validating sweep-axis configurations
//! from TOML files (with `std` feature) or pre-parsed data.

#[cfg(feature = "std")]
mod loader;
mod motor;
mod system;
mod timing;
pub mod units;
mod validation;

pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use timing::{SweepTiming, INIT_DELAY_MS, PULSE_WIDTH_US, SETUP_TIME_US};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Rpm, Steps};
