//! Error types for stepper-sweep library.
//!
//! Provides unified error handling across configuration and motor control.
//! The sweep loop itself has no recoverable-error taxonomy: its inputs are
//! startup-time constants, so the only runtime fault class is a failed pin
//! operation.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-sweep operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Invalid cruise RPM (must be > 0)
    InvalidCruiseRpm(u16),
    /// Invalid acceleration step (must be > 0)
    InvalidAccelStep(u32),
    /// Invalid deceleration multiplier (must be >= 1)
    InvalidDecelMultiplier(u32),
    /// Cruise speed too fast for the microsecond clock (computed step interval is zero)
    CruiseIntervalZero {
        /// Configured cruise RPM
        rpm: u16,
        /// Total steps per revolution (full steps x microsteps)
        steps_per_rev: u32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Controller is in wrong state for requested operation
    InvalidState(heapless::String<32>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(
                    f,
                    "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256",
                    v
                )
            }
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::InvalidCruiseRpm(v) => {
                write!(f, "Invalid cruise RPM: {}. Must be > 0", v)
            }
            ConfigError::InvalidAccelStep(v) => {
                write!(f, "Invalid acceleration step: {} us. Must be > 0", v)
            }
            ConfigError::InvalidDecelMultiplier(v) => {
                write!(f, "Invalid deceleration multiplier: {}. Must be >= 1", v)
            }
            ConfigError::CruiseIntervalZero { rpm, steps_per_rev } => {
                write!(
                    f,
                    "Cruise interval is zero at {} RPM with {} steps/rev",
                    rpm, steps_per_rev
                )
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::InvalidState(state) => write!(f, "Invalid controller state: {}", state),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
