//! # stepper-sweep
//!
//! Non-blocking ping-pong stepper motor sweep controller with embedded-hal 1.0 support.
//!
//! Drives a two-wire (STEP/DIR) stepper driver through a continuously repeating
//! back-and-forth sweep with acceleration ramps, using cooperative time-slicing
//! instead of blocking delays: each [`poll`](motion::SweepController::poll) either
//! emits exactly one step pulse or returns immediately, so the hosting loop is
//! never starved.
//!
//! ## Features
//!
//! - **Configuration-driven**: Define sweep axes in TOML files
//! - **embedded-hal 1.0**: Uses `OutputPin` for STEP/DIR/ENA, `DelayNs` for
//!   the sub-interval electrical delays only
//! - **no_std compatible**: Core library works without standard library
//! - **Injectable clock**: Step deadlines come from a [`Clock`] you provide,
//!   correct across counter wraparound
//! - **Position tracking**: Absolute position tracked at all times
//! - **Type-state safety**: Compile-time controller state verification
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_sweep::{SweepController, SystemConfig};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = stepper_sweep::load_config("sweep.toml")?;
//!
//! // Create controller with embedded-hal pins
//! let controller = SweepController::builder()
//!     .from_config(&config, "x_axis")?
//!     .step_pin(step_pin)
//!     .dir_pin(dir_pin)
//!     .enable_pin(ena_pin)
//!     .delay(delay)
//!     .build()?;
//!
//! // Arm the driver and sweep forever
//! let clock = stepper_sweep::StdClock::new();
//! let mut controller = controller.begin(&clock)?;
//! loop {
//!     controller.poll(&clock)?;
//!     // ... other cooperative duties (LEDs, telemetry, serial)
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod clock;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod telemetry;

// Re-exports for ergonomic API
pub use clock::{Clock, Instant, ManualClock};
pub use config::{validate_config, MotorConfig, SweepTiming, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Direction, Poll, SpeedRamp, SweepController, SweepControllerBuilder};
pub use motor::{state, PositionTracker, StepDriver};
pub use telemetry::{NullMonitor, SweepMonitor, SweepSnapshot};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

#[cfg(feature = "std")]
pub use clock::StdClock;

// Unit types
pub use config::units::{Microsteps, Rpm, Steps};
