//! Motion module for stepper-sweep.
//!
//! Provides the speed ramp and the non-blocking sweep scheduler.

mod builder;
mod ramp;
mod sweep;

pub use builder::SweepControllerBuilder;
pub use ramp::SpeedRamp;
pub use sweep::{Direction, Poll, SweepController};
