//! Motor module for stepper-sweep.
//!
//! Provides the step/direction pulse sink and position bookkeeping.

mod driver;
mod position;
pub mod state;

pub use driver::StepDriver;
pub use position::PositionTracker;
pub use state::{ControllerState, Idle, Running, StateName};
