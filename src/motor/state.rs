//! Controller state type-state markers.
//!
//! Uses Rust's type system to enforce valid state transitions at compile time.
//! A sweep controller has exactly two states: `Idle` (constructed, driver not
//! yet armed) and `Running` (driver enabled, polled forever). There is no
//! terminal state; the sweep runs until the hosting process stops it.

/// Controller is constructed but the driver is not yet enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

/// Controller is armed and sweeping; `poll` drives the motion.
#[derive(Debug, Clone, Copy)]
pub struct Running;

/// Trait for controller states.
pub trait ControllerState: private::Sealed {}

impl ControllerState for Idle {}
impl ControllerState for Running {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Idle {}
    impl Sealed for super::Running {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Idle {
    fn name() -> &'static str {
        "Idle"
    }
}

impl StateName for Running {
    fn name() -> &'static str {
        "Running"
    }
}
