//! Step/direction pulse sink.
//!
//! Generic over embedded-hal 1.0 pin types. The driver owns the three
//! control lines of a TB6600-class stepper driver (STEP, DIR, ENA) and
//! enforces the electrical protocol timings: a minimum pulse width on STEP
//! and a setup delay after any DIR or ENA level change. The *scheduling*
//! interval between pulses is not its concern; that belongs to the
//! controller and its injected clock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{INIT_DELAY_MS, PULSE_WIDTH_US, SETUP_TIME_US};
use crate::error::MotorError;
use crate::motion::Direction;

/// Pulse sink driving STEP/DIR/ENA lines.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `ENA`: ENA pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider for the electrical hold times (must implement `DelayNs`)
pub struct StepDriver<STEP, DIR, ENA, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (one high-then-low pulse per microstep).
    step_pin: STEP,

    /// DIR pin (high = CW, low = CCW, or inverted).
    dir_pin: DIR,

    /// ENA pin (held asserted for the controller's lifetime).
    enable_pin: ENA,

    /// Delay provider for pulse width and setup times.
    delay: DELAY,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,
}

impl<STEP, DIR, ENA, DELAY> StepDriver<STEP, DIR, ENA, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new driver. No pins are touched until [`enable`](Self::enable).
    pub fn new(step_pin: STEP, dir_pin: DIR, enable_pin: ENA, delay: DELAY, invert_direction: bool) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            current_direction: None,
            invert_direction,
        }
    }

    /// Assert ENA and wait the driver initialization delay.
    ///
    /// Called once when the controller starts; ENA stays asserted for the
    /// controller's lifetime unless the host holds the sweep.
    pub fn enable(&mut self) -> Result<(), MotorError> {
        self.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_ms(INIT_DELAY_MS);
        Ok(())
    }

    /// De-assert ENA, cutting pulse response without touching position state.
    pub fn disable(&mut self) -> Result<(), MotorError> {
        self.enable_pin.set_low().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(SETUP_TIME_US);
        Ok(())
    }

    /// Assert the DIR level for `direction`, honoring the setup time.
    ///
    /// The level is cached: re-asserting the current direction does not
    /// touch the pin or pay the setup delay. After any actual change the
    /// setup time is held before this call returns, so the next pulse is
    /// always valid.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), MotorError> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Clockwise => !self.invert_direction,
            Direction::CounterClockwise => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.delay.delay_us(SETUP_TIME_US);
        self.current_direction = Some(direction);
        Ok(())
    }

    /// Emit one step pulse: high, minimum pulse width, low, minimum low hold.
    ///
    /// This is the only place the controller blocks, and never for longer
    /// than the two pulse-width holds.
    pub fn step_pulse(&mut self) -> Result<(), MotorError> {
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(PULSE_WIDTH_US);
        self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(PULSE_WIDTH_US);
        Ok(())
    }

    /// Get the most recently asserted direction, if any.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }
}
