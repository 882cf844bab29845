//! Basic sweep example.
//!
//! Demonstrates creating a sweep controller from configuration and polling
//! it cooperatively alongside other work.
//!
//! This example uses mock pins, so it runs on any host without hardware.

use stepper_sweep::{
    config::units::{Microsteps, Rpm},
    Poll, StdClock, SweepController, SweepMonitor, SweepSnapshot,
};

/// Mock delay provider for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use a hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Mock output pin for demonstration.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

/// Monitor printing reversal events.
struct PrintMonitor;

impl SweepMonitor for PrintMonitor {
    fn on_reversal(&mut self, snapshot: SweepSnapshot) {
        println!(
            "reversal: position {} -> target {}, interval {} us",
            snapshot.position.value(),
            snapshot.target.value(),
            snapshot.interval_us
        );
    }
}

fn main() {
    println!("=== Basic Sweep Example ===\n");

    // Build controller from manual configuration
    let controller = SweepController::builder()
        .name("demo_axis")
        .steps_per_revolution(200)
        .microsteps(Microsteps::SIXTEENTH)
        .cruise_rpm(Rpm(60))
        .accel_step_us(50)
        .decel_multiplier(5)
        .step_pin(MockPin::new())
        .dir_pin(MockPin::new())
        .enable_pin(MockPin::new())
        .delay(MockDelay)
        .build()
        .expect("controller should build");

    println!(
        "axis '{}': {} steps/rev, cruise interval {} us, start interval {} us\n",
        controller.name(),
        controller.timing().steps_per_rev,
        controller.timing().target_interval_us,
        controller.timing().start_interval_us,
    );

    let clock = StdClock::new();
    let mut controller = controller.begin(&clock).expect("driver should arm");
    let mut monitor = PrintMonitor;

    // Poll through two reversals; a firmware main loop would do this forever,
    // interleaving LEDs, sensors, and serial I/O between polls.
    let mut reversals = 0;
    while reversals < 2 {
        match controller.poll_with(&clock, &mut monitor).expect("pins are infallible") {
            Poll::Reversed => reversals += 1,
            Poll::Stepped | Poll::Waiting | Poll::Held => {}
        }
    }

    println!(
        "\nstopped at position {} (normalized {})",
        controller.position().value(),
        controller.snapshot().normalized_position
    );
}
