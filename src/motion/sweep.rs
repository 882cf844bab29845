//! Sweep controller - the non-blocking ping-pong scheduling loop.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::clock::{Clock, Instant};
use crate::config::units::Steps;
use crate::config::SweepTiming;
use crate::error::Result;
use crate::motor::state::{ControllerState, Idle, Running, StateName};
use crate::motor::{PositionTracker, StepDriver};
use crate::telemetry::{NullMonitor, SweepMonitor, SweepSnapshot};

use super::ramp::SpeedRamp;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Direction from the current position toward a target.
    #[inline]
    pub fn towards(current: Steps, target: Steps) -> Self {
        if target > current {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Outcome of a single scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// The current interval has not elapsed; nothing was done.
    Waiting,
    /// One step pulse was emitted.
    Stepped,
    /// The target was reached: new target, slow interval, direction
    /// re-asserted. No pulse this tick.
    Reversed,
    /// The sweep is held; pulse emission is suppressed.
    Held,
}

/// Non-blocking ping-pong sweep controller for one axis.
///
/// Owns the [`StepDriver`] and all mutable sweep state; the hosting loop
/// re-enters [`poll`](Self::poll) as often as it can. Each poll emits at
/// most one pulse and otherwise returns immediately, so the host is free
/// to interleave other duties without being starved.
///
/// Created in the `Idle` state; [`begin`](Self::begin) arms the driver and
/// returns the `Running` controller. There is no terminal state.
pub struct SweepController<STEP, DIR, ENA, DELAY, STATE = Idle>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
    STATE: ControllerState,
{
    /// The step/direction pulse sink.
    driver: StepDriver<STEP, DIR, ENA, DELAY>,

    /// Derived timing table (immutable for the run).
    timing: SweepTiming,

    /// Current and target position.
    position: PositionTracker,

    /// Inter-step interval ramp.
    ramp: SpeedRamp,

    /// Instant of the last step pulse (or reversal tick).
    last_step_at: Instant,

    /// Pulse emission suppressed without touching position.
    held: bool,

    /// Steps since the last periodic telemetry report.
    steps_since_report: u32,

    /// Telemetry cadence in steps (0 = periodic reports disabled).
    report_every_steps: u32,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Type-state marker.
    _state: PhantomData<STATE>,
}

impl<STEP, DIR, ENA, DELAY, STATE> SweepController<STEP, DIR, ENA, DELAY, STATE>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
    STATE: ControllerState + StateName,
{
    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Get current absolute position in steps.
    #[inline]
    pub fn position(&self) -> Steps {
        self.position.current()
    }

    /// Get the current target in steps.
    #[inline]
    pub fn target(&self) -> Steps {
        self.position.target()
    }

    /// Get the current inter-step interval in microseconds.
    #[inline]
    pub fn current_interval_us(&self) -> u32 {
        self.ramp.current_interval_us()
    }

    /// Direction of travel, derived from the position/target comparison.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.position.direction()
    }

    /// Get the timing table.
    #[inline]
    pub fn timing(&self) -> &SweepTiming {
        &self.timing
    }

    /// Snapshot of the sweep state for telemetry.
    pub fn snapshot(&self) -> SweepSnapshot {
        SweepSnapshot {
            position: self.position.current(),
            target: self.position.target(),
            interval_us: self.ramp.current_interval_us(),
            normalized_position: self.position.normalized(self.timing.steps_per_rev),
        }
    }
}

impl<STEP, DIR, ENA, DELAY> SweepController<STEP, DIR, ENA, DELAY, Idle>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    /// Create a builder.
    pub fn builder() -> super::builder::SweepControllerBuilder<STEP, DIR, ENA, DELAY> {
        super::builder::SweepControllerBuilder::new()
    }

    /// Create a new controller in the Idle state.
    ///
    /// Position starts at the origin aimed at `+steps_per_rev`; the ramp
    /// starts at the slow restart interval.
    pub(crate) fn new(
        driver: StepDriver<STEP, DIR, ENA, DELAY>,
        timing: SweepTiming,
        name: heapless::String<32>,
        report_every_steps: u32,
    ) -> Self {
        let position = PositionTracker::new(Steps(timing.steps_per_rev as i64));
        let ramp = SpeedRamp::new(&timing);
        Self {
            driver,
            timing,
            position,
            ramp,
            last_step_at: Instant::default(),
            held: false,
            steps_since_report: 0,
            report_every_steps,
            name,
            _state: PhantomData,
        }
    }

    /// Arm the driver and start the sweep.
    ///
    /// Asserts ENA (held for the controller's lifetime), asserts the
    /// initial direction with its setup delay, and records the start
    /// instant so the first pulse fires one full interval later.
    pub fn begin<C: Clock>(
        mut self,
        clock: &C,
    ) -> Result<SweepController<STEP, DIR, ENA, DELAY, Running>> {
        self.driver.enable()?;
        self.driver.set_direction(self.position.direction())?;

        Ok(SweepController {
            driver: self.driver,
            timing: self.timing,
            position: self.position,
            ramp: self.ramp,
            last_step_at: clock.now(),
            held: false,
            steps_since_report: 0,
            report_every_steps: self.report_every_steps,
            name: self.name,
            _state: PhantomData,
        })
    }
}

impl<STEP, DIR, ENA, DELAY> SweepController<STEP, DIR, ENA, DELAY, Running>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
    DELAY: DelayNs,
{
    /// One scheduler tick, reporting to `monitor`.
    ///
    /// At most one pulse per call. If the hosting loop falls behind and an
    /// interval is overshot, the overdue step fires immediately on the next
    /// poll; there is no compensation, the error shows up as pulse-rate
    /// jitter only.
    pub fn poll_with<C, M>(&mut self, clock: &C, monitor: &mut M) -> Result<Poll>
    where
        C: Clock,
        M: SweepMonitor,
    {
        if self.held {
            return Ok(Poll::Held);
        }

        let now = clock.now();
        if now.micros_since(self.last_step_at) < self.ramp.current_interval_us() {
            return Ok(Poll::Waiting);
        }

        if self.position.has_reached_target() {
            // Reversal edge: new target, slow restart, direction re-asserted.
            // No pulse this tick; the setup delay is paid inside
            // set_direction, and a full (slow) interval elapses before the
            // first reversed pulse.
            self.position.reverse();
            self.ramp.reset_for_reversal();
            self.driver.set_direction(self.position.direction())?;
            self.last_step_at = now;
            monitor.on_reversal(self.snapshot());
            return Ok(Poll::Reversed);
        }

        let direction = self.position.direction();
        self.driver.step_pulse()?;
        self.last_step_at = now;
        self.position.advance(direction);
        if self.ramp.can_accelerate() {
            self.ramp.accelerate();
        }

        if self.report_every_steps > 0 {
            self.steps_since_report += 1;
            if self.steps_since_report >= self.report_every_steps {
                self.steps_since_report = 0;
                monitor.on_step(self.snapshot());
            }
        }

        Ok(Poll::Stepped)
    }

    /// One scheduler tick without telemetry.
    #[inline]
    pub fn poll<C: Clock>(&mut self, clock: &C) -> Result<Poll> {
        self.poll_with(clock, &mut NullMonitor)
    }

    /// Suppress pulse emission without resetting position.
    ///
    /// De-asserts ENA; `poll` returns [`Poll::Held`] until
    /// [`resume`](Self::resume).
    pub fn hold(&mut self) -> Result<()> {
        if self.held {
            return Ok(());
        }
        self.driver.disable()?;
        self.held = true;
        Ok(())
    }

    /// Re-arm after a hold.
    ///
    /// Re-asserts ENA and resets the step deadline to `now`, so a long hold
    /// does not discharge as a burst of overdue pulses.
    pub fn resume<C: Clock>(&mut self, clock: &C) -> Result<()> {
        if !self.held {
            return Ok(());
        }
        self.driver.enable()?;
        self.held = false;
        self.last_step_at = clock.now();
        Ok(())
    }

    /// True while pulse emission is suppressed.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::motor::StepDriver;
    use embedded_hal::digital::ErrorType;

    // Hand-rolled infallible pin: expectation mocks are impractical for
    // sweeps thousands of pulses long.
    #[derive(Default)]
    struct CountingPin {
        highs: u32,
    }

    impl ErrorType for CountingPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for CountingPin {
        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.highs += 1;
            Ok(())
        }

        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type TestController<S> =
        SweepController<CountingPin, CountingPin, CountingPin, NoDelay, S>;

    fn scenario_controller() -> TestController<Idle> {
        let driver = StepDriver::new(
            CountingPin::default(),
            CountingPin::default(),
            CountingPin::default(),
            NoDelay,
            false,
        );
        SweepController::new(
            driver,
            SweepTiming::from_raw(3200, 312, 50, 5),
            heapless::String::try_from("test").unwrap(),
            0,
        )
    }

    /// Advance the clock by the controller's current interval and poll once.
    fn tick(controller: &mut TestController<Running>, clock: &ManualClock) -> Poll {
        clock.advance(controller.current_interval_us());
        controller.poll(clock).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let controller = scenario_controller();
        assert_eq!(controller.position().value(), 0);
        assert_eq!(controller.target().value(), 3200);
        assert_eq!(controller.current_interval_us(), 1560);
        assert_eq!(controller.direction(), Direction::Clockwise);
        assert_eq!(controller.state_name(), "Idle");
    }

    #[test]
    fn test_poll_before_deadline_is_waiting() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        clock.advance(1559);
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Waiting);
        assert_eq!(controller.position().value(), 0);
    }

    #[test]
    fn test_first_step_advances_and_accelerates() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        assert_eq!(tick(&mut controller, &clock), Poll::Stepped);
        assert_eq!(controller.position().value(), 1);
        assert_eq!(controller.current_interval_us(), 1510);
    }

    #[test]
    fn test_interval_pins_at_cruise() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        for _ in 0..25 {
            assert_eq!(tick(&mut controller, &clock), Poll::Stepped);
        }
        assert_eq!(controller.current_interval_us(), 312);

        // Interval holds the floor from here to the reversal
        for _ in 0..100 {
            tick(&mut controller, &clock);
            assert_eq!(controller.current_interval_us(), 312);
        }
    }

    #[test]
    fn test_reversal_at_target() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        for _ in 0..3200 {
            assert_eq!(tick(&mut controller, &clock), Poll::Stepped);
        }
        assert_eq!(controller.position().value(), 3200);

        // Reversal tick: no pulse, new target, slow interval, new direction
        assert_eq!(tick(&mut controller, &clock), Poll::Reversed);
        assert_eq!(controller.position().value(), 3200);
        assert_eq!(controller.target().value(), -3200);
        assert_eq!(controller.current_interval_us(), 1560);
        assert_eq!(controller.direction(), Direction::CounterClockwise);

        // Next tick steps backwards
        assert_eq!(tick(&mut controller, &clock), Poll::Stepped);
        assert_eq!(controller.position().value(), 3199);
    }

    #[test]
    fn test_direction_invariant_every_tick() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        for _ in 0..7000 {
            tick(&mut controller, &clock);
            let expected = if controller.target() > controller.position() {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            assert_eq!(controller.direction(), expected);
        }
    }

    #[test]
    fn test_due_step_across_clock_wraparound() {
        let clock = ManualClock::starting_at(u32::MAX - 500);
        let mut controller = scenario_controller().begin(&clock).unwrap();

        // Deadline lands past the wrap: 1560 us from (MAX - 500)
        clock.advance(1559);
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Waiting);
        clock.advance(1);
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Stepped);
    }

    #[test]
    fn test_overdue_step_fires_immediately() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        // Host loop stalled for many intervals; one step fires, no burst
        clock.advance(50_000);
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Stepped);
        assert_eq!(controller.position().value(), 1);
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Waiting);
    }

    #[test]
    fn test_hold_suppresses_pulses_and_keeps_position() {
        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();

        for _ in 0..10 {
            tick(&mut controller, &clock);
        }
        let held_at = controller.position().value();

        controller.hold().unwrap();
        assert!(controller.is_held());
        clock.advance(100_000);
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Held);
        assert_eq!(controller.position().value(), held_at);

        // Resume re-arms the deadline: no overdue burst
        controller.resume(&clock).unwrap();
        assert_eq!(controller.poll(&clock).unwrap(), Poll::Waiting);
        assert_eq!(tick(&mut controller, &clock), Poll::Stepped);
        assert_eq!(controller.position().value(), held_at + 1);
    }

    #[test]
    fn test_monitor_sees_reversals() {
        #[derive(Default)]
        struct TargetLog {
            targets: std::vec::Vec<i64>,
        }

        impl SweepMonitor for TargetLog {
            fn on_reversal(&mut self, snapshot: SweepSnapshot) {
                self.targets.push(snapshot.target.value());
            }
        }

        let clock = ManualClock::new();
        let mut controller = scenario_controller().begin(&clock).unwrap();
        let mut log = TargetLog::default();

        // First leg 3200 steps, then legs of 6400; run through 3 reversals
        for _ in 0..20_000 {
            clock.advance(controller.current_interval_us());
            controller.poll_with(&clock, &mut log).unwrap();
        }

        assert!(log.targets.len() >= 3);
        assert_eq!(&log.targets[..3], &[-3200, 3200, -3200]);
    }

    #[test]
    fn test_periodic_reports_at_cadence() {
        #[derive(Default)]
        struct StepCounter {
            reports: u32,
        }

        impl SweepMonitor for StepCounter {
            fn on_step(&mut self, _snapshot: SweepSnapshot) {
                self.reports += 1;
            }
        }

        let driver = StepDriver::new(
            CountingPin::default(),
            CountingPin::default(),
            CountingPin::default(),
            NoDelay,
            false,
        );
        let controller = SweepController::new(
            driver,
            SweepTiming::from_raw(3200, 312, 50, 5),
            heapless::String::try_from("test").unwrap(),
            100,
        );

        let clock = ManualClock::new();
        let mut controller = controller.begin(&clock).unwrap();
        let mut counter = StepCounter::default();

        for _ in 0..1000 {
            clock.advance(controller.current_interval_us());
            controller.poll_with(&clock, &mut counter).unwrap();
        }

        // 1000 steps at a cadence of 100
        assert_eq!(counter.reports, 10);
    }
}
