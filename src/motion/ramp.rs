//! Speed ramp in the period domain.

use crate::config::SweepTiming;

/// Linear ramp over the inter-step interval.
///
/// The interval decreases by a fixed number of microseconds per step until
/// it reaches the cruise interval. Linear in the *period* domain: the step
/// rate therefore rises non-linearly, which is exactly the reference
/// behavior, not a linear-speed ramp.
///
/// Invariant: the current interval never drops below the cruise interval.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedRamp {
    /// Current inter-step interval, microseconds.
    current_interval_us: u32,

    /// Cruise (fastest) interval, microseconds.
    target_interval_us: u32,

    /// Microseconds removed from the interval per accelerating step.
    accel_step_us: u32,

    /// Slow restart interval applied after every reversal.
    start_interval_us: u32,
}

impl SpeedRamp {
    /// Create a ramp at the slow restart interval.
    pub fn new(timing: &SweepTiming) -> Self {
        Self {
            current_interval_us: timing.start_interval_us,
            target_interval_us: timing.target_interval_us,
            accel_step_us: timing.accel_step_us,
            start_interval_us: timing.start_interval_us,
        }
    }

    /// Get the current inter-step interval in microseconds.
    #[inline]
    pub fn current_interval_us(&self) -> u32 {
        self.current_interval_us
    }

    /// True iff the ramp has not yet reached cruise speed.
    #[inline]
    pub fn can_accelerate(&self) -> bool {
        self.current_interval_us > self.target_interval_us
    }

    /// Shorten the interval by one acceleration step, clamped to the
    /// cruise interval. Never undershoots.
    #[inline]
    pub fn accelerate(&mut self) {
        self.current_interval_us = self
            .current_interval_us
            .saturating_sub(self.accel_step_us)
            .max(self.target_interval_us);
    }

    /// Restart from the slow interval after a reversal.
    ///
    /// Every reversal discards momentum; restarting slow prevents a
    /// torque/sync failure at the moment the direction flips.
    #[inline]
    pub fn reset_for_reversal(&mut self) {
        self.current_interval_us = self.start_interval_us;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_ramp() -> SpeedRamp {
        SpeedRamp::new(&SweepTiming::from_raw(3200, 312, 50, 5))
    }

    #[test]
    fn test_starts_at_slow_interval() {
        let ramp = scenario_ramp();
        assert_eq!(ramp.current_interval_us(), 1560);
        assert!(ramp.can_accelerate());
    }

    #[test]
    fn test_linear_period_decrease() {
        let mut ramp = scenario_ramp();
        ramp.accelerate();
        assert_eq!(ramp.current_interval_us(), 1510);
        ramp.accelerate();
        assert_eq!(ramp.current_interval_us(), 1460);
    }

    #[test]
    fn test_clamps_at_cruise() {
        let mut ramp = scenario_ramp();
        // 24 steps: 1560 - 24*50 = 360, still above cruise
        for _ in 0..24 {
            ramp.accelerate();
        }
        assert_eq!(ramp.current_interval_us(), 360);
        assert!(ramp.can_accelerate());

        // 25th step would undershoot (310 < 312); clamps instead
        ramp.accelerate();
        assert_eq!(ramp.current_interval_us(), 312);
        assert!(!ramp.can_accelerate());

        // Further calls hold the floor
        ramp.accelerate();
        assert_eq!(ramp.current_interval_us(), 312);
    }

    #[test]
    fn test_reversal_resets_to_slow() {
        let mut ramp = scenario_ramp();
        while ramp.can_accelerate() {
            ramp.accelerate();
        }
        assert_eq!(ramp.current_interval_us(), 312);

        ramp.reset_for_reversal();
        assert_eq!(ramp.current_interval_us(), 1560);
    }

    #[test]
    fn test_large_accel_step_saturates() {
        let mut ramp = SpeedRamp::new(&SweepTiming::from_raw(3200, 100, 5000, 3));
        ramp.accelerate();
        assert_eq!(ramp.current_interval_us(), 100);
    }
}
