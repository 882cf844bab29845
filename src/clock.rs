//! Monotonic clock abstraction.
//!
//! The sweep controller never reads a hardware timer directly: it receives
//! time through the [`Clock`] trait so the scheduling logic can be exercised
//! with a fake clock in tests, with zero timing flakiness.
//!
//! Timestamps are free-running `u32` microsecond counts that wrap at the
//! integer width (about 71.6 minutes). Elapsed time is always computed with
//! wrapping subtraction, which stays correct across the wrap boundary.

/// A point in time from a free-running microsecond counter.
///
/// Wraps at `u32::MAX`. Only differences between two instants from the same
/// clock are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(pub u32);

impl Instant {
    /// Create an instant from a raw microsecond count.
    #[inline]
    pub const fn from_micros(micros: u32) -> Self {
        Self(micros)
    }

    /// Get the raw microsecond count.
    #[inline]
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// Microseconds elapsed since an earlier instant.
    ///
    /// Uses wrapping subtraction, so the result is correct even when the
    /// counter has wrapped between `earlier` and `self`, as long as the real
    /// elapsed time is less than the full counter period.
    #[inline]
    pub const fn micros_since(self, earlier: Instant) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

/// A monotonic microsecond time source.
///
/// For correctness, the same clock must back every [`poll`] of a given
/// controller; mixing clocks breaks the deadline arithmetic.
///
/// [`poll`]: crate::motion::SweepController::poll
pub trait Clock {
    /// Current counter value.
    fn now(&self) -> Instant;
}

// Blanket impl so hosts can pass either `&clock` or the clock itself.
impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A clock advanced explicitly by the host.
///
/// Useful when the host already reads a hardware counter in its main loop,
/// and for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: core::cell::Cell<u32>,
}

impl ManualClock {
    /// Create a clock starting at zero.
    pub const fn new() -> Self {
        Self {
            micros: core::cell::Cell::new(0),
        }
    }

    /// Create a clock starting at a specific counter value.
    pub const fn starting_at(micros: u32) -> Self {
        Self {
            micros: core::cell::Cell::new(micros),
        }
    }

    /// Set the counter to an absolute value.
    pub fn set(&self, micros: u32) {
        self.micros.set(micros);
    }

    /// Advance the counter, wrapping at the integer width.
    pub fn advance(&self, micros: u32) {
        self.micros.set(self.micros.get().wrapping_add(micros));
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant(self.micros.get())
    }
}

/// Clock backed by `std::time::Instant` (std only).
///
/// The 64-bit host time is truncated to the 32-bit wrapping counter the
/// controller expects.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct StdClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock with its epoch at the current time.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> Instant {
        Instant(self.epoch.elapsed().as_micros() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_simple() {
        let earlier = Instant::from_micros(1_000);
        let later = Instant::from_micros(1_312);
        assert_eq!(later.micros_since(earlier), 312);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        // 100 us before the wrap, 200 us after it
        let earlier = Instant::from_micros(u32::MAX - 99);
        let later = Instant::from_micros(200);
        assert_eq!(later.micros_since(earlier), 300);
    }

    #[test]
    fn test_elapsed_zero() {
        let t = Instant::from_micros(42);
        assert_eq!(t.micros_since(t), 0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Instant::from_micros(0));

        clock.advance(1560);
        assert_eq!(clock.now(), Instant::from_micros(1560));
    }

    #[test]
    fn test_manual_clock_wraps() {
        let clock = ManualClock::starting_at(u32::MAX);
        clock.advance(1);
        assert_eq!(clock.now(), Instant::from_micros(0));
    }
}
