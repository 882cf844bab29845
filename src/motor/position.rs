//! Position and target tracking for the sweep.
//!
//! Owns the current and target step counts and derives everything the
//! scheduler needs from them: travel direction, the target-reached
//! condition, and the reflected target after a reversal.

use crate::config::units::Steps;
use crate::motion::Direction;

/// Current and target position of the sweep axis.
///
/// The position counter is unbounded (i64) even though the ping-pong policy
/// keeps it within one revolution of the origin; it is never reset during a
/// run. A wraparound-safe modulo view is available for telemetry via
/// [`normalized`](Self::normalized).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionTracker {
    /// Current position in steps (from origin).
    current: Steps,
    /// Position the axis is moving toward.
    target: Steps,
}

impl PositionTracker {
    /// Create a tracker at the origin, aimed at the first leg's target.
    #[inline]
    pub fn new(first_target: Steps) -> Self {
        Self {
            current: Steps::default(),
            target: first_target,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn current(&self) -> Steps {
        self.current
    }

    /// Get the target position in steps.
    #[inline]
    pub fn target(&self) -> Steps {
        self.target
    }

    /// Direction of travel, derived from the position/target comparison.
    ///
    /// Never stored independently, so it cannot diverge from the positions.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::towards(self.current, self.target)
    }

    /// Move one step in the given direction.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.current = Steps(self.current.0 + direction.sign());
    }

    /// True iff the axis sits exactly on its target.
    ///
    /// Equality, not >=: advance only ever moves one unit toward the target,
    /// so overshoot is impossible.
    #[inline]
    pub fn has_reached_target(&self) -> bool {
        self.current == self.target
    }

    /// Reverse: reflect the target around the origin.
    ///
    /// The new target is `-current`, so after reaching `+N` the axis swings
    /// to `-N` and back, the second leg being twice as long as the first.
    /// Returns the new target.
    #[inline]
    pub fn reverse(&mut self) -> Steps {
        self.target = Steps(-self.current.0);
        self.target
    }

    /// Position folded into `[0, steps_per_rev)` for telemetry.
    ///
    /// This view never feeds back into control decisions.
    #[inline]
    pub fn normalized(&self, steps_per_rev: u32) -> i64 {
        self.current.0.rem_euclid(steps_per_rev as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_toward_target() {
        let mut pos = PositionTracker::new(Steps(3200));

        assert_eq!(pos.direction(), Direction::Clockwise);
        pos.advance(pos.direction());
        assert_eq!(pos.current().value(), 1);
        assert!(!pos.has_reached_target());
    }

    #[test]
    fn test_reached_is_exact_equality() {
        let mut pos = PositionTracker::new(Steps(2));
        pos.advance(Direction::Clockwise);
        assert!(!pos.has_reached_target());
        pos.advance(Direction::Clockwise);
        assert!(pos.has_reached_target());
    }

    #[test]
    fn test_reverse_reflects_around_origin() {
        let mut pos = PositionTracker::new(Steps(3200));
        // Walk to the target
        while !pos.has_reached_target() {
            pos.advance(pos.direction());
        }

        let new_target = pos.reverse();
        assert_eq!(new_target.value(), -3200);
        assert_eq!(pos.direction(), Direction::CounterClockwise);
    }

    #[test]
    fn test_ping_pong_target_sequence() {
        let mut pos = PositionTracker::new(Steps(100));
        let mut targets = [0i64; 4];

        for slot in targets.iter_mut() {
            while !pos.has_reached_target() {
                pos.advance(pos.direction());
            }
            *slot = pos.reverse().value();
        }

        // {+N} reached, then targets alternate {-N, +N, -N, +N}
        assert_eq!(targets, [-100, 100, -100, 100]);
    }

    #[test]
    fn test_normalized_view() {
        let mut pos = PositionTracker::new(Steps(-1));
        pos.advance(Direction::CounterClockwise);
        assert_eq!(pos.current().value(), -1);
        assert_eq!(pos.normalized(3200), 3199);

        let pos = PositionTracker::new(Steps(3200));
        assert_eq!(pos.normalized(3200), 0);
    }
}
