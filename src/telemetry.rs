//! One-way sweep telemetry.
//!
//! Monitors observe the sweep; they never gate or delay it. The controller
//! calls into the monitor after a reversal and, at a configured cadence,
//! after ordinary steps. A monitor that needs to ship data elsewhere should
//! buffer and return immediately.

use crate::config::units::Steps;

/// Snapshot of the sweep state at a reporting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepSnapshot {
    /// Absolute position in steps (unbounded counter).
    pub position: Steps,
    /// Current target in steps.
    pub target: Steps,
    /// Current inter-step interval in microseconds.
    pub interval_us: u32,
    /// Position folded into `[0, steps_per_rev)`; telemetry-only view.
    pub normalized_position: i64,
}

/// Observer of sweep progress.
///
/// All methods default to no-ops so a monitor implements only what it
/// cares about.
pub trait SweepMonitor {
    /// Called once per reversal, after the new target and slow interval
    /// are in place.
    fn on_reversal(&mut self, snapshot: SweepSnapshot) {
        let _ = snapshot;
    }

    /// Called every `report_every_steps` ordinary steps (never called when
    /// the cadence is configured as 0).
    fn on_step(&mut self, snapshot: SweepSnapshot) {
        let _ = snapshot;
    }
}

/// Monitor that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMonitor;

impl SweepMonitor for NullMonitor {}

impl<M: SweepMonitor + ?Sized> SweepMonitor for &mut M {
    fn on_reversal(&mut self, snapshot: SweepSnapshot) {
        (**self).on_reversal(snapshot);
    }

    fn on_step(&mut self, snapshot: SweepSnapshot) {
        (**self).on_step(snapshot);
    }
}
