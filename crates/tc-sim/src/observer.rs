//! Simulation observer trait for progress reporting and data collection.

use tc_actor::ActorStore;
use tc_core::Tick;
use tc_motion::OccupancyIndex;

use crate::{SimEvent, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — blocked-actor counter
///
/// ```rust,ignore
/// struct Congestion { worst: usize }
///
/// impl SimObserver for Congestion {
///     fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
///         self.worst = self.worst.max(report.blocked);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after arbitration with the tick's counters.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// The events queued during the tick, in the order they occurred.
    /// Not called for ticks that produced none.
    fn on_events(&mut self, _tick: Tick, _events: &[SimEvent]) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the occupancy
    /// index and actor state, for debug views and position logs.
    fn on_snapshot(
        &mut self,
        _tick:      Tick,
        _occupancy: &OccupancyIndex,
        _actors:    &ActorStore,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
