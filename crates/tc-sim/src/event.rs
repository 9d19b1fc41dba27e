//! What the tick driver tells the outside world.

use std::collections::BTreeMap;

use tc_core::{ActorId, Area, Cell, Tick};
use tc_motion::BlockedInfo;

/// One queued notification.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SimEvent {
    /// A new route, as turning points only.
    PathAssigned { actor: ActorId, waypoints: Vec<Cell> },

    /// No route to `target`; the cell has been blacklisted unless it is the
    /// exit.
    PathFailed { actor: ActorId, target: Cell },

    /// At least one actor's blocked verdict flipped this tick.  Carries the
    /// full report, not just the changes.
    BlockedChanged(BTreeMap<ActorId, BlockedInfo>),

    /// Routes through changed tiles were discarded.
    PathsReset { area: Area, actors: Vec<ActorId> },

    /// An actor was blocked so long that its route was dropped.
    PathAbandoned { actor: ActorId },

    /// A leaving actor is standing on the exit, ready to be removed.
    ReachedExit(ActorId),
}

/// Per-tick counters handed to [`SimObserver::on_tick_end`](crate::SimObserver::on_tick_end).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickReport {
    pub tick:             Tick,
    /// Pathfinder invocations.
    pub searches:         u32,
    pub paths_assigned:   u32,
    pub targets_failed:   u32,
    /// Path-less actors left waiting because the search budget ran out.
    pub deferred:         u32,
    pub moved:            usize,
    pub blocked:          usize,
    pub deadlocks_broken: usize,
}
