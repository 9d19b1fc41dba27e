//! Simulation time model and run configuration.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! arbitration pass over the whole population; `SimClock` maps ticks to
//! elapsed wall-clock milliseconds for display and pacing.

use std::fmt;

use crate::{Cell, CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to elapsed time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Wall-clock milliseconds represented by one tick.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// Ticks needed to cover `ms` milliseconds (rounds up).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_ms() / 1_000;
        write!(f, "{} ({}m{:02}s)", self.current_tick, secs / 60, secs % 60)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON/TOML file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Wall-clock milliseconds between tick signals.  Only used for pacing
    /// and display; the simulation itself is tick-driven.
    pub tick_duration_ms: u32,

    /// Total ticks `Sim::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Sub-cell units per cell edge.
    pub tile_size: u32,

    /// Sub-cell units an actor advances per tick along each axis of its
    /// bearing.  Must not exceed `tile_size`.
    pub step: u32,

    /// Pathfinder invocations allowed per tick across the whole population.
    pub max_path_searches_per_tick: u32,

    /// How many times the goal policy is asked again for one search when it
    /// keeps proposing impassable or reserved cells.
    pub max_target_attempts: u32,

    /// Ticks an actor lingers at its destination before choosing a new one.
    pub dwell_ticks: u32,

    /// Deliver an occupancy snapshot to the observer every N ticks.
    /// `0` disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Cell through which leaving actors exit the world.
    pub exit_cell: Option<Cell>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:           100,
            total_ticks:                1_000,
            seed:                       42,
            tile_size:                  30,
            step:                       5,
            max_path_searches_per_tick: 5,
            max_target_attempts:        8,
            dwell_ticks:                90,
            snapshot_interval_ticks:    0,
            exit_cell:                  None,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject configurations the movement model cannot honour.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tile_size == 0 {
            return Err(CoreError::Config("tile_size must be positive".into()));
        }
        if self.step == 0 || self.step > self.tile_size {
            return Err(CoreError::Config(format!(
                "step {} must lie in 1..={}",
                self.step, self.tile_size
            )));
        }
        Ok(())
    }
}
