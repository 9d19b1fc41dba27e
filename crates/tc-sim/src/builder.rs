//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeSet;

use tc_actor::ActorStore;
use tc_core::{Cell, Point, SimConfig};
use tc_goal::GoalPolicy;
use tc_motion::{ArbiterConfig, CollisionArbiter, OccupancyIndex};
use tc_nav::{NavGrid, Pathfinder, TileMap};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, G>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick length, tile size, seed, search budget, …
/// - [`TileMap`] — the world; the navigation grid is derived from it
/// - `P: Pathfinder` — the routing algorithm (e.g. [`tc_nav::AStarPathfinder`])
/// - `G: GoalPolicy` — destination choice (e.g. [`tc_goal::WanderGoal`])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                    |
/// |---------------------|----------------------------|
/// | `.arbiter(c)`       | `ArbiterConfig::default()` |
/// | `.spawn_at(cell)`   | No actors                  |
/// | `.spawn_points(v)`  | No actors                  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, map, AStarPathfinder::default(), WanderGoal::new())
///     .arbiter(ArbiterConfig { break_deadlocks: false, ..Default::default() })
///     .spawn_at(Cell::new(1, 1))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: Pathfinder, G: GoalPolicy> {
    config:     SimConfig,
    tiles:      TileMap,
    pathfinder: P,
    policy:     G,
    arbiter:    ArbiterConfig,
    spawns:     Vec<Point>,
}

impl<P: Pathfinder, G: GoalPolicy> SimBuilder<P, G> {
    pub fn new(config: SimConfig, tiles: TileMap, pathfinder: P, policy: G) -> Self {
        Self {
            config,
            tiles,
            pathfinder,
            policy,
            arbiter: ArbiterConfig::default(),
            spawns:  Vec::new(),
        }
    }

    /// Override the collision arbitration settings.
    pub fn arbiter(mut self, config: ArbiterConfig) -> Self {
        self.arbiter = config;
        self
    }

    /// Start one actor on the centre of `cell`.  Ids are assigned in call
    /// order starting at 0.
    pub fn spawn_at(mut self, cell: Cell) -> Self {
        self.spawns.push(cell.center(self.config.tile_size));
        self
    }

    /// Start one actor at each sub-cell position.
    pub fn spawn_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.spawns.extend(points);
        self
    }

    /// Validate inputs, derive the navigation grid and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, G>> {
        self.config.validate()?;
        if let Some(exit) = self.config.exit_cell {
            if !self.tiles.in_bounds(exit) {
                return Err(SimError::Config(format!("exit cell {exit} lies outside the map")));
            }
        }

        let grid = NavGrid::from_tiles(&self.tiles);
        let mut sim = Sim {
            clock:      self.config.make_clock(),
            actors:     ActorStore::new(self.config.seed),
            occupancy:  OccupancyIndex::for_grid(&grid),
            arbiter:    CollisionArbiter::new(self.arbiter),
            pathfinder: self.pathfinder,
            policy:     self.policy,
            config:     self.config,
            tiles:      self.tiles,
            grid,
            events:     Vec::new(),
            exited:     BTreeSet::new(),
        };
        for point in self.spawns {
            sim.spawn_actor(point)?;
        }
        tracing::debug!(
            actors = sim.actors.len(),
            width  = sim.grid.width(),
            height = sim.grid.height(),
            "simulation built"
        );
        Ok(sim)
    }
}
