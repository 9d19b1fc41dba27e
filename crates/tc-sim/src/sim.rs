//! The `Sim` struct and its tick loop.

use std::collections::{BTreeMap, BTreeSet};

use tc_actor::{Actor, ActorStore};
use tc_core::{ActorId, Area, Cell, CoreError, Point, SimClock, SimConfig, Tick};
use tc_goal::{GoalContext, GoalPolicy, Target};
use tc_motion::{BlockedInfo, CollisionArbiter, OccupancyIndex};
use tc_nav::{NavError, NavGrid, NoopTrace, PathQuery, Pathfinder, TileKind, TileMap, optimize_path};

use crate::{SimEvent, SimObserver, SimResult, TickReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P, G>` owns the world, the actor registry, the occupancy index and
/// the arbiter, and drives the three-phase tick described in the crate
/// docs.  The tile map and navigation grid are only changed through
/// [`set_tile`](Self::set_tile) so the two never drift apart.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Pathfinder, G: GoalPolicy> {
    /// Global configuration (tick length, tile size, search budget, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Every live actor.
    pub actors: ActorStore,

    /// Which actor stands on which cell.
    pub occupancy: OccupancyIndex,

    /// Per-tick movement arbitration, with its memory of blocked verdicts.
    pub arbiter: CollisionArbiter,

    /// The routing algorithm.
    pub pathfinder: P,

    /// Destination choice for path-less actors.
    pub policy: G,

    pub(crate) tiles:  TileMap,
    pub(crate) grid:   NavGrid,
    pub(crate) events: Vec<SimEvent>,
    /// Leaving actors already announced as standing on the exit.
    pub(crate) exited: BTreeSet<ActorId>,
}

impl<P: Pathfinder, G: GoalPolicy> Sim<P, G> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    /// Process the current tick and advance the clock.  Events stay queued
    /// until [`drain_events`](Self::drain_events).
    pub fn tick(&mut self) -> SimResult<TickReport> {
        let now = self.clock.current_tick;
        let report = self.process_tick(now)?;
        self.clock.advance();
        Ok(report)
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events, oldest first.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// The navigation grid as of the last tile change or blacklisting.
    pub fn nav_grid(&self) -> &NavGrid {
        &self.grid
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// The per-actor blocked report, as sent in [`SimEvent::BlockedChanged`].
    pub fn blocked_info(&self) -> BTreeMap<ActorId, BlockedInfo> {
        self.arbiter.blocked_info(&self.actors)
    }

    // ── Actors ────────────────────────────────────────────────────────────

    /// Add an actor at `position` (sub-cell units) and place it in the
    /// occupancy index.
    pub fn spawn_actor(&mut self, position: Point) -> SimResult<ActorId> {
        let cell = position.cell(self.config.tile_size);
        if !self.grid.in_bounds(cell) {
            return Err(CoreError::OutOfBounds {
                cell,
                width:  self.grid.width(),
                height: self.grid.height(),
            }
            .into());
        }
        let id = self.actors.spawn(position);
        self.occupancy.place_or_move(id, cell)?;
        Ok(id)
    }

    /// Add an actor standing on the centre of `cell`.
    pub fn spawn_at(&mut self, cell: Cell) -> SimResult<ActorId> {
        self.spawn_actor(cell.center(self.config.tile_size))
    }

    /// Take an actor out of the world, clearing its occupancy entry and
    /// releasing any cell it reserved.
    pub fn remove_actor(&mut self, id: ActorId) -> SimResult<Actor> {
        let actor = self.actors.remove(id)?;
        self.occupancy.remove(id);
        self.exited.remove(&id);
        if let Some(cell) = actor.reserved {
            self.grid.release(cell);
        }
        if self.arbiter.forget(id) {
            self.events.push(SimEvent::BlockedChanged(self.arbiter.blocked_info(&self.actors)));
        }
        Ok(actor)
    }

    /// Send an actor home: from its next replan on it heads for the exit
    /// instead of asking the goal policy.
    pub fn set_leaving(&mut self, id: ActorId) -> SimResult<()> {
        self.actors.actor_mut(id)?.leaving = true;
        Ok(())
    }

    // ── World changes ─────────────────────────────────────────────────────

    /// Change one tile, patch the navigation grid and discard every path
    /// that crosses it.  Returns the actors whose paths were discarded.
    pub fn set_tile(&mut self, cell: Cell, kind: TileKind) -> SimResult<Vec<ActorId>> {
        self.tiles.set(cell, kind)?;
        self.grid.patch(&self.tiles, cell)?;
        Ok(self.reset_paths_in(Area::new(cell.x, cell.y, 1, 1)))
    }

    /// Discard every path that crosses `area`, e.g. after a building has
    /// been placed over it.  Returns the affected actors.
    pub fn reset_paths_in(&mut self, area: Area) -> Vec<ActorId> {
        let hit: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|(_, a)| a.path().iter().any(|&c| area.contains(c)))
            .map(|(id, _)| id)
            .collect();
        for &id in &hit {
            self.drop_path(id);
        }
        if !hit.is_empty() {
            tracing::debug!(count = hit.len(), ?area, "paths reset");
            self.events.push(SimEvent::PathsReset { area, actors: hit.clone() });
        }
        hit
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let report = self.process_tick(now)?;
        observer.on_tick_end(now, &report);

        let events = self.drain_events();
        if !events.is_empty() {
            observer.on_events(now, &events);
        }
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.occupancy, &self.actors);
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickReport> {
        let mut report = TickReport { tick: now, ..TickReport::default() };

        // ── Phase 1: replan path-less actors ──────────────────────────────
        self.replan(now, &mut report)?;

        // ── Phase 2: arbitrate every actor once ───────────────────────────
        let outcome = self.arbiter.arbitrate(
            &mut self.actors,
            &mut self.occupancy,
            &self.grid,
            self.config.step as i32,
            self.config.tile_size,
        )?;
        report.moved = outcome.moved.len();
        report.blocked = outcome.blocked.len();
        report.deadlocks_broken = outcome.deadlocks_broken.len();

        // ── Phase 3: report and housekeeping ──────────────────────────────
        if outcome.blocked_changed {
            self.events.push(SimEvent::BlockedChanged(self.arbiter.blocked_info(&self.actors)));
        }

        for id in outcome.arrived {
            if let Some(actor) = self.actors.get_mut(id) {
                if !actor.has_path() {
                    actor.dwell = self.config.dwell_ticks;
                }
            }
        }

        for id in self.arbiter.starved(&self.actors) {
            tracing::debug!(%id, "blocked too long, abandoning path");
            self.drop_path(id);
            if let Some(actor) = self.actors.get_mut(id) {
                actor.blocked_ticks = 0;
            }
            self.events.push(SimEvent::PathAbandoned { actor: id });
        }

        if let Some(exit) = self.config.exit_cell {
            let ts = self.config.tile_size;
            let arrived: Vec<ActorId> = self
                .actors
                .iter()
                .filter(|(id, a)| {
                    a.leaving && !a.has_path() && a.cell(ts) == exit && !self.exited.contains(id)
                })
                .map(|(id, _)| id)
                .collect();
            for id in arrived {
                self.exited.insert(id);
                self.events.push(SimEvent::ReachedExit(id));
            }
        }

        Ok(report)
    }

    /// Phase 1.  Actors are visited in ascending id order; the search budget
    /// is shared, so low ids get first pick when many actors are idle.
    fn replan(&mut self, now: Tick, report: &mut TickReport) -> SimResult<()> {
        let mut budget = self.config.max_path_searches_per_tick;

        for id in self.actors.ids() {
            let Some(actor) = self.actors.get_mut(id) else { continue };
            if actor.has_path() {
                continue;
            }
            if actor.dwell > 0 && !actor.leaving {
                actor.dwell -= 1;
                continue;
            }
            let leaving = actor.leaving;

            if leaving {
                let Some(exit) = self.config.exit_cell else {
                    tracing::debug!(%id, "leaving but no exit cell configured");
                    continue;
                };
                if actor.cell(self.config.tile_size) == exit {
                    continue;
                }
                if budget == 0 {
                    report.deferred += 1;
                    continue;
                }
                budget -= 1;
                self.search(id, Target::at(exit), report)?;
                continue;
            }

            while budget > 0 {
                let Some(target) = self.choose_target(id, now)? else { break };
                budget -= 1;
                if self.search(id, target, report)? {
                    break;
                }
            }
            if budget == 0 && !self.actors.actor(id)?.has_path() {
                report.deferred += 1;
            }
        }

        if report.deferred > 0 {
            tracing::warn!(tick = %now, deferred = report.deferred, "path search budget exhausted");
        }
        Ok(())
    }

    /// Ask the policy for a usable target, at most `max_target_attempts`
    /// times.  Impassable cells and cells reserved by another actor are
    /// skipped whether or not the proposal asks for a reservation.
    fn choose_target(&mut self, id: ActorId, now: Tick) -> SimResult<Option<Target>> {
        let ts = self.config.tile_size;
        for _ in 0..self.config.max_target_attempts {
            let Some((actor, rng)) = self.actors.split(id) else {
                return Ok(None);
            };
            let ctx = GoalContext::new(now, &self.grid, actor, ts);
            let Some(target) = self.policy.choose_target(&ctx, rng) else {
                return Ok(None);
            };
            if !self.grid.is_passable(target.cell) {
                continue;
            }
            if self.grid.is_reserved(target.cell) && actor.reserved != Some(target.cell) {
                continue;
            }
            return Ok(Some(target));
        }
        tracing::trace!(%id, "goal policy produced no usable target");
        Ok(None)
    }

    /// Run the pathfinder for one actor.  Returns whether a path was
    /// assigned.  Unreachable targets are blacklisted, except the exit.
    fn search(&mut self, id: ActorId, target: Target, report: &mut TickReport) -> SimResult<bool> {
        let actor = self.actors.actor(id)?;
        let query = PathQuery::new(actor.cell(self.config.tile_size), target.cell)
            .with_weight(actor.weight);
        report.searches += 1;

        match self.pathfinder.find_path(&self.grid, query, &mut NoopTrace) {
            Ok(path) => {
                self.assign_path(id, target, path.cells)?;
                report.paths_assigned += 1;
                Ok(true)
            }
            Err(err @ (NavError::ImpassableTarget { .. } | NavError::NoPathFound { .. })) => {
                if Some(target.cell) != self.config.exit_cell {
                    self.grid.blacklist(target.cell)?;
                }
                tracing::debug!(%id, target = %target.cell, %err, "target unreachable");
                report.targets_failed += 1;
                self.events.push(SimEvent::PathFailed { actor: id, target: target.cell });
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn assign_path(&mut self, id: ActorId, target: Target, cells: Vec<Cell>) -> SimResult<()> {
        let waypoints = optimize_path(&cells);
        if target.reserve {
            self.grid.reserve(target.cell)?;
        }

        let ts = self.config.tile_size;
        let actor = self.actors.actor_mut(id)?;
        let previous = actor.reserved.take();
        if target.reserve {
            actor.reserved = Some(target.cell);
        }
        actor.set_path(cells, ts);
        actor.blocked_ticks = 0;
        if !actor.has_path() {
            actor.dwell = self.config.dwell_ticks;
        }

        if let Some(old) = previous {
            if !(target.reserve && old == target.cell) {
                self.grid.release(old);
            }
        }

        tracing::debug!(%id, waypoints = waypoints.len(), "path assigned");
        self.events.push(SimEvent::PathAssigned { actor: id, waypoints });
        Ok(())
    }

    /// Stop an actor where it stands and give up its reservation.
    fn drop_path(&mut self, id: ActorId) {
        if let Some(actor) = self.actors.get_mut(id) {
            actor.clear_path();
            if let Some(cell) = actor.reserved.take() {
                self.grid.release(cell);
            }
        }
    }
}
