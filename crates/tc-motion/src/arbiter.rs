//! The Collision Arbiter.
//!
//! # Rules, per actor with a non-zero bearing
//!
//! 1. A step that stays inside the current cell is always allowed.
//! 2. A step into an empty cell is allowed.
//! 3. A step into an occupied cell is allowed if the first occupant is
//!    heading the exact opposite way (the two squeeze past each other) or
//!    the cell's tile has collisions disabled (chairs).
//! 4. Otherwise the step is refused, unless the [`DeadlockBreaker`] finds a
//!    circular wait through this actor, in which case this actor, the one
//!    that found the cycle, is let through.
//!
//! A diagonal step on which only one axis would cross a cell boundary is
//! not taken; the actor is realigned onto its cell centre instead so the
//! next tick crosses both boundaries together.
//!
//! The blocked map remembers each arbitrated actor's last verdict.  Any
//! verdict flip during a pass sets [`ArbitrationOutcome::blocked_changed`]
//! once, for the whole pass.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use tc_actor::{ActorError, ActorStore};
use tc_core::{ActorId, Cell, Point};
use tc_nav::NavGrid;

use crate::{DeadlockBreaker, MotionResult, OccupancyIndex};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArbiterConfig {
    /// With collisions off every step is allowed and no verdicts are kept.
    pub collisions: bool,
    pub break_deadlocks: bool,
    /// Longest wait chain the deadlock breaker follows.
    pub deadlock_max_hops: u32,
    /// Consecutive refused ticks after which an actor is told to re-plan.
    /// `0` disables the bound.
    pub replan_after_blocked_ticks: u32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            collisions: true,
            break_deadlocks: true,
            deadlock_max_hops: 10,
            replan_after_blocked_ticks: 40,
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Move/no-move decisions of one arbitration pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArbitrationOutcome {
    /// Actors that took a step, in pass order.
    pub moved: Vec<ActorId>,
    /// Actors whose step was refused.
    pub blocked: Vec<ActorId>,
    /// Actors let through by the deadlock breaker (also in `moved`).
    pub deadlocks_broken: Vec<ActorId>,
    /// Actors that reached their next waypoint this pass.
    pub arrived: Vec<ActorId>,
    /// Some actor's blocked verdict flipped this pass.
    pub blocked_changed: bool,
}

/// One entry of the blocked-actor report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockedInfo {
    pub position: Point,
    pub path:     Vec<Cell>,
    pub blocked:  bool,
}

// ── CollisionArbiter ──────────────────────────────────────────────────────────

pub struct CollisionArbiter {
    config:   ArbiterConfig,
    breaker:  DeadlockBreaker,
    /// Last verdict per actor: `true` = refused.
    blocked:  FxHashMap<ActorId, bool>,
}

impl CollisionArbiter {
    pub fn new(config: ArbiterConfig) -> Self {
        Self {
            config,
            breaker: DeadlockBreaker::new(config.deadlock_max_hops),
            blocked: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// Was `actor` refused on its last arbitrated step?
    pub fn is_blocked(&self, actor: ActorId) -> bool {
        self.blocked.get(&actor).copied().unwrap_or(false)
    }

    /// Discard everything remembered about `actor`.  Returns whether it had
    /// a verdict, i.e. whether [`blocked_info`](Self::blocked_info) changed.
    pub fn forget(&mut self, actor: ActorId) -> bool {
        self.blocked.remove(&actor).is_some()
    }

    /// Actors refused for at least `replan_after_blocked_ticks` consecutive
    /// ticks.  Always empty when the bound is disabled.
    pub fn starved(&self, actors: &ActorStore) -> Vec<ActorId> {
        let limit = self.config.replan_after_blocked_ticks;
        if limit == 0 {
            return Vec::new();
        }
        actors
            .iter()
            .filter(|(_, a)| a.blocked_ticks >= limit)
            .map(|(id, _)| id)
            .collect()
    }

    /// The per-actor report sent to observers when verdicts change.
    pub fn blocked_info(&self, actors: &ActorStore) -> BTreeMap<ActorId, BlockedInfo> {
        self.blocked
            .iter()
            .filter_map(|(&id, &blocked)| {
                let a = actors.get(id)?;
                Some((id, BlockedInfo {
                    position: a.position,
                    path: a.path().iter().copied().collect(),
                    blocked,
                }))
            })
            .collect()
    }

    /// Run one arbitration pass over every actor in `actors`.
    ///
    /// Actors not yet in `index` are placed on the cell under their position
    /// first.  Each moving actor advances by `step` sub-cell units.
    pub fn arbitrate(
        &mut self,
        actors:    &mut ActorStore,
        index:     &mut OccupancyIndex,
        grid:      &NavGrid,
        step:      i32,
        tile_size: u32,
    ) -> MotionResult<ArbitrationOutcome> {
        let mut out = ArbitrationOutcome::default();
        let mut verdicts: FxHashMap<ActorId, bool> = FxHashMap::default();

        for id in actors.ids() {
            let actor = actors.actor(id)?;
            let here = match index.cell_of(id) {
                Some(c) => c,
                None => {
                    let c = actor.cell(tile_size);
                    index.place_or_move(id, c)?;
                    c
                }
            };
            if actor.bearing.is_zero() {
                continue;
            }

            let bearing = actor.bearing;
            let next = actor.next_position(step, tile_size).cell(tile_size);

            if bearing.is_diagonal() && ((next.x == here.x) != (next.y == here.y)) {
                let actor = actors.actor_mut(id)?;
                actor.position = here.center(tile_size);
                actor.recalculate_bearing(tile_size);
                tracing::trace!(%id, %here, "stepped diagonal realigned");
                continue;
            }

            let mut can_move = next == here || !self.config.collisions;
            if !can_move {
                can_move = match index.first_other_occupant(next, id) {
                    None => true,
                    Some(other) => {
                        let theirs = actors.get(other).map(|o| o.bearing);
                        theirs == Some(bearing.negated()) || !grid.collides(next)
                    }
                };
            }
            if !can_move && self.config.break_deadlocks {
                verdicts.insert(id, true);
                if let Some(cycle) = self.breaker.find_cycle(id, actors, index, &verdicts) {
                    tracing::debug!(%id, len = cycle.len(), "deadlock broken");
                    out.deadlocks_broken.push(id);
                    can_move = true;
                }
            }

            verdicts.insert(id, !can_move);
            let actor = actors.get_mut(id).ok_or(ActorError::NotFound(id))?;
            if can_move {
                if next != here {
                    index.place_or_move(id, next)?;
                }
                if actor.apply_bearing(step, tile_size) {
                    out.arrived.push(id);
                }
                actor.blocked_ticks = 0;
                out.moved.push(id);
            } else {
                actor.blocked_ticks += 1;
                tracing::trace!(%id, %here, %next, "step refused");
                out.blocked.push(id);
            }

            if self.config.collisions && self.blocked.insert(id, !can_move) != Some(!can_move) {
                out.blocked_changed = true;
            }
        }

        Ok(out)
    }
}
