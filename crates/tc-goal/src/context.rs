//! Read-only state passed to every goal-policy call.

use tc_actor::Actor;
use tc_core::{Cell, Tick};
use tc_nav::NavGrid;

/// What a [`GoalPolicy`](crate::GoalPolicy) may look at when choosing.
///
/// Built by the tick driver for one actor at a time; nothing it borrows can
/// change while the policy runs.
pub struct GoalContext<'a> {
    pub tick:      Tick,
    pub grid:      &'a NavGrid,
    pub actor:     &'a Actor,
    pub tile_size: u32,
}

impl<'a> GoalContext<'a> {
    #[inline]
    pub fn new(tick: Tick, grid: &'a NavGrid, actor: &'a Actor, tile_size: u32) -> Self {
        Self { tick, grid, actor, tile_size }
    }

    /// The cell the actor is standing on.
    #[inline]
    pub fn actor_cell(&self) -> Cell {
        self.actor.cell(self.tile_size)
    }
}
