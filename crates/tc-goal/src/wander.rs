//! Random wandering.

use tc_core::{ActorRng, Area};

use crate::{GoalContext, GoalPolicy, Target};

/// Picks a uniformly random free cell.
///
/// A cell is a candidate when it is passable, not reserved, not the actor's
/// own cell, and inside `area` if one is set.  Furniture (target-only or
/// non-colliding cells) is reserved on selection so two actors never head
/// for the same bed or chair.
#[derive(Clone, Debug, Default)]
pub struct WanderGoal {
    pub area: Option<Area>,
}

impl WanderGoal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only wander inside `area`.
    pub fn within(area: Area) -> Self {
        Self { area: Some(area) }
    }
}

impl GoalPolicy for WanderGoal {
    fn choose_target(&self, ctx: &GoalContext<'_>, rng: &mut ActorRng) -> Option<Target> {
        let here = ctx.actor_cell();
        let candidates = ctx.grid.cells_where(|cell, nav| {
            cell != here
                && nav.cost.is_passable()
                && !nav.reserved
                && self.area.is_none_or(|a| a.contains(cell))
        });
        let cell = *rng.choose(&candidates)?;
        let nav = ctx.grid.get(cell)?;
        Some(Target { cell, reserve: nav.target_only || !nav.collides })
    }
}
