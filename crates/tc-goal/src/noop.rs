use tc_core::ActorRng;

use crate::{GoalContext, GoalPolicy, Target};

/// A [`GoalPolicy`] that never picks a destination.  Actors stand still
/// unless given paths by hand.
pub struct NoopGoal;

impl GoalPolicy for NoopGoal {
    fn choose_target(&self, _ctx: &GoalContext<'_>, _rng: &mut ActorRng) -> Option<Target> {
        None
    }
}
