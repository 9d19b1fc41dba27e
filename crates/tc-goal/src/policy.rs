//! The `GoalPolicy` trait — the destination-choice extension point.

use tc_core::ActorRng;

use crate::{GoalContext, Target};

/// Pluggable destination choice.
///
/// Called by the tick driver for each path-less actor that is neither
/// dwelling nor leaving.  All randomness must come from `rng`, the actor's
/// own stream, so a run replays identically from its seed.
///
/// Returning `None` means "stay put this tick"; the driver will ask again
/// on the next one.
pub trait GoalPolicy: Send + Sync + 'static {
    fn choose_target(&self, ctx: &GoalContext<'_>, rng: &mut ActorRng) -> Option<Target>;
}

/// A [`GoalPolicy`] backed by a closure.  Build one with [`goal_fn`].
pub struct FnGoal<F>(F);

/// Wrap a closure as a [`GoalPolicy`].
///
/// ```rust,ignore
/// let go_home = goal_fn(|_ctx, _rng| Some(Target::at(Cell::new(0, 0))));
/// ```
pub fn goal_fn<F>(f: F) -> FnGoal<F>
where
    F: Fn(&GoalContext<'_>, &mut ActorRng) -> Option<Target> + Send + Sync + 'static,
{
    FnGoal(f)
}

impl<F> GoalPolicy for FnGoal<F>
where
    F: Fn(&GoalContext<'_>, &mut ActorRng) -> Option<Target> + Send + Sync + 'static,
{
    fn choose_target(&self, ctx: &GoalContext<'_>, rng: &mut ActorRng) -> Option<Target> {
        (self.0)(ctx, rng)
    }
}
