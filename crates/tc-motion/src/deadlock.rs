//! Circular-wait detection.
//!
//! Starting from a blocked actor, follow "who stands on the cell I am
//! heading for" until the chain either comes back to the start (a cycle)
//! or breaks.  The chain breaks on an empty cell, on an actor with zero
//! bearing, on an actor that has already been allowed to move this tick,
//! on a loop that does not pass through the start, or when the hop budget
//! runs out.
//!
//! Actors not yet arbitrated this tick count as waiting: their next cell is
//! occupied by the following chain member, so they would be refused too.

use rustc_hash::FxHashMap;

use tc_actor::ActorStore;
use tc_core::ActorId;

use crate::OccupancyIndex;

#[derive(Copy, Clone, Debug)]
pub struct DeadlockBreaker {
    pub max_hops: u32,
}

impl DeadlockBreaker {
    pub fn new(max_hops: u32) -> Self {
        Self { max_hops }
    }

    /// The cycle through `start`, beginning with `start`, or `None` if
    /// there is none within `max_hops` hops.
    ///
    /// `blocked` holds this tick's verdicts so far (`true` = refused).
    pub fn find_cycle(
        &self,
        start:   ActorId,
        actors:  &ActorStore,
        index:   &OccupancyIndex,
        blocked: &FxHashMap<ActorId, bool>,
    ) -> Option<Vec<ActorId>> {
        let mut chain = vec![start];
        let mut id = start;

        for _ in 0..self.max_hops {
            let actor = actors.get(id)?;
            if actor.bearing.is_zero() || blocked.get(&id) == Some(&false) {
                return None;
            }
            let wanted = index.cell_of(id)?.ahead(actor.bearing);
            let next = index.first_other_occupant(wanted, id)?;
            if next == start {
                return Some(chain);
            }
            if chain.contains(&next) {
                return None;
            }
            chain.push(next);
            id = next;
        }
        None
    }
}

impl Default for DeadlockBreaker {
    fn default() -> Self {
        Self::new(10)
    }
}
