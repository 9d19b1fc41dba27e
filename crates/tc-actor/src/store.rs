//! The actor registry: `ActorStore`.
//!
//! # Records and RNGs side by side
//!
//! Actor records and their RNGs live in two maps keyed by the same id.  The
//! goal policy needs `&Actor` and `&mut ActorRng` at once, which
//! [`ActorStore::split`] hands out without cloning either.
//!
//! Ids are allocated monotonically and never reused, so a removed actor's id
//! cannot be confused with a later arrival.  Iteration is always in
//! ascending id order, which keeps every tick deterministic.

use std::collections::BTreeMap;

use tc_core::{ActorId, ActorRng, Point};

use crate::{Actor, ActorError, ActorResult, Attributes};

pub struct ActorStore {
    seed:   u64,
    next:   ActorId,
    actors: BTreeMap<ActorId, Actor>,
    rngs:   BTreeMap<ActorId, ActorRng>,
}

impl ActorStore {
    /// An empty registry whose actors draw from streams derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed, next: ActorId(0), actors: BTreeMap::new(), rngs: BTreeMap::new() }
    }

    /// Create an actor at `position` with the standard attribute set.
    ///
    /// The path weight is drawn uniformly from `[1, 2)` off the actor's own
    /// RNG, so it depends only on the seed and the id.
    pub fn spawn(&mut self, position: Point) -> ActorId {
        self.spawn_with(position, Attributes::standard())
    }

    pub fn spawn_with(&mut self, position: Point, attributes: Attributes) -> ActorId {
        let id = self.next;
        self.next = id.next();

        let mut rng = ActorRng::new(self.seed, id);
        let weight: f32 = rng.gen_range(1.0..2.0);
        let mut actor = Actor::new(id, position, weight);
        actor.attributes = attributes;

        self.actors.insert(id, actor);
        self.rngs.insert(id, rng);
        id
    }

    /// Remove an actor and its RNG, returning the record.
    pub fn remove(&mut self, id: ActorId) -> ActorResult<Actor> {
        self.rngs.remove(&id);
        self.actors.remove(&id).ok_or(ActorError::NotFound(id))
    }

    #[inline]
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Like [`get`](Self::get) but reports a missing actor as an error.
    pub fn actor(&self, id: ActorId) -> ActorResult<&Actor> {
        self.get(id).ok_or(ActorError::NotFound(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> ActorResult<&mut Actor> {
        self.get_mut(id).ok_or(ActorError::NotFound(id))
    }

    /// Simultaneous mutable access to an actor and its RNG.
    pub fn split(&mut self, id: ActorId) -> Option<(&mut Actor, &mut ActorRng)> {
        let actor = self.actors.get_mut(&id)?;
        let rng = self.rngs.get_mut(&id)?;
        Some((actor, rng))
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Snapshot of live ids in ascending order, for loops that mutate the
    /// store as they go.
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    /// `(id, actor)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.actors.iter().map(|(id, a)| (*id, a))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ActorId, &mut Actor)> + '_ {
        self.actors.iter_mut().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
