//! Strongly typed actor identifier.
//!
//! Ids are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Ids are handed out monotonically
//! by the actor registry and never reused, so an id stays stable for the
//! whole lifetime of the actor it names.

use std::fmt;

/// Identity of one actor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: ActorId = ActorId(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The id following `self` in allocation order.
    #[inline]
    pub fn next(self) -> ActorId {
        ActorId(self.0 + 1)
    }
}

impl Default for ActorId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl From<ActorId> for usize {
    #[inline(always)]
    fn from(id: ActorId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for ActorId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<ActorId, Self::Error> {
        u32::try_from(n).map(ActorId)
    }
}
