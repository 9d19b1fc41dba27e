use tc_actor::ActorError;
use tc_core::{ActorId, Cell};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("actor {actor} cannot stand on {cell}: outside the occupancy grid")]
    OutOfBounds { actor: ActorId, cell: Cell },

    #[error(transparent)]
    Actor(#[from] ActorError),
}

pub type MotionResult<T> = Result<T, MotionError>;
