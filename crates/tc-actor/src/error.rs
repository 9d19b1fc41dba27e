use thiserror::Error;

use tc_core::ActorId;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("actor {0} not found")]
    NotFound(ActorId),
}

pub type ActorResult<T> = Result<T, ActorError>;
