use tc_actor::ActorError;
use tc_core::CoreError;
use tc_motion::MotionError;
use tc_nav::NavError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("navigation error: {0}")]
    Nav(#[from] NavError),

    #[error(transparent)]
    Actor(#[from] ActorError),

    #[error("movement error: {0}")]
    Motion(#[from] MotionError),
}

pub type SimResult<T> = Result<T, SimError>;
