//! `tc-motion` — who stands where, and who may move next.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`occupancy`] | `OccupancyIndex` — cell → occupants and actor → cell            |
//! | [`arbiter`]   | `CollisionArbiter`, `ArbiterConfig`, `ArbitrationOutcome`       |
//! | [`deadlock`]  | `DeadlockBreaker` — circular-wait detection                     |
//! | [`error`]     | `MotionError`, `MotionResult<T>`                                |
//!
//! # Tick model
//!
//! Arbitration is a single sequential pass over all actors in ascending id
//! order.  Each actor either moves one step along its bearing or stays put;
//! the occupancy index is updated immediately, so later actors in the pass
//! see the earlier actors' new cells.  Nothing else mutates the index while
//! a pass runs.

pub mod arbiter;
pub mod deadlock;
pub mod error;
pub mod occupancy;

#[cfg(test)]
mod tests;

pub use arbiter::{ArbiterConfig, ArbitrationOutcome, BlockedInfo, CollisionArbiter};
pub use deadlock::DeadlockBreaker;
pub use error::{MotionError, MotionResult};
pub use occupancy::OccupancyIndex;
