//! `tc-goal` — where actors want to go.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`target`]  | `Target` — a destination cell plus whether to reserve it     |
//! | [`context`] | `GoalContext<'a>` — read-only view handed to the policy      |
//! | [`policy`]  | `GoalPolicy` trait, `goal_fn` closure adapter                |
//! | [`noop`]    | `NoopGoal` — never chooses anything                          |
//! | [`wander`]  | `WanderGoal` — uniformly random free cell                    |
//!
//! The tick driver owns retries: a policy may return an impassable or
//! already-reserved cell and the driver simply asks again, up to its
//! per-actor attempt budget.

pub mod context;
pub mod noop;
pub mod policy;
pub mod target;
pub mod wander;

#[cfg(test)]
mod tests;

pub use context::GoalContext;
pub use noop::NoopGoal;
pub use policy::{FnGoal, GoalPolicy, goal_fn};
pub use target::Target;
pub use wander::WanderGoal;
