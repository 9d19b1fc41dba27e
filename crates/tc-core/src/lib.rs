//! `tc-core` — foundational types for the `tilecrowd` simulation.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no
//! `tc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `ActorId`                                                 |
//! | [`grid`]   | `Cell`, `Dir`, `DirSet`, `Bearing`, `Point`, `Area`       |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]    | `ActorRng` — one deterministic stream per actor          |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use grid::{Area, Bearing, Cell, Dir, DirSet, Point};
pub use ids::ActorId;
pub use rng::ActorRng;
pub use time::{SimClock, SimConfig, Tick};
