//! `tc-sim` — the tick driver for the `tilecrowd` simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Replan    — for each path-less actor, in ascending ActorId order:
//!                   dwelling  → count down, skip (unless leaving)
//!                   leaving   → route to config.exit_cell
//!                   otherwise → ask the GoalPolicy for a target
//!                 then run the Pathfinder.  Failed targets are blacklisted
//!                 and another is tried, within a per-tick search budget.
//!   ② Arbitrate — one CollisionArbiter pass over every actor.
//!   ③ Report    — queue BlockedChanged if any verdict flipped, start
//!                 dwelling for actors that reached their destination,
//!                 drop the paths of actors blocked for too long, and
//!                 announce leaving actors standing on the exit.
//! ```
//!
//! Events accumulate in a queue.  [`Sim::tick`] leaves them there for the
//! caller to [`drain`](Sim::drain_events); [`Sim::run`] hands each tick's
//! batch to the [`SimObserver`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tc_core::SimConfig;
//! use tc_goal::WanderGoal;
//! use tc_nav::{AStarPathfinder, TileKind, TileMap};
//! use tc_sim::{NoopObserver, SimBuilder};
//!
//! let map = TileMap::new(40, 30, TileKind::Grass);
//! let mut sim = SimBuilder::new(SimConfig::default(), map, AStarPathfinder::default(), WanderGoal::new())
//!     .spawn_at(tc_core::Cell::new(0, 0))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{SimEvent, TickReport};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
