//! `tc-actor` — actor records and the actor registry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`actor`]       | `Actor`: position, bearing, remaining path, weight        |
//! | [`attributes`]  | `Attributes` — named integer attributes in `[0, 1000]`    |
//! | [`store`]       | `ActorStore` (records by id) with per-actor RNGs          |
//! | [`error`]       | `ActorError`, `ActorResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Actor` and `Attributes`. |

pub mod actor;
pub mod attributes;
pub mod error;
pub mod store;


pub use actor::Actor;
pub use attributes::{ATTRIBUTE_MAX, ATTRIBUTE_MIN, Attributes};
pub use error::{ActorError, ActorResult};
pub use store::ActorStore;
