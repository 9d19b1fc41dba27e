//! `tc-nav` — navigation grid, A* pathfinding and path compaction.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`tile`]       | `TileKind`, `TileSpec` — the tile catalogue              |
//! | [`map`]        | `TileMap` — the raw world tiles                          |
//! | [`grid`]       | `NavGrid`, `NavCell`, `Cost` — per-cell traversal data   |
//! | [`pathfinder`] | `Pathfinder` trait, `AStarPathfinder`, `Path`, `SearchTrace` |
//! | [`optimize`]   | `optimize_path`, `expand_waypoints`                      |
//! | [`loader`]     | `load_tiles_csv`, `load_tiles_reader`                    |
//! | [`error`]      | `NavError`, `NavResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod loader;
pub mod map;
pub mod optimize;
pub mod pathfinder;
pub mod tile;


pub use error::{NavError, NavResult};
pub use grid::{Cost, NavCell, NavGrid};
pub use loader::{load_tiles_csv, load_tiles_reader};
pub use map::TileMap;
pub use optimize::{expand_waypoints, optimize_path};
pub use pathfinder::{
    AStarPathfinder, NoopTrace, Path, PathQuery, Pathfinder, SearchLimits, SearchTrace,
};
pub use tile::{CornerKind, Facing, TileKind, TileSpec};
