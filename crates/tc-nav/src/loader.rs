//! CSV tile-map loader.
//!
//! # CSV format
//!
//! One row per non-default tile; every cell not listed stays grass.
//!
//! ```csv
//! x,y,tile
//! 3,4,wallNorth
//! 3,5,chair
//! 10,0,entrance
//! ```
//!
//! `tile` is one of the names produced by [`TileKind::name`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tc_core::Cell;

use crate::{NavError, NavResult, TileKind, TileMap};

#[derive(Deserialize)]
struct TileRecord {
    x:    i32,
    y:    i32,
    tile: String,
}

/// Load a `width × height` map from a CSV file.
pub fn load_tiles_csv(path: &Path, width: u32, height: u32) -> NavResult<TileMap> {
    let file = std::fs::File::open(path)?;
    load_tiles_reader(file, width, height)
}

/// Like [`load_tiles_csv`] but accepts any `Read` source.
pub fn load_tiles_reader<R: Read>(reader: R, width: u32, height: u32) -> NavResult<TileMap> {
    let mut map = TileMap::new(width, height, TileKind::Grass);
    let mut csv_reader = csv::Reader::from_reader(reader);

    for (line, result) in csv_reader.deserialize::<TileRecord>().enumerate() {
        let row = result.map_err(|e| NavError::Parse(e.to_string()))?;
        let kind: TileKind = row.tile.parse()?;
        let cell = Cell::new(row.x, row.y);
        map.set(cell, kind).map_err(|_| {
            NavError::Parse(format!("row {}: cell {cell} outside {width}x{height} map", line + 1))
        })?;
    }

    Ok(map)
}
