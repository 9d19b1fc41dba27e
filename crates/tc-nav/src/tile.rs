//! The tile catalogue: every kind of tile the world can hold and the
//! navigation metadata it contributes to the grid.
//!
//! Entrances list the directions a tile may be entered *from*, relative to
//! the tile itself; exits list the directions one may leave *to*.  Furniture
//! that can be used from one axis only therefore has identical entrance and
//! exit sets.

use std::fmt;
use std::str::FromStr;

use tc_core::{Dir, DirSet};

use crate::{Cost, NavError};

/// Which side of a room a wall piece faces.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    North,
    South,
    East,
    West,
}

/// Which corner of a room a corner piece occupies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// One kind of world tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Grass,
    Floor,
    Door,
    /// Where actors enter and leave the world.
    Entrance,
    /// Paved walkway; cheap to cross.
    Path,
    Rock,
    Water,
    Chair,
    Lectern,
    Bed,
    Sofa,
    BarStool,
    Wall(Facing),
    Corner(CornerKind),
}

/// Navigation metadata of a tile kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TileSpec {
    pub cost: Cost,
    pub exits: DirSet,
    pub entrances: DirSet,
    /// May only be a path's final cell.
    pub target_only: bool,
    /// `false` for furniture actors may share (chairs).
    pub collides: bool,
    /// Whether buildings may be placed over this tile.
    pub buildable: bool,
}

impl TileSpec {
    const fn open(cost: Cost, buildable: bool) -> Self {
        Self {
            cost,
            exits: DirSet::ALL,
            entrances: DirSet::ALL,
            target_only: false,
            collides: true,
            buildable,
        }
    }

    const fn restricted(dirs: DirSet) -> Self {
        Self {
            cost: Cost::Passable(10),
            exits: dirs,
            entrances: dirs,
            target_only: false,
            collides: true,
            buildable: false,
        }
    }
}

// Templates the directional pieces are derived from.
fn north_wall() -> DirSet {
    DirSet::from_dirs(&[Dir::N, Dir::E, Dir::W, Dir::NE, Dir::NW])
}

fn top_left_corner() -> DirSet {
    DirSet::from_dirs(&[Dir::NW, Dir::W, Dir::SW, Dir::N, Dir::S, Dir::E])
}

impl TileKind {
    /// Navigation metadata for this kind.
    pub fn spec(self) -> TileSpec {
        let north_south = DirSet::from_dirs(&[Dir::N, Dir::S]);
        let east_west = DirSet::from_dirs(&[Dir::E, Dir::W]);

        match self {
            TileKind::Grass    => TileSpec::open(Cost::Passable(10), true),
            TileKind::Floor    => TileSpec::open(Cost::Passable(10), false),
            TileKind::Door     => TileSpec::open(Cost::Passable(10), false),
            TileKind::Entrance => TileSpec::open(Cost::Passable(5), false),
            TileKind::Path     => TileSpec::open(Cost::Passable(1), false),
            TileKind::Rock | TileKind::Water => TileSpec::open(Cost::Impassable, false),

            TileKind::Chair => TileSpec { collides: false, ..TileSpec::restricted(north_south) },
            TileKind::Lectern => TileSpec::restricted(north_south),
            TileKind::Bed | TileKind::Sofa => {
                TileSpec { target_only: true, ..TileSpec::restricted(east_west) }
            }
            TileKind::BarStool => {
                let dirs = DirSet::from_dirs(&[Dir::W, Dir::E, Dir::S, Dir::SW, Dir::SE]);
                TileSpec { target_only: true, ..TileSpec::restricted(dirs) }
            }

            TileKind::Wall(facing) => {
                let east = north_wall().transposed();
                TileSpec::restricted(match facing {
                    Facing::North => north_wall(),
                    Facing::South => north_wall().flipped(true, true),
                    Facing::East  => east,
                    Facing::West  => east.flipped(true, true),
                })
            }
            TileKind::Corner(corner) => {
                let tl = top_left_corner();
                TileSpec::restricted(match corner {
                    CornerKind::TopLeft     => tl,
                    CornerKind::TopRight    => tl.flipped(true, false),
                    CornerKind::BottomLeft  => tl.flipped(false, true),
                    CornerKind::BottomRight => tl.flipped(true, true),
                })
            }
        }
    }

    /// Stable text name, as used in CSV maps.
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Grass    => "grass",
            TileKind::Floor    => "floor",
            TileKind::Door     => "door",
            TileKind::Entrance => "entrance",
            TileKind::Path     => "path",
            TileKind::Rock     => "rock",
            TileKind::Water    => "water",
            TileKind::Chair    => "chair",
            TileKind::Lectern  => "lectern",
            TileKind::Bed      => "bed",
            TileKind::Sofa     => "sofa",
            TileKind::BarStool => "barStool",
            TileKind::Wall(Facing::North) => "wallNorth",
            TileKind::Wall(Facing::South) => "wallSouth",
            TileKind::Wall(Facing::East)  => "wallEast",
            TileKind::Wall(Facing::West)  => "wallWest",
            TileKind::Corner(CornerKind::TopLeft)     => "cornerTl",
            TileKind::Corner(CornerKind::TopRight)    => "cornerTr",
            TileKind::Corner(CornerKind::BottomLeft)  => "cornerBl",
            TileKind::Corner(CornerKind::BottomRight) => "cornerBr",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileKind {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "grass"     => TileKind::Grass,
            "floor"     => TileKind::Floor,
            "door"      => TileKind::Door,
            "entrance"  => TileKind::Entrance,
            "path"      => TileKind::Path,
            "rock"      => TileKind::Rock,
            "water"     => TileKind::Water,
            "chair"     => TileKind::Chair,
            "lectern" | "lecturn" => TileKind::Lectern,
            "bed"       => TileKind::Bed,
            "sofa"      => TileKind::Sofa,
            "barStool"  => TileKind::BarStool,
            "wallNorth" => TileKind::Wall(Facing::North),
            "wallSouth" => TileKind::Wall(Facing::South),
            "wallEast"  => TileKind::Wall(Facing::East),
            "wallWest"  => TileKind::Wall(Facing::West),
            "cornerTl"  => TileKind::Corner(CornerKind::TopLeft),
            "cornerTr"  => TileKind::Corner(CornerKind::TopRight),
            "cornerBl"  => TileKind::Corner(CornerKind::BottomLeft),
            "cornerBr"  => TileKind::Corner(CornerKind::BottomRight),
            other => return Err(NavError::UnknownTile(other.to_string())),
        })
    }
}
