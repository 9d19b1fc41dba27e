//! Grid geometry: cells, the eight compass directions, bearings and
//! sub-cell positions.
//!
//! # Coordinate system
//!
//! Cells are addressed by integer `(x, y)` with `x` growing east and `y`
//! growing south, so `Dir::N` is `(0, -1)`.  Actors live in a finer,
//! continuous-looking coordinate space of *sub-cell units*: a cell spans
//! `tile_size` units on each axis and an actor standing "on" a cell sits at
//! its centre, `cell * tile_size + tile_size / 2`.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One grid tile, identified by integer coordinates.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in direction `dir`.  May lie off-grid.
    #[inline]
    pub fn step(self, dir: Dir) -> Cell {
        let (dx, dy) = dir.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The cell reached by following `bearing` once.  Equals `self` for a
    /// zero bearing.
    #[inline]
    pub fn ahead(self, bearing: Bearing) -> Cell {
        Cell::new(self.x + bearing.x as i32, self.y + bearing.y as i32)
    }

    /// Direction from `self` to an adjacent `other`, or `None` if the two
    /// cells are identical or not neighbours (including diagonals).
    pub fn dir_to(self, other: Cell) -> Option<Dir> {
        Dir::from_delta(other.x - self.x, other.y - self.y)
    }

    /// `true` if `other` is one of the eight neighbours of `self`.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.dir_to(other).is_some()
    }

    /// Sub-cell coordinate of this cell's centre.
    #[inline]
    pub fn center(self, tile_size: u32) -> Point {
        let ts = tile_size as i32;
        Point::new(self.x * ts + ts / 2, self.y * ts + ts / 2)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Dir ───────────────────────────────────────────────────────────────────────

/// The eight compass directions a step between adjacent cells can take.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Dir {
    pub const ALL: [Dir; 8] = [Dir::N, Dir::NE, Dir::E, Dir::SE, Dir::S, Dir::SW, Dir::W, Dir::NW];

    /// Relative `(dx, dy)` vector of one step.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Dir::N  => (0, -1),
            Dir::NE => (1, -1),
            Dir::E  => (1, 0),
            Dir::SE => (1, 1),
            Dir::S  => (0, 1),
            Dir::SW => (-1, 1),
            Dir::W  => (-1, 0),
            Dir::NW => (-1, -1),
        }
    }

    /// Inverse of [`delta`](Self::delta).  `None` for `(0, 0)` or any vector
    /// longer than one step.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Dir> {
        Some(match (dx, dy) {
            (0, -1)  => Dir::N,
            (1, -1)  => Dir::NE,
            (1, 0)   => Dir::E,
            (1, 1)   => Dir::SE,
            (0, 1)   => Dir::S,
            (-1, 1)  => Dir::SW,
            (-1, 0)  => Dir::W,
            (-1, -1) => Dir::NW,
            _ => return None,
        })
    }

    /// The opposite direction.
    #[inline]
    pub fn inverse(self) -> Dir {
        let (dx, dy) = self.delta();
        match Dir::from_delta(-dx, -dy) {
            Some(d) => d,
            None => unreachable!("every direction has an inverse"),
        }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

// ── DirSet ────────────────────────────────────────────────────────────────────

/// A set of directions stored as an 8-bit mask.
///
/// Used for the per-cell entry and exit restrictions of the navigation grid:
/// an unrestricted cell carries [`DirSet::ALL`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirSet(u8);

impl DirSet {
    pub const EMPTY: DirSet = DirSet(0);
    pub const ALL: DirSet = DirSet(0xff);

    pub fn from_dirs(dirs: &[Dir]) -> Self {
        dirs.iter().fold(Self::EMPTY, |set, &d| set.with(d))
    }

    /// Build from relative `(dx, dy)` vectors, ignoring anything that is not
    /// a single step.
    pub fn from_deltas(deltas: &[(i32, i32)]) -> Self {
        deltas
            .iter()
            .filter_map(|&(dx, dy)| Dir::from_delta(dx, dy))
            .fold(Self::EMPTY, |set, d| set.with(d))
    }

    #[inline]
    pub fn contains(self, dir: Dir) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn with(self, dir: Dir) -> Self {
        DirSet(self.0 | dir.bit())
    }

    #[inline]
    pub fn is_all(self) -> bool {
        self == Self::ALL
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Dir> {
        Dir::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// Mirror every direction, negating x and/or y.
    pub fn flipped(self, flip_x: bool, flip_y: bool) -> Self {
        self.map(|dx, dy| {
            (if flip_x { -dx } else { dx }, if flip_y { -dy } else { dy })
        })
    }

    /// Swap the axes of every direction (x becomes y and y becomes x).
    pub fn transposed(self) -> Self {
        self.map(|dx, dy| (dy, dx))
    }

    fn map(self, f: impl Fn(i32, i32) -> (i32, i32)) -> Self {
        self.iter()
            .filter_map(|d| {
                let (dx, dy) = d.delta();
                let (nx, ny) = f(dx, dy);
                Dir::from_delta(nx, ny)
            })
            .fold(Self::EMPTY, |set, d| set.with(d))
    }
}

impl Default for DirSet {
    /// Unrestricted.
    fn default() -> Self {
        Self::ALL
    }
}

// ── Bearing ───────────────────────────────────────────────────────────────────

/// An actor's direction of travel.  Each component is `-1`, `0` or `1`;
/// `(0, 0)` means stationary.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bearing {
    pub x: i8,
    pub y: i8,
}

impl Bearing {
    pub const ZERO: Bearing = Bearing { x: 0, y: 0 };

    /// Bearing that points from `from` towards `to`, axis by axis.
    pub fn towards(from: Point, to: Point) -> Self {
        Self {
            x: (to.x - from.x).signum() as i8,
            y: (to.y - from.y).signum() as i8,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }

    #[inline]
    pub fn negated(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }

    pub fn dir(self) -> Option<Dir> {
        Dir::from_delta(self.x as i32, self.y as i32)
    }
}

impl From<Dir> for Bearing {
    fn from(dir: Dir) -> Self {
        let (dx, dy) = dir.delta();
        Self { x: dx as i8, y: dy as i8 }
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position in sub-cell units.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing this point (floor division, so negative
    /// coordinates map to negative cells).
    #[inline]
    pub fn cell(self, tile_size: u32) -> Cell {
        let ts = tile_size as i32;
        Cell::new(self.x.div_euclid(ts), self.y.div_euclid(ts))
    }

    /// Move by `bearing * step` on each axis.
    #[inline]
    pub fn advanced(self, bearing: Bearing, step: i32) -> Point {
        Point::new(self.x + bearing.x as i32 * step, self.y + bearing.y as i32 * step)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

// ── Area ──────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle of cells, `x..x+width` by `y..y+height`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Area {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x
            && cell.y >= self.y
            && cell.x < self.x + self.width as i32
            && cell.y < self.y + self.height as i32
    }

    /// Every cell of the area in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.y..self.y + self.height as i32)
            .flat_map(move |y| (self.x..self.x + self.width as i32).map(move |x| Cell::new(x, y)))
    }
}
