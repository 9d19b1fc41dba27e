//! The navigation grid: per-cell traversal cost and directional
//! restrictions derived from the tile map.
//!
//! # Data layout
//!
//! One [`NavCell`] per tile, row-major, so the pathfinder's neighbour scan
//! touches contiguous memory.  The grid is built once from a [`TileMap`] and
//! then patched cell by cell as tiles change; the blacklist and reservation
//! flags are state of the grid itself and survive patches of *other* cells.

use tc_core::{Cell, Dir, DirSet};

use crate::{NavError, NavResult, TileMap};

// ── Cost ──────────────────────────────────────────────────────────────────────

/// Traversal cost of a cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cost {
    Passable(u32),
    Impassable,
}

impl Cost {
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, Cost::Passable(_))
    }

    /// The passable cost, or `None` for impassable cells.
    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            Cost::Passable(c) => Some(c),
            Cost::Impassable => None,
        }
    }
}

// ── NavCell ───────────────────────────────────────────────────────────────────

/// Everything the pathfinder and the collision arbiter need to know about a
/// single cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavCell {
    pub cost: Cost,
    /// Directions one may step *to* when leaving this cell.
    pub exits: DirSet,
    /// Directions (relative to this cell) one may arrive *from*.
    pub entrances: DirSet,
    pub target_only: bool,
    pub collides: bool,
    /// Claimed as a destination by some actor.
    pub reserved: bool,
}

impl Default for NavCell {
    fn default() -> Self {
        Self {
            cost:        Cost::Passable(10),
            exits:       DirSet::ALL,
            entrances:   DirSet::ALL,
            target_only: false,
            collides:    true,
            reserved:    false,
        }
    }
}

impl NavCell {
    /// May an actor standing here step in direction `dir`?
    #[inline]
    pub fn can_exit(&self, dir: Dir) -> bool {
        self.exits.contains(dir)
    }

    /// May an actor moving in direction `dir` enter this cell?  Entrances
    /// are stored relative to the cell, so the check uses the inverse.
    #[inline]
    pub fn can_enter_moving(&self, dir: Dir) -> bool {
        self.entrances.contains(dir.inverse())
    }
}

// ── NavGrid ───────────────────────────────────────────────────────────────────

/// Dense navigation matrix over the whole world.
#[derive(Clone, Debug)]
pub struct NavGrid {
    width:  u32,
    height: u32,
    cells:  Vec<NavCell>,
}

impl NavGrid {
    /// A grid where every cell is `cell`.  Handy for tests and open terrain.
    pub fn uniform(width: u32, height: u32, cell: NavCell) -> Self {
        Self { width, height, cells: vec![cell; width as usize * height as usize] }
    }

    /// Derive the grid from the tile catalogue.
    pub fn from_tiles(map: &TileMap) -> Self {
        let cells = map
            .cells()
            .map(|c| nav_cell_for(map, c))
            .collect();
        Self { width: map.width(), height: map.height(), cells }
    }

    /// Re-derive a single cell after its tile changed.
    ///
    /// Clears any blacklist on that cell; the reservation flag is kept,
    /// since it belongs to whichever actor claimed the spot.
    pub fn patch(&mut self, map: &TileMap, cell: Cell) -> NavResult<()> {
        let i = self.index(cell).ok_or(NavError::OutOfBounds(cell))?;
        let reserved = self.cells[i].reserved;
        self.cells[i] = NavCell { reserved, ..nav_cell_for(map, cell) };
        Ok(())
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Row-major index of `cell`, or `None` if off-grid.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((index % w) as i32, (index / w) as i32)
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&NavCell> {
        self.index(cell).map(|i| &self.cells[i])
    }

    /// Cell data by row-major index.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn by_index(&self, index: usize) -> &NavCell {
        &self.cells[index]
    }

    #[inline]
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut NavCell> {
        self.index(cell).map(|i| &mut self.cells[i])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// In bounds and not impassable.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|c| c.cost.is_passable())
    }

    /// Do actors bump into each other on this cell?  Off-grid cells collide.
    pub fn collides(&self, cell: Cell) -> bool {
        self.get(cell).is_none_or(|c| c.collides)
    }

    /// Mark `cell` permanently impassable.  Used to stop actors retrying a
    /// target the pathfinder could not reach.
    pub fn blacklist(&mut self, cell: Cell) -> NavResult<()> {
        let c = self.get_mut(cell).ok_or(NavError::OutOfBounds(cell))?;
        c.cost = Cost::Impassable;
        Ok(())
    }

    pub fn is_reserved(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|c| c.reserved)
    }

    /// Claim `cell`.  Returns `false` if it was already reserved.
    pub fn reserve(&mut self, cell: Cell) -> NavResult<bool> {
        let c = self.get_mut(cell).ok_or(NavError::OutOfBounds(cell))?;
        Ok(!std::mem::replace(&mut c.reserved, true))
    }

    /// Release a claim on `cell`.  Off-grid cells are ignored.
    pub fn release(&mut self, cell: Cell) {
        if let Some(c) = self.get_mut(cell) {
            c.reserved = false;
        }
    }

    /// Every cell satisfying `pred`, row-major.
    pub fn cells_where(&self, pred: impl Fn(Cell, &NavCell) -> bool) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.cell_at(i), c))
            .filter(|(cell, c)| pred(*cell, c))
            .map(|(cell, _)| cell)
            .collect()
    }
}

fn nav_cell_for(map: &TileMap, cell: Cell) -> NavCell {
    let spec = map.get(cell).unwrap_or_default().spec();
    NavCell {
        cost:        spec.cost,
        exits:       spec.exits,
        entrances:   spec.entrances,
        target_only: spec.target_only,
        collides:    spec.collides,
        reserved:    false,
    }
}
