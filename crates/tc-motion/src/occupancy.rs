//! The Spatial Occupancy Index.
//!
//! A dense per-cell occupant list plus a sparse reverse map from actor to
//! cell.  Between ticks every tracked actor appears in exactly one cell's
//! list and that cell is the one the reverse map records.
//!
//! Occupant lists are in arrival order; the first entry is the one the
//! arbiter inspects when a cell is contested.

use rustc_hash::FxHashMap;

use tc_core::{ActorId, Cell};
use tc_nav::NavGrid;

use crate::{MotionError, MotionResult};

#[derive(Clone, Debug)]
pub struct OccupancyIndex {
    width:  u32,
    height: u32,
    cells:  Vec<Vec<ActorId>>,
    actors: FxHashMap<ActorId, Cell>,
}

impl OccupancyIndex {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width as usize * height as usize],
            actors: FxHashMap::default(),
        }
    }

    /// An empty index covering the same area as `grid`.
    pub fn for_grid(grid: &NavGrid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Record `actor` as standing on `cell`, leaving whatever cell it was on.
    /// Returns the previous cell, if the actor was tracked.
    pub fn place_or_move(&mut self, actor: ActorId, cell: Cell) -> MotionResult<Option<Cell>> {
        let to = self.index(cell).ok_or(MotionError::OutOfBounds { actor, cell })?;
        let prev = self.actors.insert(actor, cell);
        if prev == Some(cell) {
            return Ok(prev);
        }
        if let Some(from) = prev.and_then(|c| self.index(c)) {
            self.cells[from].retain(|&a| a != actor);
        }
        self.cells[to].push(actor);
        Ok(prev)
    }

    /// Stop tracking `actor`.  Returns the cell it stood on.
    pub fn remove(&mut self, actor: ActorId) -> Option<Cell> {
        let cell = self.actors.remove(&actor)?;
        if let Some(i) = self.index(cell) {
            self.cells[i].retain(|&a| a != actor);
        }
        Some(cell)
    }

    /// Actors on `cell`, in arrival order.  Empty for off-grid cells.
    pub fn occupants(&self, cell: Cell) -> &[ActorId] {
        match self.index(cell) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| !self.cells[i].is_empty())
    }

    /// The first occupant of `cell` other than `actor`.
    pub fn first_other_occupant(&self, cell: Cell, actor: ActorId) -> Option<ActorId> {
        self.occupants(cell).iter().copied().find(|&a| a != actor)
    }

    #[inline]
    pub fn cell_of(&self, actor: ActorId) -> Option<Cell> {
        self.actors.get(&actor).copied()
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.actors.contains_key(&actor)
    }

    /// Number of tracked actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Drop every tracked actor for which `keep` is false.
    pub fn retain(&mut self, mut keep: impl FnMut(ActorId) -> bool) {
        let gone: Vec<ActorId> = self.actors.keys().copied().filter(|&a| !keep(a)).collect();
        for a in gone {
            self.remove(a);
        }
    }

    /// Non-empty cells with their occupants, row-major.  For debug views.
    pub fn snapshot(&self) -> Vec<(Cell, Vec<ActorId>)> {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occ)| !occ.is_empty())
            .map(|(i, occ)| (Cell::new((i % w) as i32, (i / w) as i32), occ.clone()))
            .collect()
    }
}
