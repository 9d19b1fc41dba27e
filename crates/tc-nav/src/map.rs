//! The raw world: a dense `width × height` array of [`TileKind`]s.

use tc_core::{Area, Cell};

use crate::{NavError, NavResult, TileKind};

/// Row-major tile storage.  `tiles[y * width + x]` is the kind at `(x, y)`.
#[derive(Clone, Debug)]
pub struct TileMap {
    width:  u32,
    height: u32,
    tiles:  Vec<TileKind>,
}

impl TileMap {
    /// A map of the given size with every tile set to `fill`.
    pub fn new(width: u32, height: u32, fill: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    pub fn get(&self, cell: Cell) -> Option<TileKind> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Replace the tile at `cell`, returning the previous kind.
    pub fn set(&mut self, cell: Cell, kind: TileKind) -> NavResult<TileKind> {
        let i = self.index(cell).ok_or(NavError::OutOfBounds(cell))?;
        Ok(std::mem::replace(&mut self.tiles[i], kind))
    }

    /// Set every in-bounds tile of `area` to `kind`.  Returns the cells that
    /// actually changed.
    pub fn fill(&mut self, area: Area, kind: TileKind) -> Vec<Cell> {
        let mut changed = Vec::new();
        for cell in area.cells() {
            if let Some(i) = self.index(cell) {
                if self.tiles[i] != kind {
                    self.tiles[i] = kind;
                    changed.push(cell);
                }
            }
        }
        changed
    }

    /// Cells of `kind` inside `area`, row-major.
    pub fn cells_of_kind(&self, area: Area, kind: TileKind) -> Vec<Cell> {
        area.cells()
            .filter(|&c| self.get(c) == Some(kind))
            .collect()
    }

    /// Number of tiles of `kind` in the whole map.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Every cell of the map, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
    }
}
