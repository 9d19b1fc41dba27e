//! Pathfinder trait and the default A* implementation.
//!
//! # Pluggability
//!
//! The tick driver calls routing through the [`Pathfinder`] trait so
//! applications can swap in their own search without touching the core.
//!
//! # Cost model
//!
//! Costs are integers.  Entering a cell costs that cell's traversal cost;
//! a diagonal step adds a flat 4 on top.  Whether a step is diagonal is
//! decided from the coordinates that actually change, never from the
//! nominal direction, so a step can only be charged as diagonal when both
//! axes move.  The heuristic is the octile "diagonal shortcut" estimate,
//! `14 * min(dx, dy) + 10 * (max - min)`.
//!
//! # Termination
//!
//! Besides the open set running dry, the search tracks the f-cost of each
//! expanded node.  Every expansion whose f-cost is not lower than the
//! previous one counts as a stall; more than [`SearchLimits::stall_limit`]
//! consecutive stalls abort the search with [`NavError::NoPathFound`].  This
//! bounds the work spent on unreachable targets in large open maps.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tc_core::Cell;

use crate::{NavError, NavGrid, NavResult};

const NO_PARENT: usize = usize::MAX;

// ── Query & result ────────────────────────────────────────────────────────────

/// One routing request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathQuery {
    pub start:  Cell,
    pub target: Cell,
    /// Exponent applied to each entered cell's cost.  `1.0` leaves costs
    /// untouched; larger values make cheap tiles relatively more attractive.
    pub weight: f32,
}

impl PathQuery {
    pub fn new(start: Cell, target: Cell) -> Self {
        Self { start, target, weight: 1.0 }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// The result of a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Cells from start to target inclusive.
    pub cells: Vec<Cell>,
    /// Accumulated movement cost at each cell; `g[0] == 0`.
    pub g: Vec<u32>,
}

impl Path {
    /// Total movement cost from start to target.
    pub fn total_cost(&self) -> u32 {
        self.g.last().copied().unwrap_or(0)
    }

    /// `true` when start and target are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    pub fn target(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ── Trace observer ────────────────────────────────────────────────────────────

/// Optional window into a running search, for debug views.
///
/// Passed explicitly to every call; all methods default to no-ops.
pub trait SearchTrace {
    /// A node was taken off the open set and closed.
    fn on_expand(&mut self, _cell: Cell, _g: u32, _f: u32) {}

    /// A node entered the open set for the first time.
    fn on_discover(&mut self, _cell: Cell, _g: u32) {}

    /// An open node found a cheaper parent.  `new_g < old_g` always.
    fn on_relax(&mut self, _cell: Cell, _old_g: u32, _new_g: u32) {}
}

/// A [`SearchTrace`] that records nothing.
pub struct NoopTrace;

impl SearchTrace for NoopTrace {}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Tuning knobs for the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    /// Consecutive non-improving expansions tolerated before giving up.
    pub stall_limit: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { stall_limit: 5_000 }
    }
}

/// Pluggable routing engine.
pub trait Pathfinder: Send + Sync {
    /// Find a route from `query.start` to `query.target`.
    ///
    /// `start == target` yields a single-cell path.  Fails with
    /// [`NavError::ImpassableTarget`] without searching when the target can
    /// never be entered.
    fn find_path(
        &self,
        grid:  &NavGrid,
        query: PathQuery,
        trace: &mut dyn SearchTrace,
    ) -> NavResult<Path>;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the navigation grid honouring directional restrictions and
/// target-only cells.
#[derive(Clone, Debug, Default)]
pub struct AStarPathfinder {
    pub limits: SearchLimits,
}

impl AStarPathfinder {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        grid:  &NavGrid,
        query: PathQuery,
        trace: &mut dyn SearchTrace,
    ) -> NavResult<Path> {
        astar(grid, query, self.limits, trace)
    }
}

/// Octile-distance estimate, scaled ×10 for straight and ×14 for diagonal
/// steps.
#[inline]
pub fn heuristic(from: Cell, to: Cell) -> u32 {
    let dx = from.x.abs_diff(to.x);
    let dy = from.y.abs_diff(to.y);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    14 * lo + 10 * (hi - lo)
}

/// Cost of stepping from `from` into `to`, whose own cost is `base`.
#[inline]
fn step_cost(from: Cell, to: Cell, base: u32, weight: f32) -> u32 {
    let base = if (weight - 1.0).abs() <= f32::EPSILON {
        base
    } else {
        (base as f64).powf(weight as f64).round() as u32
    };
    if from.x != to.x && from.y != to.y { base + 4 } else { base }
}

fn astar(
    grid:   &NavGrid,
    query:  PathQuery,
    limits: SearchLimits,
    trace:  &mut dyn SearchTrace,
) -> NavResult<Path> {
    let PathQuery { start, target, weight } = query;

    let target_idx = grid.index(target).ok_or(NavError::OutOfBounds(target))?;
    if !grid.by_index(target_idx).cost.is_passable() {
        return Err(NavError::ImpassableTarget { target });
    }
    let start_idx = grid.index(start).ok_or(NavError::OutOfBounds(start))?;
    if start_idx == target_idx {
        return Ok(Path { cells: vec![start], g: vec![0] });
    }

    let n = grid.len();
    let mut g      = vec![u32::MAX; n];
    let mut parent = vec![NO_PARENT; n];
    let mut closed = vec![false; n];

    // Min-heap on (f, h, index): ties on f prefer the node nearer the
    // target, then the lower index for determinism.
    let mut open: BinaryHeap<Reverse<(u32, u32, usize)>> = BinaryHeap::new();
    let h0 = heuristic(start, target);
    g[start_idx] = 0;
    open.push(Reverse((h0, h0, start_idx)));

    let mut prev_f: Option<u32> = None;
    let mut stalls     = 0u32;
    let mut expansions = 0u32;

    while let Some(Reverse((f, h, idx))) = open.pop() {
        // Skip closed nodes and stale heap entries.
        if closed[idx] || f != g[idx].saturating_add(h) {
            continue;
        }

        match prev_f {
            Some(p) if f < p => stalls = 0,
            _ => {
                stalls += 1;
                if stalls > limits.stall_limit {
                    tracing::debug!(%start, %target, expansions, "search stalled");
                    return Err(NavError::NoPathFound { from: start, to: target, expansions });
                }
            }
        }
        prev_f = Some(f);

        closed[idx] = true;
        expansions += 1;
        let cell = grid.cell_at(idx);
        trace.on_expand(cell, g[idx], f);

        if idx == target_idx {
            return Ok(reconstruct(grid, &parent, &g, target_idx));
        }

        let here = grid.by_index(idx);
        for dir in here.exits.iter() {
            let next = cell.step(dir);
            let Some(nidx) = grid.index(next) else { continue };
            if closed[nidx] {
                continue;
            }
            let there = grid.by_index(nidx);
            let Some(base) = there.cost.value() else { continue };
            if !there.can_enter_moving(dir) {
                continue;
            }
            // Beds and the like are destinations, never shortcuts.
            if there.target_only && nidx != target_idx {
                continue;
            }

            let new_g = g[idx].saturating_add(step_cost(cell, next, base, weight));
            if new_g < g[nidx] {
                let old_g = g[nidx];
                if old_g == u32::MAX {
                    trace.on_discover(next, new_g);
                } else {
                    trace.on_relax(next, old_g, new_g);
                }
                g[nidx] = new_g;
                parent[nidx] = idx;
                let nh = heuristic(next, target);
                open.push(Reverse((new_g.saturating_add(nh), nh, nidx)));
            }
        }
    }

    tracing::debug!(%start, %target, expansions, "open set exhausted");
    Err(NavError::NoPathFound { from: start, to: target, expansions })
}

fn reconstruct(grid: &NavGrid, parent: &[usize], g: &[u32], target_idx: usize) -> Path {
    let mut cells = Vec::new();
    let mut costs = Vec::new();
    let mut cur = target_idx;
    while cur != NO_PARENT {
        cells.push(grid.cell_at(cur));
        costs.push(g[cur]);
        cur = parent[cur];
    }
    cells.reverse();
    costs.reverse();
    Path { cells, g: costs }
}
