//! The actor record and its movement along a path.
//!
//! # Coordinates
//!
//! Positions are in sub-cell units: cell `(x, y)` spans
//! `x*tile_size .. (x+1)*tile_size` and actors walk from cell centre to cell
//! centre.  The remaining path is held as cells; the head of the path is the
//! next waypoint.  The path only ever shrinks from the front until it is
//! replaced wholesale by [`Actor::set_path`] or dropped by
//! [`Actor::clear_path`].

use std::collections::VecDeque;

use tc_core::{ActorId, Bearing, Cell, Point};

use crate::Attributes;

/// One simulated person.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id:       ActorId,
    pub position: Point,
    /// Direction towards the head of the path; zero when path-less.
    pub bearing:  Bearing,
    path:         VecDeque<Cell>,
    /// Exponent applied to cell costs when this actor plans a route.
    pub weight:   f32,
    pub attributes: Attributes,

    /// Ticks left to linger at the current destination.
    pub dwell:    u32,
    /// Heading for the exit rather than choosing new destinations.
    pub leaving:  bool,
    /// Destination cell this actor has claimed on the grid.
    pub reserved: Option<Cell>,
    /// Consecutive ticks the arbiter has refused this actor's move.
    pub blocked_ticks: u32,
}

impl Actor {
    pub fn new(id: ActorId, position: Point, weight: f32) -> Self {
        Self {
            id,
            position,
            bearing: Bearing::ZERO,
            path: VecDeque::new(),
            weight,
            attributes: Attributes::standard(),
            dwell: 0,
            leaving: false,
            reserved: None,
            blocked_ticks: 0,
        }
    }

    /// The cell containing the actor's position.
    #[inline]
    pub fn cell(&self, tile_size: u32) -> Cell {
        self.position.cell(tile_size)
    }

    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Remaining waypoints, head first.
    pub fn path(&self) -> &VecDeque<Cell> {
        &self.path
    }

    pub fn next_waypoint(&self) -> Option<Cell> {
        self.path.front().copied()
    }

    /// Final cell of the current path.
    pub fn destination(&self) -> Option<Cell> {
        self.path.back().copied()
    }

    /// Replace the path.  The actor is placed on the centre of the first
    /// cell, which is then consumed along with any repeats of it.
    pub fn set_path(&mut self, cells: impl IntoIterator<Item = Cell>, tile_size: u32) {
        self.path = cells.into_iter().collect();
        if let Some(first) = self.path.front() {
            self.position = first.center(tile_size);
        }
        while self.path.front().is_some_and(|c| c.center(tile_size) == self.position) {
            self.path.pop_front();
        }
        self.recalculate_bearing(tile_size);
    }

    /// Drop the remaining path and stop.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.bearing = Bearing::ZERO;
    }

    /// Where the actor would stand after one step of `step` units.  Each
    /// axis stops at the waypoint's centre rather than overshooting it.
    pub fn next_position(&self, step: i32, tile_size: u32) -> Point {
        let Some(head) = self.next_waypoint() else {
            return self.position;
        };
        let goal = head.center(tile_size);
        Point::new(
            approach(self.position.x, goal.x, self.bearing.x, step),
            approach(self.position.y, goal.y, self.bearing.y, step),
        )
    }

    /// Advance one step.  Returns `true` when the actor landed on its next
    /// waypoint, which is then popped.
    pub fn apply_bearing(&mut self, step: i32, tile_size: u32) -> bool {
        let Some(head) = self.next_waypoint() else {
            return false;
        };
        self.position = self.next_position(step, tile_size);
        let arrived = self.position == head.center(tile_size);
        if arrived {
            self.path.pop_front();
        }
        self.recalculate_bearing(tile_size);
        arrived
    }

    /// Point the bearing at the head of the path, or zero it if there is none.
    pub fn recalculate_bearing(&mut self, tile_size: u32) {
        self.bearing = match self.next_waypoint() {
            Some(head) => Bearing::towards(self.position, head.center(tile_size)),
            None => Bearing::ZERO,
        };
    }
}

#[inline]
fn approach(from: i32, to: i32, dir: i8, step: i32) -> i32 {
    match dir {
        1 => (from + step).min(to),
        -1 => (from - step).max(to),
        _ => from,
    }
}
