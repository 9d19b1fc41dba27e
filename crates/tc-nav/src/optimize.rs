//! Path compaction for transmission and storage.
//!
//! A route is sent as its turning points only: the start, every cell where
//! the step direction changes, and the final cell.  [`expand_waypoints`]
//! restores the full cell sequence.

use tc_core::Cell;

/// Keep only the cells at which the direction of travel changes, plus the
/// final cell.
pub fn optimize_path(path: &[Cell]) -> Vec<Cell> {
    let Some(&last) = path.last() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut last_step = (0, 0);
    for pair in path.windows(2) {
        let step = (pair[1].x - pair[0].x, pair[1].y - pair[0].y);
        if step != last_step {
            out.push(pair[0]);
        }
        last_step = step;
    }
    out.push(last);
    out
}

/// Walk straight (or diagonally) between consecutive waypoints, producing
/// every intermediate cell.
///
/// Each leg must be a straight line along an axis or a 45° diagonal, which
/// holds for anything produced by [`optimize_path`].  Legs that are not are
/// walked axis by axis towards the next waypoint.
pub fn expand_waypoints(waypoints: &[Cell]) -> Vec<Cell> {
    let Some(&first) = waypoints.first() else {
        return Vec::new();
    };

    let mut out = vec![first];
    let mut cur = first;
    for &wp in &waypoints[1..] {
        while cur != wp {
            cur = Cell::new(cur.x + (wp.x - cur.x).signum(), cur.y + (wp.y - cur.y).signum());
            out.push(cur);
        }
    }
    out
}
