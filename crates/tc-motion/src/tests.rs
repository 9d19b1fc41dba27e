//! Unit tests for tc-motion.

use tc_actor::ActorStore;
use tc_core::{ActorId, Cell, Point};
use tc_nav::{NavCell, NavGrid, TileKind, TileMap};

use crate::OccupancyIndex;

// ── Helpers ───────────────────────────────────────────────────────────────────

const TS: u32 = 30;

fn grass(width: u32, height: u32) -> NavGrid {
    NavGrid::uniform(width, height, NavCell::default())
}

fn centre(x: i32, y: i32) -> Point {
    Cell::new(x, y).center(TS)
}

/// Spawn an actor on `from` walking the straight cells in `path`.
fn walker(store: &mut ActorStore, from: (i32, i32), path: &[(i32, i32)]) -> ActorId {
    let id = store.spawn(centre(from.0, from.1));
    let cells = std::iter::once(from).chain(path.iter().copied()).map(|(x, y)| Cell::new(x, y));
    store.get_mut(id).unwrap().set_path(cells, TS);
    id
}

fn place_all(store: &ActorStore, index: &mut OccupancyIndex) {
    for (id, a) in store.iter() {
        index.place_or_move(id, a.cell(TS)).unwrap();
    }
}

/// A at (0,0) → E, B at (1,0) → S, C at (1,1) → W, D at (0,1) → N.
fn four_cycle(store: &mut ActorStore) -> [ActorId; 4] {
    [
        walker(store, (0, 0), &[(1, 0)]),
        walker(store, (1, 0), &[(1, 1)]),
        walker(store, (1, 1), &[(0, 1)]),
        walker(store, (0, 1), &[(0, 0)]),
    ]
}

fn assert_index_consistent(store: &ActorStore, index: &OccupancyIndex) {
    let mut total = 0;
    for (id, a) in store.iter() {
        let cell = index.cell_of(id).expect("every actor is tracked");
        assert_eq!(cell, a.cell(TS), "index disagrees with position for {id}");
        assert_eq!(index.occupants(cell).iter().filter(|&&o| o == id).count(), 1);
        total += 1;
    }
    let listed: usize = index.snapshot().iter().map(|(_, occ)| occ.len()).sum();
    assert_eq!(listed, total);
}

// ── OccupancyIndex ────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;
    use crate::MotionError;

    #[test]
    fn place_then_move() {
        let mut idx = OccupancyIndex::new(4, 4);
        let a = ActorId(0);
        assert_eq!(idx.place_or_move(a, Cell::new(1, 1)).unwrap(), None);
        assert_eq!(idx.place_or_move(a, Cell::new(2, 1)).unwrap(), Some(Cell::new(1, 1)));
        assert!(!idx.is_occupied(Cell::new(1, 1)));
        assert_eq!(idx.occupants(Cell::new(2, 1)), &[a]);
        assert_eq!(idx.cell_of(a), Some(Cell::new(2, 1)));
    }

    #[test]
    fn placing_twice_on_same_cell_is_idempotent() {
        let mut idx = OccupancyIndex::new(2, 2);
        idx.place_or_move(ActorId(3), Cell::new(0, 0)).unwrap();
        idx.place_or_move(ActorId(3), Cell::new(0, 0)).unwrap();
        assert_eq!(idx.occupants(Cell::new(0, 0)).len(), 1);
    }

    #[test]
    fn off_grid_is_rejected() {
        let mut idx = OccupancyIndex::new(2, 2);
        let err = idx.place_or_move(ActorId(0), Cell::new(2, 0)).unwrap_err();
        assert!(matches!(err, MotionError::OutOfBounds { .. }));
        assert!(idx.occupants(Cell::new(-1, 0)).is_empty());
        assert!(!idx.contains(ActorId(0)));
    }

    #[test]
    fn remove_and_retain() {
        let mut idx = OccupancyIndex::new(3, 3);
        for i in 0..3 {
            idx.place_or_move(ActorId(i), Cell::new(1, 1)).unwrap();
        }
        assert_eq!(idx.first_other_occupant(Cell::new(1, 1), ActorId(0)), Some(ActorId(1)));
        assert_eq!(idx.remove(ActorId(1)), Some(Cell::new(1, 1)));
        assert_eq!(idx.remove(ActorId(1)), None);
        idx.retain(|a| a != ActorId(0));
        assert_eq!(idx.occupants(Cell::new(1, 1)), &[ActorId(2)]);
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn snapshot_lists_non_empty_cells_row_major() {
        let mut idx = OccupancyIndex::new(3, 3);
        idx.place_or_move(ActorId(0), Cell::new(2, 2)).unwrap();
        idx.place_or_move(ActorId(1), Cell::new(1, 0)).unwrap();
        idx.place_or_move(ActorId(2), Cell::new(1, 0)).unwrap();
        let snap = idx.snapshot();
        assert_eq!(snap, vec![
            (Cell::new(1, 0), vec![ActorId(1), ActorId(2)]),
            (Cell::new(2, 2), vec![ActorId(0)]),
        ]);
    }
}

// ── DeadlockBreaker ───────────────────────────────────────────────────────────

#[cfg(test)]
mod deadlock {
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::DeadlockBreaker;

    #[test]
    fn finds_four_cycle_in_order() {
        let mut store = ActorStore::new(1);
        let ids = four_cycle(&mut store);
        let mut idx = OccupancyIndex::new(2, 2);
        place_all(&store, &mut idx);
        let cycle = DeadlockBreaker::default().find_cycle(ids[0], &store, &idx, &FxHashMap::default());
        assert_eq!(cycle, Some(ids.to_vec()));
    }

    #[test]
    fn stationary_member_breaks_the_chain() {
        let mut store = ActorStore::new(1);
        let ids = four_cycle(&mut store);
        store.get_mut(ids[2]).unwrap().clear_path();
        let mut idx = OccupancyIndex::new(2, 2);
        place_all(&store, &mut idx);
        assert!(DeadlockBreaker::default().find_cycle(ids[0], &store, &idx, &FxHashMap::default()).is_none());
    }

    #[test]
    fn member_already_moved_breaks_the_chain() {
        let mut store = ActorStore::new(1);
        let ids = four_cycle(&mut store);
        let mut idx = OccupancyIndex::new(2, 2);
        place_all(&store, &mut idx);
        let mut verdicts = FxHashMap::default();
        verdicts.insert(ids[1], false);
        assert!(DeadlockBreaker::default().find_cycle(ids[0], &store, &idx, &verdicts).is_none());
    }

    #[test]
    fn hop_budget_is_respected() {
        let mut store = ActorStore::new(1);
        let ids = four_cycle(&mut store);
        let mut idx = OccupancyIndex::new(2, 2);
        place_all(&store, &mut idx);
        assert!(DeadlockBreaker::new(3).find_cycle(ids[0], &store, &idx, &FxHashMap::default()).is_none());
        assert!(DeadlockBreaker::new(4).find_cycle(ids[0], &store, &idx, &FxHashMap::default()).is_some());
    }

    #[test]
    fn open_chain_is_not_a_deadlock() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        walker(&mut store, (1, 0), &[(2, 0)]);
        let mut idx = OccupancyIndex::new(3, 1);
        place_all(&store, &mut idx);
        assert!(DeadlockBreaker::default().find_cycle(a, &store, &idx, &FxHashMap::default()).is_none());
    }
}

// ── CollisionArbiter ──────────────────────────────────────────────────────────

#[cfg(test)]
mod arbiter {
    use super::*;
    use crate::{ArbiterConfig, CollisionArbiter};

    /// Large enough that every step from a centre crosses into the next cell.
    const STEP: i32 = 16;

    fn arbiter() -> CollisionArbiter {
        CollisionArbiter::new(ArbiterConfig::default())
    }

    #[test]
    fn unplaced_actors_are_placed() {
        let mut store = ActorStore::new(1);
        let id = store.spawn(centre(2, 1));
        let grid = grass(4, 4);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(idx.cell_of(id), Some(Cell::new(2, 1)));
        assert!(out.moved.is_empty() && out.blocked.is_empty());
    }

    #[test]
    fn step_into_empty_cell() {
        let mut store = ActorStore::new(1);
        let id = walker(&mut store, (0, 0), &[(1, 0)]);
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.moved, vec![id]);
        assert_eq!(idx.cell_of(id), Some(Cell::new(1, 0)));
        assert_eq!(store.get(id).unwrap().position, Point::new(31, 15));
    }

    #[test]
    fn step_within_cell_ignores_neighbours() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        store.spawn(centre(1, 0));
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, 5, TS).unwrap();
        assert_eq!(out.moved, vec![a]);
        assert_eq!(idx.cell_of(a), Some(Cell::new(0, 0)));
    }

    #[test]
    fn stationary_occupant_blocks() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        store.spawn(centre(1, 0));
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let mut arb = arbiter();

        let first = arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(first.blocked, vec![a]);
        assert!(first.blocked_changed);
        assert!(arb.is_blocked(a));

        let second = arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(second.blocked, vec![a]);
        assert!(!second.blocked_changed);
        assert_eq!(store.get(a).unwrap().blocked_ticks, 2);
        assert_eq!(store.get(a).unwrap().position, centre(0, 0));
    }

    #[test]
    fn unblocking_is_reported() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        let b = store.spawn(centre(1, 0));
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let mut arb = arbiter();
        arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();

        store.remove(b).unwrap();
        idx.remove(b);
        let out = arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.moved, vec![a]);
        assert!(out.blocked_changed);
        assert!(!arb.is_blocked(a));
        assert_eq!(store.get(a).unwrap().blocked_ticks, 0);
    }

    #[test]
    fn head_on_into_same_cell_both_pass() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0), (2, 0)]);
        let b = walker(&mut store, (2, 0), &[(1, 0), (0, 0)]);
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.moved, vec![a, b]);
        assert!(out.blocked.is_empty());
        assert_eq!(idx.occupants(Cell::new(1, 0)).len(), 2);
    }

    #[test]
    fn head_on_swap_both_pass() {
        let mut store = ActorStore::new(1);
        walker(&mut store, (0, 0), &[(1, 0)]);
        walker(&mut store, (1, 0), &[(0, 0)]);
        let grid = grass(2, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.moved.len(), 2);
        assert_index_consistent(&store, &idx);
    }

    #[test]
    fn follower_waits_for_leader() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0), (2, 0)]);
        let b = walker(&mut store, (1, 0), &[(2, 0), (3, 0)]);
        let grid = grass(4, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.blocked, vec![a]);
        assert_eq!(out.moved, vec![b]);
        assert!(out.deadlocks_broken.is_empty());
    }

    #[test]
    fn non_colliding_tile_is_shared() {
        let mut map = TileMap::new(3, 1, TileKind::Grass);
        map.set(Cell::new(1, 0), TileKind::Chair).unwrap();
        let grid = NavGrid::from_tiles(&map);
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        store.spawn(centre(1, 0));
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.moved, vec![a]);
    }

    #[test]
    fn four_cycle_makes_progress() {
        let mut store = ActorStore::new(1);
        let ids = four_cycle(&mut store);
        let grid = grass(2, 2);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let out = arbiter().arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert!(!out.moved.is_empty());
        assert_eq!(out.deadlocks_broken, vec![ids[0]]);
        assert!(out.moved.contains(&ids[0]));
        assert_eq!(idx.cell_of(ids[0]), Some(Cell::new(1, 0)));
        assert_index_consistent(&store, &idx);
    }

    #[test]
    fn four_cycle_stays_stuck_without_breaker() {
        let mut store = ActorStore::new(1);
        four_cycle(&mut store);
        let grid = grass(2, 2);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let config = ArbiterConfig { break_deadlocks: false, ..ArbiterConfig::default() };
        let out = CollisionArbiter::new(config)
            .arbitrate(&mut store, &mut idx, &grid, STEP, TS)
            .unwrap();
        assert!(out.moved.is_empty());
        assert_eq!(out.blocked.len(), 4);
    }

    #[test]
    fn collisions_off_allows_everything() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        store.spawn(centre(1, 0));
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let config = ArbiterConfig { collisions: false, ..ArbiterConfig::default() };
        let mut arb = CollisionArbiter::new(config);
        let out = arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(out.moved, vec![a]);
        assert!(!out.blocked_changed);
        assert!(arb.blocked_info(&store).is_empty());
    }

    #[test]
    fn blocked_info_reports_position_and_path() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0), (2, 0)]);
        store.spawn(centre(1, 0));
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let mut arb = arbiter();
        arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        let info = arb.blocked_info(&store);
        let entry = &info[&a];
        assert!(entry.blocked);
        assert_eq!(entry.position, centre(0, 0));
        assert_eq!(entry.path, vec![Cell::new(1, 0), Cell::new(2, 0)]);

        assert!(arb.forget(a));
        assert!(arb.blocked_info(&store).is_empty());
        assert!(!arb.forget(a));
    }

    #[test]
    fn starved_after_threshold() {
        let mut store = ActorStore::new(1);
        let a = walker(&mut store, (0, 0), &[(1, 0)]);
        store.spawn(centre(1, 0));
        let grid = grass(3, 1);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let config = ArbiterConfig { replan_after_blocked_ticks: 3, ..ArbiterConfig::default() };
        let mut arb = CollisionArbiter::new(config);
        for _ in 0..2 {
            arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        }
        assert!(arb.starved(&store).is_empty());
        arb.arbitrate(&mut store, &mut idx, &grid, STEP, TS).unwrap();
        assert_eq!(arb.starved(&store), vec![a]);
    }

    #[test]
    fn occupancy_stays_consistent_in_a_busy_corridor() {
        let mut store = ActorStore::new(5);
        let right: Vec<(i32, i32)> = (1..10).map(|x| (x, 1)).collect();
        let left: Vec<(i32, i32)> = (0..9).rev().map(|x| (x, 1)).collect();
        walker(&mut store, (0, 1), &right);
        walker(&mut store, (9, 1), &left);
        walker(&mut store, (0, 0), &(1..10).map(|x| (x, 0)).collect::<Vec<_>>());
        walker(&mut store, (1, 0), &(2..10).map(|x| (x, 0)).collect::<Vec<_>>());
        walker(&mut store, (9, 2), &(0..9).rev().map(|x| (x, 2)).collect::<Vec<_>>());
        walker(&mut store, (0, 2), &[(1, 1), (2, 0)]);

        let grid = grass(10, 3);
        let mut idx = OccupancyIndex::for_grid(&grid);
        let mut arb = arbiter();
        for _ in 0..60 {
            arb.arbitrate(&mut store, &mut idx, &grid, 5, TS).unwrap();
            assert_index_consistent(&store, &idx);
        }
    }
}
