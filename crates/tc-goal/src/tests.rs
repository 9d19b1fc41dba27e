//! Unit tests for tc-goal.

use tc_actor::Actor;
use tc_core::{ActorId, ActorRng, Area, Cell, Point, Tick};
use tc_nav::{NavGrid, TileKind, TileMap};

use crate::{GoalContext, GoalPolicy, NoopGoal, Target, WanderGoal, goal_fn};

// ── Helpers ───────────────────────────────────────────────────────────────────

const TS: u32 = 30;

fn actor_on(cell: Cell) -> Actor {
    Actor::new(ActorId(0), cell.center(TS), 1.0)
}

fn rng() -> ActorRng {
    ActorRng::new(42, ActorId(0))
}

#[cfg(test)]
mod noop {
    use super::*;

    #[test]
    fn never_chooses() {
        let grid = NavGrid::from_tiles(&TileMap::new(3, 3, TileKind::Grass));
        let actor = actor_on(Cell::new(1, 1));
        let ctx = GoalContext::new(Tick::ZERO, &grid, &actor, TS);
        assert_eq!(NoopGoal.choose_target(&ctx, &mut rng()), None);
    }
}

#[cfg(test)]
mod wander {
    use super::*;

    #[test]
    fn skips_own_impassable_and_reserved_cells() {
        let mut map = TileMap::new(3, 1, TileKind::Grass);
        map.set(Cell::new(2, 0), TileKind::Rock).unwrap();
        let mut grid = NavGrid::from_tiles(&map);
        let actor = actor_on(Cell::new(0, 0));
        let ctx = GoalContext::new(Tick::ZERO, &grid, &actor, TS);
        let mut r = rng();
        for _ in 0..20 {
            assert_eq!(WanderGoal::new().choose_target(&ctx, &mut r), Some(Target::at(Cell::new(1, 0))));
        }

        grid.reserve(Cell::new(1, 0)).unwrap();
        let ctx = GoalContext::new(Tick::ZERO, &grid, &actor, TS);
        assert_eq!(WanderGoal::new().choose_target(&ctx, &mut r), None);
    }

    #[test]
    fn stays_inside_area() {
        let grid = NavGrid::from_tiles(&TileMap::new(10, 10, TileKind::Grass));
        let actor = actor_on(Cell::new(0, 0));
        let ctx = GoalContext::new(Tick::ZERO, &grid, &actor, TS);
        let area = Area::new(5, 5, 2, 2);
        let policy = WanderGoal::within(area);
        let mut r = rng();
        for _ in 0..50 {
            let t = policy.choose_target(&ctx, &mut r).unwrap();
            assert!(area.contains(t.cell));
        }
    }

    #[test]
    fn furniture_is_reserved() {
        let mut map = TileMap::new(2, 1, TileKind::Grass);
        map.set(Cell::new(1, 0), TileKind::Bed).unwrap();
        let grid = NavGrid::from_tiles(&map);
        let actor = actor_on(Cell::new(0, 0));
        let ctx = GoalContext::new(Tick::ZERO, &grid, &actor, TS);
        assert_eq!(
            WanderGoal::new().choose_target(&ctx, &mut rng()),
            Some(Target::reserved(Cell::new(1, 0)))
        );
    }

    #[test]
    fn same_seed_same_choices() {
        let grid = NavGrid::from_tiles(&TileMap::new(8, 8, TileKind::Grass));
        let actor = actor_on(Cell::new(3, 3));
        let ctx = GoalContext::new(Tick::ZERO, &grid, &actor, TS);
        let (mut r1, mut r2) = (rng(), rng());
        for _ in 0..10 {
            assert_eq!(
                WanderGoal::new().choose_target(&ctx, &mut r1),
                WanderGoal::new().choose_target(&ctx, &mut r2)
            );
        }
    }
}

#[cfg(test)]
mod closures {
    use super::*;

    #[test]
    fn closure_sees_context() {
        let policy = goal_fn(|ctx, _rng| {
            let here = ctx.actor_cell();
            Some(Target::at(Cell::new(here.x + 1, here.y)))
        });
        let grid = NavGrid::from_tiles(&TileMap::new(4, 4, TileKind::Grass));
        let actor = Actor::new(ActorId(0), Point::new(40, 70), 1.0);
        let ctx = GoalContext::new(Tick(5), &grid, &actor, TS);
        assert_eq!(policy.choose_target(&ctx, &mut rng()), Some(Target::at(Cell::new(2, 2))));
    }
}
