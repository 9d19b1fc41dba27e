//! Unit tests for tc-core.

#[cfg(test)]
mod ids {
    use crate::ActorId;

    #[test]
    fn default_is_invalid() {
        assert_eq!(ActorId::default(), ActorId::INVALID);
    }

    #[test]
    fn next_increments() {
        assert_eq!(ActorId(4).next(), ActorId(5));
    }

    #[test]
    fn display() {
        assert_eq!(ActorId(7).to_string(), "ActorId(7)");
    }

    #[test]
    fn try_from_usize() {
        assert_eq!(ActorId::try_from(3usize).unwrap(), ActorId(3));
        assert!(ActorId::try_from(usize::MAX).is_err());
    }
}

#[cfg(test)]
mod grid {
    use crate::{Area, Bearing, Cell, Dir, DirSet, Point};

    #[test]
    fn dir_delta_round_trips() {
        for d in Dir::ALL {
            let (dx, dy) = d.delta();
            assert_eq!(Dir::from_delta(dx, dy), Some(d));
        }
        assert_eq!(Dir::from_delta(0, 0), None);
        assert_eq!(Dir::from_delta(2, 0), None);
    }

    #[test]
    fn inverse_is_opposite() {
        assert_eq!(Dir::N.inverse(), Dir::S);
        assert_eq!(Dir::NE.inverse(), Dir::SW);
        assert_eq!(Dir::W.inverse(), Dir::E);
    }

    #[test]
    fn adjacency() {
        let c = Cell::new(3, 3);
        assert!(c.is_adjacent(Cell::new(4, 4)));
        assert!(c.is_adjacent(Cell::new(3, 2)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(5, 3)));
        assert_eq!(c.dir_to(Cell::new(2, 4)), Some(Dir::SW));
    }

    #[test]
    fn dirset_flip_and_transpose() {
        // North-facing wall template: N, E, W, NE, NW.
        let north = DirSet::from_deltas(&[(0, -1), (1, 0), (-1, 0), (1, -1), (-1, -1)]);
        let south = north.flipped(true, true);
        assert!(south.contains(Dir::S));
        assert!(south.contains(Dir::SE));
        assert!(!south.contains(Dir::N));

        let east = north.transposed();
        assert!(east.contains(Dir::W));
        assert!(east.contains(Dir::N));
        assert!(east.contains(Dir::S));
        assert!(!east.contains(Dir::E));
        assert_eq!(east.len(), 5);
    }

    #[test]
    fn dirset_default_is_unrestricted() {
        assert!(DirSet::default().is_all());
        assert_eq!(DirSet::ALL.iter().count(), 8);
        assert!(DirSet::EMPTY.is_empty());
    }

    #[test]
    fn point_cell_uses_floor_division() {
        assert_eq!(Point::new(45, 15).cell(30), Cell::new(1, 0));
        assert_eq!(Point::new(-1, 0).cell(30), Cell::new(-1, 0));
        assert_eq!(Cell::new(2, 1).center(30), Point::new(75, 45));
    }

    #[test]
    fn bearing_towards_and_negation() {
        let b = Bearing::towards(Point::new(15, 15), Point::new(45, 0));
        assert_eq!(b, Bearing { x: 1, y: -1 });
        assert!(b.is_diagonal());
        assert_eq!(b.negated(), Bearing { x: -1, y: 1 });
        assert_eq!(b.dir(), Some(Dir::NE));
        assert!(Bearing::ZERO.is_zero());
        assert_eq!(Bearing::ZERO.dir(), None);
    }

    #[test]
    fn area_contains_and_iterates() {
        let a = Area::new(1, 1, 2, 3);
        assert!(a.contains(Cell::new(2, 3)));
        assert!(!a.contains(Cell::new(3, 1)));
        assert_eq!(a.cells().count(), 6);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(3) + 4, Tick(7));
        assert_eq!(Tick(9).since(Tick(4)), 5);
        assert_eq!(Tick(2).since(Tick(4)), 0);
        assert_eq!(Tick(1).to_string(), "T1");
    }

    #[test]
    fn clock_elapsed() {
        let mut c = SimClock::new(250);
        for _ in 0..8 {
            c.advance();
        }
        assert_eq!(c.current_tick, Tick(8));
        assert_eq!(c.elapsed_ms(), 2_000);
        assert_eq!(c.ticks_for_ms(1_001), 5);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn step_larger_than_tile_is_rejected() {
        let cfg = SimConfig { step: 31, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { tile_size: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{ActorId, ActorRng};

    #[test]
    fn actor_rng_is_deterministic() {
        let mut a = ActorRng::new(42, ActorId(3));
        let mut b = ActorRng::new(42, ActorId(3));
        let xs: Vec<u32> = (0..5).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn distinct_actors_get_distinct_streams() {
        let mut a = ActorRng::new(42, ActorId(0));
        let mut b = ActorRng::new(42, ActorId(1));
        let xs: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_range_bounds() {
        let mut r = ActorRng::new(7, ActorId(0));
        for _ in 0..100 {
            let v: f32 = r.gen_range(1.0..2.0);
            assert!((1.0..2.0).contains(&v));
        }
    }
}
