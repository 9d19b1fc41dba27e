//! plaza — visitors wander a small park, then head home through the gate.
//!
//! Run with `RUST_LOG=debug` to follow every path assignment, or pass
//! `--events` to print each simulation event as one JSON line on stdout.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;

use tc_actor::ActorStore;
use tc_core::{ActorId, Area, Cell, SimConfig, Tick};
use tc_goal::WanderGoal;
use tc_motion::{ArbiterConfig, OccupancyIndex};
use tc_nav::{AStarPathfinder, TileKind, load_tiles_reader};
use tc_sim::{SimBuilder, SimEvent, SimObserver, TickReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const WIDTH:          u32 = 24;
const HEIGHT:         u32 = 16;
const VISITORS:       i32 = 30;
const SEED:           u64 = 42;
const OPEN_TICKS:     u64 = 600;
/// A market stall goes up on the footpath at this tick.
const STALL_TICK:     u64 = 200;
/// Closing time: everyone is sent to the gate.
const CLOSING_TICK:   u64 = 400;
const SNAPSHOT_TICKS: u64 = 100;

const GATE: Cell = Cell::new(0, 8);

// Benches round a reading table, a hammock, sofas and the low garden wall
// of a kiosk.  Everything else is grass.
const FURNITURE_CSV: &str = "\
x,y,tile\n\
4,3,chair\n\
5,3,chair\n\
6,3,chair\n\
4,5,chair\n\
5,5,chair\n\
6,5,chair\n\
5,4,lectern\n\
20,12,sofa\n\
20,13,sofa\n\
3,13,bed\n\
14,12,cornerTl\n\
15,12,wallNorth\n\
16,12,wallNorth\n\
17,12,cornerTr\n\
14,13,wallWest\n\
17,13,wallEast\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    print_events: bool,
    counts:       BTreeMap<&'static str, u64>,
    searches:     u64,
    deferred:     u64,
    deadlocks:    u64,
    peak_blocked: usize,
    exited:       Vec<ActorId>,
}

impl Tally {
    fn new(print_events: bool) -> Self {
        Self { print_events, ..Self::default() }
    }
}

fn kind(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::PathAssigned { .. }  => "path_assigned",
        SimEvent::PathFailed { .. }    => "path_failed",
        SimEvent::BlockedChanged(_)    => "blocked_changed",
        SimEvent::PathsReset { .. }    => "paths_reset",
        SimEvent::PathAbandoned { .. } => "path_abandoned",
        SimEvent::ReachedExit(_)       => "reached_exit",
    }
}

impl SimObserver for Tally {
    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.searches += report.searches as u64;
        self.deferred += report.deferred as u64;
        self.deadlocks += report.deadlocks_broken as u64;
        self.peak_blocked = self.peak_blocked.max(report.blocked);
    }

    fn on_events(&mut self, tick: Tick, events: &[SimEvent]) {
        for event in events {
            *self.counts.entry(kind(event)).or_default() += 1;
            if let SimEvent::ReachedExit(id) = event {
                self.exited.push(*id);
            }
            if self.print_events {
                match serde_json::to_string(&(tick, event)) {
                    Ok(line) => println!("{line}"),
                    Err(err) => tracing::warn!(%err, "event not serialisable"),
                }
            }
        }
    }

    fn on_snapshot(&mut self, tick: Tick, occupancy: &OccupancyIndex, actors: &ActorStore) {
        let crowded = occupancy.snapshot().iter().filter(|(_, ids)| ids.len() > 1).count();
        tracing::info!(%tick, actors = actors.len(), crowded, "snapshot");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let print_events = std::env::args().any(|a| a == "--events");

    // 1. World.
    let mut tiles = load_tiles_reader(Cursor::new(FURNITURE_CSV), WIDTH, HEIGHT)?;
    tiles.fill(Area::new(0, 8, WIDTH, 1), TileKind::Path);
    tiles.fill(Area::new(16, 2, 4, 3), TileKind::Water);
    tiles.fill(Area::new(10, 11, 2, 2), TileKind::Rock);
    tiles.set(GATE, TileKind::Entrance)?;
    tracing::info!(
        width = WIDTH,
        height = HEIGHT,
        chairs = tiles.count(TileKind::Chair),
        "park laid out"
    );

    // 2. Simulation.
    let ts = SimConfig::default().tile_size;
    let config = SimConfig {
        total_ticks:             OPEN_TICKS,
        seed:                    SEED,
        dwell_ticks:             40,
        snapshot_interval_ticks: SNAPSHOT_TICKS,
        exit_cell:               Some(GATE),
        ..SimConfig::default()
    };
    let mut sim = SimBuilder::new(config, tiles, AStarPathfinder::default(), WanderGoal::new())
        .arbiter(ArbiterConfig::default())
        .spawn_points((0..VISITORS).map(|i| Cell::new(1 + i % 5, 6 + i / 5).center(ts)))
        .build()?;
    tracing::info!(visitors = sim.actors.len(), "gates open");

    // 3. Run.
    let mut tally = Tally::new(print_events);
    let t0 = Instant::now();
    while sim.clock.current_tick < sim.config.end_tick() {
        let tick = sim.clock.current_tick.0;
        if tick == STALL_TICK {
            let hit = sim.set_tile(Cell::new(12, 8), TileKind::Rock)?;
            tracing::info!(rerouted = hit.len(), "market stall placed on the footpath");
        }
        if tick == CLOSING_TICK {
            for id in sim.actors.ids() {
                sim.set_leaving(id)?;
            }
            tracing::info!("closing time");
        }

        sim.run_ticks(1, &mut tally)?;

        for id in tally.exited.drain(..) {
            sim.remove_actor(id)?;
        }
    }
    tally.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    // 4. Summary.
    let summary = serde_json::json!({
        "ticks":        sim.clock.current_tick.0,
        "elapsed_ms":   elapsed.as_millis() as u64,
        "still_inside": sim.actors.len(),
        "searches":     tally.searches,
        "deferred":     tally.deferred,
        "deadlocks":    tally.deadlocks,
        "peak_blocked": tally.peak_blocked,
        "events":       tally.counts,
    });
    eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
