//! campus-day — run one simulated campus day from a scenario file.
//!
//! ```text
//! campus-day [SCENARIO.json] [OUTPUT_DIR]
//! ```
//!
//! Defaults to the bundled `data/campus.json` and writes CSV output under
//! `output/campus-day`.  Log verbosity follows `RUST_LOG`
//! (e.g. `RUST_LOG=campus_sim=debug` to see every departure).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use campus_agent::AgentView;
use campus_core::{AgentId, LocationId, Tick};
use campus_graph::DijkstraPathFinder;
use campus_output::{CsvWriter, OutputWriter, SimOutputObserver};
use campus_scenario::Scenario;
use campus_sim::{SimObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SCENARIO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/campus.json");
const DEFAULT_OUTPUT:   &str = "output/campus-day";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:            SimOutputObserver<W>,
    snapshot_rows:    usize,
    summary_rows:     usize,
    unreachable_rows: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, unreachable_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentView]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, agents);
    }

    fn on_unreachable(&mut self, agent: AgentId, target: LocationId, tick: Tick) {
        self.unreachable_rows += 1;
        self.inner.on_unreachable(agent, target, tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let scenario_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_SCENARIO), PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);

    // 1. Load and resolve the scenario.
    let scenario = Scenario::load(&scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;
    let names: Vec<String> = scenario.agents.iter().map(|a| a.name.clone()).collect();
    let sources = scenario.sources.clone();
    info!(
        path      = %scenario_path.display(),
        locations = scenario.graph.location_count(),
        agents    = names.len(),
        "scenario ready"
    );

    // 2. Build the sim.
    let mut sim = scenario.into_sim(DijkstraPathFinder)?;

    // 3. Set up output.
    let writer = CsvWriter::new(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    let stats = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s, clock stopped at {}", elapsed.as_secs_f64(), sim.now());
    println!(
        "  ticks {}  departures {}  arrivals {}  activities {}  unreachable {}  skipped {}",
        stats.ticks,
        stats.departures,
        stats.arrivals,
        stats.completed_activities,
        stats.unreachable,
        stats.skipped,
    );
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  unreachable.csv     : {} rows", obs.unreachable_rows);
    println!();

    // 6. Final agent table.
    println!("{:<6} {:<12} {:<10} {:<10} {:<8} {:<14}", "Agent", "Name", "Schedule", "State", "Done", "Location");
    println!("{}", "-".repeat(64));
    for (agent, (name, source)) in sim.agents.iter().zip(names.iter().zip(&sources)) {
        println!(
            "{:<6} {:<12} {:<10} {:<10} {:<8} {:<14}",
            agent.id.0,
            name,
            format!("{source:?}"),
            agent.state.as_str(),
            format!("{}/{}", agent.schedule_cursor, sim.schedules[agent.id.index()].len()),
            sim.graph.name(agent.location),
        );
    }

    Ok(())
}
