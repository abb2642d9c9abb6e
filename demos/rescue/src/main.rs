//! rescue: survivor-rescue demo for the robot_sim framework.
//!
//! Loads a scenario JSON file (or generates a seeded random one), streams
//! JSON scene frames at a multiple of real time, and writes the robots'
//! trajectories to CSV.  A second thread plays the part of an interactive
//! front-end: it pauses the run briefly and resumes it.
//!
//! ```text
//! rescue [SCENARIO.json] [OUTPUT_DIR]
//! RUST_LOG=debug rescue
//! ```

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rsim_core::{ScenarioConfig, SimParams};
use rsim_engine::{ControlHandle, EngineBuilder};
use rsim_output::{CsvTrajectoryWriter, OutputWriter, TrajectoryObserver};
use rsim_stream::{FrameStream, JsonSceneRenderer, OutputRecord, Pacer};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64   = 7;
const ROBOT_COUNT:    usize = 3;
const SURVIVOR_COUNT: usize = 5;
const PLAYBACK_SPEED: f64   = 20.0; // simulated seconds per wall-clock second
const POSE_INTERVAL:  u64   = 5;    // write poses every 5 steps
const DEFAULT_OUTPUT: &str  = "output/rescue";

const PAUSE_AFTER: Duration = Duration::from_millis(400);
const PAUSE_FOR:   Duration = Duration::from_millis(250);
const PAUSED_POLL: Duration = Duration::from_millis(20);

const COLORS: [&str; 4] = ["#ff6b6b", "#4ecdc4", "#ffe66d", "#a29bfe"];

// ── Scenario loading ──────────────────────────────────────────────────────────

fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            let config: ScenarioConfig = serde_json::from_str(&text)
                .with_context(|| format!("parsing scenario {}", path.display()))?;
            info!(path = %path.display(), robots = config.robots.len(), "scenario loaded");
            Ok(config)
        }
        None => {
            let colors: Vec<String> = COLORS.iter().map(|c| (*c).to_owned()).collect();
            info!(seed = SEED, robots = ROBOT_COUNT, survivors = SURVIVOR_COUNT, "random scenario");
            Ok(ScenarioConfig::random_rescue(
                SEED,
                ROBOT_COUNT,
                SURVIVOR_COUNT,
                SimParams::rescue(),
                &colors,
            ))
        }
    }
}

// ── Front-end stand-in ────────────────────────────────────────────────────────

fn spawn_front_end(control: ControlHandle) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(PAUSE_AFTER);
        if let Err(e) = control.pause() {
            // The run finished before we got here.
            warn!(error = %e, "could not pause");
            return;
        }
        thread::sleep(PAUSE_FOR);
        if let Err(e) = control.resume() {
            warn!(error = %e, "could not resume");
        }
    })
}

// ── Run wrap-up ───────────────────────────────────────────────────────────────

/// Write pending poses and flush the writer however the run ended.  Only a
/// completed run reaches `on_finished`; stopped and failed runs do not.
fn flush_output<W: OutputWriter>(observer: &mut TrajectoryObserver<W>) -> Result<()> {
    observer.finish().context("flushing trajectory output")?;
    match observer.take_error() {
        Some(e) => Err(e).context("writing trajectory output"),
        None => Ok(()),
    }
}

/// Map the stream's terminal record to the process result.
fn run_result<P>(last: Option<&OutputRecord<P>>) -> Result<()> {
    match last {
        Some(OutputRecord::Error { message }) => bail!("simulation failed: {message}"),
        Some(_) => Ok(()),
        None => bail!("frame stream ended without a terminal record"),
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    frames: u64,
    bytes:  usize,
    paused: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1);
    let scenario_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);

    println!("=== rescue — robot_sim survivor rescue ===");

    // 1. Scenario and engine.
    let config = load_scenario(scenario_path.as_deref())?;
    let time_step = config.simulation.time_step;
    let max_steps = config.simulation.max_steps;
    let engine = EngineBuilder::new(config).build()?;
    println!(
        "Robots: {}  |  Obstacles: {}  |  Max steps: {max_steps}  |  dt: {time_step} s",
        engine.agents().len(),
        engine.world().obstacle_count(),
    );

    // 2. Output.
    let writer = CsvTrajectoryWriter::new(&output_dir)?;
    let observer = TrajectoryObserver::with_interval(writer, POSE_INTERVAL);

    // 3. Stream plus a control thread.
    let stream = FrameStream::new(engine, JsonSceneRenderer::default()).with_observer(observer);
    let front_end = spawn_front_end(stream.control());
    let mut stream = Pacer::from_time_step(time_step / PLAYBACK_SPEED).pace(stream);

    // 4. Run.
    let t0 = Instant::now();
    let mut tally = Tally::default();
    let mut last = None;
    for record in stream.by_ref() {
        match &record {
            OutputRecord::Frame { payload, .. } => {
                tally.frames += 1;
                tally.bytes += payload.len();
            }
            OutputRecord::Paused { .. } => {
                tally.paused += 1;
                thread::sleep(PAUSED_POLL);
            }
            _ => {}
        }
        if record.is_terminal() {
            last = Some(record);
        }
    }
    let elapsed = t0.elapsed();

    if front_end.join().is_err() {
        warn!("front-end thread panicked");
    }

    // 5. Flush output.
    let (engine, _, mut observer) = stream.into_inner().into_parts();
    let output = flush_output(&mut observer);

    // 6. Summary.
    let status = last.as_ref().map_or("none", OutputRecord::status);
    println!();
    println!("Run {status} after {} steps in {:.3} s", engine.step_count(), elapsed.as_secs_f64());
    if let Some(OutputRecord::Completed { all_goals_reached, .. }) = &last {
        println!("  all goals reached   : {all_goals_reached}");
    }
    if let Some(OutputRecord::Error { message }) = &last {
        println!("  error               : {message}");
    }
    println!("  frames              : {} ({} bytes of JSON)", tally.frames, tally.bytes);
    println!("  paused pulls        : {}", tally.paused);
    println!("  output directory    : {}", output_dir.display());
    println!();

    println!("{:<10} {:>8} {:>8} {:>8}", "Robot", "x", "y", "Goals");
    println!("{}", "-".repeat(37));
    for agent in engine.agents() {
        let p = agent.position();
        println!(
            "{:<10} {:>8.1} {:>8.1} {:>4}/{:<3}",
            agent.name,
            p.x,
            p.y,
            agent.goal_index(),
            agent.goals().len(),
        );
    }

    output?;
    run_result(last.as_ref())
}
