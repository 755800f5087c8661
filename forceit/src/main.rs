use forceit::{ScenarioConfig, Scenario, ManualClock, ScriptedMotion, parse_log_level};
use forceit::{run_viewer, run_headless};
use forceit::{bench_collision, bench_tick_curve};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};

use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Bevy window, Space calibrates, Escape quits
    View,
    /// Fixed number of ticks without a window
    Headless,
    /// Collision pass timings
    Bench,
    /// Full tick timings as CSV
    BenchCurve,
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it is an existing path
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    #[arg(long, value_enum, default_value = "view")]
    mode: Mode,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// trace, debug, info, warn or error (headless and bench modes)
    #[arg(long, default_value = "info")]
    log_level: String,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn init_logging(level: Level) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = parse_log_level(&args.log_level)?;

    // Bevy installs its own subscriber in view mode
    if args.mode != Mode::View {
        init_logging(level)?;
    }

    match args.mode {
        Mode::View => {
            let cfg = load_scenario_from_yaml(&args.file_name)?;
            let scenario = Scenario::build(cfg)?;
            run_viewer(scenario, ScriptedMotion::default());
        }
        Mode::Headless => {
            let cfg = load_scenario_from_yaml(&args.file_name)?;
            let clock = ManualClock::new();
            let mut scenario = Scenario::build_with_clock(cfg, clock.clone())?;
            let summary = run_headless(&mut scenario, &clock, &ScriptedMotion::default(), args.ticks);
            info!(?summary, "headless run finished");
        }
        Mode::Bench => bench_collision(),
        Mode::BenchCurve => bench_tick_curve()?,
    }

    Ok(())
}
