//! dualswipe - replay a recorded pointer trace against a simulated host

use clap::Parser;
use dualswipe::config::ResolvedConfig;
use dualswipe::model::{AppError, DisplayId};
use dualswipe::sim::SimulatedHost;
use dualswipe::state::{Interpolator, SwipeController};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Replay a JSONL pointer trace and print the resulting host calls
#[derive(Parser, Debug)]
#[command(name = "dualswipe")]
#[command(version)]
#[command(about = "Replay two-finger swipe traces and print the window-manager calls they cause")]
pub struct Args {
    /// Path to JSONL pointer trace (reads from stdin if not provided)
    pub trace: Option<PathBuf>,

    /// Display ids in registry order
    #[arg(long, value_delimiter = ',', default_value = "0,1")]
    pub displays: Vec<u32>,

    /// Display the gesture is performed on
    #[arg(long, default_value_t = 0)]
    pub origin: u32,

    /// Id of the task focused on the origin display
    #[arg(long, default_value_t = 42)]
    pub task: u32,

    /// Mark the focused task as the home task
    #[arg(long)]
    pub home_task: bool,

    /// Home activities whose visibility is toggled during a drag
    #[arg(long, value_delimiter = ',', default_value = "100")]
    pub home_activities: Vec<u32>,

    /// Spacing of simulated animation frames in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_interval: Option<u64>,

    /// Settle animation curve
    #[arg(long, value_parser = ["linear", "accelerate-decelerate", "ease-out-cubic"])]
    pub interpolator: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn scene(&self) -> SimulatedHost {
        let mut host = self
            .displays
            .iter()
            .fold(SimulatedHost::new(), |host, id| host.with_display(*id))
            .with_focused_task(self.origin, self.task, self.home_task);
        for activity in &self.home_activities {
            host = host.with_home_activity(*activity);
        }
        host
    }
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = dualswipe::config::load_config_with_precedence(args.config.clone())?;
    let merged = dualswipe::config::merge_config(config_file);
    let with_env = dualswipe::config::apply_env_overrides(merged);
    let interpolator = args.interpolator.as_deref().and_then(Interpolator::from_name);
    let config = dualswipe::config::apply_cli_overrides(with_env, args.frame_interval, interpolator);
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = resolve_config(args)?;
    dualswipe::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let lines = dualswipe::source::read_trace(args.trace.clone())?;
    let (events, errors) = dualswipe::parser::parse_trace(lines, 1);
    for err in &errors {
        warn!(error = %err, "skipping trace line");
        eprintln!("warning: {err}");
    }

    let mut host = args.scene();
    let mut controller = SwipeController::new(DisplayId::new(args.origin), config.tuning);
    let report = dualswipe::replay::replay(&mut controller, &mut host, &events, config.frame_interval_ms);
    info!(?report, skipped = errors.len(), "replay complete");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for call in host.calls() {
        serde_json::to_writer(&mut out, call)?;
        writeln!(out)?;
    }
    out.flush()?;

    eprintln!(
        "{} event(s), {} gesture(s): {} committed, {} cancelled",
        report.events,
        report.outcomes.len(),
        report.commits(),
        report.cancels()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(&args)?;
    Ok(())
}
