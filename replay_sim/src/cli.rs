// replay_sim/src/cli.rs

use crate::simulation::config::ScenarioConfig;
use clap::Parser;
use std::path::PathBuf;

/// Replays a synthetic robot log through the estimation pipeline and reports
/// how far the estimate drifts from ground truth.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Directory for map and trajectory snapshots.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Snapshot every N processed scans (0 disables snapshots).
    #[arg(long)]
    pub save_each_step: Option<u64>,

    /// Number of log records to generate.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Seed for the simulation RNG.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter, e.g. `debug` or `replay_core=debug,info`. Overrides RUST_LOG.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved scenario as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub print_scenario: bool,
}

impl Cli {
    /// Command-line flags win over the scenario file and the environment.
    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(dir) = &self.output_dir {
            scenario.processor.output_dir = dir.clone();
        }
        if let Some(n) = self.save_each_step {
            scenario.processor.save_each_step = n;
        }
        if let Some(steps) = self.steps {
            scenario.simulation.steps = steps;
        }
        if let Some(seed) = self.seed {
            scenario.simulation.seed = Some(seed);
        }
    }
}
