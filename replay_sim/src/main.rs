// replay_sim/src/main.rs

use clap::Parser;
use replay_sim::cli::Cli;
use replay_sim::error::Result;
use replay_sim::simulation::config::ScenarioConfig;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins over RUST_LOG, which wins over the `info` default.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut scenario = ScenarioConfig::load(cli.scenario.as_deref())?;
    cli.apply_overrides(&mut scenario);

    if cli.print_scenario {
        print!("{}", scenario.to_toml()?);
        return Ok(());
    }

    let report = replay_sim::run(&scenario)?;
    println!(
        "Processed {} scans from {} records ({} without ground truth)",
        report.processed_scans, report.records, report.unmatched_scans
    );
    println!("Final estimated pose: {}", report.final_pose);
    println!("Pose error: {}", report.statistics.summary());
    Ok(())
}
