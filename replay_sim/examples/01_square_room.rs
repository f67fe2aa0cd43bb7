// replay_sim/examples/01_square_room.rs

//! A lap around a rectangle, replayed step by step.
//!
//! This example demonstrates how to:
//! 1. Build a scenario in code instead of loading a TOML file.
//! 2. Generate a synthetic log with a deterministic seed.
//! 3. Drive the `LogProcessor` one record at a time and inspect each outcome.
//!
//! To run this example:
//! `cargo run --example 01_square_room`

use replay_sim::prelude::*;

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .init();

    // --- 1. Describe the scenario ---
    let scenario = ScenarioConfig {
        simulation: Simulation {
            seed: Some(2024),
            steps: 200,
            timestep: 0.1,
            // Scans fall on whichever record the motion gate picks, so every
            // record needs a reference pose for the matcher to keep up.
            ground_truth_every: 1,
        },
        path: PathShape::Rectangle {
            min: [2.0, 2.0],
            max: [7.0, 5.0],
            speed: 0.8,
        },
        ..ScenarioConfig::default()
    };
    scenario.validate()?;

    // --- 2. Generate the log ---
    let mut rng = SimulationRng::new(scenario.simulation.seed);
    let log = LogGenerator::from_scenario(&scenario)?.generate(&mut rng);

    // --- 3. Replay it ---
    let mut processor = LogProcessor::with_ground_truth(
        IterRecordSource::new(log.records),
        IterGroundTruthSource::new(log.ground_truth),
        DeadReckoningEstimator::new(&scenario.estimator),
        &scenario.processor,
    );

    let mut odometry_only = 0;
    loop {
        let matched_before = processor.error_samples().len();
        match processor.advance()? {
            StepOutcome::Exhausted => break,
            StepOutcome::OdometryOnly => odometry_only += 1,
            StepOutcome::ScanProcessed => {
                // A scan whose reference pose is missing adds no sample.
                if let Some(sample) = processor.error_samples().get(matched_before) {
                    println!(
                        "step {:>3} @ {}: drift {:.4} m",
                        processor.step() - 1,
                        sample.timestamp,
                        sample.error
                    );
                }
            }
        }
    }

    println!(
        "{} scans processed, {} odometry-only records",
        processor.step(),
        odometry_only
    );
    println!("{}", processor.error_statistics().summary());
    Ok(())
}
