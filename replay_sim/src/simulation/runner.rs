// replay_sim/src/simulation/runner.rs

use crate::error::{Result, SimError};
use crate::simulation::config::ScenarioConfig;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::log::LogGenerator;
use replay_core::estimation::{DeadReckoningEstimator, Estimator};
use replay_core::evaluation::ErrorStatistics;
use replay_core::geometry::Pose2D;
use replay_core::processor::LogProcessor;
use replay_core::sources::{IterGroundTruthSource, IterRecordSource};
use std::fs;

/// Outcome of one simulated replay.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records: usize,
    pub processed_scans: u64,
    /// Processed scans that found no reference pose.
    pub unmatched_scans: u64,
    pub statistics: ErrorStatistics,
    pub final_pose: Pose2D,
}

/// Generates the scenario's log and replays it with dead reckoning.
pub fn run(scenario: &ScenarioConfig) -> Result<RunReport> {
    scenario.validate()?;

    let mut rng = SimulationRng::new(scenario.simulation.seed);
    let log = LogGenerator::from_scenario(scenario)?.generate(&mut rng);
    let records = log.records.len();

    if scenario.processor.save_each_step > 0 {
        let dir = &scenario.processor.output_dir;
        fs::create_dir_all(dir).map_err(|source| SimError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        tracing::info!(
            "Saving snapshots every {} steps to {}",
            scenario.processor.save_each_step,
            dir.display()
        );
    }

    let mut processor = LogProcessor::with_ground_truth(
        IterRecordSource::new(log.records),
        IterGroundTruthSource::new(log.ground_truth),
        DeadReckoningEstimator::new(&scenario.estimator),
        &scenario.processor,
    );
    let processed_scans = processor.run_to_completion()?;

    let estimator = processor.estimator();
    Ok(RunReport {
        records,
        processed_scans,
        unmatched_scans: processor.ground_truth_mismatches(),
        statistics: processor.error_statistics(),
        final_pose: estimator.pose(estimator.best_hypothesis_index(false)),
    })
}
