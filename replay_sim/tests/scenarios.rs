// replay_sim/tests/scenarios.rs

use replay_sim::prelude::*;
use std::path::Path;

fn shipped(name: &str) -> ScenarioConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets/scenarios")
        .join(name);
    ScenarioConfig::load(Some(&path)).unwrap()
}

#[test]
fn shipped_scenario_is_valid() {
    let scenario = shipped("circle_room.toml");
    scenario.validate().unwrap();
    assert_eq!(scenario.simulation.seed, Some(42));
    assert_eq!(scenario.lidar.beams, 181);
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut scenario = shipped("circle_room.toml");
    scenario.simulation.steps = 80;
    scenario.processor.save_each_step = 0;

    let first = run(&scenario).unwrap();
    let second = run(&scenario).unwrap();
    assert_eq!(first.processed_scans, second.processed_scans);
    assert_eq!(first.statistics, second.statistics);
    assert_eq!(first.final_pose, second.final_pose);
}

#[test]
fn missing_scenario_file_is_reported() {
    let result = ScenarioConfig::load(Some(Path::new("no/such/scenario.toml")));
    assert!(matches!(result, Err(SimError::MissingScenario(_))));
}

#[test]
fn dense_ground_truth_scores_every_processed_scan() {
    let scenario = ScenarioConfig {
        simulation: Simulation {
            seed: Some(2024),
            steps: 200,
            timestep: 0.1,
            ground_truth_every: 1,
        },
        path: PathShape::Rectangle {
            min: [2.0, 2.0],
            max: [7.0, 5.0],
            speed: 0.8,
        },
        ..ScenarioConfig::default()
    };
    assert!(scenario.warnings().is_empty());

    let report = run(&scenario).unwrap();
    assert!(report.processed_scans > 1);
    assert_eq!(report.statistics.count as u64, report.processed_scans);
    assert_eq!(report.unmatched_scans, 0);
}
