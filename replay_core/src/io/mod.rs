// replay_core/src/io/mod.rs

pub mod snapshot;

pub use snapshot::{write_trajectory, SnapshotPaths, SnapshotWriter, TRAJECTORY_HEADER};
