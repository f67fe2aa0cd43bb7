// replay_core/src/io/snapshot.rs

use crate::error::{ReplayError, Result};
use crate::geometry::RigidPose;
use crate::mapping::MapArtifact;
use crate::types::StepIndex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header line of every exported trajectory file.
pub const TRAJECTORY_HEADER: &str = "# x[m] y[m] phi[deg]";

/// Files produced by one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub map: PathBuf,
    pub trajectory: PathBuf,
}

/// Writes `map_SSSSS.map` / `trajectory_SSSSS.csv` pairs into a directory.
///
/// Step indices are zero-padded to five digits. Larger indices simply use
/// more digits, so names stay unique but stop sorting lexically past 99999.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn map_path(&self, step: StepIndex) -> PathBuf {
        self.output_dir.join(format!("map_{step:05}.map"))
    }

    pub fn trajectory_path(&self, step: StepIndex) -> PathBuf {
        self.output_dir.join(format!("trajectory_{step:05}.csv"))
    }

    /// Exports one map/trajectory pair. The output directory must exist.
    pub fn write<M, P>(&self, step: StepIndex, map: &M, trajectory: &[P]) -> Result<SnapshotPaths>
    where
        M: MapArtifact + ?Sized,
        P: RigidPose,
    {
        let map_path = self.map_path(step);
        tracing::info!(path = %map_path.display(), "Saving best map...");
        write_file(&map_path, |out| map.save(out))?;

        let trajectory_path = self.trajectory_path(step);
        tracing::info!(path = %trajectory_path.display(), "Saving best trajectory...");
        write_file(&trajectory_path, |out| write_trajectory(out, trajectory))?;

        Ok(SnapshotPaths {
            map: map_path,
            trajectory: trajectory_path,
        })
    }
}

/// Serializes a trajectory as a header line followed by one
/// `x y heading_degrees` line per pose.
pub fn write_trajectory<P: RigidPose>(out: &mut dyn Write, trajectory: &[P]) -> std::io::Result<()> {
    writeln!(out, "{TRAJECTORY_HEADER}")?;
    for pose in trajectory {
        let position = pose.position();
        writeln!(
            out,
            "{} {} {}",
            position[0],
            position[1],
            pose.heading().to_degrees()
        )?;
    }
    Ok(())
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut dyn Write) -> std::io::Result<()>,
) -> Result<()> {
    let file = File::create(path).map_err(|e| ReplayError::io(path, e))?;
    let mut out = BufWriter::new(file);
    body(&mut out).map_err(|e| ReplayError::io(path, e))?;
    out.flush().map_err(|e| ReplayError::io(path, e))
}
