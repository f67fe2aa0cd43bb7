// replay_core/src/processor.rs

//! The replay state machine.
//!
//! A [`LogProcessor`] pulls one record at a time from its [`RecordSource`],
//! feeds the odometry transition and (when asked for) the projected scan to
//! its [`Estimator`], exports periodic snapshots and scores the estimate
//! against ground truth when a reference stream is attached.

use crate::config::ProcessorConfig;
use crate::error::{ReplayError, Result};
use crate::estimation::Estimator;
use crate::evaluation::{relative_drift_error, ErrorSample, ErrorStatistics};
use crate::geometry::RigidPose;
use crate::io::SnapshotWriter;
use crate::messages::GroundTruthRecord;
use crate::perception::ScanProjector;
use crate::sources::{GroundTruthSource, RecordSource};
use crate::types::{StepIndex, Timestamp};
use std::time::Instant;

/// Lifecycle of a processor. `Exhausted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    Unstarted,
    Running,
    Exhausted,
}

/// What a single call to [`LogProcessor::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The record source is empty. Nothing was read or processed.
    Exhausted,
    /// The odometry was integrated but the estimator did not want the scan.
    OdometryOnly,
    /// The scan was integrated and the step counter advanced.
    ScanProcessed,
}

impl StepOutcome {
    pub fn has_more(self) -> bool {
        !matches!(self, StepOutcome::Exhausted)
    }

    pub fn scan_processed(self) -> bool {
        matches!(self, StepOutcome::ScanProcessed)
    }
}

/// Placeholder reference stream for replays without ground truth.
///
/// It can never be constructed, so a processor typed with it has no
/// ground-truth branch at all.
#[derive(Debug, Clone, Copy)]
pub enum NoGroundTruth<P> {
    #[doc(hidden)]
    Never(std::convert::Infallible, std::marker::PhantomData<P>),
}

impl<P> GroundTruthSource for NoGroundTruth<P> {
    type Pose = P;

    fn next_pose(&mut self) -> Result<Option<GroundTruthRecord<P>>> {
        match *self {
            NoGroundTruth::Never(never, _) => match never {},
        }
    }
}

/// Forward-only reader over the reference stream plus the anchors of the
/// relative drift metric.
struct GroundTruthTracker<G: GroundTruthSource> {
    source: G,
    /// The record a failed search stopped on. Kept so that a single missing
    /// reference pose does not cost the match of the next scan.
    cursor: Option<GroundTruthRecord<G::Pose>>,
    last_estimate: G::Pose,
    last_ground_truth: G::Pose,
}

impl<G> GroundTruthTracker<G>
where
    G: GroundTruthSource,
    G::Pose: RigidPose,
{
    fn new(source: G) -> Self {
        Self {
            source,
            cursor: None,
            last_estimate: G::Pose::identity(),
            last_ground_truth: G::Pose::identity(),
        }
    }

    /// Reads forward, discarding records, until one carries `timestamp`.
    ///
    /// When the stream runs dry without a match, the first record this search
    /// read becomes the cursor and every later one is dropped.
    fn find(&mut self, timestamp: &str) -> Result<Option<GroundTruthRecord<G::Pose>>> {
        let mut first_unmatched = None;
        loop {
            let record = match self.cursor.take() {
                Some(record) => record,
                None => match self.source.next_pose()? {
                    Some(record) => record,
                    None => {
                        self.cursor = first_unmatched;
                        return Ok(None);
                    }
                },
            };
            if record.timestamp == timestamp {
                return Ok(Some(record));
            }
            if first_unmatched.is_none() {
                first_unmatched = Some(record);
            }
        }
    }
}

/// Drives an estimator from a recorded log.
///
/// `G` is the optional reference stream. Processors built with
/// [`LogProcessor::new`] use [`NoGroundTruth`] and never compute errors.
pub struct LogProcessor<E, R, G = NoGroundTruth<<E as Estimator>::Pose>>
where
    E: Estimator,
    R: RecordSource<Pose = E::Pose>,
    G: GroundTruthSource<Pose = E::Pose>,
{
    records: R,
    ground_truth: Option<GroundTruthTracker<G>>,
    estimator: E,
    projector: ScanProjector,
    snapshots: Option<SnapshotWriter>,
    save_each_step: u64,

    state: ProcessorState,
    step: StepIndex,
    last_odometry: Option<E::Pose>,

    timestamps: Vec<Timestamp>,
    ground_truth_trajectory: Vec<E::Pose>,
    error_samples: Vec<ErrorSample<E::Pose>>,
    mismatches: u64,
}

impl<E, R> LogProcessor<E, R>
where
    E: Estimator,
    R: RecordSource<Pose = E::Pose>,
{
    /// A processor without a reference stream.
    pub fn new(records: R, estimator: E, config: &ProcessorConfig) -> Self {
        Self::build(records, None, estimator, config)
    }
}

impl<E, R, G> LogProcessor<E, R, G>
where
    E: Estimator,
    R: RecordSource<Pose = E::Pose>,
    G: GroundTruthSource<Pose = E::Pose>,
{
    /// A processor that scores every processed scan against `ground_truth`.
    pub fn with_ground_truth(
        records: R,
        ground_truth: G,
        estimator: E,
        config: &ProcessorConfig,
    ) -> Self {
        Self::build(records, Some(ground_truth), estimator, config)
    }

    fn build(records: R, ground_truth: Option<G>, estimator: E, config: &ProcessorConfig) -> Self {
        Self {
            records,
            ground_truth: ground_truth.map(GroundTruthTracker::new),
            estimator,
            projector: config.projector(),
            snapshots: config.snapshot_writer(),
            save_each_step: config.save_each_step,
            state: ProcessorState::Unstarted,
            step: 0,
            last_odometry: None,
            timestamps: Vec::new(),
            ground_truth_trajectory: Vec::new(),
            error_samples: Vec::new(),
            mismatches: 0,
        }
    }

    /// Processes the next record of the log.
    pub fn advance(&mut self) -> Result<StepOutcome> {
        if self.state == ProcessorState::Exhausted {
            return Ok(StepOutcome::Exhausted);
        }

        let Some(record) = self.records.next_reading()? else {
            tracing::debug!(step = self.step, "record source exhausted");
            self.state = ProcessorState::Exhausted;
            return Ok(StepOutcome::Exhausted);
        };
        self.state = ProcessorState::Running;

        let last = self.last_odometry.unwrap_or(record.odometry);
        self.estimator
            .process_odom(&last, &record.odometry)
            .map_err(estimator_error)?;
        self.last_odometry = Some(record.odometry);

        if !self.estimator.scan_required() {
            tracing::debug!(timestamp = %record.timestamp, "scan not required");
            return Ok(StepOutcome::OdometryOnly);
        }

        let cloud = self.projector.project(&record.scan);
        self.estimator
            .process_scan(std::slice::from_ref(&cloud))
            .map_err(estimator_error)?;
        self.timestamps.push(record.timestamp.clone());

        if self.save_each_step > 0 && self.step % self.save_each_step == 0 {
            if let Some(writer) = &self.snapshots {
                let best = self.estimator.best_hypothesis_index(false);
                writer.write(
                    self.step,
                    self.estimator.map(best, false),
                    &self.estimator.trajectory(best, false),
                )?;
            }
        }
        self.step += 1;

        if let Some(tracker) = &mut self.ground_truth {
            match tracker.find(&record.timestamp)? {
                Some(reference) => {
                    let estimate = self
                        .estimator
                        .pose(self.estimator.best_hypothesis_index(false));
                    let error = relative_drift_error(
                        &tracker.last_estimate,
                        &estimate,
                        &tracker.last_ground_truth,
                        &reference.pose,
                    );

                    self.ground_truth_trajectory.push(reference.pose);
                    self.error_samples.push(ErrorSample {
                        timestamp: reference.timestamp,
                        ground_truth: reference.pose,
                        error,
                    });
                    tracker.last_ground_truth = reference.pose;
                    tracker.last_estimate = estimate;

                    tracing::info!("Estimated pose:    {:?}", estimate);
                    tracing::info!("Ground truth pose: {:?}", reference.pose);
                    tracing::info!("Pose error:        {}", error);
                }
                None => {
                    self.mismatches += 1;
                    tracing::warn!(
                        "No ground truth pose for timestamp {}. Unable to compute error.",
                        record.timestamp
                    );
                }
            }
        }

        Ok(StepOutcome::ScanProcessed)
    }

    /// Replays the remaining log and returns the number of processed scans.
    pub fn run_to_completion(&mut self) -> Result<u64> {
        let mut processed = 0;
        loop {
            let started = Instant::now();
            match self.advance()? {
                StepOutcome::Exhausted => break,
                StepOutcome::OdometryOnly => {}
                StepOutcome::ScanProcessed => {
                    processed += 1;
                    tracing::info!(
                        step = self.step - 1,
                        "Processed scan in {:.3} ms",
                        started.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
        }
        Ok(processed)
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    /// Number of processed scans so far; also the index of the next snapshot.
    pub fn step(&self) -> StepIndex {
        self.step
    }

    /// Timestamps of the processed scans, one per step.
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Reference poses of every successful match.
    pub fn ground_truth_trajectory(&self) -> &[E::Pose] {
        &self.ground_truth_trajectory
    }

    pub fn pose_errors(&self) -> Vec<f64> {
        self.error_samples.iter().map(|s| s.error).collect()
    }

    pub fn error_samples(&self) -> &[ErrorSample<E::Pose>] {
        &self.error_samples
    }

    /// Processed scans for which no reference pose was found.
    pub fn ground_truth_mismatches(&self) -> u64 {
        self.mismatches
    }

    pub fn error_statistics(&self) -> ErrorStatistics {
        ErrorStatistics::from_samples(&self.error_samples)
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    /// The attached reference stream, if any.
    pub fn ground_truth(&self) -> Option<&G> {
        self.ground_truth.as_ref().map(|tracker| &tracker.source)
    }
}

fn estimator_error<Err>(err: Err) -> ReplayError
where
    Err: std::error::Error + Send + Sync + 'static,
{
    ReplayError::Estimator(Box::new(err))
}
