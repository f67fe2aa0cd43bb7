// replay_core/src/types.rs

// --- Core Type Aliases ---

/// One range reading per beam, in metres, ordered by beam index.
pub type RangeScan = Vec<f64>;

/// Log timestamps are opaque: they are only ever compared for equality.
pub type Timestamp = String;

/// Counter of processed scans. Odometry-only records never advance it.
pub type StepIndex = u64;

/// Index of a hypothesis (particle, graph node set, ...) inside an estimator.
pub type HypothesisIndex = usize;
