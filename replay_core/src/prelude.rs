// replay_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::Estimator;
pub use crate::geometry::RigidPose;
pub use crate::mapping::MapArtifact;
pub use crate::sources::{GroundTruthSource, RecordSource};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::geometry::{Pose2D, Pose3D};
pub use crate::messages::{GroundTruthRecord, PointCloud, TimestampedRecord};
pub use crate::types::{HypothesisIndex, RangeScan, StepIndex, Timestamp};

// --- The Replay Pipeline ---
pub use crate::config::ProcessorConfig;
pub use crate::error::{ReplayError, Result};
pub use crate::evaluation::{ErrorSample, ErrorStatistics};
pub use crate::io::SnapshotWriter;
pub use crate::perception::ScanProjector;
pub use crate::processor::{LogProcessor, ProcessorState, StepOutcome};

// --- Concrete Implementations (Export common ones for convenience) ---
pub use crate::estimation::{DeadReckoningConfig, DeadReckoningEstimator};
pub use crate::mapping::{NoneMap, PointMap};
pub use crate::sources::{IterGroundTruthSource, IterRecordSource};
