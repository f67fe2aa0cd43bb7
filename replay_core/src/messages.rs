// replay_core/src/messages.rs

use crate::types::{RangeScan, Timestamp};
use nalgebra::Point2;

// =========================================================================
// == Perception Data Structures ==
// =========================================================================

/// A planar point cloud in the sensor frame, one point per range reading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub points: Vec<Point2<f64>>,
}

impl PointCloud {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }
}

// =========================================================================
// == Log Records ==
// =========================================================================

/// One unit of the primary log: an odometry pose, the scan taken there and
/// the timestamp that ties both to the ground-truth stream.
#[derive(Clone, Debug, PartialEq)]
pub struct TimestampedRecord<P> {
    pub odometry: P,
    pub scan: RangeScan,
    pub timestamp: Timestamp,
}

impl<P> TimestampedRecord<P> {
    pub fn new(odometry: P, scan: RangeScan, timestamp: impl Into<Timestamp>) -> Self {
        Self {
            odometry,
            scan,
            timestamp: timestamp.into(),
        }
    }
}

/// A reference pose from the ground-truth stream.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundTruthRecord<P> {
    pub pose: P,
    pub timestamp: Timestamp,
}

impl<P> GroundTruthRecord<P> {
    pub fn new(pose: P, timestamp: impl Into<Timestamp>) -> Self {
        Self {
            pose,
            timestamp: timestamp.into(),
        }
    }
}
