// replay_core/src/sources.rs

//! Contracts for the two recorded streams the processor consumes.
//!
//! Both are strictly forward-only: the processor owns its sources and nothing
//! else may rewind or advance them. How records are parsed from disk is up to
//! the implementation.

use crate::error::Result;
use crate::messages::{GroundTruthRecord, TimestampedRecord};

/// Sequential supplier of `(odometry, scan, timestamp)` records.
pub trait RecordSource {
    type Pose;

    /// Returns `Ok(None)` once the stream is exhausted.
    fn next_reading(&mut self) -> Result<Option<TimestampedRecord<Self::Pose>>>;
}

/// Sequential supplier of reference poses, ordered by timestamp.
pub trait GroundTruthSource {
    type Pose;

    /// Returns `Ok(None)` once the stream is exhausted.
    fn next_pose(&mut self) -> Result<Option<GroundTruthRecord<Self::Pose>>>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    type Pose = S::Pose;

    fn next_reading(&mut self) -> Result<Option<TimestampedRecord<Self::Pose>>> {
        (**self).next_reading()
    }
}

impl<S: GroundTruthSource + ?Sized> GroundTruthSource for Box<S> {
    type Pose = S::Pose;

    fn next_pose(&mut self) -> Result<Option<GroundTruthRecord<Self::Pose>>> {
        (**self).next_pose()
    }
}

/// Adapts any iterator of records into a [`RecordSource`].
#[derive(Debug, Clone)]
pub struct IterRecordSource<I> {
    records: I,
    consumed: usize,
}

impl<I> IterRecordSource<I> {
    pub fn new(records: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            records: records.into_iter(),
            consumed: 0,
        }
    }

    /// Number of records handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<P, I> RecordSource for IterRecordSource<I>
where
    I: Iterator<Item = TimestampedRecord<P>>,
{
    type Pose = P;

    fn next_reading(&mut self) -> Result<Option<TimestampedRecord<P>>> {
        let next = self.records.next();
        if next.is_some() {
            self.consumed += 1;
        }
        Ok(next)
    }
}

/// Adapts any iterator of reference poses into a [`GroundTruthSource`].
#[derive(Debug, Clone)]
pub struct IterGroundTruthSource<I> {
    poses: I,
    consumed: usize,
}

impl<I> IterGroundTruthSource<I> {
    pub fn new(poses: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            poses: poses.into_iter(),
            consumed: 0,
        }
    }

    /// Number of reference poses handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<P, I> GroundTruthSource for IterGroundTruthSource<I>
where
    I: Iterator<Item = GroundTruthRecord<P>>,
{
    type Pose = P;

    fn next_pose(&mut self) -> Result<Option<GroundTruthRecord<P>>> {
        let next = self.poses.next();
        if next.is_some() {
            self.consumed += 1;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pose2D;

    #[test]
    fn iterator_sources_count_what_they_hand_out() {
        let mut gt = IterGroundTruthSource::new(vec![
            GroundTruthRecord::new(Pose2D::default(), "a"),
            GroundTruthRecord::new(Pose2D::default(), "b"),
        ]);
        assert_eq!(gt.next_pose().unwrap().unwrap().timestamp, "a");
        assert_eq!(gt.consumed(), 1);
        assert!(gt.next_pose().unwrap().is_some());
        assert!(gt.next_pose().unwrap().is_none());
        assert_eq!(gt.consumed(), 2);
    }

    #[test]
    fn boxed_sources_forward_calls() {
        let mut boxed: Box<dyn RecordSource<Pose = Pose2D>> = Box::new(IterRecordSource::new(
            vec![TimestampedRecord::new(Pose2D::default(), vec![1.0], "t0")],
        ));
        assert!(boxed.next_reading().unwrap().is_some());
        assert!(boxed.next_reading().unwrap().is_none());
    }
}
