// replay_core/src/mapping/mod.rs

use std::io::{self, Write};

// --- The MapArtifact Trait ("Contract") ---
/// A map produced by an estimator, exported at snapshot time.
///
/// The on-disk format belongs to the map type; the snapshot writer only
/// provides the sink.
pub trait MapArtifact {
    fn save(&self, out: &mut dyn Write) -> io::Result<()>;
}

// --- Implementation sub-modules ---
mod none;
mod point_map;

// --- Re-export the public structs for a clean API ---
pub use none::NoneMap;
pub use point_map::PointMap;
