// replay_core/src/perception/mod.rs

mod scan_projector;

pub use scan_projector::ScanProjector;
