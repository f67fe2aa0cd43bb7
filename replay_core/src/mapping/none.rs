// replay_core/src/mapping/none.rs

use crate::mapping::MapArtifact;
use std::io::{self, Write};

/// A placeholder map for estimators that only localize.
/// Saving it produces an empty file.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoneMap;

impl MapArtifact for NoneMap {
    fn save(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}
