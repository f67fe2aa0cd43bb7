// replay_core/src/lib.rs

// Public modules of the library.
pub mod config;
pub mod error;
pub mod estimation;
pub mod evaluation;
pub mod geometry;
pub mod io;
pub mod mapping;
pub mod messages;
pub mod perception;
pub mod prelude;
pub mod processor;
pub mod sources;
pub mod types;
