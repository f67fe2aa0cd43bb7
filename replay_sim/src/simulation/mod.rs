// replay_sim/src/simulation/mod.rs

pub mod config;
pub mod core;
pub mod log;
pub mod runner;
pub mod sensors;
pub mod trajectory;
pub mod world;
