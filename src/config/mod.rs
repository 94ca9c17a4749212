//! Configuration module
//!
//! Holds the engine-wide tuning knobs: resolution depth limits, cache
//! capacity and the date format used in messages.

pub mod engine;

pub use engine::EngineConfig;
