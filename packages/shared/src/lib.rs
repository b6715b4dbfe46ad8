//! Utilities shared between the Stagehand crates.

pub mod logger;
pub mod time;
