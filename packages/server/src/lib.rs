//! Live stream coaching server library.
//!
//! Tracks rolling chat and community metrics per monitored channel, follows
//! the stream through its audience phases, and selects short coaching prompts
//! for the streamer.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
