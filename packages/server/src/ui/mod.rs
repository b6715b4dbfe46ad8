//! Operator API, dashboard WebSocket and periodic timers.

mod handler;
mod publish;
mod scheduler;
mod server;
mod signal;
pub mod state;

pub use scheduler::SchedulerIntervals;
pub use server::Server;
