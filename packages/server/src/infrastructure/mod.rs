//! Infrastructure layer.
//!
//! Concrete implementations of the domain ports plus the wire DTOs.

pub mod dto;
pub mod external_data;
pub mod generator;
pub mod message_pusher;
pub mod repository;
pub mod stream_info;
