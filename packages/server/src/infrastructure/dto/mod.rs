//! Data Transfer Objects (DTOs).
//!
//! DTOs are organized by protocol:
//! - `websocket`: messages pushed to dashboard subscribers
//! - `http`: operator API request / response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
