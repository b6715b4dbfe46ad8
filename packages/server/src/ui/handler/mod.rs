//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{
    connect_session, disconnect_session, get_metrics, health_check, ingest_event, select_prompt,
    set_language, update_stream_info,
};
pub use websocket::websocket_handler;
