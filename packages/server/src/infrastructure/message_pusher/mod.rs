//! メッセージ送信（通知）の実装
//!
//! - `websocket`: ダッシュボードの WebSocket 接続を使った実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
