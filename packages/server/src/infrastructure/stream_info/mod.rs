//! StreamInfoSource の実装
//!
//! - `helix`: Twitch Helix API の `streams` エンドポイント
//! - `DisabledStreamInfoSource`: 認証情報がない場合。常に `NotConfigured` を返し、配信情報は更新されない

pub mod helix;

use async_trait::async_trait;

use crate::domain::{ChannelName, StreamInfo, StreamInfoError, StreamInfoSource};

pub use helix::HelixStreamInfoSource;

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStreamInfoSource;

#[async_trait]
impl StreamInfoSource for DisabledStreamInfoSource {
    async fn fetch(&self, _channel: &ChannelName) -> Result<Option<StreamInfo>, StreamInfoError> {
        Err(StreamInfoError::NotConfigured)
    }
}
