use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::domain::{ChannelName, StreamInfo, StreamInfoError, StreamInfoSource};

const DEFAULT_ENDPOINT: &str = "https://api.twitch.tv/helix";

/// Twitch Helix API から配信中の情報を取得する
pub struct HelixStreamInfoSource {
    client: HttpClient,
    client_id: String,
    access_token: String,
    endpoint: String,
}

impl HelixStreamInfoSource {
    pub fn new(client_id: &str, access_token: &str) -> Self {
        Self::with_endpoint(client_id, access_token, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(client_id: &str, access_token: &str, endpoint: &str) -> Self {
        Self {
            client: HttpClient::new(),
            client_id: client_id.to_string(),
            access_token: access_token.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct StreamsResponse {
    #[serde(default)]
    data: Vec<HelixStream>,
}

#[derive(Deserialize)]
struct HelixStream {
    #[serde(default)]
    r#type: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    game_name: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    viewer_count: u64,
}

/// `data` が空ならオフライン
fn to_stream_info(response: StreamsResponse) -> Option<StreamInfo> {
    response.data.into_iter().next().map(|stream| StreamInfo {
        is_live: stream.r#type.is_empty() || stream.r#type == "live",
        title: stream.title,
        category: stream.game_name,
        language: stream.language,
        viewer_count: stream.viewer_count,
    })
}

#[async_trait]
impl StreamInfoSource for HelixStreamInfoSource {
    async fn fetch(&self, channel: &ChannelName) -> Result<Option<StreamInfo>, StreamInfoError> {
        let response = self
            .client
            .get(format!("{}/streams", self.endpoint))
            .query(&[("user_login", channel.as_str())])
            .header("Client-ID", &self.client_id)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StreamInfoError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StreamInfoError::Request(format!(
                "Twitch API error: {}",
                response.status()
            )));
        }

        let body: StreamsResponse = response
            .json()
            .await
            .map_err(|e| StreamInfoError::Payload(e.to_string()))?;
        let info = to_stream_info(body);
        tracing::debug!(
            "Stream info for '{}': {}",
            channel,
            info.as_ref()
                .map_or("offline".to_string(), |i| format!("{} viewers", i.viewer_count))
        );
        Ok(info)
    }
}
