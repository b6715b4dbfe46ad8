//! HTTP API request / response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::event::SubscriptionKind;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub channel: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub session_id: String,
    pub channel: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectResponse {
    pub disconnected: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SetLanguageRequest {
    pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetLanguageResponse {
    pub session_id: String,
    pub language: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Inbound event feed body
///
/// `timestamp` (Unix ms) defaults to the time the server received the event.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRequest {
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        username: String,
        #[serde(default)]
        display_name: Option<String>,
        message: String,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Follow {
        username: String,
        #[serde(default)]
        display_name: Option<String>,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Subscription {
        username: String,
        #[serde(default)]
        display_name: Option<String>,
        #[serde(default)]
        kind: SubscriptionKind,
        #[serde(default)]
        tier: Option<TierHintDto>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Cheer {
        username: String,
        #[serde(default)]
        display_name: Option<String>,
        #[serde(default)]
        bits: u64,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Raid {
        username: String,
        #[serde(default)]
        display_name: Option<String>,
        #[serde(default)]
        viewers: u64,
        #[serde(default)]
        timestamp: Option<i64>,
    },
}

/// Tier as the transport reports it: `"1000"`, `"Tier 1"`, `"Prime"` or `{ "plan": "1000" }`.
/// Any other shape is kept as-is and classified as unknown.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TierHintDto {
    Label(String),
    Plan { plan: String },
    Other(serde_json::Value),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestResponse {
    pub accepted: bool,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfoRequest {
    pub is_live: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub viewer_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}
