//! WebSocket message DTOs.
//!
//! Everything pushed to a dashboard subscriber is a JSON object with a
//! `"type"` discriminator and camelCase keys.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    Priority, PromptOrigin, Revenue, StreamPhase, TemplateId, UserEngagement,
    event::{SubscriptionKind, SubscriptionTier},
};

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Metrics,
    Prompt,
}

/// Projection of one session's aggregate
///
/// `connected == false` with no session id is the empty snapshot sent when no
/// session exists.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub r#type: MessageType,
    pub connected: bool,
    pub session_id: Option<String>,
    pub channel: Option<String>,
    pub timestamp: i64,
    pub language: String,

    // stream
    pub stream_start: i64,
    pub stream_uptime: f64,
    pub is_live: bool,
    pub title: String,
    pub category: String,
    pub stream_language: String,
    pub current_viewers: u64,
    pub peak_viewers: u64,
    pub average_viewer_count: f64,
    pub viewer_retention: f64,

    // chat
    pub total_messages: u64,
    pub messages_per_minute: f64,
    pub unique_chatters: usize,
    pub sentiment: f64,
    pub chat_score: u8,
    pub health_score: f64,

    // community
    pub total_followers: u64,
    pub session_followers_gained: u64,
    pub followers_per_minute: f64,
    pub total_subs: u64,
    pub session_subs_gained: u64,
    pub subs_per_minute: f64,
    pub tier1_subs: u64,
    pub tier2_subs: u64,
    pub tier3_subs: u64,
    pub session_tier1_subs: u64,
    pub session_tier2_subs: u64,
    pub session_tier3_subs: u64,
    pub total_bits: u64,
    pub session_bits_earned: u64,
    pub bits_per_minute: f64,
    pub total_raids: u64,
    pub session_raids_received: u64,

    // revenue
    pub revenue: Revenue,
    pub projected_revenue: f64,

    // phase
    pub phase: StreamPhase,
    pub phase_transition_time: i64,
    pub first_viewer_time: Option<i64>,
    pub last_prompt_time: Option<i64>,

    pub user_engagement: BTreeMap<String, UserEngagement>,
    pub top_engaged_users: Vec<EngagedUserDto>,
    pub recent_messages: Vec<RecentMessageDto>,
    pub recent_follows: Vec<RecentFollowDto>,
    pub recent_subs: Vec<RecentSubscriptionDto>,
    pub recent_bits: Vec<RecentCheerDto>,
    pub recent_raids: Vec<RecentRaidDto>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngagedUserDto {
    pub username: String,
    pub messages: u64,
    pub bits: u64,
    pub follows: u64,
    pub subs: u64,
    pub total: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentMessageDto {
    pub username: String,
    pub display_name: String,
    pub message: String,
    pub timestamp: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentFollowDto {
    pub username: String,
    pub display_name: String,
    pub timestamp: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubscriptionDto {
    pub username: String,
    pub display_name: String,
    pub kind: SubscriptionKind,
    pub tier: SubscriptionTier,
    pub count: u64,
    pub timestamp: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentCheerDto {
    pub username: String,
    pub display_name: String,
    pub bits: u64,
    pub message: String,
    pub timestamp: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentRaidDto {
    pub username: String,
    pub display_name: String,
    pub viewers: u64,
    pub timestamp: i64,
}

/// A coaching prompt for the streamer
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptMessageDto {
    pub r#type: MessageType,
    pub session_id: String,
    pub kind: String,
    pub priority: Priority,
    pub text: String,
    pub originated_from: PromptOrigin,
    pub template: Option<TemplateId>,
    pub phase: StreamPhase,
    pub timestamp: i64,
}
