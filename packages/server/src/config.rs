//! Runtime configuration.
//!
//! The binary fills this from CLI flags and environment variables. Missing
//! credentials disable the corresponding collaborator instead of failing
//! start-up.

use std::{num::NonZeroU32, time::Duration};

use crate::{domain::GiftTierPolicy, infrastructure::generator::GeneratorLimits};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub twitch_client_id: Option<String>,
    pub twitch_access_token: Option<String>,
    pub generator_timeout: Duration,
    pub generator_calls_per_minute: NonZeroU32,
    /// 時間帯コンテキストに使う UTC からのオフセット（時間）
    pub utc_offset_hours: i32,
    pub gift_tier_policy: GiftTierPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let limits = GeneratorLimits::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            twitch_client_id: None,
            twitch_access_token: None,
            generator_timeout: limits.timeout,
            generator_calls_per_minute: limits.calls_per_minute,
            utc_offset_hours: 0,
            gift_tier_policy: GiftTierPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn generator_limits(&self) -> GeneratorLimits {
        GeneratorLimits {
            timeout: self.generator_timeout,
            calls_per_minute: self.generator_calls_per_minute,
        }
    }

    /// Gemini API key, if one was given and is not blank
    pub fn gemini_api_key(&self) -> Option<&str> {
        non_blank(self.gemini_api_key.as_deref())
    }

    /// Twitch client id and access token, only when both are present
    pub fn twitch_credentials(&self) -> Option<(&str, &str)> {
        let client_id = non_blank(self.twitch_client_id.as_deref())?;
        let access_token = non_blank(self.twitch_access_token.as_deref())?;
        Some((client_id, access_token))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
