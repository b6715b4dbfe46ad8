//! Value objects of the coaching domain.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

/// Opaque session identifier, created at connect time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::EmptySessionId);
        }
        Ok(Self(value))
    }

    /// Generate a fresh random session id
    pub fn generate() -> Self {
        Self(format!("session_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External channel identifier (Twitch login), normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ChannelName(String);

impl ChannelName {
    const MAX_LEN: usize = 25;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let normalized = value.trim().trim_start_matches('#').to_lowercase();
        if normalized.is_empty() {
            return Err(ValueObjectError::EmptyChannelName);
        }
        if normalized.len() > Self::MAX_LEN
            || !normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValueObjectError::InvalidChannelName(value));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChannelName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a chat participant (login name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ChatterId(String);

impl ChatterId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValueObjectError::EmptyChatterId);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChatterId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Output language of a session.
///
/// Only languages that have a translation table are representable, so a
/// parsed `LanguageCode` is always renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Fr,
    Es,
    De,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 4] = [
        LanguageCode::En,
        LanguageCode::Fr,
        LanguageCode::Es,
        LanguageCode::De,
    ];

    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            "es" => Ok(Self::Es),
            "de" => Ok(Self::De),
            _ => Err(ValueObjectError::UnsupportedLanguage(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Es => "es",
            Self::De => "de",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    /// Saturates at the `i64` bounds.
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Identifier of one dashboard subscriber (output sink)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(String);

impl SubscriberId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_is_normalized() {
        // テスト項目: チャンネル名が小文字化・トリムされ、先頭の # が除去される
        // given (前提条件):
        let raw = "  #Alpha_Stream ".to_string();

        // when (操作):
        let result = ChannelName::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alpha_stream");
    }

    #[test]
    fn test_channel_name_rejects_invalid_characters() {
        // テスト項目: 英数字とアンダースコア以外を含むチャンネル名は拒否される
        // given (前提条件):
        let raw = "alpha beta".to_string();

        // when (操作):
        let result = ChannelName::new(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidChannelName("alpha beta".to_string()))
        );
    }

    #[test]
    fn test_channel_name_rejects_empty() {
        // テスト項目: 空のチャンネル名は拒否される
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = ChannelName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyChannelName));
    }

    #[test]
    fn test_session_id_generate_is_unique() {
        // テスト項目: 生成されるセッション ID は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = SessionId::generate();
        let b = SessionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("session_"));
    }

    #[test]
    fn test_language_code_parse() {
        // テスト項目: 翻訳テーブルに存在する言語のみ受け付ける
        // given (前提条件):

        // when (操作):
        let fr = LanguageCode::parse("FR");
        let ja = LanguageCode::parse("ja");

        // then (期待する結果):
        assert_eq!(fr, Ok(LanguageCode::Fr));
        assert_eq!(
            ja,
            Err(ValueObjectError::UnsupportedLanguage("ja".to_string()))
        );
    }

    #[test]
    fn test_millis_since_saturates_at_extremes() {
        // テスト項目: 極端な時刻同士の差は溢れずに i64 の上限・下限で止まる
        // given (前提条件):
        let latest = Timestamp::new(i64::MAX);
        let earliest = Timestamp::new(i64::MIN);

        // when (操作):
        let forward = latest.millis_since(earliest);
        let backward = earliest.millis_since(latest);

        // then (期待する結果):
        assert_eq!(forward, i64::MAX);
        assert_eq!(backward, i64::MIN);
        assert_eq!(Timestamp::new(5_000).millis_since(Timestamp::new(2_000)), 3_000);
    }
}
