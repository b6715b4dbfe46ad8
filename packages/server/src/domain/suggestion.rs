//! 外部コラボレーターのインターフェースと、生成器に渡すコンテキスト
//!
//! - [`SuggestionGenerator`]: 文章生成サービス（タイムアウト・回数制限付き）
//! - [`ExternalDataSource`]: ニュース見出し・豆知識
//! - [`StreamInfoSource`]: チャンネル情報・視聴者数
//!
//! どの失敗もプロンプト選択の呼び出し元には伝わらず、フォールバックに置き換えられる。

use async_trait::async_trait;

use super::event::SubscriptionTier;
use super::metrics::{EngagedUser, MetricsAggregate, StreamInfo};
use super::phase::StreamPhase;
use super::time_context::TimeContext;
use super::{ChannelName, ExternalDataError, GeneratorError, LanguageCode, StreamInfoError};

/// コンテキストに含める上位ユーザー数
const CONTEXT_TOP_USERS: usize = 3;

/// 直近の出来事（種類ごとに最新の 1 件）
#[derive(Debug, Clone, PartialEq)]
pub enum RecentEvent {
    Message { from: String, text: String },
    Cheer { from: String, bits: u64 },
    Follow { from: String },
    Subscription { from: String, tier: SubscriptionTier },
    Raid { from: String, viewers: u64 },
}

/// 生成器に渡す配信状況
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionContext {
    pub phase: StreamPhase,
    pub stream_minutes: f64,
    pub viewers: u64,
    pub peak_viewers: u64,
    pub average_viewers: f64,
    pub messages_per_minute: f64,
    pub followers_per_minute: f64,
    pub sentiment: f64,
    pub unique_chatters: usize,
    pub chat_score: u8,
    pub session_follows: u64,
    pub session_subs: u64,
    pub session_bits: u64,
    pub session_raids: u64,
    pub category: String,
    pub recent_events: Vec<RecentEvent>,
    pub top_users: Vec<EngagedUser>,
    pub time: TimeContext,
}

impl SuggestionContext {
    /// 集計の現在値からコンテキストを作る
    pub fn from_aggregate(metrics: &MetricsAggregate, time: TimeContext) -> Self {
        let rollup = metrics.rollup();
        let counters = metrics.counters();
        let stream = metrics.stream();

        let mut recent_events = Vec::new();
        if let Some(m) = metrics.recent_messages().latest() {
            recent_events.push(RecentEvent::Message {
                from: m.display_name.clone(),
                text: m.text.clone(),
            });
        }
        if let Some(c) = metrics.recent_bits().latest() {
            recent_events.push(RecentEvent::Cheer {
                from: c.display_name.clone(),
                bits: c.bits,
            });
        }
        if let Some(f) = metrics.recent_follows().latest() {
            recent_events.push(RecentEvent::Follow {
                from: f.display_name.clone(),
            });
        }
        if let Some(s) = metrics.recent_subs().latest() {
            recent_events.push(RecentEvent::Subscription {
                from: s.display_name.clone(),
                tier: s.tier,
            });
        }
        if let Some(r) = metrics.recent_raids().latest() {
            recent_events.push(RecentEvent::Raid {
                from: r.display_name.clone(),
                viewers: r.viewers,
            });
        }

        Self {
            phase: metrics.phase(),
            stream_minutes: rollup.stream_uptime_minutes,
            viewers: stream.current_viewers,
            peak_viewers: stream.peak_viewers,
            average_viewers: rollup.average_viewer_count,
            messages_per_minute: rollup.messages_per_minute,
            followers_per_minute: rollup.followers_per_minute,
            sentiment: metrics.rolling_sentiment(),
            unique_chatters: metrics.unique_chatter_count(),
            chat_score: rollup.chat_score,
            session_follows: counters.session_followers_gained,
            session_subs: counters.session_subs_gained,
            session_bits: counters.session_bits_earned,
            session_raids: counters.session_raids_received,
            category: stream.category.clone(),
            recent_events,
            top_users: metrics.top_engaged_users(CONTEXT_TOP_USERS),
            time,
        }
    }

    pub fn engagement_level(&self) -> EngagementLevel {
        let ratio = if self.viewers > 0 {
            self.unique_chatters as f64 / self.viewers as f64
        } else {
            0.0
        };
        let mpm = self.messages_per_minute;
        if mpm > 20.0 && ratio > 0.3 {
            EngagementLevel::Explosive
        } else if mpm > 10.0 && ratio > 0.2 {
            EngagementLevel::High
        } else if mpm > 5.0 && ratio > 0.1 {
            EngagementLevel::Moderate
        } else if mpm > 2.0 && ratio > 0.05 {
            EngagementLevel::Low
        } else {
            EngagementLevel::Quiet
        }
    }

    pub fn sentiment_status(&self) -> SentimentStatus {
        if self.sentiment > 0.3 {
            SentimentStatus::Positive
        } else if self.sentiment > -0.1 {
            SentimentStatus::Neutral
        } else {
            SentimentStatus::Negative
        }
    }

    pub fn growth_status(&self) -> GrowthStatus {
        let growth = self.session_follows as f64
            + self.session_subs as f64 * 3.0
            + self.session_bits as f64 / 100.0
            + self.session_raids as f64 * 2.0;
        if growth > 20.0 {
            GrowthStatus::Excellent
        } else if growth > 10.0 {
            GrowthStatus::Good
        } else {
            GrowthStatus::Slow
        }
    }

    pub fn energy_level(&self) -> EnergyLevel {
        let energy = self.messages_per_minute * 2.0
            + self.viewers as f64 * 0.1
            + self.session_bits as f64 * 0.01
            + self.session_subs as f64 * 5.0;
        if energy > 50.0 {
            EnergyLevel::High
        } else if energy > 20.0 {
            EnergyLevel::Medium
        } else {
            EnergyLevel::Low
        }
    }

    pub fn viewer_trend(&self) -> ViewerTrend {
        let current = self.viewers as f64;
        if current > self.average_viewers * 1.2 {
            ViewerTrend::Rising
        } else if current < self.average_viewers * 0.8 {
            ViewerTrend::Declining
        } else {
            ViewerTrend::Stable
        }
    }

    pub fn stream_stage(&self) -> StreamStage {
        if self.stream_minutes < 10.0 {
            StreamStage::Start
        } else if self.stream_minutes > 45.0 {
            StreamStage::End
        } else {
            StreamStage::Mid
        }
    }

    /// 指標から導いた内容の提案
    pub fn content_suggestions(&self) -> Vec<&'static str> {
        let mut suggestions = Vec::new();
        let mpm = self.messages_per_minute;
        if mpm < 3.0 && self.viewers > 10 {
            suggestions.push("Ask direct questions to activate chat");
        }
        if self.viewers > 50 && mpm > 5.0 {
            suggestions.push("Perfect time for interactive content or polls");
        }
        if self.stream_minutes > 30.0 && mpm > 8.0 {
            suggestions.push(
                "High engagement - consider extending stream or doing special content",
            );
        }
        if self.session_bits > 1000 {
            suggestions.push("High bits activity - acknowledge supporters and encourage more");
        }
        if self.session_subs > 5 {
            suggestions.push("Good sub growth - welcome new subscribers and build community");
        }
        if self.session_raids > 0 {
            suggestions.push("Raids received - thank raiders and encourage more raids");
        }
        suggestions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementLevel {
    Explosive,
    High,
    Moderate,
    Low,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentStatus {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthStatus {
    Excellent,
    Good,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerTrend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStage {
    Start,
    Mid,
    End,
}

impl StreamStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Mid => "mid",
            Self::End => "end",
        }
    }
}

/// 文章生成サービス
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// 短いコーチング文を 1 つ生成する。失敗はすべて「フォールバックを使え」の合図
    async fn generate(
        &self,
        context: &SuggestionContext,
        language: LanguageCode,
    ) -> Result<String, GeneratorError>;
}

/// ニュース見出し・豆知識の取得元
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExternalDataSource: Send + Sync {
    async fn headline(&self) -> Result<Option<String>, ExternalDataError>;

    async fn trivia(&self) -> Result<Option<String>, ExternalDataError>;
}

/// チャンネル情報の取得元。`Ok(None)` はオフライン
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreamInfoSource: Send + Sync {
    async fn fetch(&self, channel: &ChannelName) -> Result<Option<StreamInfo>, StreamInfoError>;
}
