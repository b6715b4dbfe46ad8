//! 配信者に表示するコーチングプロンプト

use serde::{Deserialize, Serialize};

use super::phase::StreamPhase;
use super::template::TemplateId;
use super::value_object::Timestamp;

/// 優先度（urgent > high > medium > low）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// 直近 30 秒のコミュニティイベントによる割り込み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgentEvent {
    RaidCelebration,
    SubBombCelebration,
    BitsStorm,
    FollowerSurge,
}

impl UrgentEvent {
    pub fn template(&self) -> TemplateId {
        match self {
            Self::RaidCelebration => TemplateId::RaidCelebration,
            Self::SubBombCelebration => TemplateId::SubBombCelebration,
            Self::BitsStorm => TemplateId::BitsStorm,
            Self::FollowerSurge => TemplateId::FollowerSurge,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.template().key()
    }
}

/// プロンプトのカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Engagement,
    Growth,
    Retention,
    Momentum,
    Event(UrgentEvent),
    AiGenerated,
    Fallback,
}

impl PromptKind {
    /// 外部表現。イベントはイベント名（例: `raid_celebration`）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engagement => "engagement",
            Self::Growth => "growth",
            Self::Retention => "retention",
            Self::Momentum => "momentum",
            Self::Event(event) => event.as_str(),
            Self::AiGenerated => "ai_generated",
            Self::Fallback => "fallback",
        }
    }
}

/// 生成元（観測用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptOrigin {
    Generator,
    RuleFallback,
}

/// プレースホルダー置換・ローカライズ済みのプロンプト。生成後は不変
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub priority: Priority,
    pub text: String,
    pub origin: PromptOrigin,
    /// 生成器の出力には無い
    pub template: Option<TemplateId>,
    pub phase: StreamPhase,
    pub created_at: Timestamp,
}

/// 履歴用の記録（繰り返し防止にのみ使う）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptRecord {
    pub kind: PromptKind,
    pub template: Option<TemplateId>,
    pub priority: Priority,
    pub phase: StreamPhase,
    pub created_at: Timestamp,
}

impl From<&Prompt> for PromptRecord {
    fn from(prompt: &Prompt) -> Self {
        Self {
            kind: prompt.kind,
            template: prompt.template,
            priority: prompt.priority,
            phase: prompt.phase,
            created_at: prompt.created_at,
        }
    }
}
