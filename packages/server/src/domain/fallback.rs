//! ルールベースのフォールバック選択
//!
//! 生成器が使えないときに、静的なテンプレート表を現在の指標で段階的に
//! 絞り込み、残った候補から一様ランダムに選ぶ。どこかの段階で候補が
//! 空になったら、その段階の条件を全体表に適用し直す（それでも空なら全体表）。
//! 選択は必ず成功する。
//!
//! ## テスト作業記録
//!
//! ### 何をテストしているか
//! - 各絞り込み段階（エンゲージメント帯、Twitch アクティビティ、感情、配信時間）
//! - 直前テンプレートの除外と、候補が空になった場合の全体表への拡張
//! - 時間帯限定テンプレートの出現条件

use rand::Rng;
use rand::seq::IndexedRandom;

use super::prompt::{Priority, PromptKind};
use super::template::TemplateId;
use super::time_context::TimeContext;

/// テンプレートの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackCategory {
    Engagement,
    Growth,
    Interaction,
    Retention,
    Momentum,
    TwitchBits,
    TwitchSubs,
    TwitchRaids,
    TimeContext,
}

impl FallbackCategory {
    /// プロンプト種別への対応
    pub fn prompt_kind(&self) -> PromptKind {
        match self {
            Self::Engagement | Self::Interaction => PromptKind::Engagement,
            Self::Growth | Self::TwitchSubs | Self::TwitchRaids => PromptKind::Growth,
            Self::Retention => PromptKind::Retention,
            Self::Momentum | Self::TwitchBits => PromptKind::Momentum,
            Self::TimeContext => PromptKind::Fallback,
        }
    }
}

/// 配信者に促す行動
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackAction {
    AskDirectQuestion,
    StartPoll,
    StartChallenge,
    WelcomeNewViewers,
    BuildCommunity,
    EncourageSharing,
    AppreciateSupport,
    WelcomeSubscribers,
    WelcomeRaiders,
    StartInteractiveGame,
    ShareStory,
    ReactToContent,
    BuildConnection,
    ProvideValue,
    BoostEnergy,
    MaintainEnergy,
    CelebrateAchievements,
    TeaseNextContent,
    GreetByTimeOfDay,
    MatchWeekendEnergy,
    PrimeTimePush,
}

/// 時間帯による出現条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGate {
    Always,
    WeekendOnly,
    PrimeTimeOnly,
}

impl TimeGate {
    fn allows(&self, time: &TimeContext) -> bool {
        match self {
            Self::Always => true,
            Self::WeekendOnly => time.is_weekend,
            Self::PrimeTimeOnly => time.is_prime_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackTemplate {
    pub template: TemplateId,
    pub category: FallbackCategory,
    pub priority: Priority,
    pub action: FallbackAction,
    pub gate: TimeGate,
}

const fn entry(
    template: TemplateId,
    category: FallbackCategory,
    priority: Priority,
    action: FallbackAction,
) -> FallbackTemplate {
    FallbackTemplate {
        template,
        category,
        priority,
        action,
        gate: TimeGate::Always,
    }
}

const fn gated(
    template: TemplateId,
    priority: Priority,
    action: FallbackAction,
    gate: TimeGate,
) -> FallbackTemplate {
    FallbackTemplate {
        template,
        category: FallbackCategory::TimeContext,
        priority,
        action,
        gate,
    }
}

use FallbackAction as A;
use FallbackCategory as C;
use TemplateId as T;

/// 静的なフォールバック表
pub const FALLBACK_TABLE: [FallbackTemplate; 23] = [
    entry(T::FallbackEngagementQuestion, C::Engagement, Priority::High, A::AskDirectQuestion),
    entry(T::FallbackEngagementPoll, C::Engagement, Priority::High, A::StartPoll),
    entry(T::FallbackEngagementChallenge, C::Engagement, Priority::Medium, A::StartChallenge),
    entry(T::PollQuestion, C::Engagement, Priority::Medium, A::StartPoll),
    entry(T::FallbackGrowthWelcome, C::Growth, Priority::Medium, A::WelcomeNewViewers),
    entry(T::FallbackGrowthCommunity, C::Growth, Priority::Medium, A::BuildCommunity),
    entry(T::FallbackGrowthShare, C::Growth, Priority::Low, A::EncourageSharing),
    entry(T::FallbackBitsAppreciation, C::TwitchBits, Priority::High, A::AppreciateSupport),
    entry(T::FallbackSubsWelcome, C::TwitchSubs, Priority::High, A::WelcomeSubscribers),
    entry(T::FallbackRaidsWelcome, C::TwitchRaids, Priority::High, A::WelcomeRaiders),
    entry(T::FallbackInteractionGame, C::Interaction, Priority::Medium, A::StartInteractiveGame),
    entry(T::FallbackInteractionStory, C::Interaction, Priority::Medium, A::ShareStory),
    entry(T::FallbackInteractionReact, C::Interaction, Priority::High, A::ReactToContent),
    entry(T::ChallengeActivity, C::Interaction, Priority::Medium, A::StartChallenge),
    entry(T::FallbackRetentionConnection, C::Retention, Priority::High, A::BuildConnection),
    entry(T::FallbackRetentionValue, C::Retention, Priority::Medium, A::ProvideValue),
    entry(T::FallbackRetentionEnergy, C::Retention, Priority::High, A::BoostEnergy),
    entry(T::FallbackMomentumMaintain, C::Momentum, Priority::Medium, A::MaintainEnergy),
    entry(T::FallbackMomentumCelebrate, C::Momentum, Priority::Medium, A::CelebrateAchievements),
    entry(T::FallbackMomentumNext, C::Momentum, Priority::Low, A::TeaseNextContent),
    gated(T::TimeBasedGreeting, Priority::Low, A::GreetByTimeOfDay, TimeGate::Always),
    gated(T::WeekendEnergy, Priority::Medium, A::MatchWeekendEnergy, TimeGate::WeekendOnly),
    gated(T::PrimeTimeBoost, Priority::Medium, A::PrimeTimePush, TimeGate::PrimeTimeOnly),
];

/// 絞り込みに使う指標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackInputs {
    pub messages_per_minute: f64,
    pub viewers: u64,
    pub sentiment: f64,
    pub stream_minutes: f64,
    pub session_bits: u64,
    pub session_subs: u64,
    pub session_raids: u64,
    pub last_template: Option<TemplateId>,
    pub time: TimeContext,
}

/// 指標に合うテンプレートを 1 つ選ぶ
pub fn pick<R: Rng + ?Sized>(inputs: &FallbackInputs, rng: &mut R) -> FallbackTemplate {
    let candidates = candidates(inputs);
    candidates
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_TABLE[0])
}

/// 全段階を適用した後の候補
pub fn candidates(inputs: &FallbackInputs) -> Vec<FallbackTemplate> {
    let full: Vec<FallbackTemplate> = FALLBACK_TABLE
        .iter()
        .filter(|t| t.gate.allows(&inputs.time))
        .copied()
        .collect();

    let narrow = |current: Vec<FallbackTemplate>, keep: &dyn Fn(&FallbackTemplate) -> bool| {
        let filtered: Vec<FallbackTemplate> = current.into_iter().filter(|t| keep(t)).collect();
        if !filtered.is_empty() {
            return filtered;
        }
        tracing::debug!("Fallback filter emptied the candidate set, widening to full table");
        let widened: Vec<FallbackTemplate> = full.iter().filter(|t| keep(t)).copied().collect();
        if widened.is_empty() { full.clone() } else { widened }
    };

    let mpm = inputs.messages_per_minute;
    let viewers = inputs.viewers;

    // エンゲージメント帯
    let mut current = if mpm < 2.0 && viewers > 5 {
        narrow(full.clone(), &|t| {
            t.category == C::Engagement && t.priority == Priority::High
        })
    } else if mpm < 5.0 && viewers > 10 {
        narrow(full.clone(), &|t| t.category == C::Engagement)
    } else if viewers > 50 && mpm > 5.0 {
        narrow(full.clone(), &|t| {
            matches!(t.category, C::Growth | C::Interaction)
        })
    } else if mpm > 10.0 {
        narrow(full.clone(), &|t| {
            matches!(t.category, C::Momentum | C::Interaction)
        })
    } else if viewers < 20 {
        narrow(full.clone(), &|t| t.category == C::Retention)
    } else {
        full.clone()
    };

    // Twitch アクティビティ
    if inputs.session_bits > 500 {
        current = narrow(current, &|t| {
            t.action == A::AppreciateSupport || t.category == C::Momentum
        });
    }
    if inputs.session_subs > 3 {
        current = narrow(current, &|t| {
            t.action == A::BuildCommunity || t.category == C::Growth
        });
    }
    if inputs.session_raids > 0 {
        current = narrow(current, &|t| {
            t.action == A::WelcomeRaiders || t.category == C::Growth
        });
    }

    // 感情
    if inputs.sentiment < -0.3 {
        current = narrow(current, &|t| t.category == C::Retention);
    }

    // 配信時間
    if inputs.stream_minutes < 10.0 {
        current = narrow(current, &|t| {
            t.action == A::WelcomeNewViewers || t.category == C::Engagement
        });
    } else if inputs.stream_minutes > 45.0 {
        current = narrow(current, &|t| {
            t.action == A::TeaseNextContent || t.category == C::Retention
        });
    }

    // 直前と同じテンプレートは避ける
    if let Some(last) = inputs.last_template
        && current.len() > 1
    {
        current = narrow(current, &|t| t.template != last);
    }

    current
}
