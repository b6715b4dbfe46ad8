//! Typed template registry.
//!
//! Every coaching text is addressed by a [`TemplateId`]. At load time each
//! localized text is scanned for `{token}` placeholders; unknown tokens are a
//! load error, and the set of required [`Placeholder`]s is stored with the
//! text. Rendering fails with [`TemplateError::MissingPlaceholder`] instead of
//! ever returning literal `{token}` text.

mod translations;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::error::TemplateError;
use super::value_object::LanguageCode;

/// Identifier of one coaching template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    // zero_viewers: "always be talking"
    AlwaysBeTalking1,
    AlwaysBeTalking2,
    AlwaysBeTalking3,
    AlwaysBeTalking4,
    AlwaysBeTalking5,
    // first_viewer
    FirstViewerWelcome,
    FirstViewerEngagement,
    FirstViewerCommunity,
    // external data / time context
    NewsDiscussion,
    TriviaEngagement,
    TimeBasedGreeting,
    WeekendEnergy,
    PrimeTimeBoost,
    // urgent community events
    RaidCelebration,
    SubBombCelebration,
    BitsStorm,
    FollowerSurge,
    // interactive
    PollQuestion,
    ChallengeActivity,
    // rule-based fallback table
    FallbackEngagementQuestion,
    FallbackEngagementPoll,
    FallbackEngagementChallenge,
    FallbackGrowthWelcome,
    FallbackGrowthCommunity,
    FallbackGrowthShare,
    FallbackBitsAppreciation,
    FallbackSubsWelcome,
    FallbackRaidsWelcome,
    FallbackInteractionGame,
    FallbackInteractionStory,
    FallbackInteractionReact,
    FallbackRetentionConnection,
    FallbackRetentionValue,
    FallbackRetentionEnergy,
    FallbackMomentumMaintain,
    FallbackMomentumCelebrate,
    FallbackMomentumNext,
}

impl TemplateId {
    pub const ALL: [TemplateId; 37] = [
        TemplateId::AlwaysBeTalking1,
        TemplateId::AlwaysBeTalking2,
        TemplateId::AlwaysBeTalking3,
        TemplateId::AlwaysBeTalking4,
        TemplateId::AlwaysBeTalking5,
        TemplateId::FirstViewerWelcome,
        TemplateId::FirstViewerEngagement,
        TemplateId::FirstViewerCommunity,
        TemplateId::NewsDiscussion,
        TemplateId::TriviaEngagement,
        TemplateId::TimeBasedGreeting,
        TemplateId::WeekendEnergy,
        TemplateId::PrimeTimeBoost,
        TemplateId::RaidCelebration,
        TemplateId::SubBombCelebration,
        TemplateId::BitsStorm,
        TemplateId::FollowerSurge,
        TemplateId::PollQuestion,
        TemplateId::ChallengeActivity,
        TemplateId::FallbackEngagementQuestion,
        TemplateId::FallbackEngagementPoll,
        TemplateId::FallbackEngagementChallenge,
        TemplateId::FallbackGrowthWelcome,
        TemplateId::FallbackGrowthCommunity,
        TemplateId::FallbackGrowthShare,
        TemplateId::FallbackBitsAppreciation,
        TemplateId::FallbackSubsWelcome,
        TemplateId::FallbackRaidsWelcome,
        TemplateId::FallbackInteractionGame,
        TemplateId::FallbackInteractionStory,
        TemplateId::FallbackInteractionReact,
        TemplateId::FallbackRetentionConnection,
        TemplateId::FallbackRetentionValue,
        TemplateId::FallbackRetentionEnergy,
        TemplateId::FallbackMomentumMaintain,
        TemplateId::FallbackMomentumCelebrate,
        TemplateId::FallbackMomentumNext,
    ];

    pub const ALWAYS_BE_TALKING: [TemplateId; 5] = [
        TemplateId::AlwaysBeTalking1,
        TemplateId::AlwaysBeTalking2,
        TemplateId::AlwaysBeTalking3,
        TemplateId::AlwaysBeTalking4,
        TemplateId::AlwaysBeTalking5,
    ];

    pub const FIRST_VIEWER: [TemplateId; 3] = [
        TemplateId::FirstViewerWelcome,
        TemplateId::FirstViewerEngagement,
        TemplateId::FirstViewerCommunity,
    ];

    /// Stable snake_case key, as used in logs and outbound messages
    pub fn key(&self) -> &'static str {
        match self {
            Self::AlwaysBeTalking1 => "always_be_talking_1",
            Self::AlwaysBeTalking2 => "always_be_talking_2",
            Self::AlwaysBeTalking3 => "always_be_talking_3",
            Self::AlwaysBeTalking4 => "always_be_talking_4",
            Self::AlwaysBeTalking5 => "always_be_talking_5",
            Self::FirstViewerWelcome => "first_viewer_welcome",
            Self::FirstViewerEngagement => "first_viewer_engagement",
            Self::FirstViewerCommunity => "first_viewer_community",
            Self::NewsDiscussion => "news_discussion",
            Self::TriviaEngagement => "trivia_engagement",
            Self::TimeBasedGreeting => "time_based_greeting",
            Self::WeekendEnergy => "weekend_energy",
            Self::PrimeTimeBoost => "prime_time_boost",
            Self::RaidCelebration => "raid_celebration",
            Self::SubBombCelebration => "sub_bomb_celebration",
            Self::BitsStorm => "bits_storm",
            Self::FollowerSurge => "follower_surge",
            Self::PollQuestion => "poll_question",
            Self::ChallengeActivity => "challenge_activity",
            Self::FallbackEngagementQuestion => "fallback_engagement_question",
            Self::FallbackEngagementPoll => "fallback_engagement_poll",
            Self::FallbackEngagementChallenge => "fallback_engagement_challenge",
            Self::FallbackGrowthWelcome => "fallback_growth_welcome",
            Self::FallbackGrowthCommunity => "fallback_growth_community",
            Self::FallbackGrowthShare => "fallback_growth_share",
            Self::FallbackBitsAppreciation => "fallback_bits_appreciation",
            Self::FallbackSubsWelcome => "fallback_subs_welcome",
            Self::FallbackRaidsWelcome => "fallback_raids_welcome",
            Self::FallbackInteractionGame => "fallback_interaction_game",
            Self::FallbackInteractionStory => "fallback_interaction_story",
            Self::FallbackInteractionReact => "fallback_interaction_react",
            Self::FallbackRetentionConnection => "fallback_retention_connection",
            Self::FallbackRetentionValue => "fallback_retention_value",
            Self::FallbackRetentionEnergy => "fallback_retention_energy",
            Self::FallbackMomentumMaintain => "fallback_momentum_maintain",
            Self::FallbackMomentumCelebrate => "fallback_momentum_celebrate",
            Self::FallbackMomentumNext => "fallback_momentum_next",
        }
    }
}

/// Named value a template text may reference as `{token}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    ViewerCount,
    MessageRate,
    FollowRate,
    ChatScore,
    Sentiment,
    UniqueChatters,
    NewsTitle,
    TriviaText,
    TimeOfDay,
    DayOfWeek,
    TimeContext,
    PollQuestion,
    ChallengeDescription,
}

impl Placeholder {
    pub const ALL: [Placeholder; 13] = [
        Placeholder::ViewerCount,
        Placeholder::MessageRate,
        Placeholder::FollowRate,
        Placeholder::ChatScore,
        Placeholder::Sentiment,
        Placeholder::UniqueChatters,
        Placeholder::NewsTitle,
        Placeholder::TriviaText,
        Placeholder::TimeOfDay,
        Placeholder::DayOfWeek,
        Placeholder::TimeContext,
        Placeholder::PollQuestion,
        Placeholder::ChallengeDescription,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::ViewerCount => "viewerCount",
            Self::MessageRate => "messageRate",
            Self::FollowRate => "followRate",
            Self::ChatScore => "chatScore",
            Self::Sentiment => "sentiment",
            Self::UniqueChatters => "uniqueChatters",
            Self::NewsTitle => "newsTitle",
            Self::TriviaText => "triviaText",
            Self::TimeOfDay => "timeOfDay",
            Self::DayOfWeek => "dayOfWeek",
            Self::TimeContext => "timeContext",
            Self::PollQuestion => "pollQuestion",
            Self::ChallengeDescription => "challengeDescription",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }
}

/// Values supplied for rendering
#[derive(Debug, Clone, Default)]
pub struct PlaceholderValues {
    values: HashMap<Placeholder, String>,
}

impl PlaceholderValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.values.insert(placeholder, value.into());
        self
    }

    pub fn insert(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }
}

/// One localized template text with the placeholders it requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub text: &'static str,
    pub required: BTreeSet<Placeholder>,
}

impl Template {
    fn parse(id: TemplateId, text: &'static str) -> Result<Self, TemplateError> {
        let mut required = BTreeSet::new();
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            let token = &after[..close];
            let placeholder =
                Placeholder::from_token(token).ok_or_else(|| TemplateError::UnknownPlaceholder {
                    template: id.key(),
                    token: token.to_string(),
                })?;
            required.insert(placeholder);
            rest = &after[close + 1..];
        }
        Ok(Self { text, required })
    }
}

/// Registry of every template in every available language
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<(LanguageCode, TemplateId), Template>,
}

impl TemplateRegistry {
    /// Parse and validate all built-in translation tables.
    pub fn load() -> Result<Self, TemplateError> {
        let mut templates = HashMap::new();
        for language in LanguageCode::ALL {
            for id in TemplateId::ALL {
                if let Some(text) = translations::text(language, id) {
                    templates.insert((language, id), Template::parse(id, text)?);
                }
            }
        }
        Ok(Self { templates })
    }

    /// Localized template, falling back to English when the language has no entry.
    pub fn get(&self, id: TemplateId, language: LanguageCode) -> Option<&Template> {
        self.templates
            .get(&(language, id))
            .or_else(|| self.templates.get(&(LanguageCode::En, id)))
    }

    /// Substitute every required placeholder of `id` in `language`.
    pub fn render(
        &self,
        id: TemplateId,
        language: LanguageCode,
        values: &PlaceholderValues,
    ) -> Result<String, TemplateError> {
        let Some(template) = self.get(id, language) else {
            // 英語テーブルは全 ID を持つので到達しない
            return Ok(id.key().to_string());
        };

        let mut text = template.text.to_string();
        for placeholder in &template.required {
            let value = values
                .get(*placeholder)
                .ok_or(TemplateError::MissingPlaceholder {
                    template: id.key(),
                    placeholder: placeholder.token(),
                })?;
            text = text.replace(&format!("{{{}}}", placeholder.token()), value);
        }
        Ok(text)
    }
}

/// True when `text` still contains a `{token}` of a known placeholder.
pub fn contains_known_placeholder(text: &str) -> bool {
    Placeholder::ALL
        .iter()
        .any(|p| text.contains(&format!("{{{}}}", p.token())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_and_english_is_complete() {
        // テスト項目: 全テンプレートが英語で登録され、未知のプレースホルダーがない
        // given (前提条件):

        // when (操作):
        let registry = TemplateRegistry::load().unwrap();

        // then (期待する結果):
        for id in TemplateId::ALL {
            assert!(registry.templates.contains_key(&(LanguageCode::En, id)), "{id:?}");
        }
    }

    #[test]
    fn test_required_placeholders_are_extracted() {
        // テスト項目: テンプレート文から必要なプレースホルダーが抽出される
        // given (前提条件):
        let registry = TemplateRegistry::load().unwrap();

        // when (操作):
        let template = registry
            .get(TemplateId::TimeBasedGreeting, LanguageCode::En)
            .unwrap();

        // then (期待する結果):
        let expected: BTreeSet<_> = [
            Placeholder::TimeOfDay,
            Placeholder::DayOfWeek,
            Placeholder::TimeContext,
        ]
        .into_iter()
        .collect();
        assert_eq!(template.required, expected);
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        // テスト項目: 必要な値が揃っていれば全プレースホルダーが置換される
        // given (前提条件):
        let registry = TemplateRegistry::load().unwrap();
        let values = PlaceholderValues::new().with(Placeholder::ViewerCount, "42");

        // when (操作):
        let text = registry
            .render(TemplateId::PrimeTimeBoost, LanguageCode::En, &values)
            .unwrap();

        // then (期待する結果):
        assert!(text.contains("With 42 viewers"));
        assert!(!contains_known_placeholder(&text));
    }

    #[test]
    fn test_render_reports_missing_placeholder() {
        // テスト項目: 値が不足している場合は MissingPlaceholder エラーになる
        // given (前提条件):
        let registry = TemplateRegistry::load().unwrap();
        let values = PlaceholderValues::new();

        // when (操作):
        let result = registry.render(TemplateId::NewsDiscussion, LanguageCode::En, &values);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TemplateError::MissingPlaceholder {
                template: "news_discussion",
                placeholder: "newsTitle",
            })
        );
    }

    #[test]
    fn test_missing_translation_falls_back_to_english() {
        // テスト項目: 翻訳がない言語では英語のテンプレートが使われる
        // given (前提条件):
        let registry = TemplateRegistry::load().unwrap();

        // when (操作):
        let german = registry.get(TemplateId::FallbackMomentumNext, LanguageCode::De);
        let english = registry.get(TemplateId::FallbackMomentumNext, LanguageCode::En);

        // then (期待する結果):
        assert_eq!(german, english);
    }

    #[test]
    fn test_localized_template_is_used_when_present() {
        // テスト項目: 翻訳が存在する場合はその言語のテキストが使われる
        // given (前提条件):
        let registry = TemplateRegistry::load().unwrap();

        // when (操作):
        let text = registry
            .render(
                TemplateId::FirstViewerWelcome,
                LanguageCode::Fr,
                &PlaceholderValues::new(),
            )
            .unwrap();

        // then (期待する結果):
        assert!(text.contains("PREMIER SPECTATEUR"));
    }

    #[test]
    fn test_unknown_token_is_rejected_at_parse() {
        // テスト項目: 未知のトークンを含むテキストは読み込み時に拒否される
        // given (前提条件):
        let text = "Hello {nobody}";

        // when (操作):
        let result = Template::parse(TemplateId::PollQuestion, text);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TemplateError::UnknownPlaceholder {
                template: "poll_question",
                token: "nobody".to_string(),
            })
        );
    }
}
