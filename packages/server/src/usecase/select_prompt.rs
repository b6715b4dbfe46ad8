//! UseCase: コーチングプロンプトの選択
//!
//! 判定は次の順で行い、最初に該当したものを使う。
//!
//! 1. 直近 30 秒のコミュニティイベントによる割り込み（urgent）
//! 2. フェーズごとの選択
//!    - `zero_viewers`: 30% の確率でニュース見出し・豆知識を使い、それ以外は「話し続けよう」テンプレート（high）
//!    - `first_viewer`: 最初の視聴者を歓迎するテンプレート（urgent）
//!    - `building_audience`: 文章生成器。使えなければルールベースのフォールバック（medium）
//!
//! テンプレート集合から選ぶ場合は直前のテンプレートを除外し、すべてのプレースホルダーを
//! 置換してから返す。生成器・外部データの失敗は呼び出し側に伝えない。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SelectPromptUseCase::execute() / execute_if_due() メソッド
//! - 割り込み、フェーズごとの選択、生成器の失敗時のフォールバック
//!
//! ### なぜこのテストが必要か
//! - 配信者に届く唯一の出力であり、どの状況でも整ったプロンプトを返す必要がある
//! - 切断されたセッションに結果が記録されないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：各フェーズでの選択、生成器の出力の採用
//! - 異常系：生成器のタイムアウト、存在しないセッション
//! - エッジケース：生成中の切断、同じテンプレートの連続

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use stagehand_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ExternalDataSource, FallbackInputs, LanguageCode, Placeholder, PlaceholderValues, Priority,
    Prompt, PromptCadence, PromptKind, PromptOrigin, PromptRecord, Session, SessionId,
    SessionRepository, SharedSession, StreamPhase, SuggestionContext, SuggestionGenerator,
    TemplateId, TemplateRegistry, TimeContext, Timestamp, UrgentEvent, fallback,
};

use super::error::SelectPromptError;

/// `zero_viewers` で外部データを使う確率
const EXTERNAL_DATA_PROBABILITY: f64 = 0.3;

const DEFAULT_NEWS_TITLE: &str = "this interesting story";
const DEFAULT_TRIVIA_TEXT: &str = "something interesting";

/// テンプレートの描画に失敗したときに表示する文
const SAFE_TEXT: &str = "Keep talking to your chat and tell them what you're doing right now!";

const POLL_QUESTIONS: [&str; 5] = [
    "What's your favorite type of content?",
    "What should I focus on next?",
    "What's your favorite game?",
    "What time do you usually watch streams?",
    "What's the best part of this stream?",
];

const CHALLENGES: [&str; 5] = [
    "Type your favorite emoji in the next 10 seconds",
    "Share something that made you smile today",
    "Tell me about your favorite hobby",
    "Share a fun fact about yourself",
    "What's the best advice you've ever received?",
];

/// セッションのロック中に集めた、選択に必要な値
struct Plan {
    phase: StreamPhase,
    language: LanguageCode,
    urgent: Option<UrgentEvent>,
    last_template: Option<TemplateId>,
    values: PlaceholderValues,
    fallback: FallbackInputs,
    /// `building_audience` かつ割り込みなしの場合のみ
    suggestion: Option<SuggestionContext>,
}

/// 描画前の選択結果
enum Choice {
    Template {
        id: TemplateId,
        kind: PromptKind,
        priority: Priority,
    },
    Generated(String),
}

/// プロンプト選択のユースケース
pub struct SelectPromptUseCase {
    repository: Arc<dyn SessionRepository>,
    templates: Arc<TemplateRegistry>,
    generator: Arc<dyn SuggestionGenerator>,
    external_data: Arc<dyn ExternalDataSource>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
    /// 時間帯コンテキストに使う UTC からのオフセット（時間）
    utc_offset_hours: i32,
}

impl SelectPromptUseCase {
    /// 新しい SelectPromptUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        templates: Arc<TemplateRegistry>,
        generator: Arc<dyn SuggestionGenerator>,
        external_data: Arc<dyn ExternalDataSource>,
        clock: Arc<dyn Clock>,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            repository,
            templates,
            generator,
            external_data,
            clock,
            rng: Mutex::new(StdRng::from_os_rng()),
            utc_offset_hours,
        }
    }

    /// 乱数のシードを固定する
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// フェーズの間隔を満たしている場合のみプロンプトを選ぶ
    ///
    /// まだプロンプトにしていない割り込みがあれば、間隔に関係なく選ぶ。
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Prompt))` - 選択した
    /// * `Ok(None)` - まだ間隔を満たしていない
    pub async fn execute_if_due(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Prompt>, SelectPromptError> {
        let shared = self.repository.get(session_id).await?;
        let now = self.now();

        let due = {
            let session = shared.lock().await;
            if !session.connected {
                return Err(SelectPromptError::SessionClosed(session_id.to_string()));
            }
            let metrics = &session.metrics;
            let urgent_pending = metrics.urgent_event(now).is_some_and(|event| {
                metrics
                    .prompt_history()
                    .latest()
                    .is_none_or(|last| last.kind != PromptKind::Event(event))
            });
            urgent_pending
                || PromptCadence::is_due(
                    metrics.phase(),
                    metrics.last_prompt_time(),
                    metrics.stream().current_viewers,
                    now,
                )
        };

        if !due {
            return Ok(None);
        }
        self.select(session_id, &shared, now).await.map(Some)
    }

    /// プロンプトを選び、セッションの履歴に記録する
    ///
    /// # Returns
    ///
    /// * `Ok(Prompt)` - 置換済みのプロンプト
    /// * `Err(SelectPromptError::SessionNotFound)` - セッションが存在しない
    /// * `Err(SelectPromptError::SessionClosed)` - 選択中に切断された（結果は破棄）
    pub async fn execute(&self, session_id: &SessionId) -> Result<Prompt, SelectPromptError> {
        let shared = self.repository.get(session_id).await?;
        let now = self.now();
        self.select(session_id, &shared, now).await
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    async fn select(
        &self,
        session_id: &SessionId,
        shared: &SharedSession,
        now: Timestamp,
    ) -> Result<Prompt, SelectPromptError> {
        // 1. ロック中に必要な値を集める（生成器の呼び出し中はロックを持たない）
        let mut plan = {
            let session = shared.lock().await;
            if !session.connected {
                return Err(SelectPromptError::SessionClosed(session_id.to_string()));
            }
            self.plan(&session, now).await
        };

        // 2. 選択
        let choice = self.choose(&mut plan).await;

        // 3. 描画
        let prompt = match choice {
            Choice::Generated(text) => Prompt {
                kind: PromptKind::AiGenerated,
                priority: Priority::Medium,
                text,
                origin: PromptOrigin::Generator,
                template: None,
                phase: plan.phase,
                created_at: now,
            },
            Choice::Template { id, kind, priority } => {
                let text = match self.templates.render(id, plan.language, &plan.values) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("Failed to render template '{}': {}", id.key(), e);
                        SAFE_TEXT.to_string()
                    }
                };
                Prompt {
                    kind,
                    priority,
                    text,
                    origin: PromptOrigin::RuleFallback,
                    template: Some(id),
                    phase: plan.phase,
                    created_at: now,
                }
            }
        };

        // 4. 記録（切断済みなら破棄）
        let mut session = shared.lock().await;
        if !session.connected {
            tracing::debug!(
                "Session '{}' disconnected while selecting a prompt, discarding",
                session_id
            );
            return Err(SelectPromptError::SessionClosed(session_id.to_string()));
        }
        session.metrics.record_prompt(PromptRecord::from(&prompt));

        tracing::info!(
            "Prompt for session '{}': kind={}, priority={:?}, phase={}",
            session_id,
            prompt.kind.as_str(),
            prompt.priority,
            prompt.phase
        );
        Ok(prompt)
    }

    async fn plan(&self, session: &Session, now: Timestamp) -> Plan {
        let metrics = &session.metrics;
        let rollup = metrics.rollup();
        let counters = metrics.counters();
        let time = TimeContext::at(now, self.utc_offset_hours);
        let urgent = metrics.urgent_event(now);
        let phase = metrics.phase();

        let (poll, challenge) = {
            let mut rng = self.rng.lock().await;
            (
                POLL_QUESTIONS.choose(&mut *rng).copied().unwrap_or(POLL_QUESTIONS[0]),
                CHALLENGES.choose(&mut *rng).copied().unwrap_or(CHALLENGES[0]),
            )
        };

        let values = PlaceholderValues::new()
            .with(Placeholder::ViewerCount, metrics.stream().current_viewers.to_string())
            .with(Placeholder::MessageRate, format!("{:.1}", rollup.messages_per_minute))
            .with(Placeholder::FollowRate, format!("{:.1}", rollup.followers_per_minute))
            .with(Placeholder::ChatScore, rollup.chat_score.to_string())
            .with(Placeholder::Sentiment, format!("{:.2}", metrics.rolling_sentiment()))
            .with(Placeholder::UniqueChatters, metrics.unique_chatter_count().to_string())
            .with(Placeholder::NewsTitle, DEFAULT_NEWS_TITLE)
            .with(Placeholder::TriviaText, DEFAULT_TRIVIA_TEXT)
            .with(Placeholder::TimeOfDay, time.time_of_day.as_str())
            .with(Placeholder::DayOfWeek, time.day_of_week())
            .with(Placeholder::TimeContext, time.phrase())
            .with(Placeholder::PollQuestion, poll)
            .with(Placeholder::ChallengeDescription, challenge);

        let suggestion = (urgent.is_none() && phase == StreamPhase::BuildingAudience)
            .then(|| SuggestionContext::from_aggregate(metrics, time));

        Plan {
            phase,
            language: metrics.language(),
            urgent,
            last_template: metrics.last_template(),
            values,
            fallback: FallbackInputs {
                messages_per_minute: rollup.messages_per_minute,
                viewers: metrics.stream().current_viewers,
                sentiment: metrics.rolling_sentiment(),
                stream_minutes: rollup.stream_uptime_minutes,
                session_bits: counters.session_bits_earned,
                session_subs: counters.session_subs_gained,
                session_raids: counters.session_raids_received,
                last_template: metrics.last_template(),
                time,
            },
            suggestion,
        }
    }

    async fn choose(&self, plan: &mut Plan) -> Choice {
        if let Some(event) = plan.urgent {
            return Choice::Template {
                id: event.template(),
                kind: PromptKind::Event(event),
                priority: Priority::Urgent,
            };
        }

        match plan.phase {
            StreamPhase::ZeroViewers => self.choose_zero_viewers(plan).await,
            StreamPhase::FirstViewer => {
                let mut rng = self.rng.lock().await;
                Choice::Template {
                    id: pick_excluding(&TemplateId::FIRST_VIEWER, plan.last_template, &mut *rng),
                    kind: PromptKind::Growth,
                    priority: Priority::Urgent,
                }
            }
            StreamPhase::BuildingAudience => self.choose_building_audience(plan).await,
        }
    }

    async fn choose_zero_viewers(&self, plan: &mut Plan) -> Choice {
        let enrich = self.rng.lock().await.random_bool(EXTERNAL_DATA_PROBABILITY);

        if enrich {
            if let Some(headline) = self.fetch_headline().await {
                plan.values.insert(Placeholder::NewsTitle, headline);
                return Choice::Template {
                    id: TemplateId::NewsDiscussion,
                    kind: PromptKind::Engagement,
                    priority: Priority::High,
                };
            }
            if let Some(trivia) = self.fetch_trivia().await {
                plan.values.insert(Placeholder::TriviaText, trivia);
                return Choice::Template {
                    id: TemplateId::TriviaEngagement,
                    kind: PromptKind::Engagement,
                    priority: Priority::High,
                };
            }
        }

        let mut rng = self.rng.lock().await;
        Choice::Template {
            id: pick_excluding(&TemplateId::ALWAYS_BE_TALKING, plan.last_template, &mut *rng),
            kind: PromptKind::Engagement,
            priority: Priority::High,
        }
    }

    async fn choose_building_audience(&self, plan: &mut Plan) -> Choice {
        if let Some(context) = &plan.suggestion {
            match self.generator.generate(context, plan.language).await {
                Ok(text) => return Choice::Generated(text),
                Err(e) => tracing::debug!("Suggestion generator unavailable ({}), using fallback", e),
            }
        }

        let mut rng = self.rng.lock().await;
        let entry = fallback::pick(&plan.fallback, &mut *rng);
        Choice::Template {
            id: entry.template,
            kind: entry.category.prompt_kind(),
            priority: entry.priority,
        }
    }

    async fn fetch_headline(&self) -> Option<String> {
        match self.external_data.headline().await {
            Ok(headline) => headline,
            Err(e) => {
                tracing::debug!("Headline unavailable: {}", e);
                None
            }
        }
    }

    async fn fetch_trivia(&self) -> Option<String> {
        match self.external_data.trivia().await {
            Ok(trivia) => trivia,
            Err(e) => {
                tracing::debug!("Trivia unavailable: {}", e);
                None
            }
        }
    }
}

/// 直前のテンプレートを除いて一様ランダムに選ぶ（候補が 1 つなら除外しない）
fn pick_excluding<R: Rng + ?Sized>(
    candidates: &[TemplateId],
    last: Option<TemplateId>,
    rng: &mut R,
) -> TemplateId {
    let remaining: Vec<TemplateId> = if candidates.len() > 1 {
        candidates
            .iter()
            .copied()
            .filter(|id| Some(*id) != last)
            .collect()
    } else {
        candidates.to_vec()
    };
    remaining
        .choose(rng)
        .or_else(|| candidates.first())
        .copied()
        .unwrap_or(TemplateId::AlwaysBeTalking1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ChannelName, ChatterId, GeneratorError, GiftTierPolicy, MockExternalDataSource,
            MockSuggestionGenerator, Raid, StreamInfo, template::contains_known_placeholder,
        },
        infrastructure::repository::InMemorySessionRepository,
    };
    use stagehand_shared::time::ManualClock;

    struct Fixture {
        repository: Arc<InMemorySessionRepository>,
        clock: Arc<ManualClock>,
        id: SessionId,
    }

    async fn fixture() -> Fixture {
        let repository = Arc::new(InMemorySessionRepository::new());
        let id = SessionId::new("s1".to_string()).unwrap();
        repository
            .insert(Session::new(
                id.clone(),
                ChannelName::new("alpha".to_string()).unwrap(),
                Timestamp::new(0),
                GiftTierPolicy::default(),
            ))
            .await;
        Fixture {
            repository,
            clock: Arc::new(ManualClock::new(0)),
            id,
        }
    }

    fn usecase(
        fixture: &Fixture,
        generator: MockSuggestionGenerator,
        external_data: MockExternalDataSource,
    ) -> SelectPromptUseCase {
        SelectPromptUseCase::new(
            fixture.repository.clone(),
            Arc::new(TemplateRegistry::load().unwrap()),
            Arc::new(generator),
            Arc::new(external_data),
            fixture.clock.clone(),
            0,
        )
        .with_seed(7)
    }

    fn quiet_external_data() -> MockExternalDataSource {
        let mut external = MockExternalDataSource::new();
        external.expect_headline().returning(|| Ok(None));
        external.expect_trivia().returning(|| Ok(None));
        external
    }

    async fn set_viewers(fixture: &Fixture, viewers: &[u64]) {
        let shared = fixture.repository.get(&fixture.id).await.unwrap();
        let mut session = shared.lock().await;
        for (i, v) in viewers.iter().enumerate() {
            let now = Timestamp::new(60_000 + i as i64 * 5_000);
            session.metrics.apply_stream_info(
                Some(StreamInfo {
                    is_live: true,
                    viewer_count: *v,
                    ..StreamInfo::default()
                }),
                now,
            );
            session.metrics.recompute_rollups(now);
        }
    }

    #[tokio::test]
    async fn test_urgent_raid_overrides_phase() {
        // テスト項目: 直近のレイドは、どのフェーズでも raid_celebration（urgent）になる
        // given (前提条件):
        let fixture = fixture().await;
        set_viewers(&fixture, &[1, 5]).await;
        {
            let shared = fixture.repository.get(&fixture.id).await.unwrap();
            shared.lock().await.metrics.on_raid(Raid {
                raider: ChatterId::new("raider".to_string()).unwrap(),
                display_name: "Raider".to_string(),
                viewers: 50,
                timestamp: Timestamp::new(100_000),
            });
        }
        fixture.clock.set(110_000);
        let usecase = usecase(&fixture, MockSuggestionGenerator::new(), quiet_external_data());

        // when (操作):
        let prompt = usecase.execute(&fixture.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(prompt.kind, PromptKind::Event(UrgentEvent::RaidCelebration));
        assert_eq!(prompt.priority, Priority::Urgent);
        assert_eq!(prompt.template, Some(TemplateId::RaidCelebration));
        assert!(!contains_known_placeholder(&prompt.text));
    }

    #[tokio::test]
    async fn test_first_viewer_never_repeats_template() {
        // テスト項目: first_viewer では urgent の歓迎テンプレートが選ばれ、同じテンプレートが連続しない
        // given (前提条件):
        let fixture = fixture().await;
        set_viewers(&fixture, &[1]).await;
        let usecase = usecase(&fixture, MockSuggestionGenerator::new(), quiet_external_data());

        // when (操作):
        let mut prompts = Vec::new();
        for _ in 0..10 {
            prompts.push(usecase.execute(&fixture.id).await.unwrap());
        }

        // then (期待する結果):
        for pair in prompts.windows(2) {
            assert_ne!(pair[0].template, pair[1].template);
        }
        for prompt in &prompts {
            assert_eq!(prompt.priority, Priority::Urgent);
            assert_eq!(prompt.phase, StreamPhase::FirstViewer);
            assert!(TemplateId::FIRST_VIEWER.contains(&prompt.template.unwrap()));
        }
    }

    #[tokio::test]
    async fn test_zero_viewers_uses_headline_sometimes() {
        // テスト項目: zero_viewers では「話し続けよう」テンプレートか、見出しを使ったテンプレートが選ばれる
        // given (前提条件):
        let fixture = fixture().await;
        let mut external = MockExternalDataSource::new();
        external
            .expect_headline()
            .returning(|| Ok(Some("Rust 2026 edition announced".to_string())));
        external.expect_trivia().returning(|| Ok(None));
        let usecase = usecase(&fixture, MockSuggestionGenerator::new(), external);

        // when (操作):
        let mut prompts = Vec::new();
        for _ in 0..60 {
            prompts.push(usecase.execute(&fixture.id).await.unwrap());
        }

        // then (期待する結果):
        let mut news = 0;
        for prompt in &prompts {
            assert_eq!(prompt.priority, Priority::High);
            assert!(!contains_known_placeholder(&prompt.text));
            match prompt.template.unwrap() {
                TemplateId::NewsDiscussion => {
                    news += 1;
                    assert!(prompt.text.contains("Rust 2026 edition announced"));
                }
                id => assert!(TemplateId::ALWAYS_BE_TALKING.contains(&id)),
            }
        }
        assert!(news > 0);
        assert!(news < prompts.len());
    }

    #[tokio::test]
    async fn test_building_audience_uses_generator() {
        // テスト項目: building_audience では生成器の出力がそのまま使われる
        // given (前提条件):
        let fixture = fixture().await;
        set_viewers(&fixture, &[1, 5]).await;
        let mut generator = MockSuggestionGenerator::new();
        generator
            .expect_generate()
            .withf(|context, language| {
                context.phase == StreamPhase::BuildingAudience && *language == LanguageCode::En
            })
            .times(1)
            .returning(|_, _| Ok("Ask chat what they're building this week".to_string()));
        let usecase = usecase(&fixture, generator, quiet_external_data());

        // when (操作):
        let prompt = usecase.execute(&fixture.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(prompt.origin, PromptOrigin::Generator);
        assert_eq!(prompt.kind, PromptKind::AiGenerated);
        assert_eq!(prompt.priority, Priority::Medium);
        assert_eq!(prompt.template, None);
        assert_eq!(prompt.text, "Ask chat what they're building this week");
    }

    #[tokio::test]
    async fn test_building_audience_falls_back_on_generator_error() {
        // テスト項目: 生成器がタイムアウトするとルールベースのフォールバックが使われる
        // given (前提条件):
        let fixture = fixture().await;
        set_viewers(&fixture, &[1, 5]).await;
        let mut generator = MockSuggestionGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(GeneratorError::Timeout(5_000)));
        let usecase = usecase(&fixture, generator, quiet_external_data());

        // when (操作):
        let prompt = usecase.execute(&fixture.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(prompt.origin, PromptOrigin::RuleFallback);
        assert!(prompt.template.is_some());
        assert!(!prompt.text.is_empty());
        assert!(!contains_known_placeholder(&prompt.text));
        let shared = fixture.repository.get(&fixture.id).await.unwrap();
        assert_eq!(shared.lock().await.metrics.last_template(), prompt.template);
    }

    #[tokio::test]
    async fn test_disconnect_during_generation_discards_prompt() {
        // テスト項目: 生成中に切断されたセッションには結果が記録されない
        // given (前提条件):
        let fixture = fixture().await;
        set_viewers(&fixture, &[1, 5]).await;
        let shared = fixture.repository.get(&fixture.id).await.unwrap();
        let in_generator = shared.clone();
        let mut generator = MockSuggestionGenerator::new();
        generator.expect_generate().returning(move |_, _| {
            in_generator.try_lock().unwrap().disconnect();
            Ok("Too late".to_string())
        });
        let usecase = usecase(&fixture, generator, quiet_external_data());

        // when (操作):
        let result = usecase.execute(&fixture.id).await;

        // then (期待する結果):
        assert_eq!(result, Err(SelectPromptError::SessionClosed("s1".to_string())));
        assert!(shared.lock().await.metrics.last_prompt_time().is_none());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        // テスト項目: 存在しないセッションは SessionNotFound になる
        // given (前提条件):
        let fixture = fixture().await;
        let usecase = usecase(&fixture, MockSuggestionGenerator::new(), quiet_external_data());

        // when (操作):
        let result = usecase
            .execute(&SessionId::new("missing".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SelectPromptError::SessionNotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_execute_if_due_respects_cadence_and_urgent_events() {
        // テスト項目: 間隔内は選択されず、未通知の割り込みがあれば間隔内でも選択される
        // given (前提条件):
        let fixture = fixture().await;
        let usecase = usecase(&fixture, MockSuggestionGenerator::new(), quiet_external_data());
        fixture.clock.set(1_000);
        let first = usecase.execute_if_due(&fixture.id).await.unwrap();

        // when (操作):
        fixture.clock.set(5_000);
        let too_early = usecase.execute_if_due(&fixture.id).await.unwrap();
        {
            let shared = fixture.repository.get(&fixture.id).await.unwrap();
            shared.lock().await.metrics.on_raid(Raid {
                raider: ChatterId::new("raider".to_string()).unwrap(),
                display_name: "Raider".to_string(),
                viewers: 10,
                timestamp: Timestamp::new(5_000),
            });
        }
        let urgent = usecase.execute_if_due(&fixture.id).await.unwrap();
        fixture.clock.set(6_000);
        let after_urgent = usecase.execute_if_due(&fixture.id).await.unwrap();

        // then (期待する結果):
        assert!(first.is_some());
        assert!(too_early.is_none());
        assert_eq!(
            urgent.map(|p| p.kind),
            Some(PromptKind::Event(UrgentEvent::RaidCelebration))
        );
        assert!(after_urgent.is_none());
    }

    #[test]
    fn test_pick_excluding_single_candidate() {
        // テスト項目: 候補が 1 つなら直前と同じでも選ばれる
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(1);

        // when (操作):
        let id = pick_excluding(
            &[TemplateId::NewsDiscussion],
            Some(TemplateId::NewsDiscussion),
            &mut rng,
        );

        // then (期待する結果):
        assert_eq!(id, TemplateId::NewsDiscussion);
    }
}
