//! セッションごとのローリング集計（Rolling Metrics Aggregate）
//!
//! イベントハンドラはすべて同期的な状態遷移で、途中でサスペンドしない。
//! 信頼できる値はカウンタと生イベントのリングバッファだけで、
//! レートやスコアなどの派生値は [`Rollup::compute`] がそこから再計算する。
//!
//! ## テスト作業記録
//!
//! ### 何をテストしているか
//! - 各イベントハンドラによるカウンタ・リングバッファ・ユーザー別集計の更新
//! - チャットの重複抑止（同一チャッター・同一本文が 1000 ms 以内）
//! - ロールアップの計算式（レート、chatScore、売上、ヘルススコア）
//!
//! ### どのような状況を想定しているか
//! - 正常系：各種イベントの到着
//! - エッジケース：配信開始直後（経過 0 分）、極端な入力値での chatScore

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::event::{
    ChatMessage, Cheer, Follow, GiftTierPolicy, Raid, StreamEvent, Subscription,
    SubscriptionKind, SubscriptionTier,
};
use super::phase::{PhaseTracker, PhaseTransition, StreamPhase};
use super::prompt::{PromptRecord, UrgentEvent};
use super::ring_buffer::RingBuffer;
use super::sentiment;
use super::value_object::{ChatterId, LanguageCode, Timestamp};

pub const RECENT_MESSAGES_CAPACITY: usize = 100;
pub const RECENT_FOLLOWS_CAPACITY: usize = 50;
pub const RECENT_SUBS_CAPACITY: usize = 50;
pub const RECENT_BITS_CAPACITY: usize = 50;
pub const RECENT_RAIDS_CAPACITY: usize = 20;
pub const PROMPT_HISTORY_CAPACITY: usize = 50;

/// 重複とみなすチャットの到着間隔
pub const DUPLICATE_WINDOW_MS: i64 = 1_000;
/// 感情スコアを計算する直近メッセージ数
pub const SENTIMENT_WINDOW: usize = 20;
/// 割り込みイベントを探す直近の時間幅
pub const URGENT_WINDOW_MS: i64 = 30_000;
/// ロールアップに含める上位ユーザー数
pub const TOP_ENGAGED_USERS: usize = 10;

const BITS_VALUE_USD: f64 = 0.01;
const TIER1_VALUE_USD: f64 = 2.50;
const TIER2_VALUE_USD: f64 = 5.00;
const TIER3_VALUE_USD: f64 = 12.50;
const AVERAGE_SUB_VALUE_USD: f64 = 2.50;
const PROJECTION_DAYS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    pub chatter: ChatterId,
    pub display_name: String,
    pub text: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowRecord {
    pub chatter: ChatterId,
    pub display_name: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionRecord {
    pub chatter: ChatterId,
    pub display_name: String,
    pub kind: SubscriptionKind,
    pub tier: SubscriptionTier,
    pub count: u64,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheerRecord {
    pub chatter: ChatterId,
    pub display_name: String,
    pub bits: u64,
    pub message: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaidRecord {
    pub raider: ChatterId,
    pub display_name: String,
    pub viewers: u64,
    pub timestamp: Timestamp,
}

/// ユーザーごとの貢献数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserEngagement {
    pub messages: u64,
    pub bits: u64,
    pub follows: u64,
    pub subs: u64,
}

/// 溢れる場合は上限で止める（カウンタは減らない）
fn bump(counter: &mut u64, amount: u64) {
    *counter = counter.saturating_add(amount);
}

impl UserEngagement {
    pub fn total(&self) -> u64 {
        self.messages
            .saturating_add(self.bits)
            .saturating_add(self.follows)
            .saturating_add(self.subs)
    }
}

/// カウンタ
///
/// `total_*` は配信を通した累計、`session_*` はこのセッションで得た分。
/// どちらも減ることはない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_messages: u64,
    pub total_followers: u64,
    pub session_followers_gained: u64,
    pub total_subs: u64,
    pub session_subs_gained: u64,
    pub tier1_subs: u64,
    pub tier2_subs: u64,
    pub tier3_subs: u64,
    pub session_tier1_subs: u64,
    pub session_tier2_subs: u64,
    pub session_tier3_subs: u64,
    pub total_bits: u64,
    pub session_bits_earned: u64,
    pub total_raids: u64,
    pub session_raids_received: u64,
}

/// 外部データソースから得た配信情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub is_live: bool,
    pub title: String,
    pub category: String,
    pub language: String,
    pub viewer_count: u64,
}

/// 配信・視聴者の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamState {
    pub is_live: bool,
    pub title: String,
    pub category: String,
    pub language: String,
    pub current_viewers: u64,
    pub peak_viewers: u64,
    pub total_viewer_minutes: f64,
    last_sample: Option<Timestamp>,
}

/// 推定売上（USD）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub bits: f64,
    pub subs: f64,
    pub total: f64,
    pub breakdown: RevenueBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub bits: f64,
    pub tier1: f64,
    pub tier2: f64,
    pub tier3: f64,
    pub total_subs: f64,
}

impl Revenue {
    /// セッション中の bits とティア別サブスクから推定する
    ///
    /// ティア別の件数がすべて 0 の場合は、サブスク総数に平均単価を掛ける。
    pub fn estimate(counters: &Counters) -> Self {
        let bits = counters.session_bits_earned as f64 * BITS_VALUE_USD;
        let tier1 = counters.session_tier1_subs as f64 * TIER1_VALUE_USD;
        let tier2 = counters.session_tier2_subs as f64 * TIER2_VALUE_USD;
        let tier3 = counters.session_tier3_subs as f64 * TIER3_VALUE_USD;

        let has_tiers = counters.session_tier1_subs > 0
            || counters.session_tier2_subs > 0
            || counters.session_tier3_subs > 0;
        let subs = if has_tiers {
            tier1 + tier2 + tier3
        } else {
            counters.session_subs_gained as f64 * AVERAGE_SUB_VALUE_USD
        };

        Self {
            bits,
            subs,
            total: bits + subs,
            breakdown: RevenueBreakdown {
                bits,
                tier1,
                tier2,
                tier3,
                total_subs: subs,
            },
        }
    }
}

/// 上位ユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagedUser {
    pub chatter: ChatterId,
    pub engagement: UserEngagement,
}

/// カウンタから導出した値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rollup {
    pub computed_at: Option<Timestamp>,
    pub stream_uptime_minutes: f64,
    pub messages_per_minute: f64,
    pub followers_per_minute: f64,
    pub subs_per_minute: f64,
    pub bits_per_minute: f64,
    pub average_viewer_count: f64,
    pub viewer_retention: f64,
    pub chat_score: u8,
    pub health_score: f64,
    pub revenue: Revenue,
    pub projected_revenue: f64,
    pub top_engaged_users: Vec<EngagedUser>,
}

impl Rollup {
    /// `now` 時点のロールアップ。集計の状態は変更しない
    pub fn compute(aggregate: &MetricsAggregate, now: Timestamp) -> Self {
        let elapsed_minutes = (now.millis_since(aggregate.stream_start) as f64 / 60_000.0).max(0.0);
        let per_minute = |count: f64| {
            if elapsed_minutes > 0.0 {
                count / elapsed_minutes
            } else {
                0.0
            }
        };

        let counters = &aggregate.counters;
        let stream = &aggregate.stream;
        let messages_per_minute = per_minute(counters.total_messages as f64);

        let viewer_retention = if stream.current_viewers > 0 {
            (stream.current_viewers as f64 / stream.peak_viewers.max(1) as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let revenue = Revenue::estimate(counters);
        let health_score = (100.0 - elapsed_minutes / 60.0 * 10.0
            + aggregate.rolling_sentiment * 20.0)
            .clamp(0.0, 100.0);

        Self {
            computed_at: Some(now),
            stream_uptime_minutes: elapsed_minutes,
            messages_per_minute,
            followers_per_minute: per_minute(counters.session_followers_gained as f64),
            subs_per_minute: per_minute(counters.session_subs_gained as f64),
            bits_per_minute: per_minute(counters.session_bits_earned as f64),
            average_viewer_count: per_minute(stream.total_viewer_minutes),
            viewer_retention,
            chat_score: chat_score(
                messages_per_minute,
                aggregate.rolling_sentiment,
                aggregate.unique_chatters.len(),
            ),
            health_score,
            projected_revenue: revenue.total * PROJECTION_DAYS,
            revenue,
            top_engaged_users: aggregate.top_engaged_users(TOP_ENGAGED_USERS),
        }
    }
}

/// メッセージレート・感情・ユニークチャッター数から 0..=100 のスコアを作る
///
/// `min(mpm*2, 40) + max(0, (sentiment+1)*15) + min(unique*3, 30)` を丸めて 0..=100 に収める。
pub fn chat_score(messages_per_minute: f64, sentiment: f64, unique_chatters: usize) -> u8 {
    let message_score = (messages_per_minute * 2.0).min(40.0);
    let sentiment_score = ((sentiment + 1.0) * 15.0).max(0.0);
    let unique_score = (unique_chatters as f64 * 3.0).min(30.0);
    let total = (message_score + sentiment_score + unique_score).round();
    if total.is_nan() {
        return 0;
    }
    total.clamp(0.0, 100.0) as u8
}

/// セッションが排他的に所有する集計
#[derive(Debug, Clone)]
pub struct MetricsAggregate {
    stream_start: Timestamp,
    gift_policy: GiftTierPolicy,
    counters: Counters,
    recent_messages: RingBuffer<ChatRecord>,
    recent_follows: RingBuffer<FollowRecord>,
    recent_subs: RingBuffer<SubscriptionRecord>,
    recent_bits: RingBuffer<CheerRecord>,
    recent_raids: RingBuffer<RaidRecord>,
    prompt_history: RingBuffer<PromptRecord>,
    unique_chatters: HashSet<ChatterId>,
    user_engagement: HashMap<ChatterId, UserEngagement>,
    rolling_sentiment: f64,
    stream: StreamState,
    phase: PhaseTracker,
    rollup: Rollup,
    language: LanguageCode,
    last_prompt_time: Option<Timestamp>,
}

impl MetricsAggregate {
    /// セッション開始時点の空の集計を作る
    pub fn new(stream_start: Timestamp, gift_policy: GiftTierPolicy) -> Self {
        Self {
            stream_start,
            gift_policy,
            counters: Counters::default(),
            recent_messages: RingBuffer::new(RECENT_MESSAGES_CAPACITY),
            recent_follows: RingBuffer::new(RECENT_FOLLOWS_CAPACITY),
            recent_subs: RingBuffer::new(RECENT_SUBS_CAPACITY),
            recent_bits: RingBuffer::new(RECENT_BITS_CAPACITY),
            recent_raids: RingBuffer::new(RECENT_RAIDS_CAPACITY),
            prompt_history: RingBuffer::new(PROMPT_HISTORY_CAPACITY),
            unique_chatters: HashSet::new(),
            user_engagement: HashMap::new(),
            rolling_sentiment: 0.0,
            stream: StreamState::default(),
            phase: PhaseTracker::new(stream_start),
            rollup: Rollup::default(),
            language: LanguageCode::default(),
            last_prompt_time: None,
        }
    }

    /// イベントを対応するハンドラに振り分ける。状態が変わったら true
    pub fn apply(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::ChatMessage(e) => self.on_chat_message(e),
            StreamEvent::Follow(e) => {
                self.on_follow(e);
                true
            }
            StreamEvent::Subscription(e) => {
                self.on_subscription(e);
                true
            }
            StreamEvent::Cheer(e) => {
                self.on_cheer(e);
                true
            }
            StreamEvent::Raid(e) => {
                self.on_raid(e);
                true
            }
        }
    }

    /// チャットメッセージ
    ///
    /// 同じチャッター・同じ本文が 1000 ms 以内に届いていれば重複として捨て、false を返す。
    pub fn on_chat_message(&mut self, message: ChatMessage) -> bool {
        let duplicate = self.recent_messages.iter().rev().any(|m| {
            m.chatter == message.chatter
                && m.text == message.text
                && message.timestamp.millis_since(m.timestamp).saturating_abs() < DUPLICATE_WINDOW_MS
        });
        if duplicate {
            tracing::debug!(
                "Skipping duplicate chat message from '{}'",
                message.chatter.as_str()
            );
            return false;
        }

        bump(&mut self.counters.total_messages, 1);
        self.unique_chatters.insert(message.chatter.clone());
        bump(&mut self.engagement_of(&message.chatter).messages, 1);
        self.recent_messages.push(ChatRecord {
            chatter: message.chatter,
            display_name: message.display_name,
            text: message.text,
            timestamp: message.timestamp,
        });
        self.recompute_sentiment();
        true
    }

    /// フォロー
    pub fn on_follow(&mut self, follow: Follow) {
        bump(&mut self.counters.total_followers, 1);
        bump(&mut self.counters.session_followers_gained, 1);
        bump(&mut self.engagement_of(&follow.chatter).follows, 1);
        self.recent_follows.push(FollowRecord {
            chatter: follow.chatter,
            display_name: follow.display_name,
            timestamp: follow.timestamp,
        });
    }

    /// サブスク（新規・再サブ・ギフト・ミステリーギフト）
    ///
    /// サブスク総数は常に `count` だけ増える。ティア別カウンタは分類できた場合のみ 1 増える。
    pub fn on_subscription(&mut self, subscription: Subscription) {
        let count = subscription.count.max(1);
        let tier = SubscriptionTier::classify(
            subscription.kind,
            &subscription.tier_hint,
            self.gift_policy,
        );

        bump(&mut self.counters.total_subs, count);
        bump(&mut self.counters.session_subs_gained, count);
        match tier {
            SubscriptionTier::Tier1 => {
                bump(&mut self.counters.tier1_subs, 1);
                bump(&mut self.counters.session_tier1_subs, 1);
            }
            SubscriptionTier::Tier2 => {
                bump(&mut self.counters.tier2_subs, 1);
                bump(&mut self.counters.session_tier2_subs, 1);
            }
            SubscriptionTier::Tier3 => {
                bump(&mut self.counters.tier3_subs, 1);
                bump(&mut self.counters.session_tier3_subs, 1);
            }
            SubscriptionTier::Unknown => {
                tracing::debug!(
                    "Subscription from '{}' has no recognizable tier ({:?})",
                    subscription.chatter.as_str(),
                    subscription.tier_hint
                );
            }
        }

        bump(&mut self.engagement_of(&subscription.chatter).subs, count);
        self.recent_subs.push(SubscriptionRecord {
            chatter: subscription.chatter,
            display_name: subscription.display_name,
            kind: subscription.kind,
            tier,
            count,
            timestamp: subscription.timestamp,
        });
    }

    /// Bits（チア）
    pub fn on_cheer(&mut self, cheer: Cheer) {
        bump(&mut self.counters.total_bits, cheer.bits);
        bump(&mut self.counters.session_bits_earned, cheer.bits);
        bump(&mut self.engagement_of(&cheer.chatter).bits, cheer.bits);
        self.recent_bits.push(CheerRecord {
            chatter: cheer.chatter,
            display_name: cheer.display_name,
            bits: cheer.bits,
            message: cheer.message,
            timestamp: cheer.timestamp,
        });
    }

    /// レイド
    pub fn on_raid(&mut self, raid: Raid) {
        bump(&mut self.counters.total_raids, 1);
        bump(&mut self.counters.session_raids_received, 1);
        self.recent_raids.push(RaidRecord {
            raider: raid.raider,
            display_name: raid.display_name,
            viewers: raid.viewers,
            timestamp: raid.timestamp,
        });
    }

    /// 配信情報の反映
    ///
    /// 前回のサンプルからの経過時間で視聴者・分を積算する。オフラインなら視聴者数は 0。
    pub fn apply_stream_info(&mut self, info: Option<StreamInfo>, now: Timestamp) {
        if let Some(last) = self.stream.last_sample {
            let minutes = (now.millis_since(last) as f64 / 60_000.0).max(0.0);
            self.stream.total_viewer_minutes += self.stream.current_viewers as f64 * minutes;
        }
        self.stream.last_sample = Some(now);

        match info {
            Some(info) if info.is_live => {
                self.stream.is_live = true;
                self.stream.title = info.title;
                self.stream.category = info.category;
                self.stream.language = info.language;
                self.stream.current_viewers = info.viewer_count;
                self.stream.peak_viewers = self.stream.peak_viewers.max(info.viewer_count);
            }
            _ => {
                self.stream.is_live = false;
                self.stream.title.clear();
                self.stream.category.clear();
                self.stream.language.clear();
                self.stream.current_viewers = 0;
            }
        }
    }

    /// 派生値を再計算し、フェーズを評価する
    pub fn recompute_rollups(&mut self, now: Timestamp) -> Option<PhaseTransition> {
        self.rollup = Rollup::compute(self, now);
        let transition = self.phase.observe(
            self.stream.current_viewers,
            self.rollup.stream_uptime_minutes,
            now,
        );
        if let Some(t) = transition {
            tracing::info!(
                "Stream phase changed: {} -> {} (viewers: {}, uptime: {:.1} min)",
                t.from,
                t.to,
                self.stream.current_viewers,
                self.rollup.stream_uptime_minutes
            );
        }
        transition
    }

    /// プロンプトを履歴に追加し、最終プロンプト時刻を更新する
    pub fn record_prompt(&mut self, record: PromptRecord) {
        self.last_prompt_time = Some(record.created_at);
        self.prompt_history.push(record);
    }

    /// 直近 30 秒のイベントから割り込みを判定する
    ///
    /// レイド > サブスク 3 件以上 > チア 5 件以上 > フォロー 5 件以上 の順で最初に該当したもの。
    pub fn urgent_event(&self, now: Timestamp) -> Option<UrgentEvent> {
        let recent = |at: Timestamp| now.millis_since(at) < URGENT_WINDOW_MS;

        if self.recent_raids.iter().any(|r| recent(r.timestamp)) {
            return Some(UrgentEvent::RaidCelebration);
        }
        let subs: u64 = self
            .recent_subs
            .iter()
            .filter(|s| recent(s.timestamp))
            .map(|s| s.count)
            .sum();
        if subs >= 3 {
            return Some(UrgentEvent::SubBombCelebration);
        }
        if self.recent_bits.iter().filter(|c| recent(c.timestamp)).count() >= 5 {
            return Some(UrgentEvent::BitsStorm);
        }
        if self.recent_follows.iter().filter(|f| recent(f.timestamp)).count() >= 5 {
            return Some(UrgentEvent::FollowerSurge);
        }
        None
    }

    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    /// 上位 `n` ユーザー（貢献合計の降順、同数ならチャッター名順）
    pub fn top_engaged_users(&self, n: usize) -> Vec<EngagedUser> {
        let mut users: Vec<EngagedUser> = self
            .user_engagement
            .iter()
            .map(|(chatter, engagement)| EngagedUser {
                chatter: chatter.clone(),
                engagement: *engagement,
            })
            .collect();
        users.sort_by(|a, b| {
            b.engagement
                .total()
                .cmp(&a.engagement.total())
                .then_with(|| a.chatter.cmp(&b.chatter))
        });
        users.truncate(n);
        users
    }

    fn engagement_of(&mut self, chatter: &ChatterId) -> &mut UserEngagement {
        self.user_engagement.entry(chatter.clone()).or_default()
    }

    fn recompute_sentiment(&mut self) {
        self.rolling_sentiment = sentiment::average(
            self.recent_messages
                .last_n(SENTIMENT_WINDOW)
                .map(|m| m.text.as_str()),
        );
    }

    pub fn stream_start(&self) -> Timestamp {
        self.stream_start
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn recent_messages(&self) -> &RingBuffer<ChatRecord> {
        &self.recent_messages
    }

    pub fn recent_follows(&self) -> &RingBuffer<FollowRecord> {
        &self.recent_follows
    }

    pub fn recent_subs(&self) -> &RingBuffer<SubscriptionRecord> {
        &self.recent_subs
    }

    pub fn recent_bits(&self) -> &RingBuffer<CheerRecord> {
        &self.recent_bits
    }

    pub fn recent_raids(&self) -> &RingBuffer<RaidRecord> {
        &self.recent_raids
    }

    pub fn prompt_history(&self) -> &RingBuffer<PromptRecord> {
        &self.prompt_history
    }

    pub fn unique_chatter_count(&self) -> usize {
        self.unique_chatters.len()
    }

    pub fn user_engagement(&self) -> &HashMap<ChatterId, UserEngagement> {
        &self.user_engagement
    }

    pub fn rolling_sentiment(&self) -> f64 {
        self.rolling_sentiment
    }

    pub fn stream(&self) -> &StreamState {
        &self.stream
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase.phase()
    }

    pub fn phase_tracker(&self) -> &PhaseTracker {
        &self.phase
    }

    pub fn rollup(&self) -> &Rollup {
        &self.rollup
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn last_prompt_time(&self) -> Option<Timestamp> {
        self.last_prompt_time
    }

    /// 直前のプロンプトが使ったテンプレート
    pub fn last_template(&self) -> Option<super::template::TemplateId> {
        self.prompt_history.latest().and_then(|r| r.template)
    }
}
