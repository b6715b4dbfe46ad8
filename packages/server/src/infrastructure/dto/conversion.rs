//! Conversion logic between DTOs and domain models.

use crate::domain::{
    ChatMessage, ChatterId, Cheer, Follow, Prompt, Raid, SessionId, SessionSnapshot, StreamEvent,
    StreamInfo, Subscription, SubscriptionKind, TierHint, Timestamp, ValueObjectError,
};
use crate::infrastructure::dto::http::{EventRequest, StreamInfoRequest, TierHintDto};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Model
// ========================================

impl From<TierHintDto> for TierHint {
    fn from(dto: TierHintDto) -> Self {
        match dto {
            TierHintDto::Label(label) => Self::Label(label),
            TierHintDto::Plan { plan } => Self::Plan(plan),
            TierHintDto::Other(value) => Self::Unrecognized(value.to_string()),
        }
    }
}

impl From<StreamInfoRequest> for StreamInfo {
    fn from(dto: StreamInfoRequest) -> Self {
        Self {
            is_live: dto.is_live,
            title: dto.title,
            category: dto.category,
            language: dto.language,
            viewer_count: dto.viewer_count,
        }
    }
}

impl EventRequest {
    /// Normalize into a domain event. Events without a timestamp are stamped `received_at`.
    pub fn into_event(self, received_at: Timestamp) -> Result<StreamEvent, ValueObjectError> {
        let stamp = |timestamp: Option<i64>| timestamp.map_or(received_at, Timestamp::new);
        let display = |username: &str, display_name: Option<String>| {
            display_name.unwrap_or_else(|| username.to_string())
        };

        let event = match self {
            Self::ChatMessage {
                username,
                display_name,
                message,
                timestamp,
            } => StreamEvent::ChatMessage(ChatMessage {
                display_name: display(&username, display_name),
                chatter: ChatterId::new(username)?,
                text: message,
                timestamp: stamp(timestamp),
            }),
            Self::Follow {
                username,
                display_name,
                timestamp,
            } => StreamEvent::Follow(Follow {
                display_name: display(&username, display_name),
                chatter: ChatterId::new(username)?,
                timestamp: stamp(timestamp),
            }),
            Self::Subscription {
                username,
                display_name,
                kind,
                tier,
                count,
                timestamp,
            } => StreamEvent::Subscription(Subscription {
                display_name: display(&username, display_name),
                chatter: ChatterId::new(username)?,
                kind,
                tier_hint: tier.map(TierHint::from).unwrap_or_default(),
                count: match kind {
                    SubscriptionKind::MysteryGift => count.unwrap_or(1),
                    _ => 1,
                },
                timestamp: stamp(timestamp),
            }),
            Self::Cheer {
                username,
                display_name,
                bits,
                message,
                timestamp,
            } => StreamEvent::Cheer(Cheer {
                display_name: display(&username, display_name),
                chatter: ChatterId::new(username)?,
                bits,
                message,
                timestamp: stamp(timestamp),
            }),
            Self::Raid {
                username,
                display_name,
                viewers,
                timestamp,
            } => StreamEvent::Raid(Raid {
                display_name: display(&username, display_name),
                raider: ChatterId::new(username)?,
                viewers,
                timestamp: stamp(timestamp),
            }),
        };
        Ok(event)
    }
}

// ========================================
// Domain Model → DTO
// ========================================

impl From<&SessionSnapshot> for dto::MetricsSnapshotDto {
    fn from(snapshot: &SessionSnapshot) -> Self {
        let metrics = &snapshot.metrics;
        let counters = metrics.counters();
        let stream = metrics.stream();
        let rollup = metrics.rollup();

        Self {
            r#type: dto::MessageType::Metrics,
            connected: true,
            session_id: Some(snapshot.session_id.as_str().to_string()),
            channel: Some(snapshot.channel.as_str().to_string()),
            timestamp: snapshot.taken_at.value(),
            language: metrics.language().as_str().to_string(),

            stream_start: metrics.stream_start().value(),
            stream_uptime: rollup.stream_uptime_minutes,
            is_live: stream.is_live,
            title: stream.title.clone(),
            category: stream.category.clone(),
            stream_language: stream.language.clone(),
            current_viewers: stream.current_viewers,
            peak_viewers: stream.peak_viewers,
            average_viewer_count: rollup.average_viewer_count,
            viewer_retention: rollup.viewer_retention,

            total_messages: counters.total_messages,
            messages_per_minute: rollup.messages_per_minute,
            unique_chatters: metrics.unique_chatter_count(),
            sentiment: metrics.rolling_sentiment(),
            chat_score: rollup.chat_score,
            health_score: rollup.health_score,

            total_followers: counters.total_followers,
            session_followers_gained: counters.session_followers_gained,
            followers_per_minute: rollup.followers_per_minute,
            total_subs: counters.total_subs,
            session_subs_gained: counters.session_subs_gained,
            subs_per_minute: rollup.subs_per_minute,
            tier1_subs: counters.tier1_subs,
            tier2_subs: counters.tier2_subs,
            tier3_subs: counters.tier3_subs,
            session_tier1_subs: counters.session_tier1_subs,
            session_tier2_subs: counters.session_tier2_subs,
            session_tier3_subs: counters.session_tier3_subs,
            total_bits: counters.total_bits,
            session_bits_earned: counters.session_bits_earned,
            bits_per_minute: rollup.bits_per_minute,
            total_raids: counters.total_raids,
            session_raids_received: counters.session_raids_received,

            revenue: rollup.revenue,
            projected_revenue: rollup.projected_revenue,

            phase: metrics.phase(),
            phase_transition_time: metrics.phase_tracker().phase_transition_time().value(),
            first_viewer_time: metrics.phase_tracker().first_viewer_time().map(|t| t.value()),
            last_prompt_time: metrics.last_prompt_time().map(|t| t.value()),

            user_engagement: metrics
                .user_engagement()
                .iter()
                .map(|(chatter, engagement)| (chatter.as_str().to_string(), *engagement))
                .collect(),
            top_engaged_users: rollup
                .top_engaged_users
                .iter()
                .map(|user| dto::EngagedUserDto {
                    username: user.chatter.as_str().to_string(),
                    messages: user.engagement.messages,
                    bits: user.engagement.bits,
                    follows: user.engagement.follows,
                    subs: user.engagement.subs,
                    total: user.engagement.total(),
                })
                .collect(),
            recent_messages: metrics
                .recent_messages()
                .iter()
                .map(|m| dto::RecentMessageDto {
                    username: m.chatter.as_str().to_string(),
                    display_name: m.display_name.clone(),
                    message: m.text.clone(),
                    timestamp: m.timestamp.value(),
                })
                .collect(),
            recent_follows: metrics
                .recent_follows()
                .iter()
                .map(|f| dto::RecentFollowDto {
                    username: f.chatter.as_str().to_string(),
                    display_name: f.display_name.clone(),
                    timestamp: f.timestamp.value(),
                })
                .collect(),
            recent_subs: metrics
                .recent_subs()
                .iter()
                .map(|s| dto::RecentSubscriptionDto {
                    username: s.chatter.as_str().to_string(),
                    display_name: s.display_name.clone(),
                    kind: s.kind,
                    tier: s.tier,
                    count: s.count,
                    timestamp: s.timestamp.value(),
                })
                .collect(),
            recent_bits: metrics
                .recent_bits()
                .iter()
                .map(|c| dto::RecentCheerDto {
                    username: c.chatter.as_str().to_string(),
                    display_name: c.display_name.clone(),
                    bits: c.bits,
                    message: c.message.clone(),
                    timestamp: c.timestamp.value(),
                })
                .collect(),
            recent_raids: metrics
                .recent_raids()
                .iter()
                .map(|r| dto::RecentRaidDto {
                    username: r.raider.as_str().to_string(),
                    display_name: r.display_name.clone(),
                    viewers: r.viewers,
                    timestamp: r.timestamp.value(),
                })
                .collect(),
        }
    }
}

impl dto::MetricsSnapshotDto {
    /// Well-formed snapshot for "no session connected"
    pub fn empty(timestamp: Timestamp) -> Self {
        Self {
            timestamp: timestamp.value(),
            language: crate::domain::LanguageCode::default().as_str().to_string(),
            ..Self::default()
        }
    }
}

impl dto::PromptMessageDto {
    pub fn from_prompt(session_id: &SessionId, prompt: &Prompt) -> Self {
        Self {
            r#type: dto::MessageType::Prompt,
            session_id: session_id.as_str().to_string(),
            kind: prompt.kind.as_str().to_string(),
            priority: prompt.priority,
            text: prompt.text.clone(),
            originated_from: prompt.origin,
            template: prompt.template,
            phase: prompt.phase,
            timestamp: prompt.created_at.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChannelName, GiftTierPolicy, PromptKind, PromptOrigin, Priority, Session, StreamPhase,
        SubscriptionTier, TemplateId, UrgentEvent,
    };

    fn session() -> Session {
        Session::new(
            SessionId::new("s1".to_string()).unwrap(),
            ChannelName::new("alpha".to_string()).unwrap(),
            Timestamp::new(0),
            GiftTierPolicy::default(),
        )
    }

    #[test]
    fn test_event_request_parses_internally_tagged_json() {
        // テスト項目: "type" タグ付きの JSON がチャットイベントに変換される
        // given (前提条件):
        let json = r#"{"type":"chat_message","username":"alice","message":"hi","timestamp":1000}"#;

        // when (操作):
        let request: EventRequest = serde_json::from_str(json).unwrap();
        let event = request.into_event(Timestamp::new(5000)).unwrap();

        // then (期待する結果):
        match event {
            StreamEvent::ChatMessage(message) => {
                assert_eq!(message.chatter.as_str(), "alice");
                assert_eq!(message.display_name, "alice");
                assert_eq!(message.text, "hi");
                assert_eq!(message.timestamp, Timestamp::new(1000));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_subscription_tier_hint_forms() {
        // テスト項目: ティアの文字列表記とプラン形式の両方を受け付ける
        // given (前提条件):
        let label = r#"{"type":"subscription","username":"a","tier":"Tier 2"}"#;
        let plan = r#"{"type":"subscription","username":"b","kind":"resub","tier":{"plan":"3000"}}"#;

        // when (操作):
        let label = serde_json::from_str::<EventRequest>(label)
            .unwrap()
            .into_event(Timestamp::new(0))
            .unwrap();
        let plan = serde_json::from_str::<EventRequest>(plan)
            .unwrap()
            .into_event(Timestamp::new(0))
            .unwrap();

        // then (期待する結果):
        assert!(matches!(
            label,
            StreamEvent::Subscription(Subscription { tier_hint: TierHint::Label(ref l), count: 1, .. }) if l == "Tier 2"
        ));
        assert!(matches!(
            plan,
            StreamEvent::Subscription(Subscription {
                kind: SubscriptionKind::Resub,
                tier_hint: TierHint::Plan(ref p),
                ..
            }) if p == "3000"
        ));
    }

    #[test]
    fn test_unrecognized_tier_shapes_are_accepted_as_unknown() {
        // テスト項目: 数値のティアや数値のプランでもイベントは受け付けられ、ティアは Unknown、サブスク総数は増える
        // given (前提条件):
        let numeric = r#"{"type":"subscription","username":"a","tier":1000}"#;
        let numeric_plan = r#"{"type":"subscription","username":"b","tier":{"plan":1000}}"#;
        let mut aggregate = session().metrics;

        // when (操作):
        let mut hints = Vec::new();
        for json in [numeric, numeric_plan] {
            let event = serde_json::from_str::<EventRequest>(json)
                .unwrap()
                .into_event(Timestamp::new(0))
                .unwrap();
            if let StreamEvent::Subscription(subscription) = &event {
                hints.push(subscription.tier_hint.clone());
            }
            aggregate.apply(event);
        }

        // then (期待する結果):
        assert_eq!(
            hints,
            vec![
                TierHint::Unrecognized("1000".to_string()),
                TierHint::Unrecognized(r#"{"plan":1000}"#.to_string()),
            ]
        );
        let counters = aggregate.counters();
        assert_eq!(counters.total_subs, 2);
        assert_eq!(counters.tier1_subs, 0);
        assert_eq!(
            aggregate.recent_subs().latest().unwrap().tier,
            SubscriptionTier::Unknown
        );
    }

    #[test]
    fn test_cheer_and_raid_without_amounts_default_to_zero() {
        // テスト項目: bits の無いチア、viewers の無いレイドは 0 として受け付ける
        // given (前提条件):
        let cheer = r#"{"type":"cheer","username":"alice"}"#;
        let raid = r#"{"type":"raid","username":"carol"}"#;

        // when (操作):
        let cheer = serde_json::from_str::<EventRequest>(cheer)
            .unwrap()
            .into_event(Timestamp::new(0))
            .unwrap();
        let raid = serde_json::from_str::<EventRequest>(raid)
            .unwrap()
            .into_event(Timestamp::new(0))
            .unwrap();

        // then (期待する結果):
        assert!(matches!(cheer, StreamEvent::Cheer(Cheer { bits: 0, .. })));
        assert!(matches!(raid, StreamEvent::Raid(Raid { viewers: 0, .. })));
    }

    #[test]
    fn test_mystery_gift_keeps_count() {
        // テスト項目: ミステリーギフトのみ count が使われ、欠けた timestamp は受信時刻になる
        // given (前提条件):
        let json = r#"{"type":"subscription","username":"santa","kind":"mystery_gift","count":5}"#;

        // when (操作):
        let event = serde_json::from_str::<EventRequest>(json)
            .unwrap()
            .into_event(Timestamp::new(42))
            .unwrap();

        // then (期待する結果):
        assert!(matches!(
            event,
            StreamEvent::Subscription(Subscription { count: 5, timestamp, .. }) if timestamp == Timestamp::new(42)
        ));
    }

    #[test]
    fn test_empty_username_is_rejected() {
        // テスト項目: 空のユーザー名はエラーになる
        // given (前提条件):
        let json = r#"{"type":"follow","username":""}"#;

        // when (操作):
        let result = serde_json::from_str::<EventRequest>(json)
            .unwrap()
            .into_event(Timestamp::new(0));

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_to_dto_uses_camel_case_and_counts() {
        // テスト項目: スナップショットが camelCase の JSON になり、ユニークチャッターは件数になる
        // given (前提条件):
        let mut session = session();
        for (who, text) in [("alice", "hi"), ("bob", "hello"), ("alice", "again")] {
            session.metrics.on_chat_message(ChatMessage {
                chatter: ChatterId::new(who.to_string()).unwrap(),
                display_name: who.to_string(),
                text: text.to_string(),
                timestamp: Timestamp::new(1_000),
            });
        }
        let snapshot = session.snapshot(Timestamp::new(2_000));

        // when (操作):
        let dto = dto::MetricsSnapshotDto::from(&snapshot);
        let json = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "metrics");
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["channel"], "alpha");
        assert_eq!(json["totalMessages"], 3);
        assert_eq!(json["uniqueChatters"], 2);
        assert_eq!(json["userEngagement"]["alice"]["messages"], 2);
        assert_eq!(json["phase"], "zero_viewers");
        assert_eq!(json["revenue"]["breakdown"]["totalSubs"], 0.0);
        assert_eq!(json["recentMessages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_snapshot() {
        // テスト項目: 空のスナップショットはセッション ID を持たず connected が false
        // given (前提条件):

        // when (操作):
        let json = serde_json::to_value(dto::MetricsSnapshotDto::empty(Timestamp::new(7))).unwrap();

        // then (期待する結果):
        assert_eq!(json["connected"], false);
        assert!(json["sessionId"].is_null());
        assert_eq!(json["timestamp"], 7);
        assert_eq!(json["totalMessages"], 0);
    }

    #[test]
    fn test_prompt_to_dto() {
        // テスト項目: プロンプトがイベント名の kind を持つメッセージになる
        // given (前提条件):
        let prompt = Prompt {
            kind: PromptKind::Event(UrgentEvent::RaidCelebration),
            priority: Priority::Urgent,
            text: "Welcome raiders!".to_string(),
            origin: PromptOrigin::RuleFallback,
            template: Some(TemplateId::RaidCelebration),
            phase: StreamPhase::BuildingAudience,
            created_at: Timestamp::new(9),
        };

        // when (操作):
        let dto = dto::PromptMessageDto::from_prompt(&SessionId::new("s1".to_string()).unwrap(), &prompt);
        let json = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "prompt");
        assert_eq!(json["kind"], "raid_celebration");
        assert_eq!(json["priority"], "urgent");
        assert_eq!(json["originatedFrom"], "rule_fallback");
        assert_eq!(json["template"], "raid_celebration");
        assert_eq!(json["phase"], "building_audience");
    }
}
