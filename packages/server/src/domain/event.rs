//! 配信プラットフォームから届くイベントの型定義
//!
//! トランスポート層から届く緩い形のペイロードは、集計に渡す前に
//! ここで定義するタグ付きの型へ正規化されます。サブスクのティア表記の揺れも
//! 境界で [`SubscriptionTier`] に変換し、ハンドラ内で文字列比較はしません。

use serde::{Deserialize, Serialize};

use super::value_object::{ChatterId, Timestamp};

/// 集計が受け付けるイベント
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    ChatMessage(ChatMessage),
    Follow(Follow),
    Subscription(Subscription),
    Cheer(Cheer),
    Raid(Raid),
}

impl StreamEvent {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::ChatMessage(e) => e.timestamp,
            Self::Follow(e) => e.timestamp,
            Self::Subscription(e) => e.timestamp,
            Self::Cheer(e) => e.timestamp,
            Self::Raid(e) => e.timestamp,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChatMessage(_) => "chat_message",
            Self::Follow(_) => "follow",
            Self::Subscription(_) => "subscription",
            Self::Cheer(_) => "cheer",
            Self::Raid(_) => "raid",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub chatter: ChatterId,
    pub display_name: String,
    pub text: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Follow {
    pub chatter: ChatterId,
    pub display_name: String,
    pub timestamp: Timestamp,
}

/// サブスクのイベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionKind {
    #[default]
    New,
    Resub,
    Gift,
    /// まとめてギフト。`count` 件分を加算する
    MysteryGift,
}

/// トランスポートが付けてくるティア情報（未正規化）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TierHint {
    /// `"1000"`, `"Tier 1"`, `"Prime"`, `"gift"` などの文字列表記
    Label(String),
    /// `{ "plan": "1000" }` 形式のプランコード
    Plan(String),
    /// 上のどれにも当てはまらない形（数値のプランなど）。中身は受け取った JSON のまま
    Unrecognized(String),
    #[default]
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub chatter: ChatterId,
    pub display_name: String,
    pub kind: SubscriptionKind,
    pub tier_hint: TierHint,
    /// ミステリーギフト以外は 1
    pub count: u64,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cheer {
    pub chatter: ChatterId,
    pub display_name: String,
    pub bits: u64,
    pub message: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Raid {
    pub raider: ChatterId,
    pub display_name: String,
    pub viewers: u64,
    pub timestamp: Timestamp,
}

/// 正規化後のサブスクティア
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Tier1,
    Tier2,
    Tier3,
    Unknown,
}

/// ラベルのないギフト / 再サブのティア扱い
///
/// 実際のティアは届かないため推定になる。既定では Tier 1 とみなす。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GiftTierPolicy {
    #[default]
    AssumeTier1,
    Unknown,
}

impl GiftTierPolicy {
    fn tier(&self) -> SubscriptionTier {
        match self {
            Self::AssumeTier1 => SubscriptionTier::Tier1,
            Self::Unknown => SubscriptionTier::Unknown,
        }
    }
}

impl SubscriptionTier {
    /// ティア情報を分類する
    ///
    /// - 明示的なティア表記はそのまま対応付ける
    /// - `"gift"` / `"resub"`、およびティア表記のないギフト・再サブは `policy` に従う
    /// - ミステリーギフトと解釈できない表記は `Unknown`
    pub fn classify(kind: SubscriptionKind, hint: &TierHint, policy: GiftTierPolicy) -> Self {
        if kind == SubscriptionKind::MysteryGift {
            return Self::Unknown;
        }

        match hint {
            TierHint::Label(label) => match label.trim() {
                "1000" | "Tier 1" | "Prime" => Self::Tier1,
                "2000" | "Tier 2" => Self::Tier2,
                "3000" | "Tier 3" => Self::Tier3,
                "gift" | "resub" => policy.tier(),
                _ => Self::Unknown,
            },
            TierHint::Plan(plan) => match plan.trim() {
                "1000" => Self::Tier1,
                "2000" => Self::Tier2,
                "3000" => Self::Tier3,
                _ => Self::Unknown,
            },
            TierHint::Unrecognized(_) => Self::Unknown,
            TierHint::Absent => match kind {
                SubscriptionKind::Gift | SubscriptionKind::Resub => policy.tier(),
                _ => Self::Unknown,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> TierHint {
        TierHint::Label(s.to_string())
    }

    #[test]
    fn test_explicit_labels_map_directly() {
        // テスト項目: 明示的なティア表記は対応するティアに分類される
        // given (前提条件):
        let policy = GiftTierPolicy::AssumeTier1;
        let new = SubscriptionKind::New;

        // when (操作):
        let tiers = [
            SubscriptionTier::classify(new, &label("1000"), policy),
            SubscriptionTier::classify(new, &label("Prime"), policy),
            SubscriptionTier::classify(new, &label("Tier 2"), policy),
            SubscriptionTier::classify(new, &label("3000"), policy),
            SubscriptionTier::classify(new, &TierHint::Plan("2000".to_string()), policy),
        ];

        // then (期待する結果):
        assert_eq!(
            tiers,
            [
                SubscriptionTier::Tier1,
                SubscriptionTier::Tier1,
                SubscriptionTier::Tier2,
                SubscriptionTier::Tier3,
                SubscriptionTier::Tier2,
            ]
        );
    }

    #[test]
    fn test_gift_and_resub_follow_policy() {
        // テスト項目: ラベルのないギフト・再サブはポリシーに従って分類される
        // given (前提条件):

        // when (操作):
        let assumed = SubscriptionTier::classify(
            SubscriptionKind::Gift,
            &TierHint::Absent,
            GiftTierPolicy::AssumeTier1,
        );
        let labelled = SubscriptionTier::classify(
            SubscriptionKind::New,
            &label("resub"),
            GiftTierPolicy::AssumeTier1,
        );
        let strict = SubscriptionTier::classify(
            SubscriptionKind::Resub,
            &TierHint::Absent,
            GiftTierPolicy::Unknown,
        );

        // then (期待する結果):
        assert_eq!(assumed, SubscriptionTier::Tier1);
        assert_eq!(labelled, SubscriptionTier::Tier1);
        assert_eq!(strict, SubscriptionTier::Unknown);
    }

    #[test]
    fn test_unrecognized_formats_are_unknown() {
        // テスト項目: 解釈できない表記とミステリーギフトは Unknown になる
        // given (前提条件):
        let policy = GiftTierPolicy::AssumeTier1;

        // when (操作):
        let garbage = SubscriptionTier::classify(SubscriptionKind::New, &label("9000"), policy);
        let absent =
            SubscriptionTier::classify(SubscriptionKind::New, &TierHint::Absent, policy);
        let mystery =
            SubscriptionTier::classify(SubscriptionKind::MysteryGift, &label("1000"), policy);

        // then (期待する結果):
        assert_eq!(garbage, SubscriptionTier::Unknown);
        assert_eq!(absent, SubscriptionTier::Unknown);
        assert_eq!(mystery, SubscriptionTier::Unknown);
    }
}
