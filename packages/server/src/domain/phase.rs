//! 配信フェーズの状態機械
//!
//! 視聴者数から `zero_viewers → first_viewer → building_audience` の粗い
//! ライフサイクルを導出する。遷移は視聴者数の変化でのみ起き、経過時間だけで
//! 前のフェーズへ戻ることはない。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value_object::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    #[default]
    ZeroViewers,
    FirstViewer,
    BuildingAudience,
}

impl StreamPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroViewers => "zero_viewers",
            Self::FirstViewer => "first_viewer",
            Self::BuildingAudience => "building_audience",
        }
    }
}

impl fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1 回の遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: StreamPhase,
    pub to: StreamPhase,
    pub at: Timestamp,
}

/// フェーズと遷移時刻を保持する状態機械
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTracker {
    phase: StreamPhase,
    first_viewer_time: Option<Timestamp>,
    phase_transition_time: Timestamp,
}

impl PhaseTracker {
    /// 初期状態は `zero_viewers`
    pub fn new(now: Timestamp) -> Self {
        Self {
            phase: StreamPhase::ZeroViewers,
            first_viewer_time: None,
            phase_transition_time: now,
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn first_viewer_time(&self) -> Option<Timestamp> {
        self.first_viewer_time
    }

    pub fn phase_transition_time(&self) -> Timestamp {
        self.phase_transition_time
    }

    /// 現在の視聴者数で遷移規則を評価する
    ///
    /// - `zero_viewers → first_viewer`: `viewers > 0`（稼働時間は問わない）
    /// - `first_viewer → building_audience`: `viewers >= 3`
    /// - 任意 `→ zero_viewers`: `viewers == 0`
    ///
    /// 1 回の評価で進むのは 1 段だけ。`_uptime_minutes` は遷移条件に使わない
    /// （`zero_viewers` は稼働時間では抜けない）。
    pub fn observe(
        &mut self,
        viewers: u64,
        _uptime_minutes: f64,
        now: Timestamp,
    ) -> Option<PhaseTransition> {
        let next = match (self.phase, viewers) {
            (StreamPhase::ZeroViewers, 0) => return None,
            (_, 0) => StreamPhase::ZeroViewers,
            (StreamPhase::ZeroViewers, _) => {
                self.first_viewer_time.get_or_insert(now);
                StreamPhase::FirstViewer
            }
            (StreamPhase::FirstViewer, v) if v >= 3 => StreamPhase::BuildingAudience,
            _ => return None,
        };

        let transition = PhaseTransition {
            from: self.phase,
            to: next,
            at: now,
        };
        self.phase = next;
        self.phase_transition_time = now;
        Some(transition)
    }
}

/// フェーズごとのプロンプト生成間隔
pub struct PromptCadence;

impl PromptCadence {
    pub const ZERO_VIEWERS_MS: i64 = 30_000;
    pub const FIRST_VIEWER_MS: i64 = 10_000;
    pub const BUILDING_AUDIENCE_MS: i64 = 60_000;

    pub fn interval_ms(phase: StreamPhase) -> i64 {
        match phase {
            StreamPhase::ZeroViewers => Self::ZERO_VIEWERS_MS,
            StreamPhase::FirstViewer => Self::FIRST_VIEWER_MS,
            StreamPhase::BuildingAudience => Self::BUILDING_AUDIENCE_MS,
        }
    }

    /// 前回のプロンプトからフェーズの間隔を超えていれば true
    ///
    /// `building_audience` は視聴者がいる場合のみ。
    pub fn is_due(
        phase: StreamPhase,
        last_prompt_time: Option<Timestamp>,
        viewers: u64,
        now: Timestamp,
    ) -> bool {
        let elapsed = last_prompt_time.map_or(i64::MAX, |last| now.millis_since(last));
        let due = elapsed > Self::interval_ms(phase);
        match phase {
            StreamPhase::BuildingAudience => due && viewers > 0,
            _ => due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_zero_viewers() {
        // テスト項目: 初期フェーズは zero_viewers
        // given (前提条件):

        // when (操作):
        let tracker = PhaseTracker::new(Timestamp::new(0));

        // then (期待する結果):
        assert_eq!(tracker.phase(), StreamPhase::ZeroViewers);
        assert_eq!(tracker.first_viewer_time(), None);
    }

    #[test]
    fn test_full_lifecycle() {
        // テスト項目: 0 → 1 → 3 → 0 の視聴者数で zero → first → building → zero と遷移する
        // given (前提条件):
        let mut tracker = PhaseTracker::new(Timestamp::new(0));

        // when (操作):
        let t1 = tracker.observe(1, 0.0, Timestamp::new(1_000));
        let after_first = tracker.phase();
        let t2 = tracker.observe(3, 0.1, Timestamp::new(2_000));
        let after_building = tracker.phase();
        let t3 = tracker.observe(0, 0.2, Timestamp::new(3_000));

        // then (期待する結果):
        assert_eq!(after_first, StreamPhase::FirstViewer);
        assert_eq!(after_building, StreamPhase::BuildingAudience);
        assert_eq!(tracker.phase(), StreamPhase::ZeroViewers);
        assert_eq!(
            t1.map(|t| (t.from, t.to)),
            Some((StreamPhase::ZeroViewers, StreamPhase::FirstViewer))
        );
        assert!(t2.is_some());
        assert_eq!(t3.map(|t| t.at), Some(Timestamp::new(3_000)));
        assert_eq!(tracker.first_viewer_time(), Some(Timestamp::new(1_000)));
        assert_eq!(tracker.phase_transition_time(), Timestamp::new(3_000));
    }

    #[test]
    fn test_first_viewer_to_zero() {
        // テスト項目: first_viewer から視聴者 0 で zero_viewers に戻る
        // given (前提条件):
        let mut tracker = PhaseTracker::new(Timestamp::new(0));
        tracker.observe(1, 0.0, Timestamp::new(1_000));

        // when (操作):
        let transition = tracker.observe(0, 1.0, Timestamp::new(2_000));

        // then (期待する結果):
        assert!(transition.is_some());
        assert_eq!(tracker.phase(), StreamPhase::ZeroViewers);
    }

    #[test]
    fn test_zero_viewers_is_not_left_by_uptime() {
        // テスト項目: 視聴者 0 のまま稼働時間が伸びても zero_viewers に留まる
        // given (前提条件):
        let mut tracker = PhaseTracker::new(Timestamp::new(0));

        // when (操作):
        let early = tracker.observe(0, 1.0, Timestamp::new(60_000));
        let late = tracker.observe(0, 120.0, Timestamp::new(7_200_000));

        // then (期待する結果):
        assert_eq!(early, None);
        assert_eq!(late, None);
        assert_eq!(tracker.phase(), StreamPhase::ZeroViewers);
        assert_eq!(tracker.phase_transition_time(), Timestamp::new(0));
    }

    #[test]
    fn test_one_step_per_observation() {
        // テスト項目: 視聴者 0 から一気に 10 人になっても 1 回の評価では first_viewer まで
        // given (前提条件):
        let mut tracker = PhaseTracker::new(Timestamp::new(0));

        // when (操作):
        tracker.observe(10, 0.0, Timestamp::new(1_000));
        let first = tracker.phase();
        tracker.observe(10, 0.0, Timestamp::new(2_000));

        // then (期待する結果):
        assert_eq!(first, StreamPhase::FirstViewer);
        assert_eq!(tracker.phase(), StreamPhase::BuildingAudience);
    }

    #[test]
    fn test_building_audience_stays_with_few_viewers() {
        // テスト項目: building_audience は視聴者が 1 人に減っても維持される
        // given (前提条件):
        let mut tracker = PhaseTracker::new(Timestamp::new(0));
        tracker.observe(1, 0.0, Timestamp::new(1_000));
        tracker.observe(5, 0.0, Timestamp::new(2_000));

        // when (操作):
        let transition = tracker.observe(1, 0.0, Timestamp::new(3_000));

        // then (期待する結果):
        assert_eq!(transition, None);
        assert_eq!(tracker.phase(), StreamPhase::BuildingAudience);
    }

    #[test]
    fn test_prompt_cadence() {
        // テスト項目: フェーズごとの間隔を超えたときだけプロンプト生成対象になる
        // given (前提条件):
        let last = Some(Timestamp::new(0));

        // when (操作):
        let zero_early = PromptCadence::is_due(StreamPhase::ZeroViewers, last, 0, Timestamp::new(30_000));
        let zero_late = PromptCadence::is_due(StreamPhase::ZeroViewers, last, 0, Timestamp::new(30_001));
        let first = PromptCadence::is_due(StreamPhase::FirstViewer, last, 1, Timestamp::new(10_001));
        let building_empty =
            PromptCadence::is_due(StreamPhase::BuildingAudience, last, 0, Timestamp::new(61_000));
        let building =
            PromptCadence::is_due(StreamPhase::BuildingAudience, last, 4, Timestamp::new(61_000));
        let never_prompted = PromptCadence::is_due(StreamPhase::ZeroViewers, None, 0, Timestamp::new(0));

        // then (期待する結果):
        assert!(!zero_early);
        assert!(zero_late);
        assert!(first);
        assert!(!building_empty);
        assert!(building);
        assert!(never_prompted);
    }
}
