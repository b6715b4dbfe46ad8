//! UseCase: 配信情報の反映とロールアップの再計算
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ApplyStreamInfoUseCase::execute() / refresh() メソッド
//!
//! ### なぜこのテストが必要か
//! - 視聴者数の変化がフェーズ遷移として観測されることを保証する
//! - 配信情報の取得失敗がセッションを壊さず、ロールアップだけは更新されることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：視聴者が 1 人になって first_viewer に遷移
//! - 異常系：取得元がエラーを返す
//! - 異常系：取得元が設定されていない（毎回の更新で警告を出さない）
//! - エッジケース：取得中にセッションが切断される

use std::sync::Arc;

use stagehand_shared::time::Clock;

use crate::domain::{
    PhaseTransition, SessionId, SessionRepository, StreamInfo, StreamInfoError, StreamInfoSource,
    Timestamp,
};

use super::error::SessionError;

/// 配信情報反映のユースケース
pub struct ApplyStreamInfoUseCase {
    repository: Arc<dyn SessionRepository>,
    source: Arc<dyn StreamInfoSource>,
    clock: Arc<dyn Clock>,
}

impl ApplyStreamInfoUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        source: Arc<dyn StreamInfoSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            source,
            clock,
        }
    }

    /// 配信情報を反映し、ロールアップを再計算する
    ///
    /// `info` が `None` ならオフラインとして扱う。
    pub async fn execute(
        &self,
        session_id: &SessionId,
        info: Option<StreamInfo>,
    ) -> Result<Option<PhaseTransition>, SessionError> {
        let shared = self.repository.get(session_id).await?;
        let now = Timestamp::new(self.clock.now_millis());

        let mut session = shared.lock().await;
        if !session.connected {
            return Err(SessionError::not_found(session_id));
        }
        session.metrics.apply_stream_info(info, now);
        Ok(session.metrics.recompute_rollups(now))
    }

    /// 取得元から配信情報を取り直して反映する
    ///
    /// 取得に失敗した場合は前回の配信情報を保ったまま、ロールアップのみ再計算する。
    /// 取得中はセッションのロックを保持しない。
    pub async fn refresh(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<PhaseTransition>, SessionError> {
        let shared = self.repository.get(session_id).await?;
        let channel = {
            let session = shared.lock().await;
            if !session.connected {
                return Err(SessionError::not_found(session_id));
            }
            session.channel.clone()
        };

        let fetched = match self.source.fetch(&channel).await {
            Ok(info) => Some(info),
            Err(StreamInfoError::NotConfigured) => {
                tracing::debug!("Stream info source is not configured, skipping '{}'", channel);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to fetch stream info for '{}': {}", channel, e);
                None
            }
        };

        let now = Timestamp::new(self.clock.now_millis());
        let mut session = shared.lock().await;
        if !session.connected {
            return Err(SessionError::not_found(session_id));
        }
        if let Some(info) = fetched {
            session.metrics.apply_stream_info(info, now);
        }
        Ok(session.metrics.recompute_rollups(now))
    }
}
