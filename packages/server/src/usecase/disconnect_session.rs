//! UseCase: チャンネルの監視終了
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 指定セッションのみの切断と、全セッションの一括切断
//!
//! ### なぜこのテストが必要か
//! - 切断後のセッションにイベントや定期処理が届かないことを保証する
//! - 購読者の登録解除漏れ（送信先のリーク）を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：ID を指定した切断
//! - 正常系：ID なしでの全切断
//! - 異常系：存在しない ID の切断
//! - 境界値：一括切断の途中で別の切断に先を越されたセッションは飛ばして続ける

use std::sync::Arc;

use crate::domain::{MessagePusher, RepositoryError, SessionId, SessionRepository};

use super::error::SessionError;

/// チャンネル監視終了のユースケース
pub struct DisconnectSessionUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// セッションを切断する
    ///
    /// # Arguments
    ///
    /// * `target` - 切断するセッション。`None` なら全セッション
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 切断したセッションの ID
    /// * `Err(SessionError::SessionNotFound)` - 指定したセッションが存在しない
    ///
    /// 一括切断では、一覧を取った後に他で外されたセッションは飛ばす。
    pub async fn execute(
        &self,
        target: Option<SessionId>,
    ) -> Result<Vec<SessionId>, SessionError> {
        let bulk = target.is_none();
        let ids = match target {
            Some(id) => vec![id],
            None => {
                let mut ids = Vec::new();
                for shared in self.repository.list().await {
                    ids.push(shared.lock().await.id.clone());
                }
                ids
            }
        };

        let mut disconnected = Vec::with_capacity(ids.len());
        for id in ids {
            let shared = match self.repository.remove(&id).await {
                Ok(shared) => shared,
                Err(RepositoryError::SessionNotFound(_)) if bulk => {
                    tracing::debug!("Session '{}' was already disconnected", id);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let subscribers = shared.lock().await.disconnect();
            for subscriber in &subscribers {
                self.message_pusher.unregister_subscriber(subscriber).await;
            }
            tracing::info!("Session '{}' disconnected", id);
            disconnected.push(id);
        }

        Ok(disconnected)
    }
}
