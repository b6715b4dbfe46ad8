//! UseCase: ダッシュボード購読者への配信
//!
//! 「イベントによる更新時」と「定期配信」の両方が同じ `execute` を通る。
//! 送信内容（JSON）の組み立ては呼び出し側が行う。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PublishSnapshotUseCase の subscribe / unsubscribe / execute
//!
//! ### なぜこのテストが必要か
//! - メッセージがそのセッションの購読者にだけ届くことを保証する
//! - 切断済みのセッションに購読者が登録されないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 つのセッションにそれぞれ購読者がいる状態での配信
//! - 異常系：存在しないセッションへの購読、誰にも届かなかった送信
//! - エッジケース：購読解除後の配信

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, SessionId, SessionRepository, SubscriberId};

use super::error::SessionError;

/// 購読者管理と配信のユースケース
pub struct PublishSnapshotUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl PublishSnapshotUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 購読者をセッションに追加する
    ///
    /// # Arguments
    ///
    /// * `session_id` - 購読するセッション
    /// * `subscriber_id` - 購読者の ID
    /// * `sender` - 購読者へのメッセージ送信用チャンネル
    pub async fn subscribe(
        &self,
        session_id: &SessionId,
        subscriber_id: SubscriberId,
        sender: PusherChannel,
    ) -> Result<(), SessionError> {
        let shared = self.repository.get(session_id).await?;
        let mut session = shared.lock().await;
        if !session.connected {
            return Err(SessionError::not_found(session_id));
        }

        self.message_pusher
            .register_subscriber(subscriber_id.clone(), sender)
            .await;
        session.add_subscriber(subscriber_id.clone());
        tracing::info!(
            "Subscriber '{}' joined session '{}' ({} subscribers)",
            subscriber_id,
            session_id,
            session.subscribers.len()
        );
        Ok(())
    }

    /// 購読を解除する。セッションが既に無くても送信先の登録は解除する
    pub async fn unsubscribe(&self, session_id: &SessionId, subscriber_id: &SubscriberId) {
        if let Ok(shared) = self.repository.get(session_id).await {
            shared.lock().await.remove_subscriber(subscriber_id);
        }
        self.message_pusher.unregister_subscriber(subscriber_id).await;
        tracing::info!(
            "Subscriber '{}' left session '{}'",
            subscriber_id,
            session_id
        );
    }

    /// セッションの全購読者にメッセージを送る
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信対象の購読者数
    /// * `Err(SessionError::SessionNotFound)` - セッションが存在しない、または切断済み
    pub async fn execute(
        &self,
        session_id: &SessionId,
        payload: &str,
    ) -> Result<usize, SessionError> {
        let targets: Vec<SubscriberId> = {
            let shared = self.repository.get(session_id).await?;
            let session = shared.lock().await;
            if !session.connected {
                return Err(SessionError::not_found(session_id));
            }
            session.subscribers.iter().cloned().collect()
        };

        if targets.is_empty() {
            return Ok(0);
        }

        let count = targets.len();
        if let Err(e) = self.message_pusher.broadcast(targets, payload).await {
            tracing::warn!("Broadcast to session '{}' failed: {}", session_id, e);
        }
        Ok(count)
    }
}
