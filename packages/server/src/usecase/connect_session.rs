//! UseCase: チャンネルの監視開始
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - 新規セッションの作成、既存セッションの再利用、古いセッションの掃除
//!
//! ### なぜこのテストが必要か
//! - 同じチャンネルを二重に監視しないことを保証する
//! - 指定された session_id を再利用する場合に、古い購読者が残らないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：未監視チャンネルへの接続
//! - 正常系：接続中のチャンネルに再接続（同じ ID が返る）
//! - エッジケース：切断済みのセッションが残っているチャンネルへの接続
//! - エッジケース：別チャンネルで使用中の session_id を指定した接続

use std::sync::Arc;

use stagehand_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ChannelName, GiftTierPolicy, MessagePusher, Session, SessionId, SessionRepository,
    Timestamp,
};

/// チャンネル監視開始のユースケース
pub struct ConnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（古いセッションの購読者の登録解除に使う）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    gift_policy: GiftTierPolicy,
    /// 接続処理同士を直列化する
    connect_lock: Mutex<()>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        gift_policy: GiftTierPolicy,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            gift_policy,
            connect_lock: Mutex::new(()),
        }
    }

    /// チャンネルの監視を開始する
    ///
    /// # Arguments
    ///
    /// * `channel` - 監視するチャンネル
    /// * `requested` - クライアントが指定した session_id（任意）
    ///
    /// # Returns
    ///
    /// 監視に使う session_id。チャンネルが接続中ならそのセッションの ID
    pub async fn execute(&self, channel: ChannelName, requested: Option<SessionId>) -> SessionId {
        let _guard = self.connect_lock.lock().await;

        // 1. 接続中のセッションがあればそのまま返す
        let mut stale = Vec::new();
        for shared in self.repository.find_by_channel(&channel).await {
            let session = shared.lock().await;
            if session.connected {
                tracing::info!(
                    "Channel '{}' already monitored by session '{}'",
                    channel,
                    session.id
                );
                return session.id.clone();
            }
            stale.push(session.id.clone());
        }

        // 2. 切断済みのセッションを掃除
        for id in stale {
            self.tear_down(&id).await;
        }

        // 3. 指定 ID が使われていれば、その古いセッションを閉じる
        if let Some(id) = &requested
            && self.repository.get(id).await.is_ok()
        {
            tracing::info!("Replacing existing session '{}'", id);
            self.tear_down(id).await;
        }

        // 4. 新しいセッションを登録
        let id = requested.unwrap_or_else(SessionId::generate);
        let now = Timestamp::new(self.clock.now_millis());
        let session = Session::new(id.clone(), channel.clone(), now, self.gift_policy);
        self.repository.insert(session).await;

        tracing::info!("Started monitoring channel '{}' as session '{}'", channel, id);
        id
    }

    async fn tear_down(&self, id: &SessionId) {
        let Ok(shared) = self.repository.remove(id).await else {
            return;
        };
        let subscribers = shared.lock().await.disconnect();
        for subscriber in &subscribers {
            self.message_pusher.unregister_subscriber(subscriber).await;
        }
        tracing::debug!(
            "Session '{}' torn down ({} subscribers released)",
            id,
            subscribers.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::SubscriberId,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
        },
    };
    use stagehand_shared::time::FixedClock;
    use std::collections::HashMap;

    fn create_usecase() -> (
        ConnectSessionUseCase,
        Arc<InMemorySessionRepository>,
        Arc<WebSocketMessagePusher>,
    ) {
        let repository = Arc::new(InMemorySessionRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let usecase = ConnectSessionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            Arc::new(FixedClock::new(1_000)),
            GiftTierPolicy::default(),
        );
        (usecase, repository, message_pusher)
    }

    fn channel(name: &str) -> ChannelName {
        ChannelName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_connect_new_channel() {
        // テスト項目: 未監視のチャンネルに接続すると新しいセッションが登録される
        // given (前提条件):
        let (usecase, repository, _) = create_usecase();

        // when (操作):
        let id = usecase.execute(channel("alpha"), None).await;

        // then (期待する結果):
        let shared = repository.get(&id).await.unwrap();
        let session = shared.lock().await;
        assert!(session.connected);
        assert_eq!(session.channel.as_str(), "alpha");
        assert_eq!(session.created_at, Timestamp::new(1_000));
    }

    #[tokio::test]
    async fn test_connect_returns_existing_session() {
        // テスト項目: 接続中のチャンネルに再接続すると同じ session_id が返る
        // given (前提条件):
        let (usecase, repository, _) = create_usecase();
        let first = usecase.execute(channel("alpha"), None).await;

        // when (操作):
        let second = usecase
            .execute(
                channel("alpha"),
                Some(SessionId::new("other".to_string()).unwrap()),
            )
            .await;

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(repository.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_connect_reuses_requested_id() {
        // テスト項目: 指定した session_id がそのまま使われる
        // given (前提条件):
        let (usecase, _, _) = create_usecase();
        let requested = SessionId::new("dashboard-1".to_string()).unwrap();

        // when (操作):
        let id = usecase.execute(channel("alpha"), Some(requested.clone())).await;

        // then (期待する結果):
        assert_eq!(id, requested);
    }

    #[tokio::test]
    async fn test_connect_cleans_up_stale_session() {
        // テスト項目: 切断済みのセッションは削除され、新しいセッションが作られる
        // given (前提条件):
        let (usecase, repository, _) = create_usecase();
        let old = usecase.execute(channel("alpha"), None).await;
        repository.get(&old).await.unwrap().lock().await.disconnect();

        // when (操作):
        let new = usecase.execute(channel("alpha"), None).await;

        // then (期待する結果):
        assert_ne!(old, new);
        assert!(repository.get(&old).await.is_err());
        assert_eq!(repository.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_connect_replaces_session_with_requested_id() {
        // テスト項目: 別チャンネルで使用中の ID を指定すると、古いセッションが閉じられ購読者も解除される
        // given (前提条件):
        let (usecase, repository, message_pusher) = create_usecase();
        let id = SessionId::new("shared-id".to_string()).unwrap();
        usecase.execute(channel("alpha"), Some(id.clone())).await;
        let old_shared = repository.get(&id).await.unwrap();

        let subscriber = SubscriberId::generate();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        message_pusher
            .register_subscriber(subscriber.clone(), tx)
            .await;
        old_shared.lock().await.add_subscriber(subscriber.clone());

        // when (操作):
        let new_id = usecase.execute(channel("beta"), Some(id.clone())).await;

        // then (期待する結果):
        assert_eq!(new_id, id);
        assert!(!old_shared.lock().await.connected);
        let current = repository.get(&id).await.unwrap();
        assert_eq!(current.lock().await.channel.as_str(), "beta");
        let pushed = message_pusher.broadcast(vec![subscriber], "ping").await;
        assert!(pushed.is_err());
        assert!(rx.try_recv().is_err());
    }
}
