//! UseCase: コミュニティイベントの取り込み
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - IngestEventUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - イベントが正しいセッションの集計にだけ反映されることを保証する
//! - 重複チャットが「受理されなかった」として報告されることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャット・フォローの取り込み
//! - エッジケース：1000 ms 以内の重複チャット
//! - 異常系：存在しない・切断済みのセッション

use std::sync::Arc;

use crate::domain::{SessionId, SessionRepository, StreamEvent};

use super::error::SessionError;

/// イベント取り込みのユースケース
pub struct IngestEventUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl IngestEventUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// イベントをセッションの集計に反映する
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 集計が変化した
    /// * `Ok(false)` - 重複として捨てた
    /// * `Err(SessionError::SessionNotFound)` - セッションが存在しない、または切断済み
    pub async fn execute(
        &self,
        session_id: &SessionId,
        event: StreamEvent,
    ) -> Result<bool, SessionError> {
        let shared = self.repository.get(session_id).await?;
        let mut session = shared.lock().await;
        if !session.connected {
            return Err(SessionError::not_found(session_id));
        }

        let kind = event.kind();
        let accepted = session.metrics.apply(event);
        tracing::debug!(
            "Session '{}' ingested {} event (accepted: {})",
            session_id,
            kind,
            accepted
        );
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ChannelName, ChatMessage, ChatterId, Follow, GiftTierPolicy, Session, Timestamp,
        },
        infrastructure::repository::InMemorySessionRepository,
    };

    async fn setup() -> (IngestEventUseCase, Arc<InMemorySessionRepository>, SessionId) {
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
        (IngestEventUseCase::new(repository.clone()), repository, id)
    }

    fn chat(text: &str, at: i64) -> StreamEvent {
        StreamEvent::ChatMessage(ChatMessage {
            chatter: ChatterId::new("viewer1".to_string()).unwrap(),
            display_name: "Viewer1".to_string(),
            text: text.to_string(),
            timestamp: Timestamp::new(at),
        })
    }

    #[tokio::test]
    async fn test_ingest_events() {
        // テスト項目: チャットとフォローが集計に反映される
        // given (前提条件):
        let (usecase, repository, id) = setup().await;

        // when (操作):
        let chat_result = usecase.execute(&id, chat("hello", 1_000)).await;
        let follow_result = usecase
            .execute(
                &id,
                StreamEvent::Follow(Follow {
                    chatter: ChatterId::new("viewer2".to_string()).unwrap(),
                    display_name: "Viewer2".to_string(),
                    timestamp: Timestamp::new(2_000),
                }),
            )
            .await;

        // then (期待する結果):
        assert_eq!(chat_result, Ok(true));
        assert_eq!(follow_result, Ok(true));
        let shared = repository.get(&id).await.unwrap();
        let session = shared.lock().await;
        assert_eq!(session.metrics.counters().total_messages, 1);
        assert_eq!(session.metrics.counters().session_followers_gained, 1);
    }

    #[tokio::test]
    async fn test_ingest_duplicate_chat() {
        // テスト項目: 1000 ms 以内の同一チャットは受理されない
        // given (前提条件):
        let (usecase, repository, id) = setup().await;
        usecase.execute(&id, chat("hello", 1_000)).await.unwrap();

        // when (操作):
        let result = usecase.execute(&id, chat("hello", 1_500)).await;

        // then (期待する結果):
        assert_eq!(result, Ok(false));
        let shared = repository.get(&id).await.unwrap();
        assert_eq!(shared.lock().await.metrics.counters().total_messages, 1);
    }

    #[tokio::test]
    async fn test_ingest_into_disconnected_session() {
        // テスト項目: 切断済み・存在しないセッションへの取り込みは SessionNotFound になる
        // given (前提条件):
        let (usecase, repository, id) = setup().await;
        repository.get(&id).await.unwrap().lock().await.disconnect();

        // when (操作):
        let closed = usecase.execute(&id, chat("hello", 1_000)).await;
        let missing = usecase
            .execute(
                &SessionId::new("missing".to_string()).unwrap(),
                chat("hello", 1_000),
            )
            .await;

        // then (期待する結果):
        assert_eq!(closed, Err(SessionError::SessionNotFound("s1".to_string())));
        assert_eq!(
            missing,
            Err(SessionError::SessionNotFound("missing".to_string()))
        );
    }
}
