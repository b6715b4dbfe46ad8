//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! HashMap をインメモリのセッションレジストリとして使用します。
//! プロセスの再起動をまたいだ永続化は行いません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChannelName, RepositoryError, Session, SessionId, SessionRepository, SharedSession,
};

/// レジストリの 1 エントリ
struct Entry {
    channel: ChannelName,
    /// 登録順
    sequence: u64,
    session: SharedSession,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<SessionId, Entry>,
    next_sequence: u64,
}

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    registry: Mutex<Registry>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: Session) -> SharedSession {
        let id = session.id.clone();
        let channel = session.channel.clone();
        let shared = Arc::new(Mutex::new(session));

        let mut registry = self.registry.lock().await;
        let sequence = registry.next_sequence;
        registry.next_sequence += 1;
        registry.entries.insert(
            id.clone(),
            Entry {
                channel,
                sequence,
                session: shared.clone(),
            },
        );
        tracing::debug!("Session '{}' registered", id);
        shared
    }

    async fn get(&self, id: &SessionId) -> Result<SharedSession, RepositoryError> {
        let registry = self.registry.lock().await;
        registry
            .entries
            .get(id)
            .map(|entry| entry.session.clone())
            .ok_or_else(|| RepositoryError::SessionNotFound(id.as_str().to_string()))
    }

    async fn find_by_channel(&self, channel: &ChannelName) -> Vec<SharedSession> {
        let registry = self.registry.lock().await;
        let mut entries: Vec<&Entry> = registry
            .entries
            .values()
            .filter(|entry| &entry.channel == channel)
            .collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries.into_iter().map(|entry| entry.session.clone()).collect()
    }

    async fn remove(&self, id: &SessionId) -> Result<SharedSession, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let entry = registry
            .entries
            .remove(id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.as_str().to_string()))?;
        tracing::debug!("Session '{}' removed from registry", id);
        Ok(entry.session)
    }

    async fn list(&self) -> Vec<SharedSession> {
        let registry = self.registry.lock().await;
        let mut entries: Vec<&Entry> = registry.entries.values().collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries.into_iter().map(|entry| entry.session.clone()).collect()
    }
}
