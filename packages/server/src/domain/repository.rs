//! Repository trait 定義
//!
//! セッションレジストリへのインターフェース。具体的な実装は Infrastructure 層が提供します。
//!
//! 各セッションは `Arc<Mutex<Session>>` で共有され、集計の更新はロックを保持したまま
//! 同期的に行われます。レジストリの列挙は常にその時点のスナップショット（`Vec`）を
//! 返すため、列挙中にセッションが追加・削除されても影響を受けません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ChannelName, RepositoryError, Session, SessionId};

/// 共有されるセッション
pub type SharedSession = Arc<Mutex<Session>>;

/// Session Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを登録する（同じ ID があれば置き換える）
    async fn insert(&self, session: Session) -> SharedSession;

    /// セッションを取得
    async fn get(&self, id: &SessionId) -> Result<SharedSession, RepositoryError>;

    /// チャンネルに紐づく全セッション（切断済みを含む）
    async fn find_by_channel(&self, channel: &ChannelName) -> Vec<SharedSession>;

    /// セッションをレジストリから外す
    async fn remove(&self, id: &SessionId) -> Result<SharedSession, RepositoryError>;

    /// 登録中の全セッション（作成順）
    async fn list(&self) -> Vec<SharedSession>;
}
