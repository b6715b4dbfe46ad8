//! MessagePusher trait 定義
//!
//! ダッシュボード購読者へのメッセージ送信（通知）のインターフェース。
//! 送信手段（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{MessagePushError, SubscriberId};

/// 購読者へのメッセージ送信チャンネル
pub type PusherChannel = UnboundedSender<String>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 購読者を登録
    async fn register_subscriber(&self, subscriber_id: SubscriberId, sender: PusherChannel);

    /// 購読者の登録を解除
    async fn unregister_subscriber(&self, subscriber_id: &SubscriberId);

    /// 複数の購読者に送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<SubscriberId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
