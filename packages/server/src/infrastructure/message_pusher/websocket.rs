//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ダッシュボード購読者ごとの `UnboundedSender` を管理
//! - 購読者へのメッセージ送信（broadcast）
//!
//! WebSocket 接続の受付と sender の生成は UI 層（`ui/handler/websocket.rs`）が行い、
//! この実装は受け取った sender を使って送信だけを担当します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SubscriberId};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中の購読者の sender
    subscribers: Arc<Mutex<HashMap<SubscriberId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(subscribers: Arc<Mutex<HashMap<SubscriberId, PusherChannel>>>) -> Self {
        Self { subscribers }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_subscriber(&self, subscriber_id: SubscriberId, sender: PusherChannel) {
        let mut subscribers = self.subscribers.lock().await;
        tracing::debug!("Subscriber '{}' registered to MessagePusher", subscriber_id);
        subscribers.insert(subscriber_id, sender);
    }

    async fn unregister_subscriber(&self, subscriber_id: &SubscriberId) {
        let mut subscribers = self.subscribers.lock().await;
        if subscribers.remove(subscriber_id).is_some() {
            tracing::debug!(
                "Subscriber '{}' unregistered from MessagePusher",
                subscriber_id
            );
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<SubscriberId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let subscribers = self.subscribers.lock().await;
        let total = targets.len();
        let mut delivered = 0;

        for target in targets {
            match subscribers.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push message to subscriber '{}': {}", target, e)
                    }
                },
                None => {
                    tracing::warn!(
                        "Subscriber '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        if total > 0 && delivered == 0 {
            return Err(MessagePushError::NoneDelivered(total));
        }
        Ok(())
    }
}
