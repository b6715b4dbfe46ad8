//! Session エンティティ
//!
//! 1 つの監視対象チャンネルと、その集計・購読者集合をまとめて保持する。

use std::collections::HashSet;

use super::event::GiftTierPolicy;
use super::metrics::MetricsAggregate;
use super::value_object::{ChannelName, SessionId, SubscriberId, Timestamp};

/// 監視中の配信 1 件
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub channel: ChannelName,
    /// false になったセッションには以降イベントも定期処理も届かない
    pub connected: bool,
    pub subscribers: HashSet<SubscriberId>,
    pub metrics: MetricsAggregate,
    pub created_at: Timestamp,
}

impl Session {
    pub fn new(
        id: SessionId,
        channel: ChannelName,
        now: Timestamp,
        gift_policy: GiftTierPolicy,
    ) -> Self {
        Self {
            id,
            channel,
            connected: true,
            subscribers: HashSet::new(),
            metrics: MetricsAggregate::new(now, gift_policy),
            created_at: now,
        }
    }

    pub fn add_subscriber(&mut self, subscriber: SubscriberId) {
        self.subscribers.insert(subscriber);
    }

    pub fn remove_subscriber(&mut self, subscriber: &SubscriberId) -> bool {
        self.subscribers.remove(subscriber)
    }

    /// 購読者を外し、以降の処理対象から外す
    pub fn disconnect(&mut self) -> Vec<SubscriberId> {
        self.connected = false;
        self.subscribers.drain().collect()
    }

    /// 副作用のない射影
    pub fn snapshot(&self, taken_at: Timestamp) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            channel: self.channel.clone(),
            metrics: self.metrics.clone(),
            taken_at,
        }
    }
}

/// ある時点のセッションの写し
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub channel: ChannelName,
    pub metrics: MetricsAggregate,
    pub taken_at: Timestamp,
}
