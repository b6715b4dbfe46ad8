//! WebSocket connection handlers (dashboard subscribers).

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{SessionId, SubscriberId, Timestamp},
    infrastructure::dto::{http::SessionQuery, websocket::MetricsSnapshotDto},
    ui::state::AppState,
};

/// 購読対象
enum Target {
    /// 最も新しく接続したセッション
    Latest,
    Session(SessionId),
    /// 不正な ID（空のスナップショットのみ）
    Invalid,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    let target = match query.session_id {
        None => Target::Latest,
        Some(raw) => match SessionId::new(raw.clone()) {
            Ok(id) => Target::Session(id),
            Err(_) => {
                tracing::warn!("Invalid sessionId format: '{}'", raw);
                Target::Invalid
            }
        },
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, target))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Reads until the client closes the connection. Dashboards never send anything meaningful.
fn receiver_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    subscriber_id: SubscriberId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Subscriber '{}' requested close", subscriber_id);
                    break;
                }
                Ok(Message::Ping(_)) => tracing::debug!("Received ping"),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, target: Target) {
    let (mut sender, receiver) = socket.split();
    let subscriber_id = SubscriberId::generate();

    let snapshot = match &target {
        Target::Latest => state.get_metrics_usecase.execute(None).await,
        Target::Session(id) => state.get_metrics_usecase.execute(Some(id)).await,
        Target::Invalid => None,
    };

    // 初回スナップショットより前に登録する。以降の更新は送信タスク開始までキューに溜まる
    let (tx, rx) = mpsc::unbounded_channel();
    let session_id = match snapshot.as_ref().map(|s| s.session_id.clone()) {
        Some(id) => match state
            .publish_snapshot_usecase
            .subscribe(&id, subscriber_id.clone(), tx)
            .await
        {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::warn!("Subscriber '{}' could not join '{}': {}", subscriber_id, id, e);
                None
            }
        },
        None => None,
    };

    // 現在のスナップショット（セッションが無ければ空のスナップショット）を最初に送る
    let initial = match &snapshot {
        Some(snapshot) if session_id.is_some() => MetricsSnapshotDto::from(snapshot),
        _ => MetricsSnapshotDto::empty(Timestamp::new(state.clock.now_millis())),
    };
    let sent = match serde_json::to_string(&initial) {
        Ok(json) => match sender.send(Message::Text(json.into())).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send initial snapshot to '{}': {}", subscriber_id, e);
                false
            }
        },
        Err(e) => {
            tracing::error!("Failed to serialize initial snapshot: {}", e);
            false
        }
    };

    let Some(session_id) = session_id else {
        // セッションが無い場合は空のスナップショットを 1 回送るだけ
        if sent {
            tracing::info!(
                "Subscriber '{}' connected without an active session",
                subscriber_id
            );
            let _ = receiver_loop(receiver, subscriber_id).await;
        }
        return;
    };

    if sent {
        let mut recv_task = receiver_loop(receiver, subscriber_id.clone());
        let mut send_task = pusher_loop(rx, sender);

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };
    }

    state
        .publish_snapshot_usecase
        .unsubscribe(&session_id, &subscriber_id)
        .await;
}
