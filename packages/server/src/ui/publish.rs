//! 購読者への送信内容の組み立て
//!
//! イベント受信時と定期配信の両方から呼ばれる。

use crate::{
    domain::{Prompt, SessionId},
    infrastructure::dto::websocket::{MetricsSnapshotDto, PromptMessageDto},
    ui::state::AppState,
};

/// セッションの現在のスナップショットを購読者に送る
pub async fn publish_metrics(state: &AppState, session_id: &SessionId) {
    let Some(snapshot) = state.get_metrics_usecase.execute(Some(session_id)).await else {
        return;
    };

    // Domain Model から DTO への変換
    let dto = MetricsSnapshotDto::from(&snapshot);
    send(state, session_id, serde_json::to_string(&dto)).await;
}

/// 選択したプロンプトを購読者に送る
pub async fn publish_prompt(state: &AppState, session_id: &SessionId, prompt: &Prompt) {
    let dto = PromptMessageDto::from_prompt(session_id, prompt);
    send(state, session_id, serde_json::to_string(&dto)).await;
}

async fn send(
    state: &AppState,
    session_id: &SessionId,
    payload: Result<String, serde_json::Error>,
) {
    let payload = match payload {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize message for '{}': {}", session_id, e);
            return;
        }
    };

    match state
        .publish_snapshot_usecase
        .execute(session_id, &payload)
        .await
    {
        Ok(0) => {}
        Ok(count) => tracing::debug!("Published to {} subscribers of '{}'", count, session_id),
        Err(e) => tracing::debug!("Skipped publishing to '{}': {}", session_id, e),
    }
}
