//! 定期処理
//!
//! セッションごとではなく、レジストリ全体に対する 3 つの独立したタイマー。
//!
//! - 配信情報の取得とロールアップの再計算（5 秒）
//! - スナップショットの再配信（2 秒）
//! - プロンプトの評価（15 秒。フェーズの間隔を満たしたセッションのみ）
//!
//! 外部呼び出しを伴う処理はセッションごとに spawn し、他のセッションの処理を待たせない。

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::{
    domain::SessionId,
    ui::{
        publish::{publish_metrics, publish_prompt},
        state::AppState,
    },
    usecase::SelectPromptError,
};

/// タイマーの間隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerIntervals {
    pub refresh: Duration,
    pub broadcast: Duration,
    pub prompt: Duration,
}

impl Default for SchedulerIntervals {
    fn default() -> Self {
        Self {
            refresh: Duration::from_secs(5),
            broadcast: Duration::from_secs(2),
            prompt: Duration::from_secs(15),
        }
    }
}

/// 起動中のタイマー。drop すると停止する
pub struct Scheduler {
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// タイマーを起動する
    pub fn start(state: Arc<AppState>, intervals: SchedulerIntervals) -> Self {
        tracing::info!(
            "Scheduler started (refresh: {:?}, broadcast: {:?}, prompt: {:?})",
            intervals.refresh,
            intervals.broadcast,
            intervals.prompt
        );
        let handles = vec![
            tokio::spawn(refresh_loop(state.clone(), intervals.refresh)),
            tokio::spawn(broadcast_loop(state.clone(), intervals.broadcast)),
            tokio::spawn(prompt_loop(state, intervals.prompt)),
        ];
        Self { handles }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

async fn refresh_loop(state: Arc<AppState>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        for session_id in state.get_metrics_usecase.connected_session_ids().await {
            tokio::spawn(refresh_session(state.clone(), session_id));
        }
    }
}

async fn refresh_session(state: Arc<AppState>, session_id: SessionId) {
    match state.apply_stream_info_usecase.refresh(&session_id).await {
        Ok(Some(_)) => publish_metrics(&state, &session_id).await,
        Ok(None) => {}
        Err(e) => tracing::debug!("Skipped refresh of '{}': {}", session_id, e),
    }
}

async fn broadcast_loop(state: Arc<AppState>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        for session_id in state.get_metrics_usecase.connected_session_ids().await {
            publish_metrics(&state, &session_id).await;
        }
    }
}

async fn prompt_loop(state: Arc<AppState>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        for session_id in state.get_metrics_usecase.connected_session_ids().await {
            tokio::spawn(prompt_session(state.clone(), session_id));
        }
    }
}

async fn prompt_session(state: Arc<AppState>, session_id: SessionId) {
    match state.select_prompt_usecase.execute_if_due(&session_id).await {
        Ok(Some(prompt)) => publish_prompt(&state, &session_id, &prompt).await,
        Ok(None) => {}
        Err(SelectPromptError::SessionClosed(_)) => {
            tracing::debug!("Session '{}' closed before its prompt was ready", session_id)
        }
        Err(e) => tracing::debug!("Skipped prompt for '{}': {}", session_id, e),
    }
}
