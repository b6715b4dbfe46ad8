//! Shared application state.

use std::sync::Arc;

use stagehand_shared::time::Clock;

use crate::usecase::{
    ApplyStreamInfoUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, GetMetricsUseCase,
    IngestEventUseCase, PublishSnapshotUseCase, SelectPromptUseCase, SetLanguageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（監視開始のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（監視終了のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// SetLanguageUseCase（表示言語変更のユースケース）
    pub set_language_usecase: Arc<SetLanguageUseCase>,
    /// GetMetricsUseCase（スナップショット取得のユースケース）
    pub get_metrics_usecase: Arc<GetMetricsUseCase>,
    /// IngestEventUseCase（イベント取り込みのユースケース）
    pub ingest_event_usecase: Arc<IngestEventUseCase>,
    /// ApplyStreamInfoUseCase（配信情報反映のユースケース）
    pub apply_stream_info_usecase: Arc<ApplyStreamInfoUseCase>,
    /// SelectPromptUseCase（プロンプト選択のユースケース）
    pub select_prompt_usecase: Arc<SelectPromptUseCase>,
    /// PublishSnapshotUseCase（購読者管理と配信のユースケース）
    pub publish_snapshot_usecase: Arc<PublishSnapshotUseCase>,
    /// 受信時刻・空スナップショットの時刻に使う
    pub clock: Arc<dyn Clock>,
}
