//! UseCase 層
//!
//! 1 つの操作につき 1 つの構造体。ドメインのポート（trait）だけに依存する。

pub mod apply_stream_info;
pub mod connect_session;
pub mod disconnect_session;
pub mod error;
pub mod get_metrics;
pub mod ingest_event;
pub mod publish_snapshot;
pub mod select_prompt;
pub mod set_language;

pub use apply_stream_info::ApplyStreamInfoUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{SelectPromptError, SessionError};
pub use get_metrics::GetMetricsUseCase;
pub use ingest_event::IngestEventUseCase;
pub use publish_snapshot::PublishSnapshotUseCase;
pub use select_prompt::SelectPromptUseCase;
pub use set_language::SetLanguageUseCase;
