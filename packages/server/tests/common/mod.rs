//! Shared wiring for the integration tests.
//!
//! Builds the same in-memory stack as the binary, with the network
//! collaborators replaced by local fakes.

#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use stagehand_server::{
    domain::{
        ExternalDataError, ExternalDataSource, GeneratorError, GiftTierPolicy, LanguageCode,
        SuggestionContext, SuggestionGenerator, TemplateRegistry,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
        stream_info::DisabledStreamInfoSource,
    },
    ui::state::AppState,
    usecase::{
        ApplyStreamInfoUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
        GetMetricsUseCase, IngestEventUseCase, PublishSnapshotUseCase, SelectPromptUseCase,
        SetLanguageUseCase,
    },
};
use stagehand_shared::time::Clock;
use tokio::sync::Mutex;

/// Never answers; only a timeout gets the caller out
pub struct NeverResolvingGenerator;

#[async_trait]
impl SuggestionGenerator for NeverResolvingGenerator {
    async fn generate(
        &self,
        _context: &SuggestionContext,
        _language: LanguageCode,
    ) -> Result<String, GeneratorError> {
        std::future::pending().await
    }
}

/// No headline or trivia available
pub struct NoExternalData;

#[async_trait]
impl ExternalDataSource for NoExternalData {
    async fn headline(&self) -> Result<Option<String>, ExternalDataError> {
        Ok(None)
    }

    async fn trivia(&self) -> Result<Option<String>, ExternalDataError> {
        Ok(None)
    }
}

/// Every use case of the server, wired to one in-memory registry
pub struct TestStack {
    pub connect_session: Arc<ConnectSessionUseCase>,
    pub disconnect_session: Arc<DisconnectSessionUseCase>,
    pub set_language: Arc<SetLanguageUseCase>,
    pub get_metrics: Arc<GetMetricsUseCase>,
    pub ingest_event: Arc<IngestEventUseCase>,
    pub apply_stream_info: Arc<ApplyStreamInfoUseCase>,
    pub select_prompt: Arc<SelectPromptUseCase>,
    pub publish_snapshot: Arc<PublishSnapshotUseCase>,
    pub clock: Arc<dyn Clock>,
}

impl TestStack {
    pub fn new(generator: Arc<dyn SuggestionGenerator>, clock: Arc<dyn Clock>) -> Self {
        let repository = Arc::new(InMemorySessionRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let templates = Arc::new(TemplateRegistry::load().expect("templates should load"));

        Self {
            connect_session: Arc::new(ConnectSessionUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                GiftTierPolicy::default(),
            )),
            disconnect_session: Arc::new(DisconnectSessionUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            set_language: Arc::new(SetLanguageUseCase::new(repository.clone())),
            get_metrics: Arc::new(GetMetricsUseCase::new(repository.clone(), clock.clone())),
            ingest_event: Arc::new(IngestEventUseCase::new(repository.clone())),
            apply_stream_info: Arc::new(ApplyStreamInfoUseCase::new(
                repository.clone(),
                Arc::new(DisabledStreamInfoSource),
                clock.clone(),
            )),
            select_prompt: Arc::new(
                SelectPromptUseCase::new(
                    repository.clone(),
                    templates,
                    generator,
                    Arc::new(NoExternalData),
                    clock.clone(),
                    0,
                )
                .with_seed(42),
            ),
            publish_snapshot: Arc::new(PublishSnapshotUseCase::new(repository, message_pusher)),
            clock,
        }
    }

    pub fn into_app_state(self) -> AppState {
        AppState {
            connect_session_usecase: self.connect_session,
            disconnect_session_usecase: self.disconnect_session,
            set_language_usecase: self.set_language,
            get_metrics_usecase: self.get_metrics,
            ingest_event_usecase: self.ingest_event,
            apply_stream_info_usecase: self.apply_stream_info,
            select_prompt_usecase: self.select_prompt,
            publish_snapshot_usecase: self.publish_snapshot,
            clock: self.clock,
        }
    }
}
