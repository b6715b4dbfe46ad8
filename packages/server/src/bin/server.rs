//! Stream coaching server.
//!
//! Monitors channels, aggregates chat / community metrics and pushes snapshots
//! and coaching prompts to dashboard WebSocket clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin stagehand-server
//! cargo run --bin stagehand-server -- --host 0.0.0.0 --port 3000
//! GEMINI_API_KEY=... cargo run --bin stagehand-server -- --utc-offset 9
//! ```

use std::{collections::HashMap, num::NonZeroU32, sync::Arc, time::Duration};

use clap::{Parser, ValueEnum};
use stagehand_server::{
    config::{AppConfig, DEFAULT_GEMINI_MODEL},
    domain::{
        ExternalDataSource, GiftTierPolicy, StreamInfoSource, SuggestionGenerator,
        TemplateRegistry,
    },
    infrastructure::{
        external_data::{CachedExternalDataSource, HttpExternalDataSource},
        generator::{
            DisabledSuggestionGenerator, GatedSuggestionGenerator, GeminiSuggestionGenerator,
        },
        message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionRepository,
        stream_info::{DisabledStreamInfoSource, HelixStreamInfoSource},
    },
    ui::{Server, state::AppState},
    usecase::{
        ApplyStreamInfoUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
        GetMetricsUseCase, IngestEventUseCase, PublishSnapshotUseCase, SelectPromptUseCase,
        SetLanguageUseCase,
    },
};
use stagehand_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};
use tokio::sync::Mutex;

/// Tier assumed for gift / resub events without a tier
#[derive(Debug, Clone, Copy, ValueEnum)]
enum GiftPolicyArg {
    AssumeTier1,
    Unknown,
}

impl From<GiftPolicyArg> for GiftTierPolicy {
    fn from(arg: GiftPolicyArg) -> Self {
        match arg {
            GiftPolicyArg::AssumeTier1 => GiftTierPolicy::AssumeTier1,
            GiftPolicyArg::Unknown => GiftTierPolicy::Unknown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "stagehand-server")]
#[command(about = "Live stream coaching server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "STAGEHAND_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "STAGEHAND_PORT", default_value = "8080")]
    port: u16,

    /// Gemini API key; the suggestion generator is disabled without it
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Twitch application client id
    #[arg(long, env = "TWITCH_CLIENT_ID")]
    twitch_client_id: Option<String>,

    /// Twitch access token; stream info is not fetched without it
    #[arg(long, env = "TWITCH_ACCESS_TOKEN", hide_env_values = true)]
    twitch_access_token: Option<String>,

    /// Suggestion generator timeout in milliseconds
    #[arg(long, env = "STAGEHAND_GENERATOR_TIMEOUT_MS", default_value = "5000")]
    generator_timeout_ms: u64,

    /// Suggestion generator calls allowed per rolling minute
    #[arg(long, env = "STAGEHAND_GENERATOR_QUOTA", default_value = "15")]
    generator_quota: NonZeroU32,

    /// UTC offset in hours used for time-of-day context
    #[arg(long, env = "STAGEHAND_UTC_OFFSET", default_value = "0", allow_hyphen_values = true)]
    utc_offset: i32,

    /// Tier assumed for gift / resub events without a tier
    #[arg(long, env = "STAGEHAND_GIFT_TIER_POLICY", value_enum, default_value = "assume-tier1")]
    gift_tier_policy: GiftPolicyArg,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            gemini_api_key: args.gemini_api_key,
            gemini_model: args.gemini_model,
            twitch_client_id: args.twitch_client_id,
            twitch_access_token: args.twitch_access_token,
            generator_timeout: Duration::from_millis(args.generator_timeout_ms),
            generator_calls_per_minute: args.generator_quota,
            utc_offset_hours: args.utc_offset,
            gift_tier_policy: args.gift_tier_policy.into(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = AppConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Outbound collaborators (generator, external data, stream info)
    // 4. UseCases
    // 5. AppState and Server

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 1. Create Repository (in-memory session registry)
    let repository = Arc::new(InMemorySessionRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Create outbound collaborators
    let templates = match TemplateRegistry::load() {
        Ok(templates) => Arc::new(templates),
        Err(e) => {
            tracing::error!("Template registry is invalid: {}", e);
            std::process::exit(1);
        }
    };

    let backend: Arc<dyn SuggestionGenerator> = match config.gemini_api_key() {
        Some(api_key) => {
            tracing::info!("Suggestion generator: Gemini ({})", config.gemini_model);
            Arc::new(GeminiSuggestionGenerator::new(api_key, &config.gemini_model))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set, using rule-based prompts only");
            Arc::new(DisabledSuggestionGenerator)
        }
    };
    let generator = Arc::new(GatedSuggestionGenerator::new(backend, config.generator_limits()));

    let external_data: Arc<dyn ExternalDataSource> =
        Arc::new(CachedExternalDataSource::new(Arc::new(HttpExternalDataSource::default())));

    let stream_info: Arc<dyn StreamInfoSource> = match config.twitch_credentials() {
        Some((client_id, access_token)) => {
            Arc::new(HelixStreamInfoSource::new(client_id, access_token))
        }
        None => {
            tracing::warn!("Twitch credentials are not set, viewer counts will not update");
            Arc::new(DisabledStreamInfoSource)
        }
    };

    // 4. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        config.gift_tier_policy,
    ));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let set_language_usecase = Arc::new(SetLanguageUseCase::new(repository.clone()));
    let get_metrics_usecase = Arc::new(GetMetricsUseCase::new(repository.clone(), clock.clone()));
    let ingest_event_usecase = Arc::new(IngestEventUseCase::new(repository.clone()));
    let apply_stream_info_usecase = Arc::new(ApplyStreamInfoUseCase::new(
        repository.clone(),
        stream_info,
        clock.clone(),
    ));
    let select_prompt_usecase = Arc::new(SelectPromptUseCase::new(
        repository.clone(),
        templates,
        generator,
        external_data,
        clock.clone(),
        config.utc_offset_hours,
    ));
    let publish_snapshot_usecase = Arc::new(PublishSnapshotUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));

    // 5. Create and run the server
    let server = Server::new(AppState {
        connect_session_usecase,
        disconnect_session_usecase,
        set_language_usecase,
        get_metrics_usecase,
        ingest_event_usecase,
        apply_stream_info_usecase,
        select_prompt_usecase,
        publish_snapshot_usecase,
        clock,
    });
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
