//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::{ChannelName, SessionId, StreamInfo, Timestamp},
    infrastructure::dto::{
        http::{
            ConnectRequest, ConnectResponse, DisconnectRequest, DisconnectResponse,
            ErrorResponse, EventRequest, HealthResponse, IngestResponse, SessionQuery,
            SetLanguageRequest, SetLanguageResponse, StreamInfoRequest,
        },
        websocket::{MetricsSnapshotDto, PromptMessageDto},
    },
    ui::{
        publish::{publish_metrics, publish_prompt},
        state::AppState,
    },
    usecase::{SelectPromptError, SessionError},
};

/// エラー時のレスポンス
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn session_error(error: SessionError) -> ApiError {
    let status = match error {
        SessionError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        SessionError::InvalidLanguage(_) => StatusCode::BAD_REQUEST,
    };
    api_error(status, error.to_string())
}

fn parse_session_id(raw: String) -> Result<SessionId, ApiError> {
    SessionId::new(raw).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.get_metrics_usecase.connected_session_ids().await.len();
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions,
    })
}

/// Start monitoring a channel
pub async fn connect_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConnectRequest>,
) -> Result<Json<ConnectResponse>, ApiError> {
    // Convert String -> Domain Models
    let channel = ChannelName::new(request.channel)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    let requested = request.session_id.map(parse_session_id).transpose()?;

    let session_id = state
        .connect_session_usecase
        .execute(channel.clone(), requested)
        .await;

    Ok(Json(ConnectResponse {
        session_id: session_id.into_string(),
        channel: channel.as_str().to_string(),
    }))
}

/// Stop monitoring one channel, or all of them when no session id is given
pub async fn disconnect_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DisconnectRequest>,
) -> Result<Json<DisconnectResponse>, ApiError> {
    let target = request.session_id.map(parse_session_id).transpose()?;

    let disconnected = state
        .disconnect_session_usecase
        .execute(target)
        .await
        .map_err(session_error)?;

    Ok(Json(DisconnectResponse {
        disconnected: disconnected.into_iter().map(SessionId::into_string).collect(),
    }))
}

/// Change the output language of a session
pub async fn set_language(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(request): Json<SetLanguageRequest>,
) -> Result<Json<SetLanguageResponse>, ApiError> {
    let session_id = parse_session_id(session_id)?;

    let language = state
        .set_language_usecase
        .execute(&session_id, &request.language)
        .await
        .map_err(session_error)?;

    Ok(Json(SetLanguageResponse {
        session_id: session_id.into_string(),
        language: language.as_str().to_string(),
    }))
}

/// Current snapshot; an empty snapshot when no session matches
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<MetricsSnapshotDto>, ApiError> {
    let session_id = query.session_id.map(parse_session_id).transpose()?;

    let snapshot = state
        .get_metrics_usecase
        .execute(session_id.as_ref())
        .await;

    // Domain Model から DTO への変換
    let dto = match snapshot {
        Some(snapshot) => MetricsSnapshotDto::from(&snapshot),
        None => MetricsSnapshotDto::empty(Timestamp::new(state.clock.now_millis())),
    };
    Ok(Json(dto))
}

/// Inbound event feed
pub async fn ingest_event(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(request): Json<EventRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let session_id = parse_session_id(session_id)?;
    let received_at = Timestamp::new(state.clock.now_millis());
    let event = request
        .into_event(received_at)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let accepted = state
        .ingest_event_usecase
        .execute(&session_id, event)
        .await
        .map_err(session_error)?;

    if accepted {
        publish_metrics(&state, &session_id).await;
    }
    Ok(Json(IngestResponse { accepted }))
}

/// Push channel / viewer information for a session
pub async fn update_stream_info(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(request): Json<StreamInfoRequest>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(session_id)?;
    let info = request.is_live.then(|| StreamInfo::from(request));

    state
        .apply_stream_info_usecase
        .execute(&session_id, info)
        .await
        .map_err(session_error)?;

    publish_metrics(&state, &session_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Select a prompt right away, regardless of the phase cadence
pub async fn select_prompt(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<PromptMessageDto>, ApiError> {
    let session_id = parse_session_id(session_id)?;

    let prompt = match state.select_prompt_usecase.execute(&session_id).await {
        Ok(prompt) => prompt,
        Err(e @ SelectPromptError::SessionNotFound(_)) => {
            return Err(api_error(StatusCode::NOT_FOUND, e.to_string()));
        }
        Err(e @ SelectPromptError::SessionClosed(_)) => {
            return Err(api_error(StatusCode::CONFLICT, e.to_string()));
        }
    };

    publish_prompt(&state, &session_id, &prompt).await;
    Ok(Json(PromptMessageDto::from_prompt(&session_id, &prompt)))
}
