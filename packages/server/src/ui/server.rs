//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        connect_session, disconnect_session, get_metrics, health_check, ingest_event,
        select_prompt, set_language, update_stream_info, websocket_handler,
    },
    scheduler::{Scheduler, SchedulerIntervals},
    signal::shutdown_signal,
    state::AppState,
};

/// Stream coaching server
///
/// Owns the application state, serves the operator API and the dashboard
/// WebSocket, and drives the periodic timers while it runs.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    intervals: SchedulerIntervals,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
            intervals: SchedulerIntervals::default(),
        }
    }

    /// Override the timer intervals
    pub fn with_intervals(mut self, intervals: SchedulerIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/metrics", get(get_metrics))
            .route("/api/sessions/connect", post(connect_session))
            .route("/api/sessions/disconnect", post(disconnect_session))
            .route("/api/sessions/{session_id}/language", put(set_language))
            .route("/api/sessions/{session_id}/events", post(ingest_event))
            .route("/api/sessions/{session_id}/stream-info", put(update_stream_info))
            .route("/api/sessions/{session_id}/prompt", post(select_prompt))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Stream coaching server listening on {}", listener.local_addr()?);
        tracing::info!("Dashboard: ws://{}/ws?sessionId=<id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// Every session is disconnected as soon as `shutdown` resolves, which also
    /// ends the dashboard subscriptions still attached to them.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let _scheduler = Scheduler::start(self.state.clone(), self.intervals);

        let state = self.state.clone();
        let shutdown = async move {
            shutdown.await;
            disconnect_all(&state).await;
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

async fn disconnect_all(state: &AppState) {
    match state.disconnect_session_usecase.execute(None).await {
        Ok(ids) => tracing::info!("Disconnected {} session(s) on shutdown", ids.len()),
        Err(e) => tracing::error!("Failed to disconnect sessions on shutdown: {}", e),
    }
}
