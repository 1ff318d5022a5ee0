//! Axum HTTP gateway exposing the core to the dashboard frontend.
//!
//! The frontend is presentational: it supplies record edits and chat input
//! and renders what comes back. Everything it reads (the advice slot, the
//! transcript, the week) is served here read-only.

mod handlers;

use crate::advice::AdviceGenerator;
use crate::chat::ChatSession;
use crate::client::CompletionClient;
use crate::config::Config;
use crate::health::WeekLog;
use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB).
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout. Generous, because a completion cycle sits behind
/// `/api/chat`; the reqwest transport has its own tighter timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Shared state for all handlers: one session's worth of core state. The
/// advice slot and the transcript live exactly as long as the server;
/// nothing is persisted.
#[derive(Clone)]
pub struct AppState {
    pub client: CompletionClient,
    pub advisor: Arc<AdviceGenerator>,
    pub chat: Arc<ChatSession>,
    pub week: Arc<RwLock<WeekLog>>,
}

impl AppState {
    pub fn new(client: CompletionClient) -> Self {
        Self {
            advisor: Arc::new(AdviceGenerator::new(client.clone())),
            chat: Arc::new(ChatSession::new(client.clone())),
            week: Arc::new(RwLock::new(WeekLog::sample_week())),
            client,
        }
    }

    /// Kick off an advice regeneration from the current week without
    /// waiting for it. Used on startup and by the record/refresh routes;
    /// overlapping runs are resolved by the generator's ticket rule.
    pub fn spawn_regeneration(&self) {
        let advisor = Arc::clone(&self.advisor);
        let week = Arc::clone(&self.week);
        tokio::spawn(async move {
            let records = week.read().await.snapshot();
            // Failure is already committed to the advice slot as fallback
            // text and logged by the generator.
            let _ = advisor.regenerate(&records).await;
        });
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/api/chat", post(handlers::handle_chat))
        .route("/api/chat/send", post(handlers::handle_chat_send))
        .route("/api/chat/transcript", get(handlers::handle_transcript))
        .route("/api/advice", get(handlers::handle_advice))
        .route("/api/advice/refresh", post(handlers::handle_advice_refresh))
        .route("/api/records", get(handlers::handle_records))
        .route("/api/records/today", post(handlers::handle_update_today))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
        .with_state(state)
}

/// Run the HTTP gateway.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let state = AppState::new(CompletionClient::from_config(config));
    // Same behavior as the dashboard on first load: advice generation
    // starts as soon as the week is available.
    state.spawn_regeneration();

    run_gateway_with_listener(listener, state).await
}

/// Run the gateway from a pre-bound listener (used by tests).
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "gateway listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
