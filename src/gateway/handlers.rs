use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use super::AppState;
use crate::messages;

#[derive(Deserialize, Default)]
pub(super) struct ChatBody {
    pub message: Option<String>,
}

/// Chat bodies are never rejected: a body that fails to parse, or carries
/// no `message`, is treated as an empty message and resolved locally.
fn chat_message(
    body: Result<Json<ChatBody>, axum::extract::rejection::JsonRejection>,
) -> String {
    match body {
        Ok(Json(chat_body)) => chat_body.message.unwrap_or_default(),
        Err(_) => String::new(),
    }
}

#[derive(Deserialize, Default)]
pub(super) struct TodayBody {
    pub steps: Option<u32>,
    pub sleep_hours: Option<f64>,
    pub diet_note: Option<String>,
}

fn invalid_json() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "Invalid JSON body" })),
    )
}

/// GET /health: liveness probe.
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/chat, the `{ message }` to `{ reply }` contract.
///
/// Always 200 with a human-readable reply. Failure kinds are rendered to
/// prose here; a raw error object never crosses this boundary.
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatBody>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let message = chat_message(body);
    let reply = match state.client.complete(&message).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(kind = err.kind(), "completion failed at /api/chat");
            messages::reply_for(&err).to_owned()
        }
    };
    (StatusCode::OK, Json(serde_json::json!({ "reply": reply })))
}

/// POST /api/chat/send: run one send through the session transcript.
pub(super) async fn handle_chat_send(
    State(state): State<AppState>,
    body: Result<Json<ChatBody>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let message = chat_message(body);
    let outcome = state.chat.send(&message).await;
    let turns = state.chat.transcript().await.len();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "outcome": outcome, "turns": turns })),
    )
}

/// GET /api/chat/transcript: ordered turns, oldest first.
pub(super) async fn handle_transcript(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.chat.transcript().await)
}

/// GET /api/advice: current advice slot (text + pending flag).
pub(super) async fn handle_advice(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.advisor.state().await)
}

/// POST /api/advice/refresh: manual refresh, same as the dashboard button.
/// Fire-and-forget; the frontend polls `/api/advice` for the result.
pub(super) async fn handle_advice_refresh(State(state): State<AppState>) -> impl IntoResponse {
    state.spawn_regeneration();
    Json(serde_json::json!({ "status": "refreshing" }))
}

/// GET /api/records: the Monday-to-Sunday week.
pub(super) async fn handle_records(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.week.read().await.snapshot())
}

/// POST /api/records/today: update today's record, then regenerate advice
/// from the fresh snapshot.
pub(super) async fn handle_update_today(
    State(state): State<AppState>,
    body: Result<Json<TodayBody>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(today)) = body else {
        return invalid_json().into_response();
    };

    let records = {
        let mut week = state.week.write().await;
        week.update_today(today.steps, today.sleep_hours, today.diet_note);
        week.snapshot()
    };
    state.spawn_regeneration();

    Json(serde_json::json!({ "records": records })).into_response()
}
