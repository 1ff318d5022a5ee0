//! The chat session: an append-only transcript with serialized sends.

use crate::client::CompletionClient;
use crate::messages;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Outcome of a `send` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    /// A user turn and exactly one assistant turn were appended. The
    /// assistant turn may be a failure placeholder.
    Replied,
    /// The message trimmed to empty; the transcript is untouched.
    RejectedEmpty,
    /// A prior send has not resolved yet; the transcript is untouched.
    Busy,
}

struct SessionState {
    transcript: Mutex<Vec<ChatTurn>>,
    in_flight: AtomicBool,
}

/// A single user's conversation for the lifetime of the session.
///
/// Turns appear in exactly the order sends were accepted, and a user turn
/// always immediately precedes its assistant turn: the in-flight guard
/// admits one send at a time and is released only after the assistant turn
/// lands, so pairs never interleave.
pub struct ChatSession {
    id: Uuid,
    client: CompletionClient,
    state: Arc<SessionState>,
}

impl ChatSession {
    pub fn new(client: CompletionClient) -> Self {
        Self {
            id: Uuid::new_v4(),
            client,
            state: Arc::new(SessionState {
                transcript: Mutex::new(Vec::new()),
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read-only snapshot of the transcript for the presentation layer.
    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.state.transcript.lock().await.clone()
    }

    /// Send one user message through the completion client.
    ///
    /// The user turn is appended before the network call begins, so the
    /// transcript reflects the input even if the call fails. The raw text is
    /// what the transcript shows; the trimmed text is what goes on the wire.
    ///
    /// The append-and-release sequence runs on its own task that this future
    /// only awaits. Dropping the future mid-send (client disconnect, request
    /// timeout) therefore cannot strand the guard or leave a user turn
    /// without its assistant turn: the task runs to completion regardless.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::RejectedEmpty;
        }
        if self.state.in_flight.swap(true, Ordering::SeqCst) {
            return SendOutcome::Busy;
        }

        let state = Arc::clone(&self.state);
        let client = self.client.clone();
        let raw = text.to_owned();
        let trimmed = trimmed.to_owned();
        let worker = tokio::spawn(async move {
            state.transcript.lock().await.push(ChatTurn {
                speaker: Speaker::User,
                text: raw,
            });

            let reply = match client.complete(&trimmed).await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!(kind = err.kind(), "chat completion failed");
                    messages::reply_for(&err).to_owned()
                }
            };

            state.transcript.lock().await.push(ChatTurn {
                speaker: Speaker::Assistant,
                text: reply,
            });
            state.in_flight.store(false, Ordering::SeqCst);
        });

        let _ = worker.await;
        SendOutcome::Replied
    }
}
