//! Advice generation over the rolling record window.

use crate::client::CompletionClient;
use crate::error::CompletionError;
use crate::health::HealthRecord;
use crate::messages;
use crate::persona;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Current advice surfaced to the presentation layer. Replaced wholesale on
/// every regeneration, never merged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdviceState {
    pub text: String,
    pub pending: bool,
}

/// Drives completion cycles over record snapshots and owns the advice slot.
///
/// Regenerations are deliberately not serialized against each other: an
/// automatic trigger from a record edit and a manual refresh may race. The
/// ticket check in [`regenerate`](Self::regenerate) resolves the race: a
/// task commits its result only while it is still the latest issued, and a
/// superseded result is discarded rather than overwriting fresher text.
pub struct AdviceGenerator {
    client: CompletionClient,
    state: Mutex<AdviceState>,
    tickets: AtomicU64,
}

impl AdviceGenerator {
    pub fn new(client: CompletionClient) -> Self {
        Self {
            client,
            state: Mutex::new(AdviceState::default()),
            tickets: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current advice slot.
    pub async fn state(&self) -> AdviceState {
        self.state.lock().await.clone()
    }

    /// Regenerate advice from a fresh snapshot of the record window.
    ///
    /// Suspends until the completion resolves and returns the typed outcome.
    /// On failure the slot gets a kind-specific fallback, so `text` is never
    /// empty once a regeneration has settled. `pending` is raised before the
    /// network call and cleared by whichever task holds the latest ticket.
    pub async fn regenerate(
        &self,
        records: &[HealthRecord],
    ) -> Result<String, CompletionError> {
        // Ticket and flag move together under the lock: whoever raised
        // `pending` last holds the highest ticket issued so far, so the
        // task that settles as latest is always the one that clears it.
        let ticket = {
            let mut state = self.state.lock().await;
            let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
            state.pending = true;
            ticket
        };

        let prompt = persona::advice_prompt(records);
        let outcome = self.client.complete(&prompt).await;

        let text = match &outcome {
            Ok(reply) => reply.clone(),
            Err(err) => {
                tracing::warn!(kind = err.kind(), "advice regeneration failed");
                messages::advice_fallback(err).to_owned()
            }
        };

        let mut state = self.state.lock().await;
        if ticket == self.tickets.load(Ordering::SeqCst) {
            state.text = text;
            state.pending = false;
        } else {
            tracing::debug!(ticket, "discarding superseded advice result");
        }
        drop(state);

        outcome
    }
}
