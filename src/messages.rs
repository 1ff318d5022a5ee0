//! User-facing prose for completion failures.
//!
//! The taxonomy in [`crate::error`] stays typed; everything a person reads
//! lives here. Core logic and tests assert on the kind, and this mapping is
//! the one place to change wording or localize.

use crate::error::CompletionError;

/// Reply shown in place of assistant output when a completion fails.
pub fn reply_for(err: &CompletionError) -> &'static str {
    match err {
        CompletionError::InputRejected => "Please enter a question first.",
        CompletionError::ConfigurationMissing => {
            "The AI backend is not configured. Set DEEPSEEK_API_KEY and restart."
        }
        CompletionError::ServiceFailure(_) => {
            "The AI service could not be reached. Check your network or key and try again."
        }
        CompletionError::EmptyContent => "The AI returned no content.",
    }
}

/// Fallback advice text committed when a regeneration fails. Never empty,
/// and distinct per kind so "no content" reads differently from a network
/// error.
pub fn advice_fallback(err: &CompletionError) -> &'static str {
    match err {
        CompletionError::EmptyContent => {
            "The AI had no advice this time. Refresh to try again."
        }
        CompletionError::ConfigurationMissing => {
            "Advice is unavailable: set DEEPSEEK_API_KEY and restart."
        }
        CompletionError::InputRejected | CompletionError::ServiceFailure(_) => {
            "Advice could not be generated right now. Refresh to try again."
        }
    }
}
