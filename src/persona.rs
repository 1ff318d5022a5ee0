//! The fixed advisor persona and the advice summarization template.

use crate::health::HealthRecord;

/// System prompt carried on every outbound completion.
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are a gentle, friendly health advisor \
who offers guidance on diet, exercise, and sleep.";

/// Number of most-recent records summarized into the advice prompt. Fixed
/// regardless of how many records exist.
pub const ADVICE_WINDOW: usize = 3;

fn record_line(record: &HealthRecord) -> String {
    format!(
        "{}: steps {}, sleep {}h, diet: {}",
        record.day, record.steps, record.sleep_hours, record.diet_note
    )
}

/// Build the advice prompt from the most recent window of `records`.
///
/// Records arrive in Monday-to-Sunday order; the last [`ADVICE_WINDOW`] entries
/// in that same order form the summary.
pub fn advice_prompt(records: &[HealthRecord]) -> String {
    let start = records.len().saturating_sub(ADVICE_WINDOW);
    let summary = records[start..]
        .iter()
        .map(record_line)
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Based on my health data from the last three days ({summary}), please give \
         exercise, diet, and rest advice in a gentle, friendly tone."
    )
}
