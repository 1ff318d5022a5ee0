use thiserror::Error;

/// Terminal failure kinds for a single completion cycle.
///
/// Every call through the completion client resolves to exactly one success
/// or one of these kinds; nothing panics and nothing escapes as an unhandled
/// fault. User-facing prose lives in `crate::messages`, not here, so callers
/// and tests match on the kind rather than on display strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The message was empty after trimming. Resolved locally, before any
    /// network I/O.
    #[error("input rejected: message is empty after trimming")]
    InputRejected,

    /// No API key is present in the environment or config. Fatal to this
    /// call only, never to the process.
    #[error("configuration missing: no API key set")]
    ConfigurationMissing,

    /// Transport error, non-2xx status, or an undecodable response body.
    /// The detail string is sanitized before it gets here.
    #[error("service failure: {0}")]
    ServiceFailure(String),

    /// The service answered, but the first choice carried no usable text.
    #[error("service returned no content")]
    EmptyContent,
}

impl CompletionError {
    /// Stable machine-readable label, used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputRejected => "input_rejected",
            Self::ConfigurationMissing => "configuration_missing",
            Self::ServiceFailure(_) => "service_failure",
            Self::EmptyContent => "empty_content",
        }
    }
}
