use crate::error::CompletionError;
use std::future::Future;
use std::pin::Pin;

/// Transport seam to the remote completion service.
///
/// One call, one terminal result: the text of the response's first choice,
/// or a typed failure. No retries happen at this layer; retry policy, if
/// any, belongs to the caller.
pub trait CompletionBackend: Send + Sync {
    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>>;
}
