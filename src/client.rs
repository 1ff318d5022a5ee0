//! The completion client: pre-flight validation, then exactly one backend call.

use crate::config::Config;
use crate::error::CompletionError;
use crate::persona;
use crate::providers::{CompletionBackend, DeepSeekBackend};
use std::sync::Arc;

/// Front door to the remote completion service.
///
/// Both the advice generator and the chat session go through this type. An
/// empty message or a missing credential is resolved locally, at zero
/// network cost; everything else is one request against the backend. Each
/// call yields exactly one terminal result, never a panic.
#[derive(Clone)]
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    credentialed: bool,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, credentialed: bool) -> Self {
        Self {
            backend,
            credentialed,
        }
    }

    /// Production client: DeepSeek backend wired from config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(DeepSeekBackend::from_config(config)),
            config.has_api_key(),
        )
    }

    /// One completion cycle under the fixed advisor persona.
    pub async fn complete(&self, user_prompt: &str) -> Result<String, CompletionError> {
        self.complete_with_system(persona::ADVISOR_SYSTEM_PROMPT, user_prompt)
            .await
    }

    pub async fn complete_with_system(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let trimmed = user_prompt.trim();
        if trimmed.is_empty() {
            return Err(CompletionError::InputRejected);
        }
        if !self.credentialed {
            return Err(CompletionError::ConfigurationMissing);
        }
        self.backend.complete(system_prompt, trimmed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingBackend {
        calls: AtomicUsize,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl RecordingBackend {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    impl CompletionBackend for RecordingBackend {
        fn complete<'a>(
            &'a self,
            system_prompt: &'a str,
            user_prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.prompts
                    .lock()
                    .unwrap()
                    .push((system_prompt.to_owned(), user_prompt.to_owned()));
                Ok("mock reply".to_owned())
            })
        }
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_a_backend_call() {
        let backend = RecordingBackend::new();
        let client = CompletionClient::new(backend.clone(), true);

        for message in ["", "   ", "\n\t "] {
            let err = client.complete(message).await.unwrap_err();
            assert_eq!(err, CompletionError::InputRejected);
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_without_a_backend_call() {
        let backend = RecordingBackend::new();
        let client = CompletionClient::new(backend.clone(), false);

        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err, CompletionError::ConfigurationMissing);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_passes_content_through_unchanged() {
        let backend = RecordingBackend::new();
        let client = CompletionClient::new(backend.clone(), true);

        let reply = client.complete("hello").await.unwrap();
        assert_eq!(reply, "mock reply");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn request_uses_trimmed_prompt_and_advisor_persona() {
        let backend = RecordingBackend::new();
        let client = CompletionClient::new(backend.clone(), true);

        client.complete("  how much sleep?  ").await.unwrap();

        let prompts = backend.prompts.lock().unwrap();
        let (system, user) = &prompts[0];
        assert_eq!(system, persona::ADVISOR_SYSTEM_PROMPT);
        assert_eq!(user, "how much sleep?");
    }

    #[tokio::test]
    async fn client_from_keyless_config_reports_configuration_missing() {
        let config = Config {
            api_key: None,
            ..Config::default()
        };
        let client = CompletionClient::from_config(&config);
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err, CompletionError::ConfigurationMissing);
    }
}
