//! Shared mock completion backend for integration tests.
#![allow(dead_code)]

use healthmate::client::CompletionClient;
use healthmate::error::CompletionError;
use healthmate::providers::CompletionBackend;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, oneshot};

/// A scripted reply: resolved immediately, or gated on a oneshot channel so
/// the test controls when, and in what order, in-flight calls resolve.
pub enum Reply {
    Now(Result<String, CompletionError>),
    Gated(oneshot::Receiver<Result<String, CompletionError>>),
}

pub fn ok(text: &str) -> Reply {
    Reply::Now(Ok(text.to_owned()))
}

pub fn fail(err: CompletionError) -> Reply {
    Reply::Now(Err(err))
}

/// A gated reply plus the sender that releases it.
pub fn gated() -> (oneshot::Sender<Result<String, CompletionError>>, Reply) {
    let (tx, rx) = oneshot::channel();
    (tx, Reply::Gated(rx))
}

pub struct MockBackend {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl MockBackend {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.into()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// User prompts seen by the backend, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

impl CompletionBackend for MockBackend {
    fn complete<'a>(
        &'a self,
        _system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().await.push(user_prompt.to_owned());

            let reply = self.replies.lock().await.pop_front();
            match reply {
                Some(Reply::Now(result)) => result,
                Some(Reply::Gated(rx)) => rx.await.unwrap_or_else(|_| {
                    Err(CompletionError::ServiceFailure("gate dropped".into()))
                }),
                None => Err(CompletionError::ServiceFailure(
                    "no scripted reply left".into(),
                )),
            }
        })
    }
}

/// Client over a mock backend with the credential present.
pub fn client_with(backend: Arc<MockBackend>) -> CompletionClient {
    CompletionClient::new(backend, true)
}

/// Client over a mock backend with no credential configured.
pub fn keyless_client(backend: Arc<MockBackend>) -> CompletionClient {
    CompletionClient::new(backend, false)
}

/// Yield to the current-thread runtime until `condition` holds (bounded).
pub async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    assert!(condition(), "condition not reached after yielding");
}
