//! Mock provider for tests and key-less local runs.

use super::{ContentGenerator, ProviderError};
use crate::models::{ContentPart, ModelInferenceRequest};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum MockReply {
    /// Answer with the prompt text.
    Echo,
    Text(String),
    Fail(String),
}

/// Records every request and answers from a script.
#[derive(Debug)]
pub struct MockContentGenerator {
    reply: MockReply,
    delay: Option<Duration>,
    requests: Mutex<Vec<ModelInferenceRequest>>,
    completed: AtomicUsize,
}

impl MockContentGenerator {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            delay: None,
            requests: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn echo() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(text.into()))
    }

    /// Every call fails with `ProviderError::ApiError(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fail(message.into()))
    }

    /// Hold each call open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<ModelInferenceRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Calls that ran to the end rather than being dropped mid-flight.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_content(
        &self,
        request: &ModelInferenceRequest,
    ) -> Result<String, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.completed.fetch_add(1, Ordering::SeqCst);

        match &self.reply {
            MockReply::Echo => {
                let prompt = request
                    .parts()
                    .iter()
                    .find_map(|part| match part {
                        ContentPart::Text { value } => Some(value.as_str()),
                        _ => None,
                    })
                    .unwrap_or_default();
                Ok(format!("Mock response for: {}", prompt))
            }
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
