//! In-process generation service for strategy tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::llm::{GenerationRequest, GenerationService, LlmError};

pub struct StubService {
    reply: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubService {
    /// Service that answers every request with `reply`.
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Service whose every call fails with a 503.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn as_service(self: &Arc<Self>) -> Arc<dyn GenerationService> {
        self.clone()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationService for StubService {
    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Api {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}
