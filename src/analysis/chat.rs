//! Question answering over a document's text.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::options::CallLimits;
use super::prompts::chat_prompt;
use crate::llm::{GenerationRequest, GenerationService};
use crate::utils::truncate_chars;

/// Returned when no generation service is configured.
pub const CHAT_UNAVAILABLE: &str = "AI Chat not available (API key missing).";
/// Returned for a blank question.
pub const EMPTY_QUESTION: &str = "Please ask a question about the document.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Stateless chat; every call carries the full document text.
#[derive(Clone)]
pub struct DocumentChat {
    service: Option<Arc<dyn GenerationService>>,
    limits: CallLimits,
}

impl DocumentChat {
    pub fn new(service: Option<Arc<dyn GenerationService>>) -> Self {
        Self {
            service,
            limits: CallLimits::CHAT,
        }
    }

    pub fn with_limits(mut self, limits: CallLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn is_available(&self) -> bool {
        self.service.is_some()
    }

    /// Answer `question` from `text`. Failures come back as the answer text.
    pub async fn ask(&self, text: &str, question: &str) -> ChatResponse {
        let Some(service) = &self.service else {
            return ChatResponse::new(CHAT_UNAVAILABLE);
        };
        let question = question.trim();
        if question.is_empty() {
            return ChatResponse::new(EMPTY_QUESTION);
        }

        let content = truncate_chars(text, self.limits.text_cap);
        let request = GenerationRequest::new(
            chat_prompt(content, question),
            self.limits.temperature,
            self.limits.max_tokens,
        );

        debug!("Chat question to {}: {}", service.model(), question);
        match service.generate(&request).await {
            Ok(answer) => ChatResponse::new(answer),
            Err(e) => {
                warn!("Chat generation failed: {}", e);
                ChatResponse::new(format!("Error generating answer: {}", e))
            }
        }
    }
}

impl std::fmt::Debug for DocumentChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentChat")
            .field("available", &self.is_available())
            .field("limits", &self.limits)
            .finish()
    }
}
