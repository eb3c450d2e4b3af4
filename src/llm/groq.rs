//! Groq client over the OpenAI-compatible chat completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{http_client, usable_key, GenerationRequest, GenerationService, GroqConfig, LlmError};

pub struct GroqClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Option<Vec<GroqChoice>>,
    error: Option<GroqError>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    message: String,
}

impl GroqClient {
    /// Create a client; fails when no API key is configured.
    pub fn new(config: GroqConfig, timeout: Duration) -> Result<Self, LlmError> {
        let api_key = usable_key(config.api_key.as_deref()).ok_or_else(|| {
            LlmError::NotConfigured(
                "GROQ_API_KEY not set. Get an API key from https://console.groq.com/".to_string(),
            )
        })?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model,
            api_key,
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl GenerationService for GroqClient {
    fn provider_name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = GroqRequest {
            model: &self.model,
            messages: vec![GroqMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.endpoint);
        debug!("Groq request to {} ({} prompt chars)", url, request.prompt.len());

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let groq_resp: GroqResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        if let Some(error) = groq_resp.error {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: error.message,
            });
        }

        let content = groq_resp
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GroqClient {
        GroqClient::new(
            GroqConfig {
                endpoint: format!("{}/", server.uri()),
                model: "llama-test".to_string(),
                api_key: Some("gsk_test".to_string()),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_sends_chat_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .and(body_partial_json(json!({
                "model": "llama-test",
                "messages": [{"role": "user", "content": "Summarize"}],
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  The answer.\n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let answer = client
            .generate(&GenerationRequest::new("Summarize", 0.3, 1000))
            .await
            .unwrap();
        assert_eq!(answer, "The answer.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate(&GenerationRequest::new("x", 0.5, 10))
            .await;
        match result {
            Err(LlmError::Api { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate(&GenerationRequest::new("x", 0.5, 10))
            .await;
        assert!(matches!(result, Err(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate(&GenerationRequest::new("x", 0.5, 10))
            .await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let client = GroqClient::new(
            GroqConfig {
                endpoint: "http://127.0.0.1:9".to_string(),
                model: "m".to_string(),
                api_key: Some("k".to_string()),
            },
            Duration::from_secs(2),
        )
        .unwrap();

        let result = client.generate(&GenerationRequest::new("x", 0.5, 10)).await;
        assert!(matches!(result, Err(LlmError::Connection(_))));
    }
}
