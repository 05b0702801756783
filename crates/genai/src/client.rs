use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, error, info, warn};

use crate::error::{GenAiError, GenAiResult};
use crate::types::*;

const DEFAULT_MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 60000;

/// Backoff schedule for rate-limited and 5xx responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
            max_backoff: Duration::from_millis(MAX_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Client for OpenRouter-compatible chat completion APIs
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenRouterClient {
    pub fn new(api_key: String, base_url: String) -> GenAiResult<Self> {
        if api_key.trim().is_empty() {
            return Err(GenAiError::InvalidConfig("API key is empty".to_string()));
        }
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(GenAiError::InvalidConfig("base URL is empty".to_string()));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `operation`, retrying rate limits and 5xx responses with
    /// exponential backoff. Other errors are returned immediately.
    async fn with_retry<T, F, Fut>(&self, operation_name: &str, operation: F) -> GenAiResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = GenAiResult<T>>,
    {
        let mut attempt = 0;
        let mut backoff = self.retry.initial_backoff;

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            let Some(wait) = self.retry_delay(&err, backoff) else {
                if attempt > 0 {
                    info!(operation = operation_name, retries = attempt, error = %err, "Request failed after retries");
                }
                return Err(err);
            };

            if attempt >= self.retry.max_retries {
                error!(operation = operation_name, retries = attempt, error = %err, "Giving up on request");
                return Err(err);
            }

            attempt += 1;
            warn!(
                operation = operation_name,
                attempt,
                max_retries = self.retry.max_retries,
                wait_ms = wait.as_millis() as u64,
                error = %err,
                "Retrying request"
            );
            tokio::time::sleep(wait).await;
            backoff = (backoff * 2).min(self.retry.max_backoff);
        }
    }

    fn retry_delay(&self, err: &GenAiError, backoff: Duration) -> Option<Duration> {
        match err {
            GenAiError::RateLimited { retry_after } => Some(
                retry_after
                    .map(Duration::from_secs)
                    .unwrap_or(backoff)
                    .min(self.retry.max_backoff),
            ),
            GenAiError::Api {
                status_code: Some(code),
                ..
            } if *code >= 500 => Some(backoff),
            _ => None,
        }
    }

    /// Plain-text chat completion.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> GenAiResult<String> {
        let model = model.to_string();

        self.with_retry("chat_completion", || async {
            self.chat_completion_inner(messages.clone(), &model, temperature, max_tokens, None)
                .await
        })
        .await
    }

    /// Chat completion that asks the model for a single JSON object.
    ///
    /// The returned text is not parsed here; models occasionally wrap it in a
    /// code fence regardless of the requested format.
    pub async fn chat_completion_json(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> GenAiResult<String> {
        let model = model.to_string();

        self.with_retry("chat_completion_json", || async {
            self.chat_completion_inner(
                messages.clone(),
                &model,
                temperature,
                max_tokens,
                Some(ResponseFormat::JsonObject),
            )
            .await
        })
        .await
    }

    async fn chat_completion_inner(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        response_format: Option<ResponseFormat>,
    ) -> GenAiResult<String> {
        debug!(model, messages = messages.len(), ?response_format, "Sending chat completion");

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
            response_format,
            stream: Some(false),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let chat_response: ChatCompletionResponse = response.json().await?;
        if let Some(usage) = &chat_response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GenAiError::Api {
                message: "No completion returned".to_string(),
                status_code: None,
            })
    }

    async fn check_status(response: Response) -> GenAiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            warn!("Rate limited by chat API");
            return Err(GenAiError::RateLimited { retry_after });
        }

        let error_text = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ApiErrorResponse>(&error_text) {
            Ok(body) => {
                error!(
                    status = status.as_u16(),
                    error_type = ?body.error.error_type,
                    code = ?body.error.code,
                    "Chat API error: {}",
                    body.error.message
                );
                body.error.message
            }
            Err(_) => error_text,
        };

        Err(GenAiError::Api {
            message,
            status_code: Some(status.as_u16()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenRouterClient::new(
            "test-key".to_string(),
            "https://openrouter.ai/api/v1/".to_string(),
        )
        .unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url(), "https://openrouter.ai/api/v1");
        assert_eq!(client.retry, RetryPolicy::default());
    }

    #[test]
    fn test_blank_settings_are_rejected() {
        let err = OpenRouterClient::new(" ".to_string(), "https://openrouter.ai/api/v1".to_string())
            .err()
            .unwrap();
        assert!(matches!(err, GenAiError::InvalidConfig(_)));

        let err = OpenRouterClient::new("key".to_string(), "/".to_string())
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Invalid configuration: base URL is empty");
    }

    #[test]
    fn test_retry_policy_none() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retries, 0);
    }
}
