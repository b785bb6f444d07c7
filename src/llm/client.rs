// file: src/llm/client.rs
// description: resilient chat-completion client for the OpenRouter API
// reference: https://openrouter.ai/docs

use crate::config::LlmConfig;
use crate::error::{ResearcherError, Result};
use crate::models::CompletionOutcome;
use crate::retry::RetryPolicy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion caller with exponential back-off.
///
/// Every attempt is a metered external call; retries stop after
/// `max_retries` and the outcome is a typed failure rather than an error,
/// so provider trouble never propagates past this boundary.
pub struct CompletionClient {
    client: Client,
    config: LlmConfig,
    policy: RetryPolicy,
}

impl CompletionClient {
    pub fn new(config: LlmConfig, policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            policy,
        })
    }

    pub fn with_client(client: Client, config: LlmConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            config,
            policy,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send `prompt` as a single user message and return the trimmed text
    /// of the first completion choice, or a typed failure after retries.
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> CompletionOutcome {
        let mut retries = 0u32;
        let mut delay = self.policy.initial_delay();

        loop {
            match self.try_complete(prompt, max_tokens, temperature).await {
                Ok(text) => return CompletionOutcome::Success(text),
                Err(e) => {
                    retries += 1;
                    warn!(
                        "Completion request failed ({}/{}): {}",
                        retries, self.policy.max_retries, e
                    );
                    if retries >= self.policy.max_retries {
                        return CompletionOutcome::Failed(format!(
                            "{} (after {} attempts)",
                            e, retries
                        ));
                    }
                }
            }

            tokio::time::sleep(delay).await;
            delay = self.policy.next_delay(delay);
        }
    }

    /// `complete`, rendered to plain text with the failure sentinel.
    pub async fn complete_text(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> String {
        self.complete(prompt, max_tokens, temperature)
            .await
            .into_text()
    }

    async fn try_complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature,
        };

        debug!(
            "Requesting completion: model={} max_tokens={} prompt_chars={}",
            self.config.model,
            max_tokens,
            prompt.chars().count()
        );

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", self.config.referer.as_str())
            .header("X-Title", self.config.app_title.as_str());
        if let Some(ref key) = self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResearcherError::Completion(format!(
                "provider returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ResearcherError::Completion("no completion choices returned".to_string())
            })?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::COMPLETION_FAILED_SENTINEL;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_delay_ms: 1,
            backoff_multiplier: 2.0,
            max_delay_ms: 8,
            rate_limit_wait_cap_ms: 1_000,
        }
    }

    fn test_config(base_url: String) -> LlmConfig {
        LlmConfig {
            base_url,
            model: "test/model".to_string(),
            api_key: Some("test-key".to_string()),
            referer: "https://example.org".to_string(),
            app_title: "Test Researcher".to_string(),
            request_timeout_secs: 5,
        }
    }

    fn completion_body(content: &str) -> String {
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": content}}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_complete_returns_trimmed_first_choice() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_header("x-title", "Test Researcher")
            .match_body(Matcher::PartialJson(json!({
                "model": "test/model",
                "max_tokens": 10,
                "messages": [{"role": "user", "content": "classify this"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("  Quantitative \n"))
            .expect(1)
            .create_async()
            .await;

        let client = CompletionClient::new(test_config(server.url()), fast_policy(3)).unwrap();
        let outcome = client.complete("classify this", 10, 0.0).await;

        mock.assert_async().await;
        assert_eq!(outcome, CompletionOutcome::Success("Quantitative".to_string()));
    }

    #[tokio::test]
    async fn test_complete_retries_then_returns_typed_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .expect(3)
            .create_async()
            .await;

        let client = CompletionClient::new(test_config(server.url()), fast_policy(3)).unwrap();
        let outcome = client.complete("prompt", 100, 0.7).await;

        // exactly max_retries attempts, a typed failure, never a panic/Err
        mock.assert_async().await;
        assert!(!outcome.is_success());
        assert!(outcome.failure_reason().unwrap().contains("after 3 attempts"));
        assert_eq!(outcome.into_text(), COMPLETION_FAILED_SENTINEL);
    }

    #[tokio::test]
    async fn test_complete_text_renders_sentinel_on_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("bad key")
            .expect(2)
            .create_async()
            .await;

        let client = CompletionClient::new(test_config(server.url()), fast_policy(2)).unwrap();
        let text = client.complete_text("prompt", 50, 0.3).await;

        assert_eq!(text, COMPLETION_FAILED_SENTINEL);
    }

    #[tokio::test]
    async fn test_empty_choices_counts_as_provider_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"choices": []}).to_string())
            .expect(2)
            .create_async()
            .await;

        let client = CompletionClient::new(test_config(server.url()), fast_policy(2)).unwrap();
        let outcome = client.complete("prompt", 50, 0.3).await;

        mock.assert_async().await;
        assert!(!outcome.is_success());
    }
}
