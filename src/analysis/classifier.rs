// file: src/analysis/classifier.rs
// description: abstract methodology classification via the completion backend

use crate::llm::{prompts, CompletionClient};
use crate::models::ResearchType;
use tracing::debug;

const CLASSIFY_MAX_TOKENS: u32 = 10;
const CLASSIFY_TEMPERATURE: f64 = 0.0;

/// Labels abstracts as qualitative/quantitative/unknown.
///
/// Empty abstracts short-circuit to Unknown without touching the network;
/// a failed completion also degrades to Unknown instead of surfacing.
pub struct AbstractClassifier<'a> {
    llm: &'a CompletionClient,
}

impl<'a> AbstractClassifier<'a> {
    pub fn new(llm: &'a CompletionClient) -> Self {
        Self { llm }
    }

    pub async fn classify(&self, abstract_text: &str) -> ResearchType {
        if abstract_text.trim().is_empty() {
            return ResearchType::Unknown;
        }

        let prompt = prompts::classification_prompt(abstract_text);
        let outcome = self
            .llm
            .complete(&prompt, CLASSIFY_MAX_TOKENS, CLASSIFY_TEMPERATURE)
            .await;

        match outcome.as_success() {
            Some(reply) => {
                let label = ResearchType::from_reply(reply);
                debug!("Classified abstract as {} (reply: {:?})", label, reply);
                label
            }
            None => ResearchType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::retry::RetryPolicy;
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn test_client(base_url: String, max_retries: u32) -> CompletionClient {
        let config = LlmConfig {
            base_url,
            model: "test/model".to_string(),
            api_key: None,
            referer: "https://example.org".to_string(),
            app_title: "Test Researcher".to_string(),
            request_timeout_secs: 5,
        };
        let policy = RetryPolicy {
            max_retries,
            initial_delay_ms: 1,
            backoff_multiplier: 2.0,
            max_delay_ms: 8,
            rate_limit_wait_cap_ms: 1_000,
        };
        CompletionClient::new(config, policy).unwrap()
    }

    fn reply_body(content: &str) -> String {
        json!({"choices": [{"message": {"content": content}}]}).to_string()
    }

    #[tokio::test]
    async fn test_empty_abstract_makes_no_completion_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let client = test_client(server.url(), 3);
        let classifier = AbstractClassifier::new(&client);

        assert_eq!(classifier.classify("").await, ResearchType::Unknown);
        assert_eq!(classifier.classify("   \n\t").await, ResearchType::Unknown);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_quantitative_reply_maps_case_insensitively() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("Quantitative"))
            .expect(1)
            .create_async()
            .await;

        let client = test_client(server.url(), 3);
        let classifier = AbstractClassifier::new(&client);

        assert_eq!(
            classifier.classify("We measured 500 samples.").await,
            ResearchType::Quantitative
        );
    }

    #[tokio::test]
    async fn test_ambiguous_reply_prefers_qualitative() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("both qualitative and quantitative"))
            .create_async()
            .await;

        let client = test_client(server.url(), 3);
        let classifier = AbstractClassifier::new(&client);

        assert_eq!(
            classifier.classify("A mixed-methods study.").await,
            ResearchType::Qualitative
        );
    }

    #[tokio::test]
    async fn test_failed_completion_degrades_to_unknown() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let client = test_client(server.url(), 2);
        let classifier = AbstractClassifier::new(&client);

        assert_eq!(
            classifier.classify("Some abstract.").await,
            ResearchType::Unknown
        );
    }
}
