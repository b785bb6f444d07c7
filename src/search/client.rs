// file: src/search/client.rs
// description: rate-limited Semantic Scholar search client with back-off
// reference: https://api.semanticscholar.org/api-docs/graph

use crate::config::SearchConfig;
use crate::error::{ResearcherError, Result};
use crate::models::Paper;
use crate::retry::RetryPolicy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total: Option<u64>,
    data: Option<Vec<Paper>>,
}

/// Paginated paper search against the Semantic Scholar Graph API.
///
/// One GET per `fetch` call with `query`, `limit`, `offset=0` and a fixed
/// field set. 429 responses trigger back-off without consuming retries;
/// everything else transient consumes retries up to `max_retries`. The
/// caller always gets a list back, empty when retries are exhausted.
pub struct PaperSearchClient {
    client: Client,
    config: SearchConfig,
    policy: RetryPolicy,
}

impl PaperSearchClient {
    pub fn new(config: SearchConfig, policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            policy,
        })
    }

    /// Create a client around an existing reqwest client, for injection.
    pub fn with_client(client: Client, config: SearchConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            config,
            policy,
        }
    }

    /// Fetch up to `limit` papers matching `query`. Never fails: rate
    /// limits and transient errors are recovered internally, and exhausted
    /// retries yield an empty list with the cause logged.
    pub async fn fetch(&self, query: &str, limit: usize) -> Vec<Paper> {
        match self.try_fetch(query, limit).await {
            Ok(papers) => papers,
            Err(e) => {
                warn!("Could not fetch papers after multiple retries: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<Paper>> {
        let url = format!("{}/paper/search", self.config.base_url);
        let limit_param = limit.to_string();

        let mut retries = 0u32;
        let mut delay = self.policy.initial_delay();
        let mut rate_limit_waited = Duration::ZERO;

        loop {
            debug!(
                "Searching papers: query={:?} limit={} attempt={}",
                query,
                limit,
                retries + 1
            );

            let mut request = self.client.get(&url).query(&[
                ("query", query),
                ("limit", limit_param.as_str()),
                ("offset", "0"),
                ("fields", self.config.fields.as_str()),
            ]);
            if let Some(ref key) = self.config.api_key {
                request = request.header("x-api-key", key.as_str());
            }

            let failure = match request.send().await {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                    // 429 does not consume a retry; it is bounded by the
                    // total wall-clock cap instead.
                    if rate_limit_waited + delay > self.policy.rate_limit_wait_cap() {
                        return Err(ResearcherError::SearchApi {
                            status: 429,
                            message: format!(
                                "rate limited for more than {:?}",
                                self.policy.rate_limit_wait_cap()
                            ),
                        });
                    }

                    warn!("Search API rate-limited. Sleeping {:?}", delay);
                    tokio::time::sleep(delay).await;
                    rate_limit_waited += delay;
                    delay = self.policy.next_delay(delay);
                    continue;
                }
                Ok(response) if response.status().is_success() => {
                    match response.json::<SearchResponse>().await {
                        Ok(body) => {
                            let papers = body.data.unwrap_or_default();
                            debug!(
                                "Search returned {} papers (total reported: {:?})",
                                papers.len(),
                                body.total
                            );
                            return Ok(papers);
                        }
                        Err(e) => ResearcherError::Http(e),
                    }
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    let message = response.text().await.unwrap_or_default();
                    ResearcherError::SearchApi { status, message }
                }
                Err(e) => ResearcherError::Http(e),
            };

            retries += 1;
            warn!(
                "Search request failed ({}/{}): {}",
                retries, self.policy.max_retries, failure
            );
            if retries >= self.policy.max_retries {
                return Err(failure);
            }

            tokio::time::sleep(delay).await;
            delay = self.policy.next_delay(delay);
        }
    }
}
