// file: src/analysis/summarizer.rs
// description: per-paper and combined abstract summarization

use crate::llm::{prompts, CompletionClient};
use crate::models::CompletionOutcome;
use crate::utils::{join_abstracts, truncate_chars, MAX_PROMPT_CHARS};
use tracing::debug;

const SINGLE_MAX_TOKENS: u32 = 200;
const COMBINED_MAX_TOKENS: u32 = 300;
const SUMMARY_TEMPERATURE: f64 = 0.3;

pub struct Summarizer<'a> {
    llm: &'a CompletionClient,
}

impl<'a> Summarizer<'a> {
    pub fn new(llm: &'a CompletionClient) -> Self {
        Self { llm }
    }

    /// Summarize one abstract. Callers skip papers without an abstract.
    pub async fn summarize_abstract(&self, abstract_text: &str) -> CompletionOutcome {
        let prompt = prompts::summarize_prompt(abstract_text);
        self.llm
            .complete(&prompt, SINGLE_MAX_TOKENS, SUMMARY_TEMPERATURE)
            .await
    }

    /// Summarize all abstracts together. The joined payload is truncated to
    /// the provider input cap. Returns None when no abstract is non-empty.
    pub async fn summarize_combined<'b, I>(&self, abstracts: I) -> Option<CompletionOutcome>
    where
        I: IntoIterator<Item = &'b str>,
    {
        let joined = join_abstracts(abstracts)?;
        let payload = truncate_chars(&joined, MAX_PROMPT_CHARS);
        debug!(
            "Combined summary payload: {} of {} chars",
            payload.chars().count(),
            joined.chars().count()
        );

        let prompt = prompts::summarize_prompt(payload);
        Some(
            self.llm
                .complete(&prompt, COMBINED_MAX_TOKENS, SUMMARY_TEMPERATURE)
                .await,
        )
    }
}
