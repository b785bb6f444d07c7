// file: src/analysis/gaps.rs
// description: research gap discovery and reply parsing

use crate::llm::{prompts, CompletionClient};
use crate::models::{CompletionOutcome, Gap};
use crate::utils::{join_abstracts, truncate_chars, MAX_PROMPT_CHARS};
use lazy_static::lazy_static;
use regex::Regex;

const GAPS_MAX_TOKENS: u32 = 400;
const GAPS_TEMPERATURE: f64 = 0.4;

lazy_static! {
    static ref BLOCK_SPLIT: Regex =
        Regex::new(r"\n\s*\n|---+").expect("BLOCK_SPLIT regex is valid");
    static ref TITLE_MARKUP: Regex =
        Regex::new(r"(?i)[*#]+|\bTITLE\b").expect("TITLE_MARKUP regex is valid");
}

pub struct GapFinder<'a> {
    llm: &'a CompletionClient,
}

impl<'a> GapFinder<'a> {
    pub fn new(llm: &'a CompletionClient) -> Self {
        Self { llm }
    }

    /// Ask the backend for research gaps over the joined abstracts.
    /// Returns None when no abstract is non-empty.
    pub async fn find<'b, I>(&self, abstracts: I) -> Option<CompletionOutcome>
    where
        I: IntoIterator<Item = &'b str>,
    {
        let joined = join_abstracts(abstracts)?;
        let payload = truncate_chars(&joined, MAX_PROMPT_CHARS);
        let prompt = prompts::gaps_prompt(payload);

        Some(self.llm.complete(&prompt, GAPS_MAX_TOKENS, GAPS_TEMPERATURE).await)
    }

    /// Parse a raw gaps reply into records. Blocks are separated by blank
    /// lines or horizontal rules; each must carry a `TITLE: description`
    /// pair. Markup around the title is stripped.
    pub fn parse_gaps(raw: &str) -> Vec<Gap> {
        BLOCK_SPLIT
            .split(raw)
            .filter_map(|block| {
                let block = block.trim();
                let (title, description) = block.split_once(':')?;
                let title = TITLE_MARKUP.replace_all(title, "").trim().to_string();
                let description = description.trim().to_string();

                if title.is_empty() || description.is_empty() {
                    return None;
                }
                Some(Gap::new(title, description))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_gaps_blank_line_blocks() {
        let raw = "**Scalability**: existing methods break down at scale.\n\n\
                   **Reproducibility**: few studies publish artifacts.";
        let gaps = GapFinder::parse_gaps(raw);

        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].title, "Scalability");
        assert_eq!(
            gaps[0].description,
            "existing methods break down at scale."
        );
        assert_eq!(gaps[1].title, "Reproducibility");
    }

    #[test]
    fn test_parse_gaps_rule_separated_blocks() {
        let raw = "Longitudinal data: no study exceeds one year.\n---\n\
                   Cross-domain transfer: results stay within one domain.";
        let gaps = GapFinder::parse_gaps(raw);

        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].title, "Longitudinal data");
        assert_eq!(gaps[1].title, "Cross-domain transfer");
    }

    #[test]
    fn test_parse_gaps_ignores_blocks_without_separator() {
        let raw = "preamble with no colon\n\nReal gap: something missing.";
        let gaps = GapFinder::parse_gaps(raw);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].title, "Real gap");
    }

    #[test]
    fn test_parse_gaps_empty_reply() {
        assert!(GapFinder::parse_gaps("").is_empty());
        assert!(GapFinder::parse_gaps("\n\n---\n\n").is_empty());
    }
}
