// file: src/llm/prompts.rs
// description: fixed prompt templates for classification, summaries, and gaps

/// Classification prompt. The reply contract is a single word, which the
/// caller maps by substring containment.
pub fn classification_prompt(abstract_text: &str) -> String {
    format!(
        "You are an academic assistant. Given the following research abstract, \
         classify it into one of these three types:\n\
         1. Qualitative\n\
         2. Quantitative\n\
         3. Unknown\n\
         \n\
         Return only one word: either qualitative, quantitative, or unknown.\n\
         \n\
         Abstract:\n\
         {}",
        abstract_text.trim()
    )
}

pub fn summarize_prompt(text: &str) -> String {
    format!("Summarize:\n{}", text)
}

pub fn gaps_prompt(joined_abstracts: &str) -> String {
    format!(
        "Identify 3 research gaps (TITLE: description):\n{}",
        joined_abstracts
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_trims_abstract() {
        let prompt = classification_prompt("  some abstract  ");
        assert!(prompt.contains("Abstract:\nsome abstract"));
        assert!(prompt.contains("Return only one word"));
    }

    #[test]
    fn test_summarize_prompt_shape() {
        assert_eq!(summarize_prompt("text"), "Summarize:\ntext");
    }

    #[test]
    fn test_gaps_prompt_shape() {
        let prompt = gaps_prompt("a\nb");
        assert!(prompt.starts_with("Identify 3 research gaps (TITLE: description):"));
        assert!(prompt.ends_with("a\nb"));
    }
}
