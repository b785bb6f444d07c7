// file: src/models/paper.rs
// description: paper record returned by the scholarly search API
// reference: https://api.semanticscholar.org/api-docs/graph

use serde::{Deserialize, Serialize};

/// One search hit. Immutable once fetched; every field except the title is
/// optional in the upstream response and maps to `None` rather than failing
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paper {
    #[serde(default)]
    pub title: String,

    /// Abstract text. May be missing or empty; an empty abstract classifies
    /// as unknown without a completion call.
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub year: Option<i32>,

    pub url: Option<String>,
}

impl Paper {
    pub fn new(
        title: impl Into<String>,
        abstract_text: Option<String>,
        year: Option<i32>,
        url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text,
            year,
            url,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "[No Title]"
        } else {
            &self.title
        }
    }

    /// Abstract as a plain &str, empty when absent.
    pub fn abstract_or_empty(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    pub fn has_abstract(&self) -> bool {
        !self.abstract_or_empty().trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.abstract_or_empty().chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.abstract_or_empty().split_whitespace().count()
    }

    /// Page estimate at ~500 words per page, one decimal.
    pub fn estimated_pages(&self) -> f64 {
        round_one_decimal(self.word_count() as f64 / 500.0)
    }

    /// Reading time estimate at ~200 words per minute, one decimal.
    pub fn reading_time_minutes(&self) -> f64 {
        round_one_decimal(self.word_count() as f64 / 200.0)
    }

    /// Formatted source block for reports and the `sources` command.
    pub fn format_source_entry(&self, category: &str) -> String {
        format!(
            "--------------------------------------------------\n\
             Title     : {}\n\
             Type      : {}\n\
             Published : {}\n\
             Read Time : {} min\n\
             Pages     : ~{}\n\
             Characters: {}\n\
             URL       : {}\n",
            self.display_title(),
            category,
            self.year.map_or_else(|| "?".to_string(), |y| y.to_string()),
            self.reading_time_minutes(),
            self.estimated_pages(),
            self.char_count(),
            self.url.as_deref().unwrap_or("[No URL]"),
        )
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_paper() -> Paper {
        Paper::new(
            "Grounded Theory in Practice",
            Some("A study of qualitative methods. ".repeat(100)),
            Some(2021),
            Some("https://example.org/paper".to_string()),
        )
    }

    #[test]
    fn test_optional_fields_deserialize_as_none() {
        let paper: Paper = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(paper.title, "Only a title");
        assert_eq!(paper.abstract_text, None);
        assert_eq!(paper.year, None);
        assert_eq!(paper.url, None);
    }

    #[test]
    fn test_abstract_field_rename() {
        let paper: Paper =
            serde_json::from_str(r#"{"title": "T", "abstract": "Some text", "year": 2020}"#)
                .unwrap();
        assert_eq!(paper.abstract_text.as_deref(), Some("Some text"));
        assert_eq!(paper.year, Some(2020));
    }

    #[test]
    fn test_missing_title_displays_placeholder() {
        let paper: Paper = serde_json::from_str(r#"{"year": 1999}"#).unwrap();
        assert_eq!(paper.display_title(), "[No Title]");
    }

    #[test]
    fn test_whitespace_abstract_counts_as_missing() {
        let paper = Paper::new("T", Some("   ".to_string()), None, None);
        assert!(!paper.has_abstract());
    }

    #[test]
    fn test_reading_metrics() {
        let paper = sample_paper();
        assert_eq!(paper.word_count(), 500);
        assert_eq!(paper.estimated_pages(), 1.0);
        assert_eq!(paper.reading_time_minutes(), 2.5);
    }

    #[test]
    fn test_source_entry_contains_fallbacks() {
        let paper = Paper::new("", None, None, None);
        let entry = paper.format_source_entry("unknown");
        assert!(entry.contains("[No Title]"));
        assert!(entry.contains("[No URL]"));
        assert!(entry.contains("Published : ?"));
    }
}
