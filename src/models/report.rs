// file: src/models/report.rs
// description: report sections and research gap records
// reference: plain-text blocks consumed by report export

use serde::{Deserialize, Serialize};

/// One research gap surfaced by the completion backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gap {
    pub title: String,
    pub description: String,
}

impl Gap {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The three HTML-stripped text blocks a report is built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSections {
    pub summary: String,
    pub research_gaps: String,
    pub sources: String,
}

impl ReportSections {
    pub fn new(
        summary: impl Into<String>,
        research_gaps: impl Into<String>,
        sources: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            research_gaps: research_gaps.into(),
            sources: sources.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
            && self.research_gaps.trim().is_empty()
            && self.sources.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sections_detected() {
        assert!(ReportSections::default().is_empty());
        assert!(ReportSections::new("  ", "\n", "").is_empty());
        assert!(!ReportSections::new("summary text", "", "").is_empty());
    }
}
