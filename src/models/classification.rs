// file: src/models/classification.rs
// description: research type labels and per-session type distribution
// reference: derived labels, never persisted beyond the session

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Methodology label assigned to an abstract by the completion backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResearchType {
    Qualitative,
    Quantitative,
    Unknown,
}

impl ResearchType {
    /// Map a raw model reply onto a label by substring containment.
    ///
    /// "qualitative" is checked before "quantitative"; a reply containing
    /// both resolves to Qualitative. That precedence is a fixed contract
    /// relied on by callers, not an ordering accident.
    pub fn from_reply(reply: &str) -> Self {
        let reply = reply.to_lowercase();
        if reply.contains("qualitative") {
            return ResearchType::Qualitative;
        }
        if reply.contains("quantitative") {
            return ResearchType::Quantitative;
        }
        ResearchType::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchType::Qualitative => "qualitative",
            ResearchType::Quantitative => "quantitative",
            ResearchType::Unknown => "unknown",
        }
    }

    /// Capitalized form for user-facing listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResearchType::Qualitative => "Qualitative",
            ResearchType::Quantitative => "Quantitative",
            ResearchType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ResearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts how many papers landed in each label for one topic query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDistribution {
    counts: HashMap<ResearchType, usize>,
}

impl TypeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: ResearchType) {
        *self.counts.entry(label).or_insert(0) += 1;
    }

    pub fn count(&self, label: ResearchType) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Stable-order lines for display, omitting empty labels.
    pub fn summary_lines(&self) -> Vec<String> {
        [
            ResearchType::Qualitative,
            ResearchType::Quantitative,
            ResearchType::Unknown,
        ]
        .iter()
        .filter(|label| self.count(**label) > 0)
        .map(|label| format!("- {}: {}", label.display_name(), self.count(*label)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reply_mapping_case_insensitive() {
        assert_eq!(
            ResearchType::from_reply("Quantitative"),
            ResearchType::Quantitative
        );
        assert_eq!(
            ResearchType::from_reply("  QUALITATIVE.\n"),
            ResearchType::Qualitative
        );
    }

    #[test]
    fn test_reply_mapping_substring() {
        assert_eq!(
            ResearchType::from_reply("this abstract is clearly quantitative in nature"),
            ResearchType::Quantitative
        );
    }

    #[test]
    fn test_ambiguous_reply_resolves_to_qualitative() {
        // both labels present: qualitative wins by fixed precedence
        assert_eq!(
            ResearchType::from_reply("mixed qualitative and quantitative design"),
            ResearchType::Qualitative
        );
    }

    #[test]
    fn test_unrecognized_reply_is_unknown() {
        assert_eq!(ResearchType::from_reply("3"), ResearchType::Unknown);
        assert_eq!(ResearchType::from_reply(""), ResearchType::Unknown);
    }

    #[test]
    fn test_distribution_counts_and_lines() {
        let mut dist = TypeDistribution::new();
        dist.add(ResearchType::Qualitative);
        dist.add(ResearchType::Qualitative);
        dist.add(ResearchType::Unknown);

        assert_eq!(dist.total(), 3);
        assert_eq!(dist.count(ResearchType::Qualitative), 2);
        assert_eq!(dist.count(ResearchType::Quantitative), 0);

        let lines = dist.summary_lines();
        assert_eq!(lines, vec!["- Qualitative: 2", "- Unknown: 1"]);
    }
}
