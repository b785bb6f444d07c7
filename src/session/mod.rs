// file: src/session/mod.rs
// description: topic session state and session store abstraction
// reference: injected key-value store replacing a module-level cache

pub mod store;

pub use store::{FileSessionStore, InMemorySessionStore, SessionStore};

use crate::models::{Paper, ReportSections, ResearchType, TypeDistribution};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use uuid::Uuid;

/// Everything one topic query produced: the fetched papers, per-abstract
/// classifications, and the finished report sections. Transient by design;
/// persisted only so a later CLI invocation can export the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSession {
    pub id: Uuid,
    pub topic: String,
    pub created_at: String,
    pub created_at_ms: i64,
    pub papers: Vec<Paper>,
    /// Classification per abstract, keyed by the abstract's SHA-256 hex.
    pub classifications: HashMap<String, ResearchType>,
    pub sections: ReportSections,
}

impl TopicSession {
    pub fn new(
        topic: impl Into<String>,
        papers: Vec<Paper>,
        classifications: HashMap<String, ResearchType>,
        sections: ReportSections,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            created_at: now.to_rfc3339(),
            created_at_ms: now.timestamp_millis(),
            papers,
            classifications,
            sections,
        }
    }

    /// Stable key for one abstract's classification entry.
    pub fn abstract_key(abstract_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(abstract_text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn classification_for(&self, paper: &Paper) -> ResearchType {
        self.classifications
            .get(&Self::abstract_key(paper.abstract_or_empty()))
            .copied()
            .unwrap_or(ResearchType::Unknown)
    }

    pub fn distribution(&self) -> TypeDistribution {
        let mut distribution = TypeDistribution::new();
        for paper in &self.papers {
            distribution.add(self.classification_for(paper));
        }
        distribution
    }
}
