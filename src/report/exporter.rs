// file: src/report/exporter.rs
// description: plain-text and json report export

use crate::error::Result;
use crate::models::ReportSections;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    topic: &'a str,
    exported_at: String,
    sections: &'a ReportSections,
}

/// Renders finished report sections into files. The input blocks are
/// already HTML-stripped plain text; layout here stays deliberately dumb.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_dir: PathBuf,
    title: String,
}

impl ReportExporter {
    pub fn new(output_dir: impl Into<PathBuf>, title: impl Into<String>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            title: title.into(),
        })
    }

    /// Write the text report, returning its path. Empty sections are
    /// skipped rather than rendered as bare headings.
    pub fn export_text(&self, topic: &str, sections: &ReportSections) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("{}_research_report.txt", slugify(topic)));

        let mut body = String::new();
        body.push_str(&self.title);
        body.push('\n');
        body.push_str(&"=".repeat(self.title.chars().count()));
        body.push_str(&format!(
            "\nTopic: {}\nGenerated: {}\n\n",
            topic,
            Utc::now().to_rfc3339()
        ));

        push_block(&mut body, "Summary", &sections.summary);
        push_block(&mut body, "Research Gaps", &sections.research_gaps);
        push_block(&mut body, "Sources", &sections.sources);

        fs::write(&path, body)?;
        info!("Wrote report to {}", path.display());
        Ok(path)
    }

    pub fn export_json(
        &self,
        topic: &str,
        sections: &ReportSections,
        pretty: bool,
    ) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("{}_research_report.json", slugify(topic)));

        let report = JsonReport {
            topic,
            exported_at: Utc::now().to_rfc3339(),
            sections,
        };
        let contents = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };

        fs::write(&path, contents)?;
        info!("Wrote JSON report to {}", path.display());
        Ok(path)
    }
}

fn push_block(body: &mut String, heading: &str, content: &str) {
    if content.trim().is_empty() {
        return;
    }
    body.push_str(heading);
    body.push('\n');
    body.push_str(&"-".repeat(heading.chars().count()));
    body.push('\n');
    body.push_str(content.trim());
    body.push_str("\n\n");
}

fn slugify(topic: &str) -> String {
    let slug: String = topic
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    let trimmed = slug.trim_matches('_');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}
