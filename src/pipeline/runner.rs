// file: src/pipeline/runner.rs
// description: coordinates fetching, classification, summaries, and gaps
// reference: orchestrates the sequential topic analysis workflow

use crate::analysis::{AbstractClassifier, GapFinder, Summarizer};
use crate::config::Config;
use crate::error::Result;
use crate::llm::CompletionClient;
use crate::models::{Paper, ReportSections, ResearchType};
use crate::search::PaperSearchClient;
use crate::session::TopicSession;
use crate::utils::{strip_html, Validator};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use tracing::{info, warn};

/// Which classified subset to analyze further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Qualitative,
    Quantitative,
}

impl CategoryFilter {
    pub fn matches(&self, label: ResearchType) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Qualitative => label == ResearchType::Qualitative,
            CategoryFilter::Quantitative => label == ResearchType::Quantitative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Combined,
    Each,
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub topic: String,
    pub limit: usize,
    pub category: CategoryFilter,
    pub mode: SummaryMode,
    pub find_gaps: bool,
}

/// Runs one topic query end to end. External calls are issued one at a
/// time; each retry loop blocks the task for its sleep, nothing runs
/// concurrently in the core.
pub struct ResearchPipeline {
    search: PaperSearchClient,
    llm: CompletionClient,
    show_progress: bool,
}

impl ResearchPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            search: PaperSearchClient::new(config.search.clone(), config.retry.clone())?,
            llm: CompletionClient::new(config.llm.clone(), config.retry.clone())?,
            show_progress: true,
        })
    }

    /// Constructor-injection seam: tests pass clients pointed at mocks.
    pub fn with_clients(search: PaperSearchClient, llm: CompletionClient) -> Self {
        Self {
            search,
            llm,
            show_progress: false,
        }
    }

    pub async fn run(&self, request: &AnalysisRequest) -> Result<TopicSession> {
        Validator::validate_topic(&request.topic)?;
        Validator::validate_limit(request.limit)?;

        info!("Fetching papers for topic: {}", request.topic);
        let papers = self.search.fetch(&request.topic, request.limit).await;
        info!("Total research papers found: {}", papers.len());

        if papers.is_empty() {
            warn!("No papers found; try a broader topic");
            return Ok(TopicSession::new(
                request.topic.clone(),
                vec![],
                HashMap::new(),
                ReportSections::default(),
            ));
        }

        let classifications = self.classify_papers(&papers).await;

        let mut session = TopicSession::new(
            request.topic.clone(),
            papers,
            classifications,
            ReportSections::default(),
        );

        for line in session.distribution().summary_lines() {
            info!("{}", line);
        }

        let selected: Vec<&Paper> = session
            .papers
            .iter()
            .filter(|p| request.category.matches(session.classification_for(p)))
            .collect();
        info!("{} papers selected from chosen category", selected.len());

        let summary = self.build_summary(&selected, request.mode).await;
        let gaps = if request.find_gaps {
            self.build_gaps(&selected).await
        } else {
            String::new()
        };
        let sources = self.build_sources(&session, &selected);
        drop(selected);

        session.sections = ReportSections::new(
            strip_html(&summary),
            strip_html(&gaps),
            strip_html(&sources),
        );
        Ok(session)
    }

    async fn classify_papers(&self, papers: &[Paper]) -> HashMap<String, ResearchType> {
        info!("Analyzing research types for {} papers", papers.len());
        let classifier = AbstractClassifier::new(&self.llm);
        let bar = self.progress_bar(papers.len() as u64);

        let mut classifications = HashMap::new();
        for paper in papers {
            let abstract_text = paper.abstract_or_empty();
            let key = TopicSession::abstract_key(abstract_text);
            // identical abstracts share one classification call
            if !classifications.contains_key(&key) {
                let label = classifier.classify(abstract_text).await;
                classifications.insert(key, label);
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        classifications
    }

    async fn build_summary(&self, selected: &[&Paper], mode: SummaryMode) -> String {
        let summarizer = Summarizer::new(&self.llm);

        match mode {
            SummaryMode::Combined => {
                let abstracts = selected.iter().map(|p| p.abstract_or_empty());
                match summarizer.summarize_combined(abstracts).await {
                    Some(outcome) => outcome.into_text(),
                    None => "No abstracts to summarize.".to_string(),
                }
            }
            SummaryMode::Each => {
                let mut blocks = Vec::with_capacity(selected.len());
                for paper in selected {
                    let title = paper.display_title();
                    let body = if paper.has_abstract() {
                        summarizer
                            .summarize_abstract(paper.abstract_or_empty())
                            .await
                            .into_text()
                    } else {
                        "(No abstract available)".to_string()
                    };
                    blocks.push(format!(
                        "{}\n{}\n{}",
                        title,
                        "-".repeat(title.chars().count()),
                        body
                    ));
                }
                blocks.join("\n\n")
            }
        }
    }

    async fn build_gaps(&self, selected: &[&Paper]) -> String {
        let finder = GapFinder::new(&self.llm);
        let abstracts = selected.iter().map(|p| p.abstract_or_empty());

        match finder.find(abstracts).await {
            Some(outcome) => {
                let text = outcome.into_text();
                let parsed = GapFinder::parse_gaps(&text);
                info!("Identified {} research gaps", parsed.len());
                text
            }
            None => {
                warn!("No abstracts available for gap discovery");
                String::new()
            }
        }
    }

    fn build_sources(&self, session: &TopicSession, selected: &[&Paper]) -> String {
        selected
            .iter()
            .map(|paper| {
                paper.format_source_entry(session.classification_for(paper).as_str())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} classified")
                .expect("progress template is valid")
                .progress_chars("=>-"),
        );
        bar
    }
}
