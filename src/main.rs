// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use paper_summarize::utils::logging;
use paper_summarize::{
    AnalysisRequest, CategoryFilter, Config, FileSessionStore, PaperSearchClient, ReportExporter,
    ResearchPipeline, SessionStore, SummaryMode, TopicSession,
};
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "paper_summarize")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Research-paper discovery and summarization via Semantic Scholar and OpenRouter", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    All,
    Qualitative,
    Quantitative,
}

impl From<CategoryArg> for CategoryFilter {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::All => CategoryFilter::All,
            CategoryArg::Qualitative => CategoryFilter::Qualitative,
            CategoryArg::Quantitative => CategoryFilter::Quantitative,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Combined,
    Each,
}

impl From<ModeArg> for SummaryMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Combined => SummaryMode::Combined,
            ModeArg::Each => SummaryMode::Each,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for papers on a topic and list them
    Search {
        topic: String,

        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Run the full analysis pipeline and store the session
    Analyze {
        topic: String,

        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = CategoryArg::All)]
        category: CategoryArg,

        #[arg(long, value_enum, default_value_t = ModeArg::Combined)]
        mode: ModeArg,

        #[arg(long)]
        skip_gaps: bool,
    },

    /// Export the report from a stored session
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long)]
        json: bool,

        #[arg(long, value_name = "UUID")]
        session: Option<Uuid>,
    },

    /// Print source details from a stored session
    Sources {
        #[arg(long, value_name = "UUID")]
        session: Option<Uuid>,

        /// List every fetched paper, not only the analyzed selection
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    paper_summarize::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Paper Summarize research pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Search { topic, limit } => {
            cmd_search(&config, &topic, limit).await?;
        }
        Commands::Analyze {
            topic,
            limit,
            category,
            mode,
            skip_gaps,
        } => {
            cmd_analyze(
                &config,
                &topic,
                limit,
                category.into(),
                mode.into(),
                !skip_gaps,
            )
            .await?;
        }
        Commands::Export {
            output,
            pretty,
            json,
            session,
        } => {
            cmd_export(&config, output, pretty, json, session).await?;
        }
        Commands::Sources { session, all } => {
            cmd_sources(&config, session, all).await?;
        }
    }

    Ok(())
}

async fn cmd_search(config: &Config, topic: &str, limit: Option<usize>) -> Result<()> {
    let client = PaperSearchClient::new(config.search.clone(), config.retry.clone())
        .context("Failed to create search client")?;
    let limit = limit.unwrap_or(config.search.default_limit);

    let papers = client.fetch(topic, limit).await;

    if papers.is_empty() {
        println!("\nNo papers found for topic: \"{}\"", topic);
        println!("Try again with a broader topic.");
        return Ok(());
    }

    println!("\nFound {} papers on \"{}\"\n", papers.len(), topic);
    println!("{}", "=".repeat(80));
    for (idx, paper) in papers.iter().enumerate() {
        println!(
            "{}. {} ({})",
            idx + 1,
            paper.display_title(),
            paper.year.map_or_else(|| "?".to_string(), |y| y.to_string())
        );
        if let Some(url) = &paper.url {
            println!("   {}", url);
        }
        if !paper.has_abstract() {
            println!("   (No abstract available)");
        }
    }
    println!("{}", "=".repeat(80));

    Ok(())
}

async fn cmd_analyze(
    config: &Config,
    topic: &str,
    limit: Option<usize>,
    category: CategoryFilter,
    mode: SummaryMode,
    find_gaps: bool,
) -> Result<()> {
    let pipeline = ResearchPipeline::new(config).context("Failed to create pipeline")?;

    let request = AnalysisRequest {
        topic: topic.to_string(),
        limit: limit.unwrap_or(config.search.default_limit),
        category,
        mode,
        find_gaps,
    };

    let session = pipeline.run(&request).await.context("Analysis failed")?;

    if session.papers.is_empty() {
        println!("\nNo papers found for topic: \"{}\"", topic);
        println!("Try again with a broader topic.");
        return Ok(());
    }

    println!("\nResearch Types Found:");
    for line in session.distribution().summary_lines() {
        println!("{}", line);
    }

    if !session.sections.summary.is_empty() {
        println!("\nSummary:\n\n{}", session.sections.summary);
    }
    if !session.sections.research_gaps.is_empty() {
        println!("\nResearch Gaps:\n\n{}", session.sections.research_gaps);
    }

    let mut store = FileSessionStore::open(config.session.store_path.clone())
        .await
        .context("Failed to open session store")?;
    let session_id = session.id;
    store.put(session);
    store.save().await.context("Failed to save session")?;

    println!(
        "\n{}",
        logging::format_success(&format!("Session stored: {}", session_id))
    );
    println!("Run `paper_summarize export` to write the report.");

    Ok(())
}

async fn cmd_export(
    config: &Config,
    output: Option<PathBuf>,
    pretty: bool,
    json: bool,
    session_id: Option<Uuid>,
) -> Result<()> {
    let store = FileSessionStore::open(config.session.store_path.clone())
        .await
        .context("Failed to open session store")?;

    let session = resolve_session(&store, session_id)?;

    if session.sections.is_empty() {
        println!("The stored session has no report content. Run `analyze` first.");
        return Ok(());
    }

    let output_dir = output.unwrap_or_else(|| config.report.output_dir.clone());
    paper_summarize::Validator::validate_output_dir(&output_dir)
        .context("Invalid output directory")?;
    let exporter = ReportExporter::new(output_dir, config.report.report_title.clone())
        .context("Failed to create report exporter")?;

    let path = if json {
        exporter.export_json(&session.topic, &session.sections, pretty)?
    } else {
        exporter.export_text(&session.topic, &session.sections)?
    };

    println!(
        "{}",
        logging::format_success(&format!("Report written to {}", path.display()))
    );
    Ok(())
}

async fn cmd_sources(config: &Config, session_id: Option<Uuid>, all: bool) -> Result<()> {
    let store = FileSessionStore::open(config.session.store_path.clone())
        .await
        .context("Failed to open session store")?;

    let session = resolve_session(&store, session_id)?;

    println!("\nFormatted Sources:\n");
    if all {
        for paper in &session.papers {
            print!(
                "{}",
                paper.format_source_entry(session.classification_for(paper).as_str())
            );
        }
    } else if session.sections.sources.is_empty() {
        println!("(No sources to display)");
    } else {
        println!("{}", session.sections.sources);
    }

    Ok(())
}

fn resolve_session(
    store: &FileSessionStore,
    session_id: Option<Uuid>,
) -> Result<&TopicSession> {
    let session = match session_id {
        Some(id) => store.get(&id),
        None => store.latest(),
    };

    session.ok_or_else(|| {
        anyhow::anyhow!("No stored session found. Run `analyze` on a topic first.")
    })
}
