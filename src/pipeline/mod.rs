// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod runner;

pub use runner::{AnalysisRequest, CategoryFilter, ResearchPipeline, SummaryMode};
