// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ResearcherError, Result};
use crate::retry::RetryPolicy;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub llm: LlmConfig,
    pub retry: RetryPolicy,
    pub session: SessionConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub fields: String,
    pub default_limit: usize,
    pub request_timeout_secs: u64,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub referer: String,
    pub app_title: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub store_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub report_title: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PAPER_SUMMARIZE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ResearcherError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ResearcherError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                base_url: "https://api.semanticscholar.org/graph/v1".to_string(),
                fields: "title,abstract,year,url".to_string(),
                default_limit: 100,
                request_timeout_secs: 30,
                api_key: None,
            },
            llm: LlmConfig {
                base_url: "https://openrouter.ai/api/v1".to_string(),
                model: "google/gemini-2.5-flash-preview-05-20".to_string(),
                api_key: None,
                referer: "https://your-site.com".to_string(),
                app_title: "AI Researcher".to_string(),
                request_timeout_secs: 30,
            },
            retry: RetryPolicy::default(),
            session: SessionConfig {
                store_path: PathBuf::from("data/sessions.json"),
            },
            report: ReportConfig {
                output_dir: PathBuf::from("./reports"),
                report_title: "Research Report".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.search.base_url)?;
        Validator::validate_url(&self.llm.base_url)?;

        if self.search.default_limit == 0 {
            return Err(ResearcherError::Config(
                "search.default_limit must be greater than 0".to_string(),
            ));
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err(ResearcherError::Config(
                "retry.backoff_multiplier must be at least 1.0".to_string(),
            ));
        }

        if self.retry.max_delay_ms < self.retry.initial_delay_ms {
            return Err(ResearcherError::Config(
                "retry.max_delay_ms must not be below retry.initial_delay_ms".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.fields, "title,abstract,year,url");
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut config = Config::default_config();
        config.search.default_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = Config::default_config();
        config.llm.base_url = "openrouter.ai/api/v1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shrinking_backoff_rejected() {
        let mut config = Config::default_config();
        config.retry.backoff_multiplier = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_delay_below_initial_rejected() {
        let mut config = Config::default_config();
        config.retry.max_delay_ms = 100;
        config.retry.initial_delay_ms = 1_000;
        assert!(config.validate().is_err());
    }
}
