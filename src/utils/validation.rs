// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{ResearcherError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_topic(topic: &str) -> Result<()> {
        if topic.trim().is_empty() {
            return Err(ResearcherError::Validation(
                "Topic cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(ResearcherError::Validation(
                "Paper limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ResearcherError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(ResearcherError::Validation(
                "Output directory cannot be empty".to_string(),
            ));
        }

        if path.exists() && !path.is_dir() {
            return Err(ResearcherError::Validation(format!(
                "Output path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_topic() {
        assert!(Validator::validate_topic("machine learning").is_ok());
        assert!(Validator::validate_topic("").is_err());
        assert!(Validator::validate_topic("   ").is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(Validator::validate_limit(1).is_ok());
        assert!(Validator::validate_limit(100).is_ok());
        assert!(Validator::validate_limit(0).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_output_dir() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_output_dir(temp.path()).is_ok());

        let file_path = temp.path().join("file.txt");
        std::fs::write(&file_path, "x").unwrap();
        assert!(Validator::validate_output_dir(&file_path).is_err());

        // nonexistent dirs are fine, the exporter creates them
        assert!(Validator::validate_output_dir(&temp.path().join("new")).is_ok());
    }
}
