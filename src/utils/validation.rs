// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{ChatbotError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_dataset_file(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ChatbotError::Validation(format!(
                "Dataset file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(ChatbotError::Validation(format!(
                "Dataset path is not a file: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(()),
            _ => Err(ChatbotError::Validation(format!(
                "Dataset file is not a JSON file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ChatbotError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(ChatbotError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn validate_sha256_hex(digest: &str) -> Result<()> {
        if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChatbotError::Validation(
                "Expected a 64 character hex SHA-256 digest".to_string(),
            ));
        }
        Ok(())
    }

    /// `<salt>$<hex digest>` with an alphanumeric salt.
    pub fn validate_password_hash(value: &str) -> Result<()> {
        let Some((salt, digest)) = value.split_once('$') else {
            return Err(ChatbotError::Validation(
                "Expected a password hash in the form <salt>$<digest>".to_string(),
            ));
        };

        if salt.is_empty() || !salt.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ChatbotError::Validation(
                "Password hash salt must be non-empty and alphanumeric".to_string(),
            ));
        }

        Self::validate_sha256_hex(digest)
    }

    /// Shorten text for log lines without splitting a character.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}
