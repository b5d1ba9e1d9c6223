// file: src/utils/validation.rs
// description: input validation helpers for configuration values
// reference: input validation patterns

use crate::error::{ExportError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ExportError::Configuration(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Host identifiers and engine names are interpolated into URLs.
    pub fn validate_path_segment(name: &str, value: &str) -> Result<()> {
        if value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '\\'))
        {
            return Err(ExportError::Configuration(format!(
                "{} contains characters not allowed in a URL segment: {:?}",
                name, value
            )));
        }
        Ok(())
    }

    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(ExportError::Configuration(format!(
                "Output path is not a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }
}
