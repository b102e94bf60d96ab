// ABOUTME: Configurable lexical convention for embedded expression markers
// ABOUTME: Delimiters come from defaults or from a caller-supplied options mapping

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::compiler::{CompileError, Result};

fn default_start_delimiter() -> String {
    "#{".to_string()
}

fn default_end_delimiter() -> String {
    "}".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOptions {
    #[serde(default = "default_start_delimiter")]
    pub start_delimiter: String,
    #[serde(default = "default_end_delimiter")]
    pub end_delimiter: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            start_delimiter: default_start_delimiter(),
            end_delimiter: default_end_delimiter(),
        }
    }
}

impl TemplateOptions {
    /// Create options with explicit delimiters
    pub fn new(start_delimiter: &str, end_delimiter: &str) -> Result<Self> {
        let options = Self {
            start_delimiter: start_delimiter.to_string(),
            end_delimiter: end_delimiter.to_string(),
        };
        options.validate()?;
        Ok(options)
    }

    /// Build options from a string-to-string options mapping; unknown keys are ignored
    pub fn from_map(options: &HashMap<String, String>) -> Result<Self> {
        let mut resolved = Self::default();
        if let Some(start) = options.get("start_delimiter") {
            resolved.start_delimiter = start.clone();
        }
        if let Some(end) = options.get("end_delimiter") {
            resolved.end_delimiter = end.clone();
        }
        resolved.validate()?;
        Ok(resolved)
    }

    pub fn validate(&self) -> Result<()> {
        for (label, delimiter) in [
            ("start_delimiter", &self.start_delimiter),
            ("end_delimiter", &self.end_delimiter),
        ] {
            if delimiter.is_empty() {
                return Err(CompileError::InvalidDelimiter {
                    message: format!("{} must not be empty", label),
                });
            }
            if delimiter.contains('\n') {
                return Err(CompileError::InvalidDelimiter {
                    message: format!("{} must not contain a newline", label),
                });
            }
        }
        Ok(())
    }
}
