use crate::rules::ValidationReport;
use thiserror::Error;

/// A table row or nested table that could not be turned into nodes.
///
/// Only surfaces to callers in strict mode; otherwise the row is logged and
/// contributes zero nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse table at depth {depth}: {message}")]
pub struct ParseError {
    pub message: String,
    pub depth: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, depth: usize) -> Self {
        Self {
            message: message.into(),
            depth,
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed XHTML: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one condition indicator keyword is required")]
    NoKeywords,
    #[error("invalid condition keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("unsupported text encoding '{0}' (only UTF-8 is supported)")]
    UnsupportedEncoding(String),
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("logic tree validation failed with {} error(s)", .0.issues.len())]
    Validation(ValidationReport),
    #[error("no table found in document")]
    NoTable,
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
