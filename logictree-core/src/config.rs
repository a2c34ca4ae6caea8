use crate::error::ConfigError;
use crate::keywords::{ConditionKeywords, DEFAULT_CONDITION_KEYWORDS};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which document backend turns markup into an element tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentBackend {
    /// Lenient HTML5 parsing; tolerates hand-authored markup
    #[default]
    Html,
    /// Well-formed XHTML/XML only; malformed input is an error
    Xhtml,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Keywords a condition must start with; action text must not contain them
    pub condition_indicators: Vec<String>,
    /// Drop the first row of the outermost table when it carries header cells
    pub skip_headers: bool,
    /// Turn unparseable rows and validation issues into fatal errors
    pub strict_validation: bool,
    /// JSON output indentation width
    pub indent_level: usize,
    /// Input/output text encoding label
    pub encoding: String,
    pub backend: DocumentBackend,
    /// Nested tables deeper than this fail their row with a ParseError
    pub max_depth: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            condition_indicators: DEFAULT_CONDITION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            skip_headers: true,
            strict_validation: false,
            indent_level: 2,
            encoding: "utf-8".to_string(),
            backend: DocumentBackend::Html,
            max_depth: 64,
        }
    }
}

impl ConverterConfig {
    /// Load config from a YAML file; unspecified fields keep their defaults
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConverterConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                warn!(path = p, error = %e, "failed to load config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn keywords(&self) -> Result<ConditionKeywords, ConfigError> {
        ConditionKeywords::new(&self.condition_indicators)
    }

    /// Only UTF-8 is supported; accepts the common spellings of its label.
    pub fn check_encoding(&self) -> Result<(), ConfigError> {
        match self.encoding.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "utf-8-sig" => Ok(()),
            _ => Err(ConfigError::UnsupportedEncoding(self.encoding.clone())),
        }
    }
}
