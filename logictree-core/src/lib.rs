// Logictree Core Library
//
// Converts visually nested decision tables into canonical condition/action
// trees and validates them. Main interface is `Converter`.

pub mod config;
pub mod documents;
pub mod error;
pub mod keywords;
pub mod processor;
pub mod rules;
pub mod trees;
pub mod types;

// Re-export main types and functions for easy use
pub use config::{ConverterConfig, DocumentBackend};
pub use documents::{DocumentElement, HtmlDocument, XhtmlDocument};
pub use error::{ConfigError, ConversionError, DocumentError, ParseError};
pub use keywords::ConditionKeywords;
pub use processor::{Conversion, Converter};
pub use rules::{TreeValidator, ValidationIssue, ValidationReport};
pub use trees::{group_claim_types, OutputFormat, TreeBuilder, TreeStats};
pub use types::*;
