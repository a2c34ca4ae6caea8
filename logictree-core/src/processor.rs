use crate::config::{ConverterConfig, DocumentBackend};
use crate::documents::{DocumentElement, HtmlDocument, XhtmlDocument};
use crate::error::ConversionError;
use crate::rules::{TreeValidator, ValidationReport};
use crate::trees::{group_claim_types, TreeBuilder, TreeStats};
use crate::types::*;
use std::time::Instant;
use tracing::{info, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of one conversion: the tree plus what the validator said about it.
///
/// In lenient mode `report` may carry issues; in strict mode a conversion
/// with issues never gets this far.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: LogicTree,
    pub report: ValidationReport,
    pub stats: TreeStats,
}

/// Document → root table → nodes → claim-type grouping → optional root
/// wrap → validation.
pub struct Converter {
    config: ConverterConfig,
    builder: TreeBuilder,
    validator: TreeValidator,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Result<Self, ConversionError> {
        config.check_encoding()?;
        let builder = TreeBuilder::new(&config)?;
        let validator = TreeValidator::from_config(&config)?;
        Ok(Self {
            config,
            builder,
            validator,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Decode raw input bytes (UTF-8, optional BOM) and convert them.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        root_condition: Option<&str>,
    ) -> Result<Conversion, ConversionError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let markup = std::str::from_utf8(bytes)?;
        self.convert(markup, root_condition)
    }

    /// Parse `markup` with the configured backend and convert its first table.
    pub fn convert(
        &self,
        markup: &str,
        root_condition: Option<&str>,
    ) -> Result<Conversion, ConversionError> {
        match self.config.backend {
            DocumentBackend::Html => {
                let document = HtmlDocument::parse(markup);
                self.convert_document(&document.root(), root_condition)
            }
            DocumentBackend::Xhtml => {
                let document = XhtmlDocument::parse(markup)?;
                self.convert_document(&document.root(), root_condition)
            }
        }
    }

    /// Convert an already-parsed document from any backend.
    pub fn convert_document<E: DocumentElement>(
        &self,
        root: &E,
        root_condition: Option<&str>,
    ) -> Result<Conversion, ConversionError> {
        let start_time = Instant::now();
        let table = root.find_first("table").ok_or(ConversionError::NoTable)?;

        info!("starting conversion");
        let nodes = self.builder.build(&table)?;
        info!(count = nodes.len(), "found top-level nodes");

        let grouped = group_claim_types(nodes);
        let tree = LogicTree::assemble(grouped, root_condition);

        let report = self.validator.validate_tree(&tree);
        if !report.is_valid() {
            for issue in &report.issues {
                warn!(path = issue.path(), "validation error: {issue}");
            }
            if self.config.strict_validation {
                return Err(ConversionError::Validation(report));
            }
        }

        let stats = tree.stats();
        info!(
            nodes = stats.total_nodes,
            conditions = stats.conditions,
            actions = stats.actions,
            max_depth = stats.max_depth,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "conversion complete"
        );

        Ok(Conversion {
            tree,
            report,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO: &str = "<table><tr><th>Condition</th><th>Action</th></tr>\
        <tr><td>If Claim Type is Auto</td><td>Pay claim</td></tr></table>";

    fn converter() -> Converter {
        Converter::new(ConverterConfig::default()).unwrap()
    }

    #[test]
    fn converts_single_row_table() {
        let conversion = converter().convert(AUTO, None).unwrap();
        assert_eq!(
            conversion.tree,
            LogicTree::Forest(vec![Node::leaf("If Claim Type is Auto", "Pay claim")])
        );
        assert!(conversion.report.is_valid());
        assert_eq!(conversion.stats.total_nodes, 1);
    }

    #[test]
    fn missing_table_is_fatal() {
        let err = converter().convert("<p>nothing to convert</p>", None).unwrap_err();
        assert!(matches!(err, ConversionError::NoTable));
    }

    #[test]
    fn strict_mode_rejects_invalid_tree() {
        let config = ConverterConfig {
            strict_validation: true,
            ..ConverterConfig::default()
        };
        let converter = Converter::new(config).unwrap();
        let err = converter
            .convert(AUTO, Some("Claims"))
            .unwrap_err();
        match err {
            ConversionError::Validation(report) => {
                assert_eq!(report.issues[0].path(), "root");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn lenient_mode_returns_tree_with_issues() {
        let conversion = converter().convert(AUTO, Some("Claims")).unwrap();
        assert!(matches!(conversion.tree, LogicTree::Rooted(_)));
        assert_eq!(conversion.report.issues.len(), 1);
    }

    #[test]
    fn bom_is_stripped_from_bytes() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(AUTO.as_bytes());
        let conversion = converter().convert_bytes(&bytes, None).unwrap();
        assert_eq!(conversion.stats.total_nodes, 1);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = converter().convert_bytes(b"<table>\xff</table>", None).unwrap_err();
        assert!(matches!(err, ConversionError::Encoding(_)));
    }

    #[test]
    fn unsupported_encoding_is_a_config_error() {
        let config = ConverterConfig {
            encoding: "shift_jis".into(),
            ..ConverterConfig::default()
        };
        assert!(matches!(Converter::new(config), Err(ConversionError::Config(_))));
    }

    #[test]
    fn xhtml_backend_reports_malformed_markup() {
        let config = ConverterConfig {
            backend: DocumentBackend::Xhtml,
            ..ConverterConfig::default()
        };
        let converter = Converter::new(config).unwrap();
        let err = converter.convert("<table><tr></table>", None).unwrap_err();
        assert!(matches!(err, ConversionError::Document(_)));
    }
}
