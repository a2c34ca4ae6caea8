use crate::config::ConverterConfig;
use crate::documents::DocumentElement;
use crate::error::{ConfigError, ParseError};
use crate::keywords::ConditionKeywords;
use crate::types::Node;
use tracing::{debug, trace, warn};

/// Collapse whitespace runs (newlines included) to single spaces and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Walks a two-column decision table, recursing into tables nested in the
/// outcome column, and produces condition/action nodes in row order.
pub struct TreeBuilder {
    keywords: ConditionKeywords,
    skip_headers: bool,
    strict: bool,
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            keywords: ConditionKeywords::default(),
            skip_headers: true,
            strict: false,
            max_depth: ConverterConfig::default().max_depth,
        }
    }
}

impl TreeBuilder {
    pub fn new(config: &ConverterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            keywords: config.keywords()?,
            skip_headers: config.skip_headers,
            strict: config.strict_validation,
            max_depth: config.max_depth,
        })
    }

    pub fn with_skip_headers(mut self, skip_headers: bool) -> Self {
        self.skip_headers = skip_headers;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build nodes from the outermost table.
    pub fn build<E: DocumentElement>(&self, table: &E) -> Result<Vec<Node>, ParseError> {
        self.parse_table(table, 0)
    }

    fn parse_table<E: DocumentElement>(&self, table: &E, depth: usize) -> Result<Vec<Node>, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::new(
                format!("table nesting exceeds the limit of {}", self.max_depth),
                depth,
            ));
        }

        // Tolerate tables written without an explicit body wrapper
        let body = table.find_children("tbody", false).into_iter().next();
        let mut rows = body.as_ref().unwrap_or(table).find_children("tr", false);

        // Header cells anywhere in the outermost table mark its first row as
        // the header, even when they sit in a thead or a later row
        if depth == 0 && self.skip_headers && !rows.is_empty() && Self::has_header_cells(table) {
            rows.remove(0);
            debug!(depth, "skipped header row");
        }

        debug!(depth, rows = rows.len(), "processing table");

        let mut nodes = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match self.parse_row(row, depth) {
                Ok(Some(node)) => nodes.push(node),
                Ok(None) => {}
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    warn!(depth, row = index, error = %err, "skipping row that could not be parsed");
                }
            }
        }

        Ok(nodes)
    }

    fn has_header_cells<E: DocumentElement>(table: &E) -> bool {
        table.find_first("th").is_some()
    }

    /// `Ok(None)` means the row is tolerated but contributes nothing.
    fn parse_row<E: DocumentElement>(&self, row: &E, depth: usize) -> Result<Option<Node>, ParseError> {
        let cells = row.find_children("td", false);
        let [condition_cell, outcome_cell] = cells.as_slice() else {
            trace!(depth, cells = cells.len(), "skipping row without exactly two cells");
            return Ok(None);
        };

        let condition = normalize_text(&condition_cell.text_content());
        debug!(depth, condition = %condition, "found condition");

        if let Some(nested) = outcome_cell.find_children("table", false).into_iter().next() {
            let children = self.parse_table(&nested, depth + 1)?;
            if children.is_empty() {
                debug!(depth, condition = %condition, "nested table produced no nodes");
                return Ok(None);
            }
            return Ok(Some(Node::branch(condition, children)));
        }

        let action = normalize_text(&outcome_cell.text_content());
        if action.is_empty() || self.keywords.looks_like_condition(&action) {
            debug!(depth, action = %action, "action cell is empty or holds a condition");
            return Ok(None);
        }

        debug!(depth, action = %action, "found action");
        Ok(Some(Node::leaf(condition, action)))
    }
}
