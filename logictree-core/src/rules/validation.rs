use super::schema::{check_schema, SchemaViolation};
use crate::config::ConverterConfig;
use crate::error::ConfigError;
use crate::keywords::ConditionKeywords;
use crate::types::*;
use serde_json::Value;
use std::fmt;

/// Checks a logic tree against the node schema and the content rules.
///
/// Every rule runs on every node, so one node may contribute several
/// issues. The tree is never modified.
#[derive(Debug, Clone, Default)]
pub struct TreeValidator {
    keywords: ConditionKeywords,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Schema {
        path: String,
        message: String,
    },
    ConditionFormat {
        path: String,
        expected: String,
    },
    ConditionTooShort {
        path: String,
    },
    ActionTooShort {
        path: String,
    },
    ActionContainsCondition {
        path: String,
    },
    ActionWithThen {
        path: String,
    },
    ConditionWithoutOutcome {
        path: String,
    },
}

impl ValidationIssue {
    /// Position of the offending node, e.g. `root.then[2].then[0]`
    pub fn path(&self) -> &str {
        match self {
            ValidationIssue::Schema { path, .. }
            | ValidationIssue::ConditionFormat { path, .. }
            | ValidationIssue::ConditionTooShort { path }
            | ValidationIssue::ActionTooShort { path }
            | ValidationIssue::ActionContainsCondition { path }
            | ValidationIssue::ActionWithThen { path }
            | ValidationIssue::ConditionWithoutOutcome { path } => path,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Schema { path, message } => {
                write!(f, "Schema validation error at {path}: {message}")
            }
            ValidationIssue::ConditionFormat { path, expected } => {
                write!(f, "Invalid condition format at {path}: should start with {expected}")
            }
            ValidationIssue::ConditionTooShort { path } => {
                write!(f, "Empty or too short condition at {path}")
            }
            ValidationIssue::ActionTooShort { path } => {
                write!(f, "Empty or too short action at {path}")
            }
            ValidationIssue::ActionContainsCondition { path } => {
                write!(f, "Action contains condition keywords at {path}")
            }
            ValidationIssue::ActionWithThen { path } => {
                write!(f, "Node cannot have both 'action' and 'then' at {path}")
            }
            ValidationIssue::ConditionWithoutOutcome { path } => {
                write!(f, "Condition without action or further conditions at {path}")
            }
        }
    }
}

impl From<SchemaViolation> for ValidationIssue {
    fn from(violation: SchemaViolation) -> Self {
        ValidationIssue::Schema {
            path: violation.path,
            message: violation.message,
        }
    }
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues rendered as diagnostic strings
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl TreeValidator {
    pub fn new(keywords: ConditionKeywords) -> Self {
        Self { keywords }
    }

    pub fn from_config(config: &ConverterConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.keywords()?))
    }

    /// Content rules for a typed node; the schema holds by construction.
    pub fn validate(&self, node: &Node) -> ValidationReport {
        let mut issues = Vec::new();
        self.validate_node(node, "root", &mut issues);
        ValidationReport { issues }
    }

    /// Validate every top-level node of a conversion result.
    pub fn validate_tree(&self, tree: &LogicTree) -> ValidationReport {
        let mut issues = Vec::new();
        for (path, node) in tree.roots() {
            self.validate_node(node, &path, &mut issues);
        }
        ValidationReport { issues }
    }

    /// Schema check followed by the content rules for an untyped node.
    ///
    /// A schema violation is reported alone; the content rules only make
    /// sense on a conforming tree.
    pub fn validate_value(&self, value: &Value) -> ValidationReport {
        self.validate_value_at(value, "root")
    }

    /// Like [`validate_value`](Self::validate_value), but also accepts an
    /// array of top-level nodes, each located at `root[i]`.
    pub fn validate_json(&self, value: &Value) -> ValidationReport {
        match value {
            Value::Array(nodes) => {
                let issues = nodes
                    .iter()
                    .enumerate()
                    .flat_map(|(i, node)| self.validate_value_at(node, &format!("root[{i}]")).issues)
                    .collect();
                ValidationReport { issues }
            }
            node => self.validate_value(node),
        }
    }

    fn validate_value_at(&self, value: &Value, path: &str) -> ValidationReport {
        if let Err(violation) = check_schema(value, path) {
            return ValidationReport {
                issues: vec![violation.into()],
            };
        }

        match serde_json::from_value::<Node>(value.clone()) {
            Ok(node) => {
                let mut issues = Vec::new();
                self.validate_node(&node, path, &mut issues);
                ValidationReport { issues }
            }
            Err(e) => ValidationReport {
                issues: vec![ValidationIssue::Schema {
                    path: path.to_string(),
                    message: e.to_string(),
                }],
            },
        }
    }

    fn validate_node(&self, node: &Node, path: &str, issues: &mut Vec<ValidationIssue>) {
        self.validate_condition_format(node, path, issues);
        self.validate_action_format(node, path, issues);
        self.validate_logical_structure(node, path, issues);

        match &node.then {
            Some(Branch::Many(children)) => {
                for (i, child) in children.iter().enumerate() {
                    self.validate_node(child, &format!("{path}.then[{i}]"), issues);
                }
            }
            Some(Branch::One(child)) => self.validate_node(child, &format!("{path}.then"), issues),
            None => {}
        }

        if let Some(otherwise) = &node.otherwise {
            self.validate_node(otherwise, &format!("{path}.else"), issues);
        }
    }

    fn validate_condition_format(&self, node: &Node, path: &str, issues: &mut Vec<ValidationIssue>) {
        let Some(condition) = &node.condition else {
            return;
        };

        if !self.keywords.starts_condition(condition) {
            issues.push(ValidationIssue::ConditionFormat {
                path: path.to_string(),
                expected: self.keywords.describe(),
            });
        }

        if condition.trim().chars().count() < 3 {
            issues.push(ValidationIssue::ConditionTooShort {
                path: path.to_string(),
            });
        }
    }

    fn validate_action_format(&self, node: &Node, path: &str, issues: &mut Vec<ValidationIssue>) {
        let Some(action) = &node.action else {
            return;
        };

        if action.trim().chars().count() < 2 {
            issues.push(ValidationIssue::ActionTooShort {
                path: path.to_string(),
            });
        }

        if self.keywords.mentions_condition(action) {
            issues.push(ValidationIssue::ActionContainsCondition {
                path: path.to_string(),
            });
        }
    }

    fn validate_logical_structure(&self, node: &Node, path: &str, issues: &mut Vec<ValidationIssue>) {
        if node.action.is_some() && node.then.is_some() {
            issues.push(ValidationIssue::ActionWithThen {
                path: path.to_string(),
            });
        }

        if node.condition.is_some() && node.action.is_none() && node.then.is_none() {
            issues.push(ValidationIssue::ConditionWithoutOutcome {
                path: path.to_string(),
            });
        }
    }
}
