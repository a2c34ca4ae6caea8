// Validation rules for logic trees
// - schema.rs: the fixed recursive node schema, checked over untyped JSON
// - validation.rs: TreeValidator and the per-node content rules

pub mod schema;
pub mod validation;

pub use schema::{check_schema, SchemaViolation};
pub use validation::{TreeValidator, ValidationIssue, ValidationReport};
