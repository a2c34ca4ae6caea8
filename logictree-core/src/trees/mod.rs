pub mod analytics;
pub mod builder;
pub mod grouping;
pub mod serialization;

// Re-export for easy access
pub use analytics::TreeStats;
pub use builder::{normalize_text, TreeBuilder};
pub use grouping::{group_claim_type, group_claim_types, is_claim_type, CLAIM_TYPE_PREFIX};
pub use serialization::OutputFormat;
