// All conversion logic lives in logictree-core.
// This CLI acts as a thin wrapper around the core library.

// CLI-specific modules
pub mod logging;
pub mod output;

// Re-export core types for convenience
pub use logictree_core::*;

// Re-export CLI utilities
pub use logging::{init_logging, LogLevel};
pub use output::write_output;
