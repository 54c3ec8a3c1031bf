//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions (publish, catalog, request validation, initialization)
//! - Failure categorization
//! - Thread-safe failure statistics tracking

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{CatalogError, ConfigError, FailureType, InitializationError, PublishError};
