//! Application helpers.
//!
//! URL validation, progress logging, Ctrl-C handling and statistics printing
//! used by the run loop and the binary.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::{cancel_on_ctrl_c, shutdown_gracefully};
pub use statistics::{print_failure_statistics, print_summary};
pub use url::validate_and_normalize_url;
