//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::catalog::DestinationKind;
use crate::config::constants::{DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which publish transport drives the fan-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Probability draw per attempt, no network traffic
    Simulated,
    /// Real HTTP submissions through the per-category site adapters
    Http,
}

/// Library configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use publish_fanout::{Config, TransportKind};
/// use std::path::PathBuf;
///
/// let config = Config {
///     request: PathBuf::from("request.json"),
///     transport: TransportKind::Simulated,
///     seed: Some(42),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "publish_fanout",
    version,
    about = "Fan a publish request out across a destination catalog"
)]
pub struct Config {
    /// Publish request JSON file (use "-" for stdin)
    pub request: PathBuf,

    /// Destination catalog file (name|base_url|category|kind per line); built-in catalog if omitted
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Only publish to destinations of this kind
    #[arg(long, value_enum)]
    pub kind: Option<DestinationKind>,

    /// Publish transport
    #[arg(long, value_enum, default_value_t = TransportKind::Simulated)]
    pub transport: TransportKind,

    /// Seed for the simulated transport (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable pacing delays between attempts, posts and destinations
    #[arg(long)]
    pub no_pacing: bool,

    /// Write the full JSON report to this file (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Export per-destination results as CSV to this file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds (http transport)
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value (http transport)
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request: PathBuf::from("request.json"),
            catalog: None,
            kind: None,
            transport: TransportKind::Simulated,
            seed: None,
            no_pacing: false,
            output: None,
            csv: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
