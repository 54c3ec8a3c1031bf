//! Configuration constants.
//!
//! This module defines the constants used throughout the application:
//! retry limits, pacing delays, success probabilities, report limits and HTTP settings.

use std::time::Duration;

// Retry strategy
/// Maximum number of publish attempts per post (including the initial attempt).
/// Set to 3 = initial attempt + 2 retries.
pub const RETRY_MAX_ATTEMPTS: usize = 3;
/// Delay between attempts against a regular site
pub const RETRY_DELAY_SITE: Duration = Duration::from_secs(2);
/// Delay between attempts against a forum (forums throttle harder)
pub const RETRY_DELAY_FORUM: Duration = Duration::from_secs(3);

// Pacing
/// Delay between two posts to the same destination
pub const POST_DELAY: Duration = Duration::from_secs(1);
/// Delay after finishing one destination before starting the next
pub const DESTINATION_DELAY: Duration = Duration::from_secs(2);

// Success probabilities used by the simulated transport
pub const PROBABILITY_SOCIAL: f64 = 0.85;
pub const PROBABILITY_BLOG: f64 = 0.90;
pub const PROBABILITY_VIDEO: f64 = 0.75;
pub const PROBABILITY_NEWS: f64 = 0.70;
pub const PROBABILITY_ARABIC_FORUM: f64 = 0.88;
/// Fallback for sites whose category is unknown
pub const PROBABILITY_DEFAULT_SITE: f64 = 0.85;
/// Fallback for forums whose category is unknown
pub const PROBABILITY_DEFAULT_FORUM: f64 = 0.80;

// Request limits
/// Upper bound for posts per destination in a single request
pub const MAX_POSTS_PER_SITE: u32 = 100;
/// Maximum URL length accepted for video and destination URLs
pub const MAX_URL_LENGTH: usize = 2048;

// Report
/// Minimum success rate (percent) for a destination to count as a top performer
pub const TOP_PERFORMER_THRESHOLD: u32 = 90;
/// Maximum number of entries in the top-performer and failed-site lists
pub const REPORT_LIST_LIMIT: usize = 10;

// Progress logging
/// Log a progress line every N destinations
pub const LOGGING_INTERVAL: usize = 5;

// HTTP transport
/// Per-request timeout in seconds for the live transport
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Default User-Agent string for the live transport.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_UNAUTHORIZED: u16 = 401;
pub const HTTP_STATUS_FORBIDDEN: u16 = 403;
pub const HTTP_STATUS_NOT_FOUND: u16 = 404;
pub const HTTP_STATUS_METHOD_NOT_ALLOWED: u16 = 405;

// Environment variables
/// Fallback account email when the request does not carry one
pub const ENV_USER_EMAIL: &str = "PUBLISH_USER_EMAIL";
/// Fallback account password when the request does not carry one
pub const ENV_USER_PASSWORD: &str = "PUBLISH_USER_PASSWORD";
