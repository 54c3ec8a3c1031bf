//! Result aggregation.
//!
//! Rolls the per-destination results of a run up into one [`AggregateReport`].

mod export;

use serde::{Deserialize, Serialize};

use crate::config::{REPORT_LIST_LIMIT, TOP_PERFORMER_THRESHOLD};
use crate::models::DestinationResult;

pub use export::{export_csv, write_csv, write_json};

/// Overall rollup across all destinations of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub total_sites: usize,
    pub total_attempted: u64,
    pub total_successful: u64,
    pub total_failed: u64,
    pub overall_success_rate: u32,
    pub top_performing_sites: Vec<DestinationResult>,
    pub failed_sites: Vec<DestinationResult>,
}

/// `round(successful / attempted * 100)`, or 0 when nothing was attempted.
///
/// Rounds halves up, so 1 of 8 (12.5%) reports 13.
pub fn success_rate(successful: u32, attempted: u32) -> u32 {
    rate_u64(u64::from(successful), u64::from(attempted))
}

fn rate_u64(successful: u64, attempted: u64) -> u32 {
    if attempted == 0 {
        return 0;
    }
    let successful = successful.min(attempted);
    ((successful * 200 + attempted) / (attempted * 2)) as u32
}

/// Summarizes a finished run.
///
/// Top performers are destinations at or above the threshold rate, best first
/// (ties keep run order), at most `REPORT_LIST_LIMIT`. Failed sites are
/// destinations with zero successes, in run order, at most `REPORT_LIST_LIMIT`.
pub fn summarize(results: &[DestinationResult]) -> AggregateReport {
    let total_attempted: u64 = results.iter().map(|r| u64::from(r.attempted)).sum();
    let total_successful: u64 = results.iter().map(|r| u64::from(r.successful)).sum();
    let total_failed: u64 = results.iter().map(|r| u64::from(r.failed)).sum();

    let mut top_performing_sites: Vec<DestinationResult> = results
        .iter()
        .filter(|r| r.success_rate >= TOP_PERFORMER_THRESHOLD)
        .cloned()
        .collect();
    top_performing_sites.sort_by(|a, b| b.success_rate.cmp(&a.success_rate));
    top_performing_sites.truncate(REPORT_LIST_LIMIT);

    let failed_sites: Vec<DestinationResult> = results
        .iter()
        .filter(|r| r.successful == 0)
        .take(REPORT_LIST_LIMIT)
        .cloned()
        .collect();

    AggregateReport {
        total_sites: results.len(),
        total_attempted,
        total_successful,
        total_failed,
        overall_success_rate: rate_u64(total_successful, total_attempted),
        top_performing_sites,
        failed_sites,
    }
}
