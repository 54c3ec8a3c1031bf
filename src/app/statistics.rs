//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureStats, FailureType};
use crate::report::AggregateReport;

/// Prints failure counts by category to the log.
pub fn print_failure_statistics(stats: &FailureStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("Failure Counts ({} total):", total);
    for failure_type in FailureType::iter() {
        let count = stats.get_count(failure_type);
        if count > 0 {
            info!("   {}: {}", failure_type.as_str(), count);
        }
    }
}

/// Prints a one-line summary of the run plus the top and failed destinations.
pub fn print_summary(report: &AggregateReport, elapsed_seconds: f64) {
    info!(
        "✅ Published to {} destination{} ({} of {} posts succeeded, {}%) in {:.1}s",
        report.total_sites,
        if report.total_sites == 1 { "" } else { "s" },
        report.total_successful,
        report.total_attempted,
        report.overall_success_rate,
        elapsed_seconds
    );
    for site in &report.top_performing_sites {
        info!("   top: {} ({}%)", site.site_name, site.success_rate);
    }
    for site in &report.failed_sites {
        info!("   no successes: {}", site.site_name);
    }
}
