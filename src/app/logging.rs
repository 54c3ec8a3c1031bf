//! Progress logging utilities.

use log::info;

/// Logs how many destinations are done and the current processing rate.
pub fn log_progress(start_time: std::time::Instant, processed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} destinations in {:.2} seconds (~{:.2} destinations/sec)",
        processed, total, elapsed_secs, rate
    );
}
