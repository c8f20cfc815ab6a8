//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Logs the non-zero failure counters of a run.
///
/// Counts are per attempt, so a retried lookup that eventually succeeded still
/// shows up here once.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    if total_errors == 0 {
        return;
    }

    info!("Lookup failure counts ({} total):", total_errors);
    for error_type in ErrorType::iter() {
        let count = error_stats.get_error_count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}

/// Logs a one-line summary of the run.
pub fn print_run_summary(total: usize, successful: usize, failed: usize, elapsed_seconds: f64) {
    info!(
        "✅ Processed {} address{} ({} looked up, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "es" },
        successful,
        failed,
        elapsed_seconds
    );
}
