//! Application helpers used by the query runner and the binary.

pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use shutdown::cancel_on_ctrl_c;
pub use statistics::{print_error_statistics, print_run_summary};
