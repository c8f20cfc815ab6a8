//! Result aggregation and formatting.
//!
//! Batch outcomes are wrapped into a typed [`Report`] of [`Section`]s. The
//! same tree serves display, export (`to_plain_text`) and counting.

mod section;
mod text;
mod types;

pub use section::{detail_rows, format_batch, summary_country, Report, Section};
pub use text::count_text;
pub use types::{ModeSelector, RenderMode};
