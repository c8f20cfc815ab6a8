//! Render mode selection.

use clap::ValueEnum;

/// How results are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Bare identifier list, no lookups
    #[default]
    PlainText,
    /// Every detail field per identifier
    DetailTable,
    /// One `identifier | country` row per identifier
    SummaryTable,
}

/// Holds the two table toggles so that at most one is ever active.
///
/// Enabling one table mode disables the other; disabling the active one falls
/// back to plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSelector {
    mode: RenderMode,
}

impl ModeSelector {
    /// Turns the detail table on (and the summary table off).
    pub fn enable_details(&mut self) {
        self.mode = RenderMode::DetailTable;
    }

    /// Turns the summary table on (and the detail table off).
    pub fn enable_summary(&mut self) {
        self.mode = RenderMode::SummaryTable;
    }

    /// Turns the detail table off if it is active.
    pub fn disable_details(&mut self) {
        if self.mode == RenderMode::DetailTable {
            self.mode = RenderMode::PlainText;
        }
    }

    /// Turns the summary table off if it is active.
    pub fn disable_summary(&mut self) {
        if self.mode == RenderMode::SummaryTable {
            self.mode = RenderMode::PlainText;
        }
    }

    /// Whether the detail table is active.
    pub fn details_enabled(&self) -> bool {
        self.mode == RenderMode::DetailTable
    }

    /// Whether the summary table is active.
    pub fn summary_enabled(&self) -> bool {
        self.mode == RenderMode::SummaryTable
    }

    /// The single active mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }
}

impl From<RenderMode> for ModeSelector {
    fn from(mode: RenderMode) -> Self {
        Self { mode }
    }
}
