//! Export types and options.

use std::path::PathBuf;

/// How sections are distributed over files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportLayout {
    /// One file named after all section keys joined by `-`
    Single,
    /// One `<key>.txt` file per section
    PerSection,
}

/// Options for exporting a report.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Directory the files are written into (created if missing)
    pub output_dir: PathBuf,
    /// File layout
    pub layout: ExportLayout,
}
