//! Typed report tree.
//!
//! Sections keep the batch outcomes themselves rather than rendered text, so
//! counting and export work on structure instead of re-parsing output.

use std::fmt;

use super::types::RenderMode;
use crate::batch::{BatchResult, LookupOutcome};
use crate::lookup::DetailRecord;

pub(crate) const IDENTIFIER_LABEL: &str = "IP Address";
pub(crate) const COUNTRY_LABEL: &str = "Country/Region";
pub(crate) const LOOKUP_FAILED: &str = "lookup failed";
pub(crate) const DETAILS_UNAVAILABLE: &str = "[details unavailable]";
pub(crate) const WARNING_MARKER: &str = "⚠️";

/// One titled block of output.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// Identifier list without lookups.
    Plain {
        /// Stable key (category name) used for export file names.
        key: String,
        /// Heading shown above the list.
        label: String,
        /// Identifiers in input order.
        identifiers: Vec<String>,
    },
    /// Every detail field for each identifier.
    Details {
        /// Stable key (category name) used for export file names.
        key: String,
        /// Heading shown above the table.
        label: String,
        /// Lookup outcomes in input order.
        batch: BatchResult,
    },
    /// One identifier/country row per identifier.
    Summary {
        /// Stable key (category name) used for export file names.
        key: String,
        /// Heading shown above the table.
        label: String,
        /// Lookup outcomes in input order.
        batch: BatchResult,
    },
}

/// Wraps batch outcomes in the section type for `mode`.
///
/// `PlainText` keeps only the identifiers.
pub fn format_batch(key: &str, label: &str, batch: BatchResult, mode: RenderMode) -> Section {
    let key = key.to_string();
    let label = label.to_string();
    match mode {
        RenderMode::PlainText => Section::Plain {
            key,
            label,
            identifiers: batch.identifiers().map(str::to_string).collect(),
        },
        RenderMode::DetailTable => Section::Details { key, label, batch },
        RenderMode::SummaryTable => Section::Summary { key, label, batch },
    }
}

/// Label/value rows of a detail block, in display order.
pub fn detail_rows(identifier: &str, record: &DetailRecord) -> Vec<(&'static str, String)> {
    vec![
        (IDENTIFIER_LABEL, identifier.to_string()),
        (COUNTRY_LABEL, record.country_label()),
        ("Region", record.region.clone()),
        ("City", record.city.clone()),
        ("Postal Code", record.postal_code.clone()),
        ("Coordinates", record.coordinates()),
        ("Timezone", record.timezone.clone()),
        ("ISP", record.isp.clone()),
        ("Organization", record.organization.clone()),
        ("AS", record.autonomous_system.clone()),
        ("Mobile Network", yes_no(record.mobile).to_string()),
        ("Proxy", yes_no(record.proxy).to_string()),
        ("Hosting", yes_no(record.hosting).to_string()),
    ]
}

/// Country cell of a summary row.
pub fn summary_country(outcome: &LookupOutcome) -> String {
    match outcome.record() {
        Some(record) => record.country_label(),
        None => LOOKUP_FAILED.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl Section {
    /// Plain identifier list.
    pub fn plain(key: &str, label: &str, identifiers: Vec<String>) -> Self {
        Section::Plain {
            key: key.to_string(),
            label: label.to_string(),
            identifiers,
        }
    }

    /// Export key of the section.
    pub fn key(&self) -> &str {
        match self {
            Section::Plain { key, .. } | Section::Details { key, .. } | Section::Summary { key, .. } => key,
        }
    }

    /// Heading label.
    pub fn label(&self) -> &str {
        match self {
            Section::Plain { label, .. }
            | Section::Details { label, .. }
            | Section::Summary { label, .. } => label,
        }
    }

    /// Batch outcomes, for table sections.
    pub fn batch(&self) -> Option<&BatchResult> {
        match self {
            Section::Plain { .. } => None,
            Section::Details { batch, .. } | Section::Summary { batch, .. } => Some(batch),
        }
    }

    /// Heading line. Table sections include their success/failure counts.
    pub fn title(&self) -> String {
        match self {
            Section::Plain { label, .. } => format!("[{}]:", label),
            Section::Details { label, batch, .. } => format!(
                "{} (succeeded: {}, failed: {})",
                label,
                batch.success_count(),
                batch.failure_count()
            ),
            Section::Summary { label, batch, .. } => format!(
                "{} - summary (succeeded: {}, failed: {})",
                label,
                batch.success_count(),
                batch.failure_count()
            ),
        }
    }

    /// Number of identifiers represented, one per identifier whatever the mode.
    pub fn count(&self) -> usize {
        match self {
            Section::Plain { identifiers, .. } => identifiers.len(),
            Section::Details { batch, .. } | Section::Summary { batch, .. } => batch.len(),
        }
    }

    /// Plain-text rendering used for export.
    ///
    /// Detail tables become `label: value` lines, one blank-line separated
    /// block per identifier. Summary tables become pipe-delimited rows under a
    /// header row.
    pub fn to_plain_text(&self) -> String {
        let title = self.title();
        let mut out = String::new();

        match self {
            Section::Plain { identifiers, .. } => {
                out.push_str(&title);
                for identifier in identifiers {
                    out.push('\n');
                    out.push_str(identifier);
                }
            }
            Section::Details { batch, .. } => {
                push_underlined(&mut out, &title, '=');
                let blocks: Vec<String> = batch
                    .outcomes()
                    .iter()
                    .map(|outcome| match outcome.record() {
                        Some(record) => detail_rows(outcome.identifier(), record)
                            .into_iter()
                            .map(|(label, value)| format!("{}: {}", label, value))
                            .collect::<Vec<_>>()
                            .join("\n"),
                        None => format!("{} {}", outcome.identifier(), DETAILS_UNAVAILABLE),
                    })
                    .collect();
                out.push('\n');
                out.push_str(&blocks.join("\n\n"));
            }
            Section::Summary { batch, .. } => {
                push_underlined(&mut out, &title, '=');
                out.push('\n');
                let header = format!("{} | {}", IDENTIFIER_LABEL, COUNTRY_LABEL);
                push_underlined(&mut out, &header, '-');
                for outcome in batch.outcomes() {
                    out.push('\n');
                    out.push_str(&format!("{} | {}", outcome.identifier(), summary_country(outcome)));
                }
            }
        }

        out
    }
}

fn push_underlined(out: &mut String, line: &str, rule: char) {
    out.push_str(line);
    out.push('\n');
    out.extend(std::iter::repeat(rule).take(line.chars().count()));
}

/// A full query result: sections in category order plus an optional notice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    sections: Vec<Section>,
    notice: Option<String>,
}

impl Report {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Attaches a warning line shown after all sections.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Warning line, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True when no section was pushed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total identifiers across all sections.
    pub fn count(&self) -> usize {
        self.sections.iter().map(Section::count).sum()
    }

    /// Successful lookups across all table sections.
    pub fn success_count(&self) -> usize {
        self.sections
            .iter()
            .filter_map(Section::batch)
            .map(BatchResult::success_count)
            .sum()
    }

    /// Failed lookups across all table sections.
    pub fn failure_count(&self) -> usize {
        self.sections
            .iter()
            .filter_map(Section::batch)
            .map(BatchResult::failure_count)
            .sum()
    }

    /// Plain-text rendering of every section, blank-line separated.
    pub fn to_plain_text(&self) -> String {
        let mut parts: Vec<String> = self.sections.iter().map(Section::to_plain_text).collect();
        if let Some(notice) = &self.notice {
            parts.push(format!("{} {}", WARNING_MARKER, notice));
        }
        parts.join("\n\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_text())
    }
}
