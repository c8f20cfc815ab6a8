//! Plain-text export of query results.

mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

pub use types::{ExportLayout, ExportOptions};

use crate::report::Report;

/// Writes `report` as plain text according to `options`.
///
/// Returns the paths written, in section order. An empty report writes
/// nothing.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or a file
/// cannot be written.
pub async fn export_report(report: &Report, options: &ExportOptions) -> Result<Vec<PathBuf>> {
    if report.is_empty() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory {}",
                options.output_dir.display()
            )
        })?;

    let files: Vec<(PathBuf, String)> = match options.layout {
        ExportLayout::Single => {
            let keys: Vec<&str> = report.sections().iter().map(|s| s.key()).collect();
            let path = options.output_dir.join(format!("{}.txt", keys.join("-")));
            vec![(path, report.to_plain_text())]
        }
        ExportLayout::PerSection => report
            .sections()
            .iter()
            .map(|section| {
                let path = options.output_dir.join(format!("{}.txt", section.key()));
                (path, section.to_plain_text())
            })
            .collect(),
    };

    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Section;
    use tempfile::TempDir;

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.push(Section::plain("bestcf", "Best", vec!["1.1.1.1".into()]));
        report.push(Section::plain("cfv6", "V6", vec!["2400:cb00::/32".into()]));
        report
    }

    #[tokio::test]
    async fn test_single_file_named_after_keys() {
        let dir = TempDir::new().expect("temp dir");
        let options = ExportOptions {
            output_dir: dir.path().to_path_buf(),
            layout: ExportLayout::Single,
        };
        let written = export_report(&sample_report(), &options).await.unwrap();
        assert_eq!(written, vec![dir.path().join("bestcf-cfv6.txt")]);

        let contents = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(contents, sample_report().to_plain_text());
    }

    #[tokio::test]
    async fn test_per_section_files() {
        let dir = TempDir::new().expect("temp dir");
        let options = ExportOptions {
            output_dir: dir.path().join("nested"),
            layout: ExportLayout::PerSection,
        };
        let written = export_report(&sample_report(), &options).await.unwrap();
        assert_eq!(written.len(), 2);
        let v6 = std::fs::read_to_string(dir.path().join("nested").join("cfv6.txt")).unwrap();
        assert_eq!(v6, "[V6]:\n2400:cb00::/32");
    }

    #[tokio::test]
    async fn test_empty_report_writes_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let options = ExportOptions {
            output_dir: dir.path().join("unused"),
            layout: ExportLayout::Single,
        };
        let written = export_report(&Report::new(), &options).await.unwrap();
        assert!(written.is_empty());
        assert!(!dir.path().join("unused").exists());
    }
}
