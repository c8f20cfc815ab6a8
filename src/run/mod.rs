//! Query orchestration.

mod sources;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{print_error_statistics, print_run_summary};
use crate::batch::run_batch;
use crate::config::Config;
use crate::error_handling::{BatchError, ProcessingStats};
use crate::export::{export_report, ExportLayout, ExportOptions};
use crate::initialization::init_client;
use crate::lookup::DetailFetcher;
use crate::report::{format_batch, RenderMode, Report, Section};

use sources::collect_sources;

/// Notice appended when a table mode was requested but no selected list can be enriched.
pub const ENRICHMENT_NOTICE: &str =
    "Only the best Cloudflare official/reverse-proxy lists (bestcf, bestproxy) can show address details";

/// Results of a query.
#[derive(Debug)]
pub struct QueryReport {
    /// Rendered sections, in selection order
    pub report: Report,
    /// Addresses represented in the report
    pub total: usize,
    /// Successful lookups
    pub successful: usize,
    /// Failed lookups
    pub failed: usize,
    /// Files written by the export step
    pub exported: Vec<PathBuf>,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs a query with the provided configuration.
///
/// Fetches the selected lists (or reads the input file), enriches enrichable
/// lists according to the render mode, and exports the plain-text rendering
/// when an output directory is configured.
///
/// # Errors
///
/// This function will return an error if:
/// - The transport configuration is invalid
/// - The HTTP client cannot be built
/// - A list cannot be fetched or the input file cannot be read
/// - The batch configuration is invalid (for example a zero group size)
/// - Export fails
///
/// Individual lookup failures are not errors; they are counted in `failed`.
///
/// # Example
///
/// ```no_run
/// use ip_enrich::{run_query, Config, RenderMode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     mode: RenderMode::SummaryTable,
///     ..Default::default()
/// };
/// let result = run_query(&config).await?;
/// println!("{}", result.report);
/// # Ok(())
/// # }
/// ```
pub async fn run_query(config: &Config) -> Result<QueryReport> {
    run_query_with_cancel(config, CancellationToken::new()).await
}

/// Like [`run_query`], stopping before the next lookup group once `cancel` fires.
///
/// A cancelled run returns the outcomes gathered so far with `cancelled` set
/// and skips the export step.
pub async fn run_query_with_cancel(config: &Config, cancel: CancellationToken) -> Result<QueryReport> {
    let start_time = Instant::now();
    let mode = config.render_mode();

    let transport = config
        .build_transport()
        .context("Invalid transport configuration")?;
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let error_stats = Arc::new(ProcessingStats::new());
    let fetcher =
        DetailFetcher::with_base_url(Arc::clone(&client), transport.clone(), &config.lookup_url)
            .with_stats(Arc::clone(&error_stats));

    info!("Querying with {} transport in {:?} mode", transport, mode);
    let sources = collect_sources(config, &client, &transport).await?;
    let any_enrichable = sources.iter().any(|source| source.enrichable);

    let mut report = Report::new();
    let mut cancelled = false;
    for source in sources {
        if source.identifiers.is_empty() {
            warn!("No addresses found for {}", source.label);
            continue;
        }

        if mode == RenderMode::PlainText || !source.enrichable {
            report.push(Section::plain(&source.key, &source.label, source.identifiers));
            continue;
        }

        info!(
            "Looking up {} addresses for {}",
            source.identifiers.len(),
            source.label
        );
        match run_batch(&fetcher, &source.identifiers, config.group_size, &cancel).await {
            Ok(batch) => report.push(format_batch(&source.key, &source.label, batch, mode)),
            Err(BatchError::Cancelled { partial, total }) => {
                warn!(
                    "Cancelled: {} of {} lookups for {} completed",
                    partial.len(),
                    total,
                    source.label
                );
                report.push(format_batch(&source.key, &source.label, partial, mode));
                cancelled = true;
                break;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Lookups for {} failed", source.label));
            }
        }
    }

    if mode != RenderMode::PlainText && !any_enrichable {
        report.set_notice(ENRICHMENT_NOTICE);
    }

    let exported = match (&config.output, cancelled) {
        (Some(output_dir), false) => {
            let options = ExportOptions {
                output_dir: output_dir.clone(),
                layout: if config.split_output {
                    ExportLayout::PerSection
                } else {
                    ExportLayout::Single
                },
            };
            export_report(&report, &options)
                .await
                .context("Failed to export results")?
        }
        (Some(_), true) => {
            warn!("Skipping export of a cancelled run");
            Vec::new()
        }
        (None, _) => Vec::new(),
    };

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    let (total, successful, failed) = (
        report.count(),
        report.success_count(),
        report.failure_count(),
    );
    print_error_statistics(&error_stats);
    print_run_summary(total, successful, failed, elapsed_seconds);

    Ok(QueryReport {
        report,
        total,
        successful,
        failed,
        exported,
        cancelled,
        elapsed_seconds,
    })
}
