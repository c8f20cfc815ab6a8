//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `ip_enrich` library: loads `.env`, parses the
//! command line, initializes logging, runs the query and prints the report.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use ip_enrich::initialization::init_logger_with;
use ip_enrich::{cancel_on_ctrl_c, run_query_with_cancel, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may provide IP_ENRICH_PROXY_TEMPLATE / IP_ENRICH_LOOKUP_URL
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let signal_task = cancel_on_ctrl_c(cancel.clone());

    let outcome = run_query_with_cancel(&config, cancel.clone()).await;
    cancel.cancel();
    let _ = signal_task.await;

    match outcome {
        Ok(result) => {
            if !result.report.is_empty() {
                println!("{}", result.report);
            }
            eprintln!(
                "✅ {} address{} ({} looked up, {} failed) in {:.1}s{}",
                result.total,
                if result.total == 1 { "" } else { "es" },
                result.successful,
                result.failed,
                result.elapsed_seconds,
                if result.cancelled { " - cancelled" } else { "" }
            );
            for path in &result.exported {
                eprintln!("Exported {}", path.display());
            }
            if result.cancelled {
                process::exit(130);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_enrich error: {:#}", e);
            process::exit(1);
        }
    }
}
