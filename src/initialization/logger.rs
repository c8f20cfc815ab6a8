//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// Plain output is colored with an emoji per level; JSON output writes one
/// object per line with a millisecond timestamp.
///
/// `RUST_LOG` is read first; `level` then overrides the global and crate
/// filters, so `--log-level` always wins over the environment.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug ip_enrich --category bestcf --summary
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=ip_enrich::batch=debug,reqwest=info ip_enrich --details
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("ip_enrich", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let (emoji, level) = level_marker(record.level());
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    level,
                    record.args()
                )
            });
        }
    }

    // try_init: tests may initialize the logger more than once
    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

fn level_marker(level: Level) -> (&'static str, ColoredString) {
    let label = level.to_string();
    match level {
        Level::Error => ("❌", label.red()),
        Level::Warn => ("⚠️", label.yellow()),
        Level::Info => ("✔️", label.green()),
        Level::Debug => ("🔍", label.blue()),
        Level::Trace => ("🔬", label.purple()),
    }
}
