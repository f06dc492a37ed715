//! Tracing setup. The terminal UI owns stdout, so interactive runs log to a
//! daily file under the configured log directory; headless runs log to
//! stderr. `RUST_LOG` is honored unless `--debug` is given.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "wildtrails_ops=info";
const DEBUG_DIRECTIVE: &str = "wildtrails_ops=debug";

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(DEBUG_DIRECTIVE);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// File logging for the interactive console.
///
/// The returned guard must live until shutdown so buffered lines are
/// flushed. When the log directory cannot be used, logging is disabled
/// rather than written over the terminal.
pub fn init(log_dir: &Path, verbose: bool) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {}: {e}", log_dir.display());
        return None;
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("wildtrails-ops")
        .filename_suffix("log")
        .build(log_dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to open log file in {}: {e}", log_dir.display());
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .with(filter(verbose))
        .init();

    tracing::info!(log_dir = %log_dir.display(), debug = verbose, "logging initialized");
    Some(guard)
}

/// Stderr logging for headless runs, keeping stdout clean for the report.
pub fn init_stderr(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter(verbose))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_overrides_the_default_filter() {
        assert!(filter(true).to_string().contains(DEBUG_DIRECTIVE));
    }

    #[test]
    fn file_logging_creates_the_log_directory() {
        let dir = std::env::temp_dir().join(format!("wildtrails-ops-logs-{}", std::process::id()));
        let guard = init(&dir, true);
        assert!(guard.is_some());
        assert!(dir.is_dir());
        drop(guard);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
