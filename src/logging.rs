use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the level filter for the crate.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects DEBUG and the
/// default stays at WARN so command output is not interleaved with chatter.
fn build_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rts={}", default_level)))
}

/// Split a log file path into the rolling appender's directory and file prefix.
fn appender_parts(log_path: &Path) -> (PathBuf, PathBuf) {
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let prefix = log_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rts.log"));
    (dir, prefix)
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to a daily-rolling JSON log. If None, logs only to stderr
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(stderr_layer);

    let Some(log_path) = log_file else {
        let _ = subscriber.try_init();
        return;
    };

    let (dir, prefix) = appender_parts(&log_path);
    let _ = std::fs::create_dir_all(&dir);
    let file_layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(dir, prefix))
        .with_ansi(false)
        .json();

    let _ = subscriber.with(file_layer).try_init();
}
