use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Console logs go to stderr so stdout only
/// carries program output. When `log_dir` is set, logs are also written to
/// `<log_dir>/<service_name>.log`, with the previous run's file moved aside
/// first; keep the returned guard alive until exit.
pub fn init_logging(
    log_dir: Option<&Path>,
    service_name: &str,
) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let mut rotated = None;
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            rotated = Some(rotate_logs_on_startup(dir, service_name));

            let file_appender = rolling::never(dir, format!("{service_name}.log"));
            let (non_blocking_file, guard) = non_blocking(file_appender);

            let layer = fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false);

    // RUST_LOG overrides the default level
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    if let Some(dir) = log_dir {
        info!(
            "Logging initialized - logs will be written to {}/{service_name}.log",
            dir.display()
        );
    }
    match rotated {
        Some(Ok(Some(backup_path))) => {
            info!("Previous log file backed up to: {}", backup_path.display())
        }
        Some(Err(e)) => warn!("Failed to rotate previous log file: {e}"),
        _ => {}
    }

    Ok(guard)
}

/// Move `<log_dir>/<service_name>.log` aside under a timestamped name.
/// Returns the backup path, or `None` when there was nothing to rotate.
pub fn rotate_logs_on_startup(
    log_dir: &Path,
    service_name: &str,
) -> Result<Option<PathBuf>, anyhow::Error> {
    let log_path = log_dir.join(format!("{service_name}.log"));

    if !log_path.exists() {
        return Ok(None);
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let backup_path = log_dir.join(format!("{service_name}.{timestamp}.log"));
    std::fs::rename(&log_path, &backup_path)?;

    Ok(Some(backup_path))
}
