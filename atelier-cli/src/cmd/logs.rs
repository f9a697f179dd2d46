use std::path::Path;

use anyhow::Result;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Sends everything to a per-run file in `logs_dir` and warnings (or debug output with `verbose`) to stderr.
///
/// The returned guard flushes the file writer when dropped, so keep it alive until exit.
pub fn init(logs_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
	std::fs::create_dir_all(logs_dir)?;

	// milliseconds keep runs started within the same second apart
	let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S%.3f");
	let file_appender = tracing_appender::rolling::never(logs_dir, format!("{timestamp}.log"));
	let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

	let file_layer = fmt::layer()
		.with_writer(non_blocking_writer)
		.with_ansi(false)
		.pretty()
		.with_filter(LevelFilter::TRACE);

	let stderr_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.with_filter(if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN });

	tracing_subscriber::registry().with(file_layer).with(stderr_layer).try_init()?;
	tracing::debug!("Logging initialized. Log file in: {}", logs_dir.display());

	Ok(guard)
}
