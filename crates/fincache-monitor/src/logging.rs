//! Logging setup.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Setup logging with the given level.
///
/// When `file` is set, log lines are written to that file instead of stdout.
/// The returned guard must be held for as long as file logging is needed.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = file {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path.file_name().unwrap_or(path.as_os_str());
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        if json {
            tracing_subscriber::registry().with(filter).with(layer.json()).init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        return Some(guard);
    }

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
    None
}
