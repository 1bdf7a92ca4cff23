// Logging setup
//
// The game owns the terminal, so log output must never reach stdout.
// Everything goes to a file through a non-blocking writer; RUST_LOG wins
// over the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. The returned guard must stay alive for
/// the whole run so buffered lines get flushed on exit.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    if !config.enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.dir, e
        );
        return None;
    }

    let default_filter = format!("flappy_term={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_appender = tracing_appender::rolling::never(&config.dir, &config.file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_thread_names(true),
        )
        .init();

    Some(guard)
}
