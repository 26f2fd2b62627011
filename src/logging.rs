use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console logs on stderr plus a daily JSON log file under `logs/`.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    // Daily rotated JSON file for request/normalization traces
    let file_appender = tracing_appender::rolling::daily("logs", "foodtein.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // stdout is reserved for command output
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // RUST_LOG wins when set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("foodtein_client=info,foodtein=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The writer stops flushing once the guard drops; the process owns it until exit
    std::mem::forget(_guard);
}
