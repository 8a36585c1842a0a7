//! Log file setup
//!
//! The terminal belongs to the TUI, so logs only go to a daily rotated file
//! under `<config dir>/logs/`. Filtering follows `RUST_LOG`, defaulting to
//! `info`:
//! - `RUST_LOG=debug` - mode changes, view refreshes
//! - `RUST_LOG=table_wrangler::model=debug` - model layer only

use std::fs;
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE: &str = "table-wrangler.log";

/// Install the global subscriber writing to `logs_dir`.
///
/// A logs directory that cannot be created only disables logging.
pub fn init(logs_dir: &Path) {
    if let Err(e) = fs::create_dir_all(logs_dir) {
        eprintln!(
            "Warning: Could not initialize file logging in {}: {}",
            logs_dir.display(),
            e
        );
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // a subscriber installed earlier (tests) stays in place
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
}
