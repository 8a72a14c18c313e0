//! Structured logging using **tracing**.
//!
//! Events go to stderr as JSON so stdout carries only the list of unused
//! files.

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: scan warnings only.
const DEFAULT_FILTER: &str = "orphanscan_core=warn";

/// Initializes the global tracing subscriber.
///
/// Output is JSON on stderr. A second call leaves the first subscriber in place.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=orphanscan_core=info`)
pub fn init_structured_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs an event under a name, at a level picked from that name.
pub fn log_event(event: &str, detail: &str) {
    match event.to_uppercase().as_str() {
        "ERROR" | "REPORT_FAILED" => error!(event = %event, detail = %detail),
        "WARN" | "CONFIG_INVALID" | "REPORT_PATH_REJECTED" => {
            warn!(event = %event, detail = %detail)
        }
        _ => info!(event = %event, detail = %detail),
    }
}

/// Logs the per-run summary with counts as separate fields.
pub fn log_scan_summary(candidates: usize, corpus: usize, unused: usize, unused_pct: f64) {
    info!(
        event = "SCAN_COMPLETE",
        candidates,
        corpus_files = corpus,
        unused,
        unused_pct,
    );
}
