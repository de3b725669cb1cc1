//! Debug tracing infrastructure for development diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=trace` - batched caret/selection changes
//! - `RUST_LOG=caret::editable=debug` - layout passes and text entry
//!
//! Logs are also written to `~/.config/caret/logs/caret.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::CaretModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`); the file layer always
/// records at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "caret.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A host may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of caret/selection state for diffing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub caret: usize,
    pub anchor: Option<usize>,
}

impl CaretSnapshot {
    pub fn from_model(model: &CaretModel) -> Self {
        Self {
            caret: model.caret(),
            anchor: model.anchor(),
        }
    }

    /// Describe what changed between two snapshots, None if nothing did
    pub fn diff(&self, other: &CaretSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.caret != other.caret {
            changes.push(format!("caret: {} → {}", self.caret, other.caret));
        }
        if self.anchor != other.anchor {
            let fmt_anchor = |a: Option<usize>| match a {
                Some(a) => a.to_string(),
                None => "none".to_string(),
            };
            changes.push(format!(
                "anchor: {} → {}",
                fmt_anchor(self.anchor),
                fmt_anchor(other.anchor)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
