//! Tracing configuration for debugging validator compilation.
//!
//! Supports three output formats controlled by `TYGUARD_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Watch the registry reserve and fill predicate names
//! TYGUARD_LOG=tyguard_compiler=trace TYGUARD_LOG_FORMAT=tree tyguard compile doc.json
//!
//! # JSON (for tooling)
//! TYGUARD_LOG=debug TYGUARD_LOG_FORMAT=json tyguard check doc.json value.json
//! ```
//!
//! The subscriber is only initialised when `TYGUARD_LOG` (or `RUST_LOG`) is
//! set, so there is zero overhead in normal runs.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; anything unrecognised means `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read the format from the `TYGUARD_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("TYGUARD_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `TYGUARD_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("TYGUARD_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TYGUARD_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with emitted JavaScript on stdout.
pub fn init_tracing() {
    let has_tyguard_log = std::env::var("TYGUARD_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_tyguard_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
