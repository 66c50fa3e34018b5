//! Common test utilities and logging infrastructure
//!
//! Integration tests route the crate's `log` output through a `tracing`
//! subscriber so failures come with the parser's and layout engine's
//! debug lines.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=make_colors::markup=trace` - Module-specific output

#![allow(dead_code)]

pub mod assertions;
pub mod env;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Output goes to the test writer, so it is captured unless `--nocapture`
/// is passed. Calling this more than once is safe.
pub fn init_test_logging() {
    init_test_logging_with_filter("make_colors=debug,test=info");
}

/// Initialize test logging with a custom default filter.
///
/// `RUST_LOG` still wins when set.
pub fn init_test_logging_with_filter(filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// A span guard that logs entry into a test phase.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Log test context information.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(
        test_name = test_name,
        description = description,
        "test context"
    );
}

/// Strip SGR escape sequences for text-only comparison.
pub fn strip_ansi(s: &str) -> String {
    make_colors::cells::strip_ansi(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_strip_ansi_helper() {
        assert_eq!(strip_ansi("\x1b[1;31mx\x1b[0m"), "x");
    }
}
