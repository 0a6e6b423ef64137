//! Test logging helpers.
//!
//! Installs a `tracing` subscriber once per process and provides the
//! phase/section/assert macros used across unit and integration tests.
//! The filter comes from `RUST_LOG` and defaults to `trace` for this crate.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_TEST_FILTER: &str = "outcome_algebra=trace";

/// Initializes test logging. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        // Another harness may have installed a global subscriber already.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Logs the start of a named test phase.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        ::tracing::info!(phase = %$name, "test phase");
    };
}

/// Logs a section inside a test.
#[macro_export]
macro_rules! test_section {
    ($name:expr) => {
        ::tracing::debug!(section = %$name, "test section");
    };
}

/// Logs completion of a named test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        ::tracing::info!(test = %$name, "test complete");
    };
}

/// Asserts a condition, logging expected and actual values first.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {{
        let passed: bool = $cond;
        let check = $msg;
        let expected = &$expected;
        let actual = &$actual;
        ::tracing::debug!(
            check = %check,
            expected = ?expected,
            actual = ?actual,
            passed,
            "assertion"
        );
        assert!(
            passed,
            "{}: expected {:?}, got {:?}",
            check,
            expected,
            actual
        );
    }};
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    #[test]
    fn assert_with_log_evaluates_each_argument_once() {
        super::init_test_logging();
        let evaluations = Cell::new(0);
        let tick = |value: bool| {
            evaluations.set(evaluations.get() + 1);
            value
        };
        let owned = String::from("moved");
        crate::assert_with_log!(tick(owned.into_bytes().len() == 5), "len", 5, tick(true));
        assert_eq!(evaluations.get(), 2);
    }
}
