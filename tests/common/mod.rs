//! Shared helpers for integration tests.

#![allow(dead_code)]

pub use outcome_algebra::test_utils::init_test_logging;

/// Starts a named test with logging installed.
pub fn init_test(name: &str) {
    init_test_logging();
    outcome_algebra::test_phase!(name);
}

macro_rules! assert_with_log {
    ($($args:tt)*) => {
        outcome_algebra::assert_with_log!($($args)*)
    };
}

macro_rules! test_section {
    ($name:expr) => {
        outcome_algebra::test_section!($name)
    };
}

macro_rules! test_complete {
    ($name:expr) => {
        outcome_algebra::test_complete!($name)
    };
}
