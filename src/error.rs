//! Failure and contract-violation types.
//!
//! [`Failure`] is the structured failure object produced wherever a captured
//! failure is normalized: builders, the tuple bridge, and conversions from the
//! wire form. [`ContractViolation`] describes programmer errors (unwrapping the
//! wrong slot, dispatching with handlers that do not fit); those are raised as
//! panics and never returned.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Message carried by the failure generated for an absent [`Maybe`](crate::Maybe).
pub const ABSENT_MESSAGE: &str = "Option is None";

/// A normalized failure: a plain message.
///
/// # Example
///
/// ```
/// use outcome_algebra::Failure;
///
/// let failure = Failure::new("disk full");
/// assert_eq!(failure.message(), "disk full");
/// assert_eq!(failure.to_string(), "disk full");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

// Bare message, so `unwrap` on a `Fallible<_, Failure>` reports the message itself.
impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Failure {
    /// Creates a failure with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure generated for an absent value.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(ABSENT_MESSAGE)
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the failure, returning its message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<Failure> for String {
    fn from(failure: Failure) -> Self {
        failure.message
    }
}

impl From<std::convert::Infallible> for Failure {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Which wrapper family a dispatch concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// `Maybe` (`Present` / `Absent`).
    Option,
    /// `Fallible` (`Ok` / `Err`).
    Result,
}

impl WrapperKind {
    /// Names of the handler pair this family requires.
    #[must_use]
    pub const fn required_handlers(self) -> &'static str {
        match self {
            Self::Option => "some/none",
            Self::Result => "ok/err",
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option => f.write_str("Option"),
            Self::Result => f.write_str("Result"),
        }
    }
}

/// Error returned by runtime dispatch over wrapper values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The input is not an instance of either wrapper family.
    #[error("cannot match on value of type `{type_name}`: not an Option or Result wrapper")]
    Unrecognized {
        /// Best-effort name of the rejected type.
        type_name: &'static str,
    },
    /// The handler record lacks the pair required for the input's family.
    #[error("{kind} input requires {} handlers", .kind.required_handlers())]
    MissingHandlers {
        /// Family of the input value.
        kind: WrapperKind,
    },
}

/// A programmer error detected at an unwrap, expect, or dispatch boundary.
///
/// These are raised with `panic!` using the `Display` rendering; callers are
/// not expected to recover from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A value was extracted from the wrong slot.
    #[error("InvariantViolation: {message}")]
    Invariant {
        /// Stringified failure value or caller-supplied message.
        message: String,
    },
    /// Dispatch could not proceed.
    #[error("MatchError: {0}")]
    Match(#[from] MatchError),
}

impl ContractViolation {
    /// Creates an invariant violation with the given message.
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// Raises this violation as a panic.
    #[track_caller]
    pub fn raise(self) -> ! {
        #[cfg(feature = "tracing-integration")]
        tracing::debug!(violation = %self, "contract violation");
        panic!("{self}")
    }
}
