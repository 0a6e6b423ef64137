//! Failure normalization.
//!
//! Every capture boundary in the crate (builders, the tuple bridge, the wire
//! form) reduces a failure of arbitrary type to a `String`. The policy, first
//! match wins:
//!
//! 1. strings are returned unchanged;
//! 2. native errors yield their `Display` message;
//! 3. JSON objects with a string `message` property yield that property;
//! 4. anything else serializable yields its JSON text;
//! 5. if serialization fails, the `Debug` rendering is used.
//!
//! Normalization is total: it never panics and never reports an error.

use crate::error::Failure;
use serde::Serialize;
use std::any::Any;
use std::borrow::Cow;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt;

/// Description used for panic payloads that carry no recognizable value.
pub const OPAQUE_PANIC: &str = "panic with a non-string payload";

/// Conversion of a captured failure into its string form.
pub trait Normalize {
    /// Returns the normalized message.
    fn normalize(&self) -> String;

    /// Wraps the normalized message in a [`Failure`].
    fn to_failure(&self) -> Failure {
        Failure::new(self.normalize())
    }
}

impl<N: Normalize + ?Sized> Normalize for &N {
    fn normalize(&self) -> String {
        (**self).normalize()
    }
}

impl Normalize for str {
    fn normalize(&self) -> String {
        self.to_owned()
    }
}

impl Normalize for String {
    fn normalize(&self) -> String {
        self.clone()
    }
}

impl Normalize for Cow<'_, str> {
    fn normalize(&self) -> String {
        self.clone().into_owned()
    }
}

impl Normalize for Failure {
    fn normalize(&self) -> String {
        self.message().to_owned()
    }

    fn to_failure(&self) -> Failure {
        self.clone()
    }
}

impl Normalize for Infallible {
    fn normalize(&self) -> String {
        self.to_string()
    }
}

impl Normalize for serde_json::Value {
    fn normalize(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Object(map) => match map.get("message") {
                Some(Self::String(message)) => message.clone(),
                _ => serialize_or_debug(self),
            },
            other => serialize_or_debug(other),
        }
    }
}

impl Normalize for dyn StdError {
    fn normalize(&self) -> String {
        self.to_string()
    }
}

impl Normalize for dyn StdError + Send + Sync {
    fn normalize(&self) -> String {
        self.to_string()
    }
}

impl<E: Normalize + ?Sized> Normalize for Box<E> {
    fn normalize(&self) -> String {
        (**self).normalize()
    }
}

macro_rules! normalize_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Normalize for $ty {
                fn normalize(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

normalize_via_display!(
    std::io::Error,
    fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::char::ParseCharError,
    serde_json::Error,
    crate::error::MatchError,
    crate::error::ContractViolation,
);

/// Adapter normalizing any [`std::error::Error`] by its message.
///
/// ```
/// use outcome_algebra::normalize::{ErrorValue, Normalize};
///
/// #[derive(Debug)]
/// struct Timeout;
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("timed out")
///     }
/// }
/// impl std::error::Error for Timeout {}
///
/// assert_eq!(ErrorValue(Timeout).normalize(), "timed out");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorValue<E>(pub E);

impl<E: StdError> Normalize for ErrorValue<E> {
    fn normalize(&self) -> String {
        self.0.to_string()
    }
}

/// Adapter normalizing any serializable value structurally (rules 3 to 5).
///
/// ```
/// use outcome_algebra::normalize::{Json, Normalize};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct Rejected { code: u16 }
///
/// assert_eq!(Json(Rejected { code: 409 }).normalize(), r#"{"code":409}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize + fmt::Debug> Normalize for Json<T> {
    fn normalize(&self) -> String {
        match serde_json::to_value(&self.0) {
            Ok(value @ serde_json::Value::Object(_)) => value.normalize(),
            Ok(serde_json::Value::String(s)) => s,
            Ok(value) => serialize_or_debug(&value),
            Err(_) => format!("{:?}", self.0),
        }
    }
}

fn serialize_or_debug<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Normalizes a panic payload captured by `catch_unwind`.
///
/// `panic!` with a message produces a `&'static str` or `String` payload;
/// `std::panic::panic_any` can carry any of the crate's recognized failure
/// types. Anything else falls back to [`OPAQUE_PANIC`].
#[must_use]
pub fn normalize_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return (*s).to_owned();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    if let Some(failure) = payload.downcast_ref::<Failure>() {
        return failure.normalize();
    }
    if let Some(err) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
        return err.normalize();
    }
    if let Some(err) = payload.downcast_ref::<std::io::Error>() {
        return err.normalize();
    }
    if let Some(value) = payload.downcast_ref::<serde_json::Value>() {
        return value.normalize();
    }
    OPAQUE_PANIC.to_owned()
}
