//! Boundary shapes: the flat serializable outcome and the positional tuple.
//!
//! [`SerializableOutcome`] serializes as `{"value": .., "ok": true}` or
//! `{"error": "..", "ok": false}`. The `ok` tag duplicates slot presence for
//! consumers that cannot inspect which key is set. The error is always a
//! plain string.
//!
//! [`GoifyResult`] is a two-slot tuple, `(Some(value), None)` or
//! `(None, Some(error))`, serialized as `[value, null]` or `[null, error]`.

use crate::error::Failure;
use crate::fallible::Fallible;
use crate::normalize::Normalize;
use crate::outcome::Outcome;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Positional success/failure pair. Exactly one slot is `Some`.
pub type GoifyResult<T, E> = (Option<T>, Option<E>);

/// Wire-safe outcome with an explicit `ok` discriminant.
///
/// # Example
///
/// ```
/// use outcome_algebra::{Fallible, SerializableOutcome};
///
/// let wire = Fallible::<_, String>::success(7).to_serializable();
/// assert_eq!(serde_json::to_string(&wire).unwrap(), r#"{"value":7,"ok":true}"#);
///
/// let back: SerializableOutcome<i32> =
///     serde_json::from_str(r#"{"error":"x","ok":false}"#).unwrap();
/// assert_eq!(Fallible::from(back).unwrap_err().message(), "x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SerializableOutcome<T> {
    /// `{ "value": T, "ok": true }`
    Ok {
        /// Success payload.
        value: T,
    },
    /// `{ "error": string, "ok": false }`
    Err {
        /// Normalized failure message.
        error: String,
    },
}

impl<T> SerializableOutcome<T> {
    /// Creates the success form.
    pub const fn ok(value: T) -> Self {
        Self::Ok { value }
    }

    /// Creates the failure form.
    pub fn err(error: impl Into<String>) -> Self {
        Self::Err {
            error: error.into(),
        }
    }

    /// Value of the `ok` tag.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl<T: Serialize> Serialize for SerializableOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SerializableOutcome", 2)?;
        match self {
            Self::Ok { value } => {
                state.serialize_field("value", value)?;
                state.serialize_field("ok", &true)?;
            }
            Self::Err { error } => {
                state.serialize_field("error", error)?;
                state.serialize_field("ok", &false)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(bound = "T: Deserialize<'de>")]
struct WireOutcome<T> {
    ok: bool,
    #[serde(default, deserialize_with = "present")]
    value: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

// A present `value` key is `Some` even when its payload is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SerializableOutcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireOutcome::<T>::deserialize(deserializer)?;
        match (wire.ok, wire.value, wire.error) {
            (_, Some(_), Some(_)) => Err(D::Error::custom(
                "an outcome carries either `value` or `error`, not both",
            )),
            (true, Some(value), _) => Ok(Self::Ok { value }),
            (false, _, Some(error)) => Ok(Self::Err { error }),
            (true, None, _) => Err(D::Error::custom("`ok: true` requires a `value` field")),
            (false, _, None) => Err(D::Error::custom("`ok: false` requires an `error` field")),
        }
    }
}

impl<T, E: Normalize> Fallible<T, E> {
    /// Converts to the wire form, normalizing the failure to a string.
    pub fn to_serializable(self) -> SerializableOutcome<T> {
        match self.into_outcome() {
            Outcome::Ok(value) => SerializableOutcome::Ok { value },
            Outcome::Err(error) => SerializableOutcome::Err {
                error: error.normalize(),
            },
        }
    }
}

impl<T, E: Normalize> From<Fallible<T, E>> for SerializableOutcome<T> {
    fn from(fallible: Fallible<T, E>) -> Self {
        fallible.to_serializable()
    }
}

impl<T> From<SerializableOutcome<T>> for Fallible<T, Failure> {
    fn from(wire: SerializableOutcome<T>) -> Self {
        match wire {
            SerializableOutcome::Ok { value } => Self::success(value),
            SerializableOutcome::Err { error } => Self::failure(Failure::new(error)),
        }
    }
}
