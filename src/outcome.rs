//! The two-slot tagged union underlying [`Fallible`](crate::Fallible).
//!
//! Exactly one slot is populated. Behavior lives on the wrapper.

use serde::{Deserialize, Serialize};

/// A success value or a failure value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T, E> {
    /// Success slot.
    Ok(T),
    /// Failure slot.
    Err(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns `true` if the success slot is populated.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` if the failure slot is populated.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Borrows both slots.
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Ok(v) => Outcome::Ok(v),
            Self::Err(e) => Outcome::Err(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Ok(v) => Ok(v),
            Outcome::Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_exclusive() {
        let ok: Outcome<u8, &str> = Outcome::Ok(1);
        assert!(ok.is_ok());
        assert!(!ok.is_err());

        let err: Outcome<u8, &str> = Outcome::Err("e");
        assert!(err.is_err());
        assert!(!err.is_ok());
    }

    #[test]
    fn std_result_conversions() {
        let outcome: Outcome<u8, &str> = Ok(3).into();
        assert_eq!(outcome, Outcome::Ok(3));
        let back: Result<u8, &str> = Outcome::Err("e").into();
        assert_eq!(back, Err("e"));
    }

    #[test]
    fn as_ref_borrows() {
        let outcome: Outcome<String, String> = Outcome::Ok("v".into());
        assert_eq!(outcome.as_ref(), Outcome::Ok(&"v".to_string()));
    }
}
