//! The Option algebra.
//!
//! [`Maybe`] is a two-variant union: `Present(value)` or `Absent`. Absence is
//! a variant, not a sentinel, so `Present(Maybe::Absent)` and `Present(None)`
//! are ordinary present values. The only collapse happens in
//! [`Maybe::from_nullable`], which maps `None` to `Absent` by definition.
//!
//! The combinator surface mirrors [`Fallible`](crate::Fallible), with `_async`
//! twins returning [`Exec`].

use crate::error::{ABSENT_MESSAGE, ContractViolation, Failure};
use crate::exec::Exec;
use crate::fallible::Fallible;
use crate::normalize::{Normalize, normalize_panic};
use futures_lite::FutureExt;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// A present value of type `T`, or nothing.
///
/// # Example
///
/// ```
/// use outcome_algebra::Maybe;
///
/// let mut slot = Maybe::Present(3);
/// let taken = slot.take();
/// assert_eq!(taken, Maybe::Present(3));
/// assert!(slot.is_none());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Maybe<T> {
    /// A value is held.
    Present(T),
    /// No value is held.
    #[default]
    Absent,
}

impl<T> Maybe<T> {
    /// Wraps a nullable value: `None` becomes `Absent`.
    pub fn from_nullable(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }

    /// Converts into a standard `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    /// Borrows the held value.
    pub const fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Present(v) => Maybe::Present(v),
            Self::Absent => Maybe::Absent,
        }
    }

    /// Mutably borrows the held value.
    pub fn as_mut(&mut self) -> Maybe<&mut T> {
        match self {
            Self::Present(v) => Maybe::Present(v),
            Self::Absent => Maybe::Absent,
        }
    }

    /// Returns `true` if a value is held.
    #[must_use]
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if no value is held.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if a value is held and `pred` holds for it.
    #[must_use]
    pub fn is_some_and(self, pred: impl FnOnce(T) -> bool) -> bool {
        match self {
            Self::Present(v) => pred(v),
            Self::Absent => false,
        }
    }

    /// Returns `true` if no value is held and `pred` holds.
    ///
    /// `pred` is not called when a value is held.
    #[must_use]
    pub fn is_none_and(self, pred: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Present(_) => false,
            Self::Absent => pred(),
        }
    }

    /// Asynchronous [`is_some_and`](Self::is_some_and).
    pub fn is_some_and_async<F, Fut>(self, pred: F) -> Exec<bool>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = bool> + 'static,
    {
        match self {
            Self::Present(v) => Exec::pending(pred(v)),
            Self::Absent => Exec::Immediate(false),
        }
    }

    /// Asynchronous [`is_none_and`](Self::is_none_and).
    pub fn is_none_and_async<F, Fut>(self, pred: F) -> Exec<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool> + 'static,
    {
        match self {
            Self::Present(_) => Exec::Immediate(false),
            Self::Absent => Exec::pending(pred()),
        }
    }

    /// Returns the held value.
    ///
    /// # Panics
    ///
    /// Panics with an `InvariantViolation` if no value is held.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Present(v) => v,
            Self::Absent => ContractViolation::invariant(ABSENT_MESSAGE).raise(),
        }
    }

    /// Returns the held value, panicking with `msg` if none is held.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self {
            Self::Present(v) => v,
            Self::Absent => ContractViolation::invariant(msg).raise(),
        }
    }

    /// Returns the held value or `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Present(v) => v,
            Self::Absent => default,
        }
    }

    /// Returns the held value or `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// Returns the held value or computes one.
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Present(v) => v,
            Self::Absent => f(),
        }
    }

    /// Asynchronous [`unwrap_or_else`](Self::unwrap_or_else).
    pub fn unwrap_or_else_async<F, Fut>(self, f: F) -> Exec<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        match self {
            Self::Present(v) => Exec::Immediate(v),
            Self::Absent => Exec::pending(f()),
        }
    }

    /// Transforms the held value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Self::Present(v) => Maybe::Present(f(v)),
            Self::Absent => Maybe::Absent,
        }
    }

    /// Asynchronous [`map`](Self::map).
    pub fn map_async<U: 'static, F, Fut>(self, f: F) -> Exec<Maybe<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + 'static,
    {
        match self {
            Self::Present(v) => {
                let fut = f(v);
                Exec::pending(async move { Maybe::Present(fut.await) })
            }
            Self::Absent => Exec::Immediate(Maybe::Absent),
        }
    }

    /// Chains a step that may produce nothing.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
        match self {
            Self::Present(v) => f(v),
            Self::Absent => Maybe::Absent,
        }
    }

    /// Asynchronous [`and_then`](Self::and_then).
    pub fn and_then_async<U: 'static, F, Fut>(self, f: F) -> Exec<Maybe<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Maybe<U>> + 'static,
    {
        match self {
            Self::Present(v) => Exec::pending(f(v)),
            Self::Absent => Exec::Immediate(Maybe::Absent),
        }
    }

    /// Returns `other` if a value is held, otherwise `Absent`.
    pub fn and<U>(self, other: Maybe<U>) -> Maybe<U> {
        match self {
            Self::Present(_) => other,
            Self::Absent => Maybe::Absent,
        }
    }

    /// Returns `self` if a value is held, otherwise `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Present(_) => self,
            Self::Absent => other,
        }
    }

    /// Returns `self` if a value is held, otherwise computes an alternative.
    #[must_use]
    pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Present(_) => self,
            Self::Absent => f(),
        }
    }

    /// Returns whichever side holds a value, if exactly one does.
    #[must_use]
    pub fn xor(self, other: Self) -> Self {
        match (self, other) {
            (present @ Self::Present(_), Self::Absent)
            | (Self::Absent, present @ Self::Present(_)) => present,
            _ => Self::Absent,
        }
    }

    /// Keeps the held value only if `pred` holds for it.
    #[must_use]
    pub fn filter(self, pred: impl FnOnce(&T) -> bool) -> Self {
        if let Self::Present(v) = self
            && pred(&v)
        {
            return Self::Present(v);
        }
        Self::Absent
    }

    /// Pairs two held values.
    pub fn zip<U>(self, other: Maybe<U>) -> Maybe<(T, U)> {
        match (self, other) {
            (Self::Present(a), Maybe::Present(b)) => Maybe::Present((a, b)),
            _ => Maybe::Absent,
        }
    }

    /// Moves the held value out, leaving `Absent` in its place.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Absent)
    }

    /// Stores `value`, returning whatever was held before.
    pub fn replace(&mut self, value: T) -> Self {
        std::mem::replace(self, Self::Present(value))
    }

    /// Converts into a [`Fallible`], using `error` when no value is held.
    pub fn ok_or<E>(self, error: E) -> Fallible<T, E> {
        match self {
            Self::Present(v) => Fallible::success(v),
            Self::Absent => Fallible::failure(error),
        }
    }

    /// Converts into a [`Fallible`], computing the error when needed.
    pub fn ok_or_else<E>(self, f: impl FnOnce() -> E) -> Fallible<T, E> {
        match self {
            Self::Present(v) => Fallible::success(v),
            Self::Absent => Fallible::failure(f()),
        }
    }

    /// Asynchronous [`ok_or_else`](Self::ok_or_else).
    pub fn ok_or_else_async<E: 'static, F, Fut>(self, f: F) -> Exec<Fallible<T, E>>
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = E> + 'static,
    {
        match self {
            Self::Present(v) => Exec::Immediate(Fallible::success(v)),
            Self::Absent => {
                let fut = f();
                Exec::pending(async move { Fallible::failure(fut.await) })
            }
        }
    }
}

impl<T: 'static> Maybe<T> {
    /// Awaits a nullable value.
    ///
    /// A panic while the input settles is reported as a failure rather than
    /// propagated.
    pub fn from_nullable_async<F>(input: F) -> Exec<Fallible<Self, Failure>>
    where
        F: Future<Output = Option<T>> + 'static,
    {
        Exec::pending(async move {
            match AssertUnwindSafe(input).catch_unwind().await {
                Ok(value) => Fallible::success(Self::from_nullable(value)),
                Err(payload) => Fallible::failure(Failure::new(normalize_panic(payload.as_ref()))),
            }
        })
    }

    /// Awaits a fallible nullable value.
    ///
    /// Both an `Err` and a panic while settling are normalized into the
    /// failure slot.
    pub fn try_from_nullable_async<F, E>(input: F) -> Exec<Fallible<Self, Failure>>
    where
        F: Future<Output = Result<Option<T>, E>> + 'static,
        E: Normalize,
    {
        Exec::pending(async move {
            match AssertUnwindSafe(input).catch_unwind().await {
                Ok(Ok(value)) => Fallible::success(Self::from_nullable(value)),
                Ok(Err(error)) => Fallible::failure(error.to_failure()),
                Err(payload) => Fallible::failure(Failure::new(normalize_panic(payload.as_ref()))),
            }
        })
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_nullable(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.into_option()
    }
}

/// Combinators on a `Maybe` whose execution mode is not yet known.
impl<T: 'static> Exec<Maybe<T>> {
    /// Settled [`Maybe::is_some`].
    pub fn is_some(self) -> Exec<bool> {
        self.map_value(|m| m.is_some())
    }

    /// Settled [`Maybe::is_none`].
    pub fn is_none(self) -> Exec<bool> {
        self.map_value(|m| m.is_none())
    }

    /// Settled [`Maybe::map`].
    pub fn map<U: 'static>(self, f: impl FnOnce(T) -> U + 'static) -> Exec<Maybe<U>> {
        self.map_value(move |m| m.map(f))
    }

    /// Settled [`Maybe::map_async`].
    pub fn map_async<U: 'static, F, Fut>(self, f: F) -> Exec<Maybe<U>>
    where
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = U> + 'static,
    {
        self.then(move |m| m.map_async(f))
    }

    /// Settled [`Maybe::and_then`].
    pub fn and_then<U: 'static>(self, f: impl FnOnce(T) -> Maybe<U> + 'static) -> Exec<Maybe<U>> {
        self.map_value(move |m| m.and_then(f))
    }

    /// Settled [`Maybe::and_then_async`].
    pub fn and_then_async<U: 'static, F, Fut>(self, f: F) -> Exec<Maybe<U>>
    where
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = Maybe<U>> + 'static,
    {
        self.then(move |m| m.and_then_async(f))
    }

    /// Settled [`Maybe::and`].
    pub fn and<U: 'static>(self, other: Maybe<U>) -> Exec<Maybe<U>> {
        self.map_value(move |m| m.and(other))
    }

    /// Settled [`Maybe::or`].
    pub fn or(self, other: Maybe<T>) -> Self {
        self.map_value(move |m| m.or(other))
    }

    /// Settled [`Maybe::or_else`].
    pub fn or_else(self, f: impl FnOnce() -> Maybe<T> + 'static) -> Self {
        self.map_value(move |m| m.or_else(f))
    }

    /// Settled [`Maybe::xor`].
    pub fn xor(self, other: Maybe<T>) -> Self {
        self.map_value(move |m| m.xor(other))
    }

    /// Settled [`Maybe::filter`].
    pub fn filter(self, pred: impl FnOnce(&T) -> bool + 'static) -> Self {
        self.map_value(move |m| m.filter(pred))
    }

    /// Settled [`Maybe::unwrap_or`].
    pub fn unwrap_or(self, default: T) -> Exec<T> {
        self.map_value(move |m| m.unwrap_or(default))
    }

    /// Settled [`Maybe::unwrap_or_else`].
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T + 'static) -> Exec<T> {
        self.map_value(move |m| m.unwrap_or_else(f))
    }

    /// Settled [`Maybe::ok_or`].
    pub fn ok_or<E: 'static>(self, error: E) -> Exec<Fallible<T, E>> {
        self.map_value(move |m| m.ok_or(error))
    }

    /// Settled [`Maybe::ok_or_else`].
    pub fn ok_or_else<E: 'static>(self, f: impl FnOnce() -> E + 'static) -> Exec<Fallible<T, E>> {
        self.map_value(move |m| m.ok_or_else(f))
    }
}
