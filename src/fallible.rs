//! The Result algebra.
//!
//! [`Fallible`] owns one [`Outcome`] and exposes inspection, extraction and
//! chaining combinators. Every combinator consumes the receiver and returns a
//! new value. Each function-taking combinator has an `_async` twin whose
//! function returns a future; the twin yields an [`Exec`] that is pending
//! exactly when that function ran.
//!
//! Chains that have already become pending continue on
//! `Exec<Fallible<T, E>>`, which offers the same combinators.

use crate::error::ContractViolation;
use crate::exec::Exec;
use crate::maybe::Maybe;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

/// A success value of type `T` or a failure value of type `E`.
///
/// # Example
///
/// ```
/// use outcome_algebra::Fallible;
///
/// let parsed: Fallible<i32, String> = Fallible::success(21);
/// let doubled = parsed.map(|x| x * 2).and_then(|x| {
///     if x > 40 { Fallible::success(x) } else { Fallible::failure("too small".to_string()) }
/// });
/// assert_eq!(doubled.unwrap(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use = "this `Fallible` may hold a failure that should be handled"]
pub struct Fallible<T, E> {
    outcome: Outcome<T, E>,
}

impl<T, E> Fallible<T, E> {
    /// Creates a success.
    pub const fn success(value: T) -> Self {
        Self {
            outcome: Outcome::Ok(value),
        }
    }

    /// Creates a failure.
    pub const fn failure(error: E) -> Self {
        Self {
            outcome: Outcome::Err(error),
        }
    }

    /// Wraps an existing outcome.
    pub const fn from_outcome(outcome: Outcome<T, E>) -> Self {
        Self { outcome }
    }

    /// Returns the underlying outcome.
    pub fn into_outcome(self) -> Outcome<T, E> {
        self.outcome
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, E> {
        self.outcome.into()
    }

    /// Borrows both slots.
    pub const fn as_ref(&self) -> Fallible<&T, &E> {
        Fallible::from_outcome(self.outcome.as_ref())
    }

    /// Returns `true` if this is a success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns `true` if this is a failure.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        self.outcome.is_err()
    }

    /// Returns `true` if this is a success and `pred` holds for the value.
    ///
    /// `pred` is not called on a failure.
    #[must_use]
    pub fn is_ok_and(self, pred: impl FnOnce(T) -> bool) -> bool {
        match self.outcome {
            Outcome::Ok(v) => pred(v),
            Outcome::Err(_) => false,
        }
    }

    /// Returns `true` if this is a failure and `pred` holds for the error.
    #[must_use]
    pub fn is_err_and(self, pred: impl FnOnce(E) -> bool) -> bool {
        match self.outcome {
            Outcome::Ok(_) => false,
            Outcome::Err(e) => pred(e),
        }
    }

    /// Asynchronous [`is_ok_and`](Self::is_ok_and).
    pub fn is_ok_and_async<F, Fut>(self, pred: F) -> Exec<bool>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = bool> + 'static,
    {
        match self.outcome {
            Outcome::Ok(v) => Exec::pending(pred(v)),
            Outcome::Err(_) => Exec::Immediate(false),
        }
    }

    /// Asynchronous [`is_err_and`](Self::is_err_and).
    pub fn is_err_and_async<F, Fut>(self, pred: F) -> Exec<bool>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = bool> + 'static,
    {
        match self.outcome {
            Outcome::Ok(_) => Exec::Immediate(false),
            Outcome::Err(e) => Exec::pending(pred(e)),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with an `InvariantViolation` carrying the failure value.
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self.outcome {
            Outcome::Ok(v) => v,
            Outcome::Err(e) => ContractViolation::invariant(format!("{e:?}")).raise(),
        }
    }

    /// Returns the success value, panicking with `msg` on a failure.
    ///
    /// The failure value itself is discarded.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self.outcome {
            Outcome::Ok(v) => v,
            Outcome::Err(_) => ContractViolation::invariant(msg).raise(),
        }
    }

    /// Returns the success value or `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self.outcome {
            Outcome::Ok(v) => v,
            Outcome::Err(_) => default,
        }
    }

    /// Returns the success value or `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|_| T::default())
    }

    /// Returns the success value or computes a fallback from the error.
    pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T) -> T {
        match self.outcome {
            Outcome::Ok(v) => v,
            Outcome::Err(e) => f(e),
        }
    }

    /// Asynchronous [`unwrap_or_else`](Self::unwrap_or_else).
    ///
    /// Immediate on success; pending when the fallback runs.
    pub fn unwrap_or_else_async<F, Fut>(self, f: F) -> Exec<T>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        match self.outcome {
            Outcome::Ok(v) => Exec::Immediate(v),
            Outcome::Err(e) => Exec::pending(f(e)),
        }
    }

    /// Returns the failure value.
    ///
    /// # Panics
    ///
    /// Panics with an `InvariantViolation` carrying the success value.
    #[track_caller]
    pub fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        match self.outcome {
            Outcome::Ok(v) => ContractViolation::invariant(format!("{v:?}")).raise(),
            Outcome::Err(e) => e,
        }
    }

    /// Returns the failure value, panicking with `msg` on a success.
    #[track_caller]
    pub fn expect_err(self, msg: &str) -> E {
        match self.outcome {
            Outcome::Ok(_) => ContractViolation::invariant(msg).raise(),
            Outcome::Err(e) => e,
        }
    }

    /// Transforms the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fallible<U, E> {
        match self.outcome {
            Outcome::Ok(v) => Fallible::success(f(v)),
            Outcome::Err(e) => Fallible::failure(e),
        }
    }

    /// Asynchronous [`map`](Self::map).
    pub fn map_async<U: 'static, F, Fut>(self, f: F) -> Exec<Fallible<U, E>>
    where
        E: 'static,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + 'static,
    {
        match self.outcome {
            Outcome::Ok(v) => {
                let fut = f(v);
                Exec::pending(async move { Fallible::success(fut.await) })
            }
            Outcome::Err(e) => Exec::Immediate(Fallible::failure(e)),
        }
    }

    /// Transforms the failure value.
    pub fn map_err<F2>(self, f: impl FnOnce(E) -> F2) -> Fallible<T, F2> {
        match self.outcome {
            Outcome::Ok(v) => Fallible::success(v),
            Outcome::Err(e) => Fallible::failure(f(e)),
        }
    }

    /// Asynchronous [`map_err`](Self::map_err).
    pub fn map_err_async<F2: 'static, F, Fut>(self, f: F) -> Exec<Fallible<T, F2>>
    where
        T: 'static,
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = F2> + 'static,
    {
        match self.outcome {
            Outcome::Ok(v) => Exec::Immediate(Fallible::success(v)),
            Outcome::Err(e) => {
                let fut = f(e);
                Exec::pending(async move { Fallible::failure(fut.await) })
            }
        }
    }

    /// Returns `other` if this is a success, otherwise propagates the failure.
    pub fn and<U>(self, other: Fallible<U, E>) -> Fallible<U, E> {
        match self.outcome {
            Outcome::Ok(_) => other,
            Outcome::Err(e) => Fallible::failure(e),
        }
    }

    /// Returns `self` if this is a success, otherwise `other`.
    pub fn or<F2>(self, other: Fallible<T, F2>) -> Fallible<T, F2> {
        match self.outcome {
            Outcome::Ok(v) => Fallible::success(v),
            Outcome::Err(_) => other,
        }
    }

    /// Chains a fallible step on the success value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Fallible<U, E>) -> Fallible<U, E> {
        match self.outcome {
            Outcome::Ok(v) => f(v),
            Outcome::Err(e) => Fallible::failure(e),
        }
    }

    /// Asynchronous [`and_then`](Self::and_then).
    pub fn and_then_async<U: 'static, F, Fut>(self, f: F) -> Exec<Fallible<U, E>>
    where
        E: 'static,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Fallible<U, E>> + 'static,
    {
        match self.outcome {
            Outcome::Ok(v) => Exec::pending(f(v)),
            Outcome::Err(e) => Exec::Immediate(Fallible::failure(e)),
        }
    }

    /// Recovers from a failure with a fallible step.
    pub fn or_else<F2>(self, f: impl FnOnce(E) -> Fallible<T, F2>) -> Fallible<T, F2> {
        match self.outcome {
            Outcome::Ok(v) => Fallible::success(v),
            Outcome::Err(e) => f(e),
        }
    }

    /// Asynchronous [`or_else`](Self::or_else).
    pub fn or_else_async<F2: 'static, F, Fut>(self, f: F) -> Exec<Fallible<T, F2>>
    where
        T: 'static,
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Fallible<T, F2>> + 'static,
    {
        match self.outcome {
            Outcome::Ok(v) => Exec::Immediate(Fallible::success(v)),
            Outcome::Err(e) => Exec::pending(f(e)),
        }
    }

    /// Calls `f` with a reference to the success value.
    pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
        if let Outcome::Ok(v) = &self.outcome {
            f(v);
        }
        self
    }

    /// Calls `f` with a reference to the failure value.
    pub fn inspect_err(self, f: impl FnOnce(&E)) -> Self {
        if let Outcome::Err(e) = &self.outcome {
            f(e);
        }
        self
    }

    /// Converts the success slot into a [`Maybe`], discarding any failure.
    pub fn ok(self) -> Maybe<T> {
        match self.outcome {
            Outcome::Ok(v) => Maybe::Present(v),
            Outcome::Err(_) => Maybe::Absent,
        }
    }

    /// Converts the failure slot into a [`Maybe`], discarding any success.
    pub fn err(self) -> Maybe<E> {
        match self.outcome {
            Outcome::Ok(_) => Maybe::Absent,
            Outcome::Err(e) => Maybe::Present(e),
        }
    }
}

impl<T, E> Fallible<Fallible<T, E>, E> {
    /// Removes one level of nesting.
    pub fn flatten(self) -> Fallible<T, E> {
        self.and_then(|inner| inner)
    }
}

impl<T, E> From<Result<T, E>> for Fallible<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_outcome(result.into())
    }
}

impl<T, E> From<Fallible<T, E>> for Result<T, E> {
    fn from(fallible: Fallible<T, E>) -> Self {
        fallible.into_result()
    }
}

impl<T, E> From<Outcome<T, E>> for Fallible<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        Self::from_outcome(outcome)
    }
}

/// Combinators on a `Fallible` whose execution mode is not yet known.
///
/// Each step waits for the previous one; an immediate input stays immediate
/// through synchronous steps.
impl<T: 'static, E: 'static> Exec<Fallible<T, E>> {
    /// Settled [`Fallible::is_ok`].
    pub fn is_ok(self) -> Exec<bool> {
        self.map_value(|r| r.is_ok())
    }

    /// Settled [`Fallible::is_err`].
    pub fn is_err(self) -> Exec<bool> {
        self.map_value(|r| r.is_err())
    }

    /// Settled [`Fallible::is_ok_and`].
    pub fn is_ok_and(self, pred: impl FnOnce(T) -> bool + 'static) -> Exec<bool> {
        self.map_value(move |r| r.is_ok_and(pred))
    }

    /// Settled [`Fallible::is_err_and`].
    pub fn is_err_and(self, pred: impl FnOnce(E) -> bool + 'static) -> Exec<bool> {
        self.map_value(move |r| r.is_err_and(pred))
    }

    /// Settled [`Fallible::map`].
    pub fn map<U: 'static>(self, f: impl FnOnce(T) -> U + 'static) -> Exec<Fallible<U, E>> {
        self.map_value(move |r| r.map(f))
    }

    /// Settled [`Fallible::map_async`].
    pub fn map_async<U: 'static, F, Fut>(self, f: F) -> Exec<Fallible<U, E>>
    where
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = U> + 'static,
    {
        self.then(move |r| r.map_async(f))
    }

    /// Settled [`Fallible::map_err`].
    pub fn map_err<F2: 'static>(self, f: impl FnOnce(E) -> F2 + 'static) -> Exec<Fallible<T, F2>> {
        self.map_value(move |r| r.map_err(f))
    }

    /// Settled [`Fallible::map_err_async`].
    pub fn map_err_async<F2: 'static, F, Fut>(self, f: F) -> Exec<Fallible<T, F2>>
    where
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = F2> + 'static,
    {
        self.then(move |r| r.map_err_async(f))
    }

    /// Settled [`Fallible::and`].
    pub fn and<U: 'static>(self, other: Fallible<U, E>) -> Exec<Fallible<U, E>> {
        self.map_value(move |r| r.and(other))
    }

    /// Settled [`Fallible::or`].
    pub fn or<F2: 'static>(self, other: Fallible<T, F2>) -> Exec<Fallible<T, F2>> {
        self.map_value(move |r| r.or(other))
    }

    /// Settled [`Fallible::and_then`].
    pub fn and_then<U: 'static>(
        self,
        f: impl FnOnce(T) -> Fallible<U, E> + 'static,
    ) -> Exec<Fallible<U, E>> {
        self.map_value(move |r| r.and_then(f))
    }

    /// Settled [`Fallible::and_then_async`].
    pub fn and_then_async<U: 'static, F, Fut>(self, f: F) -> Exec<Fallible<U, E>>
    where
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = Fallible<U, E>> + 'static,
    {
        self.then(move |r| r.and_then_async(f))
    }

    /// Settled [`Fallible::or_else`].
    pub fn or_else<F2: 'static>(
        self,
        f: impl FnOnce(E) -> Fallible<T, F2> + 'static,
    ) -> Exec<Fallible<T, F2>> {
        self.map_value(move |r| r.or_else(f))
    }

    /// Settled [`Fallible::or_else_async`].
    pub fn or_else_async<F2: 'static, F, Fut>(self, f: F) -> Exec<Fallible<T, F2>>
    where
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = Fallible<T, F2>> + 'static,
    {
        self.then(move |r| r.or_else_async(f))
    }

    /// Settled [`Fallible::unwrap_or`].
    pub fn unwrap_or(self, default: T) -> Exec<T> {
        self.map_value(move |r| r.unwrap_or(default))
    }

    /// Settled [`Fallible::unwrap_or_else`].
    pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T + 'static) -> Exec<T> {
        self.map_value(move |r| r.unwrap_or_else(f))
    }

    /// Settled [`Fallible::unwrap_or_else_async`].
    pub fn unwrap_or_else_async<F, Fut>(self, f: F) -> Exec<T>
    where
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = T> + 'static,
    {
        self.then(move |r| r.unwrap_or_else_async(f))
    }

    /// Settled [`Fallible::ok`].
    pub fn ok(self) -> Exec<Maybe<T>> {
        self.map_value(Fallible::ok)
    }

    /// Settled [`Fallible::err`].
    pub fn err(self) -> Exec<Maybe<E>> {
        self.map_value(Fallible::err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    fn ok(v: i32) -> Fallible<i32, String> {
        Fallible::success(v)
    }

    fn err(e: &str) -> Fallible<i32, String> {
        Fallible::failure(e.to_string())
    }

    #[test]
    fn inspection() {
        init_test("inspection");
        assert!(ok(1).is_ok());
        assert!(!ok(1).is_err());
        assert!(err("e").is_err());
        assert!(ok(2).is_ok_and(|v| v == 2));
        assert!(!ok(2).is_ok_and(|v| v == 3));
        assert!(err("e").is_err_and(|e| e == "e"));
        assert!(!ok(2).is_err_and(|_| true));
        crate::test_complete!("inspection");
    }

    #[test]
    fn predicate_not_called_on_other_slot() {
        init_test("predicate_not_called_on_other_slot");
        let called = Cell::new(false);
        assert!(!err("e").is_ok_and(|_| {
            called.set(true);
            true
        }));
        assert!(!ok(1).is_err_and(|_| {
            called.set(true);
            true
        }));
        assert!(!called.get());
        crate::test_complete!("predicate_not_called_on_other_slot");
    }

    #[test]
    fn async_predicates_follow_slot() {
        init_test("async_predicates_follow_slot");
        let exec = ok(4).is_ok_and_async(|v| async move { v % 2 == 0 });
        assert!(exec.is_pending());
        assert!(exec.wait());

        let exec = err("e").is_ok_and_async(|v| async move { v > 0 });
        assert!(exec.is_immediate());
        assert!(!exec.wait());

        let exec = err("e").is_err_and_async(|e| async move { e == "e" });
        assert!(exec.is_pending());
        assert!(exec.wait());
        crate::test_complete!("async_predicates_follow_slot");
    }

    #[test]
    fn unwrap_family() {
        init_test("unwrap_family");
        assert_eq!(ok(5).unwrap(), 5);
        assert_eq!(ok(5).expect("present"), 5);
        assert_eq!(err("e").unwrap_or(9), 9);
        assert_eq!(ok(5).unwrap_or(9), 5);
        assert_eq!(err("abc").unwrap_or_else(|e| i32::try_from(e.len()).unwrap()), 3);
        assert_eq!(err("e").unwrap_or_default(), 0);
        assert_eq!(err("e").unwrap_err(), "e");
        assert_eq!(err("e").expect_err("failed"), "e");
        crate::test_complete!("unwrap_family");
    }

    #[test]
    #[should_panic(expected = "InvariantViolation: \"boom\"")]
    fn unwrap_on_failure_panics_with_failure() {
        let _ = err("boom").unwrap();
    }

    #[test]
    #[should_panic(expected = "InvariantViolation: boom")]
    fn unwrap_failure_reports_message() {
        use crate::error::Failure;
        let _ = Fallible::<i32, Failure>::failure(Failure::new("boom")).unwrap();
    }

    #[test]
    #[should_panic(expected = "InvariantViolation: needed a value")]
    fn expect_on_failure_uses_message() {
        let _ = err("boom").expect("needed a value");
    }

    #[test]
    #[should_panic(expected = "InvariantViolation: 7")]
    fn unwrap_err_on_success_panics() {
        let _ = ok(7).unwrap_err();
    }

    #[test]
    #[should_panic(expected = "InvariantViolation: wanted failure")]
    fn expect_err_on_success_uses_message() {
        let _ = ok(7).expect_err("wanted failure");
    }

    #[test]
    fn unwrap_or_else_async_mode() {
        init_test("unwrap_or_else_async_mode");
        let exec = ok(1).unwrap_or_else_async(|_| async { 0 });
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), 1);

        let exec = err("e").unwrap_or_else_async(|_| async { 0 });
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), 0);
        crate::test_complete!("unwrap_or_else_async_mode");
    }

    #[test]
    fn map_and_map_err() {
        init_test("map_and_map_err");
        assert_eq!(ok(2).map(|v| v * 3), ok(6));
        assert_eq!(err("e").map(|v| v * 3), err("e"));
        assert_eq!(err("e").map_err(|e| e.len()), Fallible::failure(1));
        assert_eq!(ok(2).map_err(|e| e.len()), Fallible::success(2));
        crate::test_complete!("map_and_map_err");
    }

    #[test]
    fn map_async_is_pending_only_when_run() {
        init_test("map_async_is_pending_only_when_run");
        let exec = ok(2).map_async(|v| async move { v + 1 });
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), ok(3));

        let exec = err("e").map_async(|v| async move { v + 1 });
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), err("e"));

        let exec = err("e").map_err_async(|e| async move { format!("{e}!") });
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), err("e!"));

        let exec = ok(1).map_err_async(|e| async move { format!("{e}!") });
        assert!(exec.is_immediate());
        crate::test_complete!("map_async_is_pending_only_when_run");
    }

    #[test]
    fn and_or() {
        init_test("and_or");
        assert_eq!(ok(1).and(ok(2)), ok(2));
        assert_eq!(ok(1).and(err("b")), err("b"));
        assert_eq!(err("a").and(ok(2)), err("a"));
        assert_eq!(ok(1).or(ok(2)), ok(1));
        assert_eq!(err("a").or(ok(2)), ok(2));
        assert_eq!(err("a").or(err("b")), err("b"));
        crate::test_complete!("and_or");
    }

    #[test]
    fn bind_family() {
        init_test("bind_family");
        let half = |v: i32| {
            if v % 2 == 0 {
                ok(v / 2)
            } else {
                err("odd")
            }
        };
        assert_eq!(ok(8).and_then(half).and_then(half), ok(2));
        assert_eq!(ok(6).and_then(half).and_then(half), err("odd"));
        assert_eq!(err("x").and_then(half), err("x"));
        assert_eq!(err("x").or_else(|e| ok(i32::try_from(e.len()).unwrap())), ok(1));
        assert_eq!(ok(3).or_else(|_| ok(0)), ok(3));
        crate::test_complete!("bind_family");
    }

    #[test]
    fn bind_async() {
        init_test("bind_async");
        let exec = ok(8).and_then_async(|v| async move { ok(v / 2) });
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), ok(4));

        let exec = err("x").and_then_async(|v| async move { ok(v) });
        assert!(exec.is_immediate());

        let exec = err("x").or_else_async(|_| async { ok(0) });
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), ok(0));

        let exec = ok(1).or_else_async(|_| async { ok(0) });
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), ok(1));
        crate::test_complete!("bind_async");
    }

    #[test]
    fn pending_chain_continues_in_order() {
        init_test("pending_chain_continues_in_order");
        let steps = Rc::new(Cell::new(0));
        let (s1, s2) = (Rc::clone(&steps), Rc::clone(&steps));

        let exec = ok(1)
            .map_async(|v| async move { v + 1 })
            .map(move |v| {
                assert_eq!(s1.get(), 0);
                s1.set(1);
                v * 10
            })
            .and_then_async(move |v| async move {
                assert_eq!(s2.get(), 1);
                s2.set(2);
                ok(v + 1)
            })
            .unwrap_or(0);

        assert_eq!(steps.get(), 0);
        assert_eq!(exec.wait(), 21);
        assert_eq!(steps.get(), 2);
        crate::test_complete!("pending_chain_continues_in_order");
    }

    #[test]
    fn immediate_chain_stays_immediate() {
        init_test("immediate_chain_stays_immediate");
        let exec = Exec::Immediate(ok(1))
            .map(|v| v + 1)
            .and_then(|v| ok(v * 2))
            .or_else(|_| ok(0))
            .map_err(|e| e.len());
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), Fallible::success(4));

        let exec = Exec::Immediate(err("e")).map_async(|v| async move { v });
        assert!(exec.is_immediate());
        crate::test_complete!("immediate_chain_stays_immediate");
    }

    #[test]
    fn settled_inspection_and_conversion() {
        init_test("settled_inspection_and_conversion");
        let pending = || Exec::pending(async { ok(3) });
        assert!(pending().is_ok().wait());
        assert!(!pending().is_err().wait());
        assert!(pending().is_ok_and(|v| v == 3).wait());
        assert!(!pending().is_err_and(|_| true).wait());
        assert_eq!(pending().ok().wait(), Maybe::Present(3));
        assert_eq!(pending().err().wait(), Maybe::Absent);
        assert_eq!(pending().and(ok(4)).wait(), ok(4));
        assert_eq!(pending().or(ok(4)).wait(), ok(3));
        assert_eq!(
            Exec::pending(async { err("e") })
                .unwrap_or_else(|e| i32::try_from(e.len()).unwrap())
                .wait(),
            1
        );
        assert_eq!(
            Exec::pending(async { err("e") })
                .unwrap_or_else_async(|_| async { 5 })
                .wait(),
            5
        );
        assert_eq!(
            Exec::pending(async { err("e") })
                .map_err_async(|e| async move { e.len() })
                .wait(),
            Fallible::failure(1)
        );
        assert_eq!(
            Exec::pending(async { err("e") })
                .or_else_async(|_| async { ok(8) })
                .wait(),
            ok(8)
        );
        crate::test_complete!("settled_inspection_and_conversion");
    }

    #[test]
    fn conversions() {
        init_test("conversions");
        let r: Result<i32, String> = ok(1).into();
        assert_eq!(r, Ok(1));
        assert_eq!(Fallible::from(Err::<i32, _>("e".to_string())), err("e"));
        assert_eq!(ok(1).ok(), Maybe::Present(1));
        assert_eq!(ok(1).err(), Maybe::Absent);
        assert_eq!(err("e").err(), Maybe::Present("e".to_string()));
        assert_eq!(Fallible::<_, String>::success(ok(1)).flatten(), ok(1));
        assert_eq!(ok(1).as_ref().map(|v| *v + 1), Fallible::success(2));
        assert_eq!(ok(1).into_outcome(), Outcome::Ok(1));
        crate::test_complete!("conversions");
    }

    #[test]
    fn inspect_sees_matching_slot() {
        init_test("inspect_sees_matching_slot");
        let seen = Cell::new(0);
        let _ = ok(4).inspect(|v| seen.set(*v)).inspect_err(|_| seen.set(-1));
        assert_eq!(seen.get(), 4);
        let _ = err("e").inspect(|v| seen.set(*v)).inspect_err(|_| seen.set(-1));
        assert_eq!(seen.get(), -1);
        crate::test_complete!("inspect_sees_matching_slot");
    }

    #[test]
    fn serde_is_transparent_over_outcome() {
        init_test("serde_is_transparent_over_outcome");
        let json = serde_json::to_string(&ok(1)).unwrap();
        assert_eq!(json, r#"{"ok":1}"#);
        let back: Fallible<i32, String> = serde_json::from_str(r#"{"err":"e"}"#).unwrap();
        assert_eq!(back, err("e"));
        crate::test_complete!("serde_is_transparent_over_outcome");
    }
}
