//! Builders: run an operation and capture its outcome.
//!
//! An operation returns something implementing [`Attempt`]: a `Result`, a
//! [`Fallible`], or an [`Exec`] of either. The builder runs the operation
//! eagerly and then looks at what came back. An immediate attempt yields an
//! immediate wrapper; a pending one yields a pending wrapper that captures
//! the eventual settlement.
//!
//! Failures are normalized into [`Failure`]: `Err` values through
//! [`Normalize`], panics (raised by the operation or while a pending value
//! settles) through [`normalize_panic`].

use crate::error::Failure;
use crate::exec::Exec;
use crate::fallible::Fallible;
use crate::normalize::{Normalize, normalize_panic};
use crate::outcome::Outcome;
use crate::wire::{GoifyResult, SerializableOutcome};
use futures_lite::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// A value returned by an operation handed to a builder.
pub trait Attempt {
    /// Success type.
    type Value;

    /// Captures this attempt as a normalized outcome.
    fn settle(self) -> Exec<Fallible<Self::Value, Failure>>;
}

/// An attempt that is always available without suspension.
pub trait SyncAttempt: Attempt {
    /// Captures this attempt as a normalized outcome.
    fn settle_now(self) -> Fallible<Self::Value, Failure>;
}

impl<T, E: Normalize> Attempt for Result<T, E> {
    type Value = T;

    fn settle(self) -> Exec<Fallible<T, Failure>> {
        Exec::Immediate(self.settle_now())
    }
}

impl<T, E: Normalize> SyncAttempt for Result<T, E> {
    fn settle_now(self) -> Fallible<T, Failure> {
        match self {
            Ok(value) => Fallible::success(value),
            Err(error) => Fallible::failure(captured(error.to_failure())),
        }
    }
}

impl<T, E: Normalize> Attempt for Fallible<T, E> {
    type Value = T;

    fn settle(self) -> Exec<Fallible<T, Failure>> {
        Exec::Immediate(self.settle_now())
    }
}

impl<T, E: Normalize> SyncAttempt for Fallible<T, E> {
    fn settle_now(self) -> Fallible<T, Failure> {
        match self.into_outcome() {
            Outcome::Ok(value) => Fallible::success(value),
            Outcome::Err(error) => Fallible::failure(captured(error.to_failure())),
        }
    }
}

impl<A> Attempt for Exec<A>
where
    A: Attempt + 'static,
    A::Value: 'static,
{
    type Value = A::Value;

    fn settle(self) -> Exec<Fallible<A::Value, Failure>> {
        match self {
            Self::Immediate(attempt) => attempt.settle(),
            Self::Pending(fut) => {
                #[cfg(feature = "tracing-integration")]
                tracing::trace!("builder captured a pending attempt");
                Exec::pending(async move {
                    match AssertUnwindSafe(fut).catch_unwind().await {
                        Ok(attempt) => attempt.settle().await,
                        Err(payload) => Fallible::failure(captured_panic(payload.as_ref())),
                    }
                })
            }
        }
    }
}

fn captured(failure: Failure) -> Failure {
    #[cfg(feature = "tracing-integration")]
    tracing::trace!(failure = %failure, "builder captured a failure");
    failure
}

fn captured_panic(payload: &(dyn Any + Send)) -> Failure {
    captured(Failure::new(normalize_panic(payload)))
}

/// Runs `op` and captures its outcome as a [`Fallible`].
///
/// # Example
///
/// ```
/// use outcome_algebra::{build_result, Exec};
///
/// let now = build_result(|| "42".parse::<i32>());
/// assert!(now.is_immediate());
/// assert_eq!(now.wait().unwrap(), 42);
///
/// let later = build_result(|| Exec::pending(async { "x".parse::<i32>() }));
/// assert!(later.is_pending());
/// assert_eq!(later.wait().unwrap_err().message(), "invalid digit found in string");
/// ```
pub fn build_result<F, A>(op: F) -> Exec<Fallible<A::Value, Failure>>
where
    F: FnOnce() -> A,
    A: Attempt,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(attempt) => attempt.settle(),
        Err(payload) => Exec::Immediate(Fallible::failure(captured_panic(payload.as_ref()))),
    }
}

/// Captures the settlement of a future as a pending [`Fallible`].
pub fn build_result_async<Fut, A>(fut: Fut) -> Exec<Fallible<A::Value, Failure>>
where
    Fut: Future<Output = A> + 'static,
    A: Attempt + 'static,
    A::Value: 'static,
{
    Exec::pending(fut).settle()
}

/// Runs `op` and captures its outcome in wire form.
pub fn build_serializable_outcome<F, A>(op: F) -> Exec<SerializableOutcome<A::Value>>
where
    F: FnOnce() -> A,
    A: Attempt,
    A::Value: 'static,
{
    build_result(op).map_value(Fallible::to_serializable)
}

/// Runs `op` and captures its outcome as a positional tuple.
///
/// The tuple is pending exactly when the operation's result is.
pub fn goify<F, A>(op: F) -> Exec<GoifyResult<A::Value, Failure>>
where
    F: FnOnce() -> A,
    A: Attempt,
    A::Value: 'static,
{
    build_result(op).map_value(into_tuple)
}

/// Runs a synchronous `op` and captures its outcome as a positional tuple.
///
/// ```
/// use outcome_algebra::{goify_sync, Failure};
///
/// let (value, error) = goify_sync(|| "7".parse::<u8>());
/// assert_eq!((value, error), (Some(7), None));
///
/// let (value, error) = goify_sync(|| -> Result<u8, String> { panic!("x") });
/// assert_eq!((value, error), (None, Some(Failure::new("x"))));
/// ```
pub fn goify_sync<F, A>(op: F) -> GoifyResult<A::Value, Failure>
where
    F: FnOnce() -> A,
    A: SyncAttempt,
{
    let settled = match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(attempt) => attempt.settle_now(),
        Err(payload) => Fallible::failure(captured_panic(payload.as_ref())),
    };
    into_tuple(settled)
}

fn into_tuple<T>(fallible: Fallible<T, Failure>) -> GoifyResult<T, Failure> {
    match fallible.into_outcome() {
        Outcome::Ok(value) => (Some(value), None),
        Outcome::Err(error) => (None, Some(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    async fn settles_ok() -> Result<u32, String> {
        Ok(42)
    }

    async fn settles_err() -> Result<u32, String> {
        Err("denied".to_string())
    }

    async fn settles_panic() -> Result<u32, String> {
        panic!("exploded while pending")
    }

    #[test]
    fn immediate_success() {
        init_test("immediate_success");
        let exec = build_result(|| Ok::<_, Infallible>(42));
        let ok = exec.is_immediate();
        crate::assert_with_log!(ok, "mode", "Immediate", exec);
        assert_eq!(exec.wait(), Fallible::success(42));
        crate::test_complete!("immediate_success");
    }

    #[test]
    fn immediate_failure_is_normalized() {
        init_test("immediate_failure_is_normalized");
        let exec = build_result(|| Err::<(), _>(std::io::Error::other("no route")));
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), Fallible::failure(Failure::new("no route")));

        let exec = build_result(|| Fallible::<(), _>::failure(serde_json::json!({"message": "m"})));
        assert_eq!(exec.wait().unwrap_err().message(), "m");
        crate::test_complete!("immediate_failure_is_normalized");
    }

    #[test]
    fn synchronous_panic_is_captured() {
        init_test("synchronous_panic_is_captured");
        let exec = build_result(|| -> Result<(), String> { panic!("thrown") });
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), Fallible::failure(Failure::new("thrown")));
        crate::test_complete!("synchronous_panic_is_captured");
    }

    #[test]
    fn pending_settlement_is_captured() {
        init_test("pending_settlement_is_captured");
        let exec = build_result(|| Exec::pending(settles_ok()));
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), Fallible::success(42));

        let exec = build_result(|| Exec::pending(settles_err()));
        assert_eq!(exec.wait(), Fallible::failure(Failure::new("denied")));

        let exec = build_result(|| Exec::pending(settles_panic()));
        assert_eq!(
            exec.wait(),
            Fallible::failure(Failure::new("exploded while pending"))
        );
        crate::test_complete!("pending_settlement_is_captured");
    }

    #[test]
    fn mode_follows_returned_value() {
        init_test("mode_follows_returned_value");
        // An Exec that is already settled is treated as immediate.
        let exec = build_result(|| Exec::Immediate(Ok::<_, String>(1)));
        assert!(exec.is_immediate());

        let exec = build_result_async(settles_ok());
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), Fallible::success(42));
        crate::test_complete!("mode_follows_returned_value");
    }

    #[test]
    fn operation_runs_eagerly_once() {
        init_test("operation_runs_eagerly_once");
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let exec = build_result(move || {
            counter.set(counter.get() + 1);
            Ok::<_, Infallible>(())
        });
        assert_eq!(calls.get(), 1);
        assert!(exec.wait().is_ok());
        assert_eq!(calls.get(), 1);
        crate::test_complete!("operation_runs_eagerly_once");
    }

    #[test]
    fn serializable_builder() {
        init_test("serializable_builder");
        let exec = build_serializable_outcome(|| Ok::<_, String>("v"));
        assert_eq!(exec.wait(), SerializableOutcome::ok("v"));

        let exec = build_serializable_outcome(|| Exec::pending(settles_err()));
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), SerializableOutcome::err("denied"));
        crate::test_complete!("serializable_builder");
    }

    #[test]
    fn tuple_bridge() {
        init_test("tuple_bridge");
        assert_eq!(goify_sync(|| Ok::<_, String>(1)), (Some(1), None));
        assert_eq!(
            goify_sync(|| -> Result<u8, String> { panic!("x") }),
            (None, Some(Failure::new("x")))
        );
        assert_eq!(
            goify_sync(|| Fallible::<u8, _>::failure("plain")),
            (None, Some(Failure::new("plain")))
        );

        let exec = goify(|| Ok::<_, String>(2));
        assert!(exec.is_immediate());
        assert_eq!(exec.wait(), (Some(2), None));

        let exec = goify(|| Exec::pending(settles_err()));
        assert!(exec.is_pending());
        assert_eq!(exec.wait(), (None, Some(Failure::new("denied"))));
        crate::test_complete!("tuple_bridge");
    }
}
