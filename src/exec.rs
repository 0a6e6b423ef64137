//! Execution mode: a value that is available now or will be after suspension.
//!
//! Combinators never test whether a returned value "looks awaitable". A
//! function that suspends returns a future, and the combinator that ran it
//! wraps the result in [`Exec::Pending`]. Everything downstream matches on
//! the variant: an immediate value stays immediate through synchronous steps
//! and becomes pending the first time an asynchronous step actually runs.
//!
//! Pending values are boxed local futures. The algebra assumes a
//! single-threaded cooperative executor, so nothing here is `Send`.

use futures_lite::future::{self, BoxedLocal, FutureExt};
use std::fmt;
use std::future::{Future, IntoFuture, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A value in one of two execution modes.
///
/// # Example
///
/// ```
/// use outcome_algebra::Exec;
///
/// let now = Exec::immediate(2).map_value(|x| x * 10);
/// assert!(now.is_immediate());
///
/// let later = Exec::pending(async { 2 }).map_value(|x| x * 10);
/// assert!(later.is_pending());
/// assert_eq!(later.wait(), 20);
/// ```
#[must_use = "a pending value does nothing unless awaited"]
pub enum Exec<T> {
    /// The value is available without suspension.
    Immediate(T),
    /// The value becomes available once the future settles.
    Pending(BoxedLocal<T>),
}

impl<T> Exec<T> {
    /// Wraps an available value.
    pub const fn immediate(value: T) -> Self {
        Self::Immediate(value)
    }

    /// Wraps a future.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = T> + 'static,
    {
        Self::Pending(fut.boxed_local())
    }

    /// Returns `true` for an available value.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    /// Returns `true` for a suspended value.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the value if it is immediate, or `self` back otherwise.
    pub fn into_immediate(self) -> Result<T, Self> {
        match self {
            Self::Immediate(value) => Ok(value),
            pending @ Self::Pending(_) => Err(pending),
        }
    }

    /// Drives the value to completion on the current thread.
    ///
    /// Immediate values are returned without touching an executor.
    pub fn wait(self) -> T {
        match self {
            Self::Immediate(value) => value,
            Self::Pending(fut) => future::block_on(fut),
        }
    }
}

impl<T: 'static> Exec<T> {
    /// Applies a synchronous function, preserving the mode.
    pub fn map_value<U: 'static, F>(self, f: F) -> Exec<U>
    where
        F: FnOnce(T) -> U + 'static,
    {
        match self {
            Self::Immediate(value) => Exec::Immediate(f(value)),
            Self::Pending(fut) => Exec::pending(async move { f(fut.await) }),
        }
    }

    /// Applies a function that itself yields an [`Exec`].
    ///
    /// The result is immediate only if both `self` and the value returned by
    /// `f` are immediate.
    pub fn then<U: 'static, F>(self, f: F) -> Exec<U>
    where
        F: FnOnce(T) -> Exec<U> + 'static,
    {
        match self {
            Self::Immediate(value) => f(value),
            Self::Pending(fut) => Exec::pending(async move { f(fut.await).await }),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Exec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Future returned by awaiting an [`Exec`].
#[must_use = "futures do nothing unless polled"]
pub struct ExecFuture<T> {
    inner: Inner<T>,
}

enum Inner<T> {
    Ready(Ready<T>),
    Pending(BoxedLocal<T>),
}

impl<T> Unpin for ExecFuture<T> {}

impl<T> Future for ExecFuture<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        match &mut self.get_mut().inner {
            Inner::Ready(ready) => Pin::new(ready).poll(cx),
            Inner::Pending(fut) => fut.as_mut().poll(cx),
        }
    }
}

impl<T> IntoFuture for Exec<T> {
    type Output = T;
    type IntoFuture = ExecFuture<T>;

    fn into_future(self) -> ExecFuture<T> {
        let inner = match self {
            Self::Immediate(value) => Inner::Ready(std::future::ready(value)),
            Self::Pending(fut) => Inner::Pending(fut),
        };
        ExecFuture { inner }
    }
}
