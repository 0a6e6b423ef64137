//! Pattern matching over both wrapper families.
//!
//! Three entry points:
//!
//! - [`match_on`] with a typed handler record. `Maybe` takes
//!   [`OptionHandlers`], `Fallible` takes [`ResultHandlers`]; a mismatched
//!   record does not compile.
//! - [`Wrapper`], a sum over both families for values whose family is only
//!   known at runtime. It dispatches to a [`Handlers`] record whose pairs are
//!   optional, and reports [`MatchError`] when the needed pair is missing or
//!   the input is not a wrapper at all.
//! - [`match_tuple`] and [`match_async`], which convert any wrapper into a
//!   [`GoifyResult`] without handlers.

use crate::error::{ContractViolation, Failure, MatchError, WrapperKind};
use crate::exec::Exec;
use crate::fallible::Fallible;
use crate::maybe::Maybe;
use crate::normalize::normalize_panic;
use crate::outcome::Outcome;
use crate::wire::GoifyResult;
use futures_lite::FutureExt;
use std::any::{Any, type_name};
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Handler pair for [`Maybe`].
#[derive(Debug, Clone, Copy)]
pub struct OptionHandlers<S, N> {
    some: S,
    none: N,
}

impl<S, N> OptionHandlers<S, N> {
    /// Creates the pair: `some` receives the held value, `none` runs otherwise.
    #[must_use]
    pub const fn new(some: S, none: N) -> Self {
        Self { some, none }
    }
}

/// Handler pair for [`Fallible`].
#[derive(Debug, Clone, Copy)]
pub struct ResultHandlers<O, E> {
    ok: O,
    err: E,
}

impl<O, E> ResultHandlers<O, E> {
    /// Creates the pair: `ok` receives the success value, `err` the failure.
    #[must_use]
    pub const fn new(ok: O, err: E) -> Self {
        Self { ok, err }
    }
}

/// A wrapper that can be consumed by a handler record of type `H`.
pub trait Match<H> {
    /// Value produced by the handlers.
    type Output;

    /// Runs the handler matching the populated slot.
    fn match_with(self, handlers: H) -> Self::Output;
}

impl<T, R, S, N> Match<OptionHandlers<S, N>> for Maybe<T>
where
    S: FnOnce(T) -> R,
    N: FnOnce() -> R,
{
    type Output = R;

    fn match_with(self, handlers: OptionHandlers<S, N>) -> R {
        match self {
            Self::Present(v) => (handlers.some)(v),
            Self::Absent => (handlers.none)(),
        }
    }
}

impl<T, E, R, O, X> Match<ResultHandlers<O, X>> for Fallible<T, E>
where
    O: FnOnce(T) -> R,
    X: FnOnce(E) -> R,
{
    type Output = R;

    fn match_with(self, handlers: ResultHandlers<O, X>) -> R {
        match self.into_outcome() {
            Outcome::Ok(v) => (handlers.ok)(v),
            Outcome::Err(e) => (handlers.err)(e),
        }
    }
}

/// Dispatches `input` to the handler matching its populated slot.
///
/// ```
/// use outcome_algebra::{match_on, Fallible, Maybe, OptionHandlers, ResultHandlers};
///
/// let double_or_zero = || OptionHandlers::new(|x: i32| x * 2, || 0);
/// assert_eq!(match_on(Maybe::Present(5), double_or_zero()), 10);
/// assert_eq!(match_on(Maybe::Absent, double_or_zero()), 0);
///
/// let failed: Fallible<i32, &str> = Fallible::failure("boom");
/// assert_eq!(match_on(failed, ResultHandlers::new(|_| "fine", |e| e)), "boom");
/// ```
pub fn match_on<I, H>(input: I, handlers: H) -> I::Output
where
    I: Match<H>,
{
    input.match_with(handlers)
}

/// Conversion of a wrapper into the positional tuple.
pub trait IntoGoify {
    /// Success type.
    type Value;
    /// Failure type.
    type Error;

    /// Moves the populated slot into its tuple position.
    fn into_goify(self) -> GoifyResult<Self::Value, Self::Error>;
}

impl<T> IntoGoify for Maybe<T> {
    type Value = T;
    type Error = Failure;

    /// An absent value becomes the failure "Option is None".
    fn into_goify(self) -> GoifyResult<T, Failure> {
        match self {
            Self::Present(v) => (Some(v), None),
            Self::Absent => (None, Some(Failure::absent())),
        }
    }
}

impl<T, E> IntoGoify for Fallible<T, E> {
    type Value = T;
    type Error = E;

    fn into_goify(self) -> GoifyResult<T, E> {
        match self.into_outcome() {
            Outcome::Ok(v) => (Some(v), None),
            Outcome::Err(e) => (None, Some(e)),
        }
    }
}

impl<T, E: From<Failure>> IntoGoify for Wrapper<T, E> {
    type Value = T;
    type Error = E;

    fn into_goify(self) -> GoifyResult<T, E> {
        match self {
            Self::Option(maybe) => {
                let (value, error) = maybe.into_goify();
                (value, error.map(E::from))
            }
            Self::Result(fallible) => fallible.into_goify(),
        }
    }
}

/// Converts any wrapper into a [`GoifyResult`].
pub fn match_tuple<I: IntoGoify>(input: I) -> GoifyResult<I::Value, I::Error> {
    input.into_goify()
}

/// Awaits a wrapper and converts it into a [`GoifyResult`].
///
/// A panic while the input settles lands in the failure slot.
pub fn match_async<F, W>(input: F) -> Exec<GoifyResult<W::Value, W::Error>>
where
    F: Future<Output = W> + 'static,
    W: IntoGoify,
    W::Error: From<Failure>,
{
    Exec::pending(async move {
        match AssertUnwindSafe(input).catch_unwind().await {
            Ok(wrapper) => wrapper.into_goify(),
            Err(payload) => (
                None,
                Some(W::Error::from(Failure::new(normalize_panic(payload.as_ref())))),
            ),
        }
    })
}

/// A value from either wrapper family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapper<T, E> {
    /// An Option-family value.
    Option(Maybe<T>),
    /// A Result-family value.
    Result(Fallible<T, E>),
}

impl<T, E> Wrapper<T, E> {
    /// Family of the held value.
    #[must_use]
    pub const fn kind(&self) -> WrapperKind {
        match self {
            Self::Option(_) => WrapperKind::Option,
            Self::Result(_) => WrapperKind::Result,
        }
    }

    /// Dispatches to the pair of `handlers` matching this wrapper's family.
    ///
    /// Both handlers of the pair must be set, even though only one runs.
    pub fn dispatch<R>(self, handlers: Handlers<'_, T, E, R>) -> Result<R, MatchError> {
        let kind = self.kind();
        match self {
            Self::Option(maybe) => match (handlers.some, handlers.none) {
                (Some(some), Some(none)) => Ok(maybe.match_with(OptionHandlers::new(some, none))),
                _ => Err(MatchError::MissingHandlers { kind }),
            },
            Self::Result(fallible) => match (handlers.ok, handlers.err) {
                (Some(ok), Some(err)) => Ok(fallible.match_with(ResultHandlers::new(ok, err))),
                _ => Err(MatchError::MissingHandlers { kind }),
            },
        }
    }

    /// Like [`dispatch`](Self::dispatch), but a missing pair is a contract
    /// violation.
    ///
    /// # Panics
    ///
    /// Panics with a `MatchError` if `handlers` lacks the required pair.
    #[track_caller]
    pub fn dispatch_or_panic<R>(self, handlers: Handlers<'_, T, E, R>) -> R {
        self.dispatch(handlers)
            .unwrap_or_else(|err| ContractViolation::from(err).raise())
    }
}

impl<T: 'static, E: 'static> Wrapper<T, E> {
    /// Recognizes a value of statically unknown family.
    ///
    /// Accepts `Maybe<T>`, `Fallible<T, E>` and `Wrapper<T, E>`; anything else
    /// is [`MatchError::Unrecognized`].
    pub fn recognize<V: Any>(value: V) -> Result<Self, MatchError> {
        let boxed: Box<dyn Any> = Box::new(value);
        let boxed = match boxed.downcast::<Maybe<T>>() {
            Ok(maybe) => return Ok(Self::Option(*maybe)),
            Err(other) => other,
        };
        let boxed = match boxed.downcast::<Fallible<T, E>>() {
            Ok(fallible) => return Ok(Self::Result(*fallible)),
            Err(other) => other,
        };
        boxed
            .downcast::<Self>()
            .map(|wrapper| *wrapper)
            .map_err(|_| MatchError::Unrecognized {
                type_name: type_name::<V>(),
            })
    }
}

impl<T, E> From<Maybe<T>> for Wrapper<T, E> {
    fn from(maybe: Maybe<T>) -> Self {
        Self::Option(maybe)
    }
}

impl<T, E> From<Fallible<T, E>> for Wrapper<T, E> {
    fn from(fallible: Fallible<T, E>) -> Self {
        Self::Result(fallible)
    }
}

type Handler<'a, A, R> = Box<dyn FnOnce(A) -> R + 'a>;

/// Handler record for runtime dispatch; every handler is optional.
///
/// ```
/// use outcome_algebra::{Handlers, Maybe, Wrapper};
///
/// let input: Wrapper<i32, String> = Maybe::Present(4).into();
/// let doubled = input
///     .dispatch(Handlers::new().some(|x: i32| x * 2).none(|| 0))
///     .unwrap();
/// assert_eq!(doubled, 8);
/// ```
pub struct Handlers<'a, T, E, R> {
    some: Option<Handler<'a, T, R>>,
    none: Option<Box<dyn FnOnce() -> R + 'a>>,
    ok: Option<Handler<'a, T, R>>,
    err: Option<Handler<'a, E, R>>,
}

impl<'a, T, E, R> Handlers<'a, T, E, R> {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            some: None,
            none: None,
            ok: None,
            err: None,
        }
    }

    /// Sets the handler for a present value.
    #[must_use]
    pub fn some(mut self, f: impl FnOnce(T) -> R + 'a) -> Self {
        self.some = Some(Box::new(f));
        self
    }

    /// Sets the handler for an absent value.
    #[must_use]
    pub fn none(mut self, f: impl FnOnce() -> R + 'a) -> Self {
        self.none = Some(Box::new(f));
        self
    }

    /// Sets the handler for a success.
    #[must_use]
    pub fn ok(mut self, f: impl FnOnce(T) -> R + 'a) -> Self {
        self.ok = Some(Box::new(f));
        self
    }

    /// Sets the handler for a failure.
    #[must_use]
    pub fn err(mut self, f: impl FnOnce(E) -> R + 'a) -> Self {
        self.err = Some(Box::new(f));
        self
    }
}

impl<T, E, R> Default for Handlers<'_, T, E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E, R> fmt::Debug for Handlers<'_, T, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("some", &self.some.is_some())
            .field("none", &self.none.is_some())
            .field("ok", &self.ok.is_some())
            .field("err", &self.err.is_some())
            .finish()
    }
}
