//! Outcome algebra: `Result`/`Option` combinators that work the same on
//! settled and pending values.
//!
//! # Overview
//!
//! Every fallible or optional value in this crate lives in one of two
//! execution modes, carried explicitly by [`Exec`]: `Immediate` when the
//! value is already known, `Pending` when it will be produced by a future.
//! Combinators preserve the mode of their input and only switch to
//! `Pending` when a supplied function actually returns a future. A chain of
//! synchronous steps therefore never suspends.
//!
//! # Core Guarantees
//!
//! - **Mode fidelity**: immediate in, immediate out, unless an async callback runs
//! - **One-shot callbacks**: each supplied function runs at most once, in chain order
//! - **Normalized failures**: builders turn `Err` values and panics into [`Failure`]
//! - **Explicit contract violations**: `unwrap` on the wrong slot and missing
//!   match handlers panic with a named [`ContractViolation`]
//!
//! # Module Structure
//!
//! - [`outcome`]: the two-slot [`Outcome`] carried by [`Fallible`]
//! - [`fallible`]: the Result algebra
//! - [`maybe`]: the Option algebra
//! - [`exec`]: execution modes and the [`ExecFuture`] adapter
//! - [`build`](mod@build): builders that capture an operation's outcome
//! - [`dispatch`]: typed and runtime pattern matching, tuple conversion
//! - [`wire`]: [`SerializableOutcome`] and [`GoifyResult`]
//! - [`normalize`]: failure-to-string normalization
//! - [`error`](mod@error): failure and contract-violation types
//!
//! # Example
//!
//! ```
//! use outcome_algebra::{Exec, Fallible, Maybe};
//!
//! let user = Maybe::Present(41)
//!     .map(|id| id + 1)
//!     .ok_or("missing user");
//! assert_eq!(user, Fallible::success(42));
//!
//! let greeting = Fallible::<_, &str>::success(42)
//!     .map_async(|id| async move { format!("user {id}") });
//! assert!(greeting.is_pending());
//! assert_eq!(greeting.wait().unwrap(), "user 42");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod build;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod fallible;
pub mod maybe;
pub mod normalize;
pub mod outcome;
pub mod wire;

#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

pub use build::{
    Attempt, SyncAttempt, build_result, build_result_async, build_serializable_outcome, goify,
    goify_sync,
};
pub use dispatch::{
    Handlers, IntoGoify, Match, OptionHandlers, ResultHandlers, Wrapper, match_async, match_on,
    match_tuple,
};
pub use error::{ABSENT_MESSAGE, ContractViolation, Failure, MatchError, WrapperKind};
pub use exec::{Exec, ExecFuture};
pub use fallible::Fallible;
pub use maybe::Maybe;
pub use normalize::{Normalize, normalize_panic};
pub use outcome::Outcome;
pub use wire::{GoifyResult, SerializableOutcome};
