//! Short-circuiting combinators over [`Outcome`].
//!
//! Callbacks may return anything implementing [`IntoOutcome`]: an `Outcome`,
//! a `Result`, `()` or a dynamic [`Value`](crate::Value). The guarded forms
//! ([`run`], [`chain`], [`map_each`]) catch panics raised by the callback and
//! return them as a failure wrapped in a frame naming the callback; the
//! unguarded forms let the panic continue to unwind.
//!
//! Every combinator uses `Option::None` as its only "no value" / "no reason"
//! sentinel.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{chain, recover, run, Outcome, Reason};
//!
//! let parsed: Outcome<u32, Reason> = run(|| "42".parse::<u32>().map_err(|e| Reason::raised(&e)));
//! let doubled = chain(parsed, |n| Outcome::<u32, Reason>::from(n.map(|n| n * 2)));
//! assert_eq!(doubled, Outcome::SuccessWith(84));
//!
//! let fallback = recover(Outcome::<u32, &str>::FailureWith("missing"), |_| Ok::<u32, &str>(0));
//! assert_eq!(fallback, Outcome::SuccessWith(0));
//! ```
use core::any::type_name;
use std::panic::{self, AssertUnwindSafe};

use crate::traits::IntoOutcome;
use crate::types::{
    ContextFrame, Metadata, Outcome, OutcomeError, Raised, Reason, Value, WrappedFailure,
};

/// Runs a zero-argument closure, converting a panic into a failure.
///
/// The closure's return is coerced with [`IntoOutcome::into_outcome`]; a
/// dynamic non-outcome value becomes `SuccessWith(value)`.
///
/// The frame built for a caught panic records where this combinator was
/// called, not the line that panicked. The panic's own location is only
/// reachable through a process-wide panic hook, which this crate never
/// installs.
///
/// # Examples
///
/// ```
/// use outcome_rail::{run, Outcome, Reason};
///
/// let failed: Outcome<(), Reason> = run(|| -> Outcome<(), Reason> { panic!("disk on fire") });
/// let reason = failed.into_reason().unwrap();
/// assert!(reason.is_raised());
/// assert_eq!(reason.terminal().derived_message(), "disk on fire");
/// ```
#[track_caller]
pub fn run<T, E, R, F>(f: F) -> Outcome<T, E>
where
    F: FnOnce() -> R,
    R: IntoOutcome<T, E>,
    E: From<WrappedFailure>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(returned) => returned.into_outcome(),
        Err(payload) => Outcome::FailureWith(raised::<F, E>("run", payload)),
    }
}

/// Runs a zero-argument closure, letting panics propagate.
#[inline]
pub fn run_unguarded<T, E, R, F>(f: F) -> Outcome<T, E>
where
    F: FnOnce() -> R,
    R: IntoOutcome<T, E>,
{
    f().into_outcome()
}

/// Feeds a success into `f`; failures are returned untouched.
///
/// `f` receives `Some(value)` for [`Outcome::SuccessWith`] and `None` for a
/// bare [`Outcome::Success`]. A panic inside `f` becomes a failure wrapped in
/// a frame labelled with the callback.
///
/// The frame built for a caught panic records where this combinator was
/// called, not the line that panicked. The panic's own location is only
/// reachable through a process-wide panic hook, which this crate never
/// installs.
///
/// # Examples
///
/// ```
/// use outcome_rail::{chain, Outcome, Reason};
///
/// let failed: Outcome<u32, Reason> = Outcome::FailureWith(Reason::message("missing"));
/// let same = chain(failed.clone(), |_| -> Outcome<u32, Reason> { unreachable!() });
/// assert_eq!(same, failed);
/// ```
#[track_caller]
pub fn chain<T, U, E, R, F>(outcome: Outcome<T, E>, f: F) -> Outcome<U, E>
where
    F: FnOnce(Option<T>) -> R,
    R: IntoOutcome<U, E>,
    E: From<WrappedFailure>,
{
    let input = match outcome {
        Outcome::Success => None,
        Outcome::SuccessWith(value) => Some(value),
        Outcome::Failure => return Outcome::Failure,
        Outcome::FailureWith(reason) => return Outcome::FailureWith(reason),
    };
    match panic::catch_unwind(AssertUnwindSafe(move || f(input))) {
        Ok(returned) => returned.into_outcome(),
        Err(payload) => Outcome::FailureWith(raised::<F, E>("chain", payload)),
    }
}

/// [`chain`] without panic conversion.
#[inline]
pub fn chain_unguarded<T, U, E, R, F>(outcome: Outcome<T, E>, f: F) -> Outcome<U, E>
where
    F: FnOnce(Option<T>) -> R,
    R: IntoOutcome<U, E>,
{
    match outcome {
        Outcome::Success => f(None).into_outcome(),
        Outcome::SuccessWith(value) => f(Some(value)).into_outcome(),
        Outcome::Failure => Outcome::Failure,
        Outcome::FailureWith(reason) => Outcome::FailureWith(reason),
    }
}

/// Feeds a failure's reason into `f`; successes are returned untouched.
///
/// `f` receives `None` for a bare [`Outcome::Failure`]. Its return is coerced
/// with [`IntoOutcome::into_recovered`], so a dynamic non-outcome value
/// becomes `FailureWith(value)`.
///
/// # Examples
///
/// ```
/// use outcome_rail::{recover, Outcome, Reason, Value};
///
/// let failed: Outcome<Value, &str> = Outcome::Failure;
/// let replaced: Outcome<Value, Reason> = recover(failed, |reason| {
///     assert!(reason.is_none());
///     Value::from("still broken")
/// });
/// assert_eq!(replaced, Outcome::FailureWith(Reason::message("still broken")));
/// ```
pub fn recover<T, E, G, R, F>(outcome: Outcome<T, E>, f: F) -> Outcome<T, G>
where
    F: FnOnce(Option<E>) -> R,
    R: IntoOutcome<T, G>,
{
    match outcome {
        Outcome::Success => Outcome::Success,
        Outcome::SuccessWith(value) => Outcome::SuccessWith(value),
        Outcome::Failure => f(None).into_recovered(),
        Outcome::FailureWith(reason) => f(Some(reason)).into_recovered(),
    }
}

/// Applies `f` to every element in order, stopping at the first failure.
///
/// Success values are collected in input order; bare successes contribute
/// nothing. A failed input is returned without iterating, and a bare
/// [`Outcome::Success`] input is treated as an empty collection.
///
/// # Examples
///
/// ```
/// use outcome_rail::{map_all, Outcome};
///
/// let doubled = map_all(Outcome::<_, &str>::SuccessWith(vec![1, 2, 3]), |n| Ok::<_, &str>(n * 2));
/// assert_eq!(doubled, Outcome::SuccessWith(vec![2, 4, 6]));
/// ```
pub fn map_all<I, U, E, R, F>(outcome: Outcome<I, E>, mut f: F) -> Outcome<Vec<U>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> R,
    R: IntoOutcome<U, E>,
{
    let items = match outcome {
        Outcome::Success => return Outcome::SuccessWith(Vec::new()),
        Outcome::SuccessWith(items) => items,
        Outcome::Failure => return Outcome::Failure,
        Outcome::FailureWith(reason) => return Outcome::FailureWith(reason),
    };

    let mut collected = Vec::new();
    for item in items {
        match f(item).into_outcome() {
            Outcome::Success => {},
            Outcome::SuccessWith(value) => collected.push(value),
            Outcome::Failure => return Outcome::Failure,
            Outcome::FailureWith(reason) => return Outcome::FailureWith(reason),
        }
    }
    Outcome::SuccessWith(collected)
}

/// Applies `f` to every element, keeping each element's outcome.
///
/// Never short-circuits. A panic in `f` is converted the same way as in
/// [`chain`] and only affects that element's outcome.
///
/// The frame built for a caught panic records where this combinator was
/// called, not the line that panicked. The panic's own location is only
/// reachable through a process-wide panic hook, which this crate never
/// installs.
///
/// # Examples
///
/// ```
/// use outcome_rail::{map_each, Outcome, Reason};
///
/// let results = map_each(Outcome::<_, Reason>::SuccessWith(vec![1, 0, 4]), |n: i32| {
///     if n == 0 { Err(Reason::message("zero")) } else { Ok(10 / n) }
/// });
/// let results = results.into_value().unwrap();
/// assert_eq!(results.len(), 3);
/// assert!(results[1].is_failure());
/// assert_eq!(results[2], Outcome::SuccessWith(2));
/// ```
#[track_caller]
pub fn map_each<I, U, E, R, F>(outcome: Outcome<I, E>, mut f: F) -> Outcome<Vec<Outcome<U, E>>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> R,
    R: IntoOutcome<U, E>,
    E: From<WrappedFailure>,
{
    let items = match outcome {
        Outcome::Success => return Outcome::SuccessWith(Vec::new()),
        Outcome::SuccessWith(items) => items,
        Outcome::Failure => return Outcome::Failure,
        Outcome::FailureWith(reason) => return Outcome::FailureWith(reason),
    };

    let mut results = Vec::new();
    for item in items {
        let result = match panic::catch_unwind(AssertUnwindSafe(|| f(item))) {
            Ok(returned) => returned.into_outcome(),
            Err(payload) => Outcome::FailureWith(raised::<F, E>("map_each", payload)),
        };
        results.push(result);
    }
    Outcome::SuccessWith(results)
}

/// Returns the first success produced by `f`.
///
/// When no element succeeds, the failure carries every element's reason in
/// input order, `None` standing for a bare failure.
///
/// # Examples
///
/// ```
/// use outcome_rail::{find_first_success, Outcome};
///
/// let mirrors = ["eu", "us", "ap"];
/// let picked = find_first_success(mirrors, |m| {
///     if m == "us" { Outcome::SuccessWith(m) } else { Outcome::FailureWith("unreachable") }
/// });
/// assert_eq!(picked, Outcome::SuccessWith("us"));
///
/// let none = find_first_success(["eu", "ap"], |_| Outcome::<(), _>::FailureWith("unreachable"));
/// assert_eq!(none, Outcome::FailureWith(vec![Some("unreachable"), Some("unreachable")]));
/// ```
pub fn find_first_success<I, U, E, R, F>(items: I, mut f: F) -> Outcome<U, Vec<Option<E>>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> R,
    R: IntoOutcome<U, E>,
{
    let mut reasons = Vec::new();
    for item in items {
        match f(item).into_outcome() {
            Outcome::Success => return Outcome::Success,
            Outcome::SuccessWith(value) => return Outcome::SuccessWith(value),
            Outcome::Failure => reasons.push(None),
            Outcome::FailureWith(reason) => reasons.push(Some(reason)),
        }
    }
    Outcome::FailureWith(reasons)
}

/// Succeeds, discarding values, only if `f` succeeds for every element.
///
/// Stops at the first failure and returns it.
///
/// # Errors
///
/// Returns [`OutcomeError::InvalidCallbackReturn`] as soon as `f` returns a
/// dynamic value that is not outcome-shaped.
///
/// # Examples
///
/// ```
/// use outcome_rail::{all_succeed, Outcome, Reason, Value};
///
/// let checked = all_succeed([1, 2, 3], |n| Outcome::<i32, &str>::SuccessWith(n * 10));
/// assert_eq!(checked, Ok(Outcome::Success));
///
/// let invalid = all_succeed([1], |n: i32| -> Value { Value::from(n) });
/// let invalid: Result<Outcome<(), Reason>, _> = invalid;
/// assert!(invalid.is_err());
/// ```
pub fn all_succeed<I, U, E, R, F>(items: I, mut f: F) -> Result<Outcome<(), E>, OutcomeError>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> R,
    R: IntoOutcome<U, E>,
{
    for item in items {
        let outcome = f(item)
            .try_into_outcome()
            .map_err(|found| OutcomeError::invalid_return("all_succeed", &found))?;
        match outcome {
            Outcome::Success | Outcome::SuccessWith(_) => {},
            Outcome::Failure => return Ok(Outcome::Failure),
            Outcome::FailureWith(reason) => return Ok(Outcome::FailureWith(reason)),
        }
    }
    Ok(Outcome::Success)
}

/// Builds the failure returned when a guarded callback panics.
#[track_caller]
fn raised<F, E>(combinator: &'static str, payload: Box<dyn core::any::Any + Send>) -> E
where
    E: From<WrappedFailure>,
{
    let callback = type_name::<F>();
    let metadata = Metadata::new()
        .with("combinator", Value::atom(combinator))
        .with("callback", callback);
    let frame = ContextFrame::capture(Some(format!("panic in {}", callback)), metadata);
    E::from(WrappedFailure::new(frame, Reason::Raised(Raised::from_panic(payload))))
}
