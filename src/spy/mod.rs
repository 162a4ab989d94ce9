// Allow must_use_candidate since spy methods often have useful side effects
#![allow(clippy::must_use_candidate)]

//! The call-recording spy.
//!
//! This module provides [`Spy`] for wrapping a behavior and recording every
//! call made through it.
//!
//! # Example
//!
//! ```rust
//! use spykit::Spy;
//!
//! // Create a spy wrapping a simple function
//! let spy: Spy<i32, i32> = Spy::new(|_, x| x * 2);
//!
//! // Call through the spy
//! let result = spy.call(5);
//! assert_eq!(result, Ok(Some(10)));
//!
//! // Verify the call
//! assert!(spy.was_called());
//! assert_eq!(spy.call_count(), 1);
//! assert_eq!(spy.args(), vec![5]);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::Error;

mod behavior;
mod record;

pub use behavior::BehaviorKind;
pub use record::CallRecord;

use behavior::Behavior;
use record::CallLog;

/// A spy that wraps a behavior and records every call.
///
/// Each call through the spy appends one entry to each of five parallel
/// logs — arguments, receiver, timestamp, return value, failure — and then
/// behaves exactly like the wrapped behavior: values are passed through and
/// failures re-surface unchanged. The logs can be inspected at any time and
/// truncated with [`clear`](Spy::clear).
///
/// Cloning a `Spy` produces a handle to the *same* spy: all clones share the
/// recording state.
///
/// # Type Parameters
///
/// - `A` - The argument type, recorded per call (use a tuple for several)
/// - `R` - The return type of the behavior
/// - `C` - The receiver ("context") type, `()` by default
/// - `E` - The failure type, [`Error`] by default
///
/// All four must be `Clone` so calls can be logged; the originals still flow
/// through to the behavior and back to the caller untouched.
pub struct Spy<A, R, C = (), E = Error> {
    inner: Arc<SpyInner<A, R, C, E>>,
}

struct SpyInner<A, R, C, E> {
    behavior: Behavior<A, R, C, E>,
    log: Mutex<CallLog<A, R, C, E>>,
    clock: Mutex<Arc<dyn Clock>>,
}

impl<A, R, C, E> Spy<A, R, C, E>
where
    A: Clone,
    R: Clone,
    C: Clone,
    E: Clone,
{
    fn from_behavior(behavior: Behavior<A, R, C, E>) -> Self {
        Self {
            inner: Arc::new(SpyInner {
                behavior,
                log: Mutex::new(CallLog::new()),
                clock: Mutex::new(Arc::new(SystemClock)),
            }),
        }
    }

    /// Create a spy wrapping an infallible callable.
    ///
    /// The callable receives the receiver and arguments of each call,
    /// unmodified.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<i32, i32> = Spy::new(|_, x| x * 2);
    /// assert_eq!(spy.call(5), Ok(Some(10)));
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&C, A) -> R + Send + Sync + 'static,
    {
        Self::from_behavior(Behavior::from_fn(f))
    }

    /// Create a spy wrapping a callable that may fail.
    ///
    /// A failure is logged and then returned to the caller as the identical
    /// `Err` value — never swallowed or transformed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::{Error, Spy};
    ///
    /// let spy: Spy<i32, i32> = Spy::fallible(|_, x| {
    ///     if x >= 0 {
    ///         Ok(x)
    ///     } else {
    ///         Err(Error::mock("negative"))
    ///     }
    /// });
    ///
    /// assert_eq!(spy.call(3), Ok(Some(3)));
    /// assert_eq!(spy.call(-1), Err(Error::mock("negative")));
    /// assert_eq!(spy.errors(), vec![None, Some(Error::mock("negative"))]);
    /// ```
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&C, A) -> Result<R, E> + Send + Sync + 'static,
    {
        Self::from_behavior(Behavior::from_fallible(f))
    }

    /// Create a spy from a fixed value.
    ///
    /// The value is cloned and returned on every call, whatever the receiver
    /// and arguments. The construction value stays readable through
    /// [`raw_value`](Spy::raw_value).
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<(), i32> = Spy::returning(42);
    /// assert_eq!(spy.call(()), Ok(Some(42)));
    /// assert_eq!(spy.raw_value(), Some(&42));
    /// ```
    pub fn returning(value: R) -> Self {
        Self::from_behavior(Behavior::from_value(value))
    }

    /// Create a spy that fails every call with a fixed error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::{Error, Spy};
    ///
    /// let spy: Spy<(), i32> = Spy::failing(Error::mock("down"));
    /// assert_eq!(spy.call(()), Err(Error::mock("down")));
    /// ```
    pub fn failing(error: E) -> Self
    where
        E: Send + Sync + 'static,
    {
        Self::from_behavior(Behavior::from_failure(error))
    }

    /// Create a spy with no behavior.
    ///
    /// Every call succeeds with the no-value sentinel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<(), i32> = Spy::noop();
    /// assert_eq!(spy.call(()), Ok(None));
    /// ```
    pub fn noop() -> Self {
        Self::from_behavior(Behavior::noop())
    }

    /// Replace the spy's time source.
    ///
    /// Builder-style variant of [`set_clock`](Spy::set_clock).
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::clock::MockClock;
    /// use spykit::Spy;
    ///
    /// let clock = MockClock::new();
    /// let spy: Spy<(), i32> = Spy::noop().with_clock(clock.clone());
    ///
    /// spy.call(()).unwrap();
    /// clock.advance(1_000);
    /// spy.call(()).unwrap();
    ///
    /// assert_eq!(spy.call_times(), vec![0, 1_000]);
    /// ```
    #[must_use]
    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        self.set_clock(clock);
        self
    }

    /// Replace the spy's time source in place.
    ///
    /// New calls are stamped by the given clock; already-recorded timestamps
    /// are untouched.
    pub fn set_clock(&self, clock: impl Clock + 'static) {
        *self.inner.clock.lock() = Arc::new(clock);
    }

    /// Call the spy with an explicit receiver.
    ///
    /// The arguments, receiver, and timestamp are logged before the behavior
    /// runs; the outcome is logged after. The behavior sees the original
    /// receiver and arguments, and its result — value or failure — flows
    /// back to the caller unchanged.
    ///
    /// # Errors
    ///
    /// Returns exactly the failure the behavior produced, after logging it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<i32, i32, &str> = Spy::new(|_, x| x);
    /// spy.call_with("ctx", 7).unwrap();
    ///
    /// assert_eq!(spy.receivers(), vec!["ctx"]);
    /// assert_eq!(spy.last_call().unwrap().receiver, "ctx");
    /// ```
    pub fn call_with(&self, receiver: C, args: A) -> Result<Option<R>, E> {
        let clock = Arc::clone(&*self.inner.clock.lock());
        self.inner
            .log
            .lock()
            .push_entry(args.clone(), receiver.clone(), clock.now_millis());

        // The lock is not held here, so a behavior may re-enter the spy;
        // its entries land before this call's outcome.
        let outcome = self.inner.behavior.invoke(&receiver, args);

        let mut log = self.inner.log.lock();
        match &outcome {
            Ok(value) => log.push_outcome(value.clone(), None),
            Err(error) => log.push_outcome(None, Some(error.clone())),
        }
        drop(log);

        outcome
    }

    /// Call the spy without an explicit receiver.
    ///
    /// Records `C::default()` as the receiver.
    ///
    /// # Errors
    ///
    /// Returns exactly the failure the behavior produced, after logging it.
    pub fn call(&self, args: A) -> Result<Option<R>, E>
    where
        C: Default,
    {
        self.call_with(C::default(), args)
    }

    /// Truncate all five logs to empty.
    ///
    /// The resolved behavior and the clock survive; only the recorded calls
    /// are dropped. Returns the spy for chaining.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<i32, i32> = Spy::new(|_, x| x);
    /// spy.call(1).unwrap();
    /// spy.clear();
    ///
    /// assert_eq!(spy.call_count(), 0);
    /// assert_eq!(spy.call(2), Ok(Some(2)));
    /// ```
    pub fn clear(&self) -> &Self {
        self.inner.log.lock().clear();
        self
    }

    /// Alias for [`clear`](Spy::clear).
    pub fn flush(&self) -> &Self {
        self.clear()
    }

    /// Alias for [`clear`](Spy::clear).
    pub fn reset(&self) -> &Self {
        self.clear()
    }

    /// Snapshot of the arguments of every call, in call order.
    pub fn args(&self) -> Vec<A> {
        self.inner.log.lock().args.clone()
    }

    /// Snapshot of the receivers of every call, in call order.
    pub fn receivers(&self) -> Vec<C> {
        self.inner.log.lock().receivers.clone()
    }

    /// Snapshot of the return values of every call, in completion order.
    ///
    /// A slot is `None` when the call failed or the spy is a no-op.
    pub fn return_values(&self) -> Vec<Option<R>> {
        self.inner.log.lock().return_values.clone()
    }

    /// Snapshot of the failures of every call, in completion order.
    ///
    /// A slot is `None` when the call returned normally.
    pub fn errors(&self) -> Vec<Option<E>> {
        self.inner.log.lock().errors.clone()
    }

    /// Snapshot of the timestamp (clock milliseconds) at which every call
    /// began, in call order.
    pub fn call_times(&self) -> Vec<u64> {
        self.inner.log.lock().call_times.clone()
    }

    /// All recorded calls assembled as [`CallRecord`]s.
    pub fn calls(&self) -> Vec<CallRecord<A, R, C, E>> {
        self.inner.log.lock().records()
    }

    /// Number of calls made through the spy.
    pub fn call_count(&self) -> usize {
        self.inner.log.lock().call_count()
    }

    /// Check if the spy was called at least once.
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if the spy was called exactly N times.
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }

    /// Check if the spy was called exactly once.
    pub fn was_called_once(&self) -> bool {
        self.was_called_times(1)
    }

    /// Check if the spy was called exactly twice.
    pub fn was_called_twice(&self) -> bool {
        self.was_called_times(2)
    }

    /// Check if the spy was called exactly three times.
    pub fn was_called_thrice(&self) -> bool {
        self.was_called_times(3)
    }

    /// Get the Nth call record (0-indexed), or `None` past the end.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<i32, i32> = Spy::new(|_, x| x * 10);
    /// spy.call(1).unwrap();
    /// spy.call(2).unwrap();
    ///
    /// assert_eq!(spy.nth_call(0).unwrap().args, 1);
    /// assert_eq!(spy.nth_call(1).unwrap().return_value, Some(20));
    /// assert!(spy.nth_call(5).is_none());
    /// ```
    pub fn nth_call(&self, n: usize) -> Option<CallRecord<A, R, C, E>> {
        self.inner.log.lock().nth(n)
    }

    /// The first recorded call, or `None` if the spy has not been called.
    pub fn first_call(&self) -> Option<CallRecord<A, R, C, E>> {
        self.nth_call(0)
    }

    /// The second recorded call, or `None` if fewer calls were made.
    pub fn second_call(&self) -> Option<CallRecord<A, R, C, E>> {
        self.nth_call(1)
    }

    /// The third recorded call, or `None` if fewer calls were made.
    pub fn third_call(&self) -> Option<CallRecord<A, R, C, E>> {
        self.nth_call(2)
    }

    /// The most recent call, or `None` if the spy has not been called.
    pub fn last_call(&self) -> Option<CallRecord<A, R, C, E>> {
        let log = self.inner.log.lock();
        let count = log.call_count();
        if count == 0 {
            None
        } else {
            log.nth(count - 1)
        }
    }

    /// The verbatim construction value, for spies built with
    /// [`returning`](Spy::returning).
    ///
    /// `None` for function, failing, and no-op spies: a boxed callable
    /// cannot be handed back for introspection. Use [`kind`](Spy::kind) to
    /// tell which construction branch a spy came from.
    pub fn raw_value(&self) -> Option<&R> {
        self.inner.behavior.raw_value()
    }

    /// Which construction branch the spy's behavior was resolved from.
    pub fn kind(&self) -> BehaviorKind {
        self.inner.behavior.kind()
    }
}

impl<A, R, C, E> Clone for Spy<A, R, C, E> {
    /// Produce another handle to the same spy.
    ///
    /// Clones share the behavior, the logs, and the clock: a call through
    /// any handle is visible from all of them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Spy;
    ///
    /// let spy: Spy<i32, i32> = Spy::new(|_, x| x);
    /// let handle = spy.clone();
    ///
    /// handle.call(1).unwrap();
    /// assert_eq!(spy.call_count(), 1);
    /// ```
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Debug, R: Debug, C: Debug, E: Debug> Debug for Spy<A, R, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log = self.inner.log.lock();
        let call_count = log.call_count();
        f.debug_struct("Spy")
            .field("behavior", &self.inner.behavior)
            .field("call_count", &call_count)
            .field("log", &*log)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::OnceLock;

    #[test]
    fn test_spy_basic() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x * 2);

        assert!(!spy.was_called());
        assert_eq!(spy.call_count(), 0);

        let result = spy.call(5);
        assert_eq!(result, Ok(Some(10)));

        assert!(spy.was_called());
        assert_eq!(spy.call_count(), 1);
    }

    #[test]
    fn test_spy_multiple_calls() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x + 1);

        spy.call(1).unwrap();
        spy.call(2).unwrap();
        spy.call(3).unwrap();

        assert_eq!(spy.call_count(), 3);
        assert!(spy.was_called_times(3));
        assert!(spy.was_called_thrice());
    }

    #[test]
    fn test_exact_count_predicates() {
        let spy: Spy<(), i32> = Spy::returning(0);

        assert!(!spy.was_called_once());

        spy.call(()).unwrap();
        assert!(spy.was_called_once());
        assert!(!spy.was_called_twice());

        spy.call(()).unwrap();
        // Exactly-once, not at-least-once
        assert!(!spy.was_called_once());
        assert!(spy.was_called_twice());
    }

    #[test]
    fn test_spy_call_records() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x * x);

        spy.call(2).unwrap();
        spy.call(3).unwrap();
        spy.call(4).unwrap();

        let calls = spy.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].args, 2);
        assert_eq!(calls[0].return_value, Some(4));
        assert_eq!(calls[1].args, 3);
        assert_eq!(calls[1].return_value, Some(9));
        assert_eq!(calls[2].args, 4);
        assert_eq!(calls[2].return_value, Some(16));
    }

    #[test]
    fn test_spy_nth_call() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);

        spy.call(10).unwrap();
        spy.call(20).unwrap();
        spy.call(30).unwrap();

        assert_eq!(spy.nth_call(0).unwrap().args, 10);
        assert_eq!(spy.nth_call(1).unwrap().args, 20);
        assert_eq!(spy.nth_call(2).unwrap().args, 30);
        assert!(spy.nth_call(3).is_none());
    }

    #[test]
    fn test_first_second_third_are_one_based_calls() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);

        spy.call(10).unwrap();
        assert_eq!(spy.first_call().unwrap().args, 10);
        assert!(spy.second_call().is_none());
        assert!(spy.third_call().is_none());

        spy.call(20).unwrap();
        spy.call(30).unwrap();
        assert_eq!(spy.first_call().unwrap().args, 10);
        assert_eq!(spy.second_call().unwrap().args, 20);
        assert_eq!(spy.third_call().unwrap().args, 30);
    }

    #[test]
    fn test_spy_last_call() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);

        assert!(spy.last_call().is_none());

        spy.call(1).unwrap();
        assert_eq!(spy.last_call().unwrap().args, 1);

        spy.call(2).unwrap();
        assert_eq!(spy.last_call().unwrap().args, 2);
        assert_eq!(spy.last_call(), spy.nth_call(spy.call_count() - 1));
    }

    #[test]
    fn test_spy_reset_aliases() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);

        spy.call(1).unwrap();
        spy.call(2).unwrap();
        assert_eq!(spy.call_count(), 2);

        spy.reset();
        assert_eq!(spy.call_count(), 0);
        assert!(!spy.was_called());
        assert!(spy.calls().is_empty());

        // flush and clear are the same operation
        spy.call(3).unwrap();
        spy.flush();
        assert_eq!(spy.call_count(), 0);

        spy.call(4).unwrap();
        spy.clear();
        assert_eq!(spy.call_count(), 0);

        // The resolved behavior survives every alias
        assert_eq!(spy.call(5), Ok(Some(5)));
    }

    #[test]
    fn test_clear_chains() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);
        spy.call(1).unwrap();

        assert_eq!(spy.clear().call(2), Ok(Some(2)));
        assert_eq!(spy.args(), vec![2]);
    }

    #[test]
    fn test_failure_is_logged_then_resurfaced() {
        let spy: Spy<i32, i32> = Spy::fallible(|_, x| {
            if x == 2 {
                Err(Error::mock("boom"))
            } else {
                Ok(x)
            }
        });

        spy.call(1).unwrap();
        assert_eq!(spy.call(2), Err(Error::mock("boom")));
        spy.call(3).unwrap();

        assert_eq!(spy.errors(), vec![None, Some(Error::mock("boom")), None]);
        assert_eq!(spy.return_values(), vec![Some(1), None, Some(3)]);

        let failed = spy.second_call().unwrap();
        assert_eq!(failed.error, Some(Error::mock("boom")));
        assert_eq!(failed.return_value, None);
    }

    #[test]
    fn test_receiver_is_recorded_verbatim() {
        let spy: Spy<i32, i32, &str> = Spy::new(|_, x| x);

        spy.call_with("alpha", 1).unwrap();
        spy.call_with("beta", 2).unwrap();

        assert_eq!(spy.receivers(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_default_receiver_for_plain_call() {
        let spy: Spy<i32, i32, i32> = Spy::new(|_, x| x);

        spy.call(7).unwrap();
        assert_eq!(spy.receivers(), vec![0]);
    }

    #[test]
    fn test_behavior_sees_the_receiver() {
        let spy: Spy<(), String, &str> = Spy::new(|receiver: &&str, ()| (*receiver).to_string());

        assert_eq!(spy.call_with("ctx", ()), Ok(Some("ctx".to_string())));
    }

    #[test]
    fn test_stateful_behavior() {
        let counter = AtomicI32::new(0);
        let spy: Spy<(), i32> =
            Spy::new(move |_, ()| counter.fetch_add(1, Ordering::SeqCst));

        assert_eq!(spy.call(()), Ok(Some(0)));
        assert_eq!(spy.call(()), Ok(Some(1)));
        assert_eq!(spy.call(()), Ok(Some(2)));
    }

    #[test]
    fn test_logs_stay_aligned() {
        let spy: Spy<i32, i32> = Spy::fallible(|_, x| {
            if x % 2 == 0 {
                Err(Error::mock("even"))
            } else {
                Ok(x)
            }
        });

        for x in 1..=5 {
            let _ = spy.call(x);
        }

        let count = spy.call_count();
        assert_eq!(spy.args().len(), count);
        assert_eq!(spy.receivers().len(), count);
        assert_eq!(spy.call_times().len(), count);
        assert_eq!(spy.return_values().len(), count);
        assert_eq!(spy.errors().len(), count);
    }

    #[test]
    fn test_mock_clock_timestamps() {
        let clock = MockClock::with_start_time(100);
        let spy: Spy<(), i32> = Spy::noop().with_clock(clock.clone());

        spy.call(()).unwrap();
        clock.advance(50);
        spy.call(()).unwrap();
        clock.set(1_000);
        spy.call(()).unwrap();

        assert_eq!(spy.call_times(), vec![100, 150, 1_000]);
        assert_eq!(spy.first_call().unwrap().timestamp_ms, 100);
    }

    #[test]
    fn test_raw_value_and_kind() {
        let value: Spy<(), i32> = Spy::returning(42);
        assert_eq!(value.raw_value(), Some(&42));
        assert_eq!(value.kind(), BehaviorKind::Value);

        let func: Spy<i32, i32> = Spy::new(|_, x| x);
        assert_eq!(func.raw_value(), None);
        assert_eq!(func.kind(), BehaviorKind::Function);

        let noop: Spy<(), i32> = Spy::noop();
        assert_eq!(noop.raw_value(), None);
        assert_eq!(noop.kind(), BehaviorKind::Noop);
    }

    #[test]
    fn test_clone_shares_state() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);
        let handle = spy.clone();

        spy.call(1).unwrap();
        handle.call(2).unwrap();

        assert_eq!(spy.call_count(), 2);
        assert_eq!(handle.call_count(), 2);
        assert_eq!(spy.args(), vec![1, 2]);

        handle.clear();
        assert_eq!(spy.call_count(), 0);
    }

    #[test]
    fn test_reentrant_calls_log_entries_in_start_order() {
        let slot: Arc<OnceLock<Spy<u32, u32>>> = Arc::new(OnceLock::new());
        let inner_slot = Arc::clone(&slot);

        let spy: Spy<u32, u32> = Spy::fallible(move |_, n| {
            if n == 0 {
                Ok(0)
            } else {
                let nested = inner_slot.get().unwrap().call(n - 1)?;
                Ok(nested.unwrap_or(0) + 1)
            }
        });
        slot.set(spy.clone()).ok();

        assert_eq!(spy.call(2), Ok(Some(2)));
        assert_eq!(spy.call_count(), 3);

        // Entry fields in call-start order, outcome fields in completion
        // order: the innermost call finishes first.
        assert_eq!(spy.args(), vec![2, 1, 0]);
        assert_eq!(spy.return_values(), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_spy_debug() {
        let spy: Spy<i32, i32> = Spy::new(|_, x| x);
        spy.call(42).unwrap();

        let debug = format!("{spy:?}");
        assert!(debug.contains("Spy"));
        assert!(debug.contains("call_count"));
    }
}
