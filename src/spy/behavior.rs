//! Behavior resolution for spies.
//!
//! A spy's construction argument — a closure, a fixed value, a fixed
//! failure, or nothing — is resolved exactly once into a [`Behavior`], a
//! tagged variant invoked through the single [`Behavior::invoke`] entry
//! point. The hot call path never re-inspects what kind of input the spy
//! was built from.

use std::fmt::Debug;

/// Boxed callable form of a spied behavior.
pub(crate) type BehaviorFn<A, R, C, E> =
    Box<dyn Fn(&C, A) -> Result<Option<R>, E> + Send + Sync>;

/// Which construction branch a spy's behavior was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    /// A user-supplied callable, invoked with the original receiver and
    /// arguments on every call.
    Function,
    /// A fixed value, cloned and returned on every call regardless of
    /// receiver or arguments.
    Value,
    /// No behavior: every call yields the no-value sentinel.
    Noop,
}

/// The resolved behavior a spy delegates every call to.
///
/// Resolution happens once, at construction; the variant never changes for
/// the lifetime of the spy.
pub(crate) enum Behavior<A, R, C, E> {
    Func(BehaviorFn<A, R, C, E>),
    Value(R),
    Noop,
}

impl<A, R, C, E> Behavior<A, R, C, E> {
    /// Resolve an infallible callable.
    pub(crate) fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&C, A) -> R + Send + Sync + 'static,
    {
        Self::Func(Box::new(move |receiver, args| Ok(Some(f(receiver, args)))))
    }

    /// Resolve a callable that may fail.
    pub(crate) fn from_fallible<F>(f: F) -> Self
    where
        F: Fn(&C, A) -> Result<R, E> + Send + Sync + 'static,
    {
        Self::Func(Box::new(move |receiver, args| f(receiver, args).map(Some)))
    }

    /// Resolve a non-callable construction argument: a constant behavior.
    pub(crate) fn from_value(value: R) -> Self {
        Self::Value(value)
    }

    /// Resolve a constant failure.
    pub(crate) fn from_failure(error: E) -> Self
    where
        E: Clone + Send + Sync + 'static,
    {
        Self::Func(Box::new(move |_receiver, _args| Err(error.clone())))
    }

    /// Resolve the absent-argument case: a no-op behavior.
    pub(crate) fn noop() -> Self {
        Self::Noop
    }

    /// Invoke the behavior with the receiver and arguments of one call.
    pub(crate) fn invoke(&self, receiver: &C, args: A) -> Result<Option<R>, E>
    where
        R: Clone,
    {
        match self {
            Self::Func(f) => f(receiver, args),
            Self::Value(value) => Ok(Some(value.clone())),
            Self::Noop => Ok(None),
        }
    }

    /// The construction branch this behavior was resolved from.
    pub(crate) fn kind(&self) -> BehaviorKind {
        match self {
            Self::Func(_) => BehaviorKind::Function,
            Self::Value(_) => BehaviorKind::Value,
            Self::Noop => BehaviorKind::Noop,
        }
    }

    /// The verbatim construction value, for `Value` behaviors.
    pub(crate) fn raw_value(&self) -> Option<&R> {
        match self {
            Self::Value(value) => Some(value),
            Self::Func(_) | Self::Noop => None,
        }
    }
}

impl<A, R, C, E> Debug for Behavior<A, R, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Behavior").field("kind", &self.kind()).finish()
    }
}
