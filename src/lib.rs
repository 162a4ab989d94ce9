//! # spykit 🕵️
//!
//! > A call-recording spy for unit testing
//!
//! **spykit** wraps a behavior — a closure, a fixed value, or nothing — in a
//! [`Spy`] that forwards every call while recording its arguments, receiver,
//! return value, failure, and timestamp. Compose it with whatever test
//! framework and assertions you already use.
//!
//! ## Quick Start
//!
//! ```rust
//! use spykit::Spy;
//!
//! let double: Spy<i32, i32> = Spy::new(|_, x| x * 2);
//!
//! assert_eq!(double.call(5), Ok(Some(10)));
//! assert_eq!(double.call(7), Ok(Some(14)));
//!
//! assert!(double.was_called_twice());
//! assert_eq!(double.args(), vec![5, 7]);
//! assert_eq!(double.return_values(), vec![Some(10), Some(14)]);
//! ```
//!
//! ## Features
//!
//! - 🎬 **Full call log** - arguments, receivers, return values, failures,
//!   and timestamps, one entry per invocation
//! - 🎭 **Behavior resolution** - wrap a function, a constant value, a
//!   constant failure, or nothing at all
//! - ⏱️ **Injectable clock** - deterministic call timestamps via
//!   [`MockClock`](clock::MockClock)
//! - 🔍 **Introspection accessors** - `was_called_once`, `nth_call`,
//!   `last_call`, and friends, always computed from current state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Injectable time sources for call timestamps
pub mod clock;

pub mod error;
pub mod spy;

/// Prelude for convenient imports
///
/// ```rust
/// use spykit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, MockClock, SystemClock};
    pub use crate::error::{Error, Result};
    pub use crate::spy::{BehaviorKind, CallRecord, Spy};
}

// Re-exports
pub use error::{Error, Result};
pub use spy::{BehaviorKind, CallRecord, Spy};
