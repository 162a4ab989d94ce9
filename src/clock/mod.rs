//! Injectable time sources for call timestamps
//!
//! Every [`Spy`](crate::spy::Spy) stamps each call with the current time in
//! milliseconds. By default that is the wall clock ([`SystemClock`]), but any
//! [`Clock`] can be injected — normally a [`MockClock`] so tests can assert
//! on exact timestamps instead of depending on process-wide wall-clock state.
//!
//! # Example
//!
//! ```rust
//! use spykit::clock::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! assert_eq!(clock.now_millis(), 0);
//!
//! clock.advance(10_000);
//! assert_eq!(clock.now_millis(), 10_000);
//! ```

mod mock_clock;
mod system;

pub use mock_clock::MockClock;
pub use system::SystemClock;

/// A source of millisecond timestamps.
///
/// Implementations must be shareable across threads so a clock can be held
/// by a spy and driven from the test at the same time.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds.
    ///
    /// For [`SystemClock`] this is milliseconds since the Unix epoch; for
    /// [`MockClock`] it is whatever the test has set.
    fn now_millis(&self) -> u64;
}
