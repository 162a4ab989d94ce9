//! `MockClock` implementation for controlled timestamps.

use parking_lot::Mutex;
use std::sync::Arc;

use super::Clock;

/// A mock clock that puts call timestamps under test control.
///
/// `MockClock` reports whatever time the test has set, making it possible
/// to assert on exact [`call_times`](crate::spy::Spy::call_times) entries
/// without depending on the real wall clock.
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned and shared. All clones share
/// the same underlying time state, so a test can hand one handle to a spy
/// and keep another to drive time forward.
///
/// # Example
///
/// ```rust
/// use spykit::clock::{Clock, MockClock};
///
/// // A new clock starts at time zero
/// let clock = MockClock::new();
/// assert_eq!(clock.now_millis(), 0);
///
/// // Advance time by 10 seconds
/// clock.advance(10_000);
/// assert_eq!(clock.now_millis(), 10_000);
///
/// // Clones share the same time
/// let clock2 = clock.clone();
/// clock2.advance(5_000);
/// assert_eq!(clock.now_millis(), 15_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Arc<Mutex<u64>>,
}

impl MockClock {
    /// Creates a new `MockClock` starting at time zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::clock::{Clock, MockClock};
    ///
    /// let clock = MockClock::new();
    /// assert_eq!(clock.now_millis(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time(0)
    }

    /// Creates a new `MockClock` starting at the specified time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::clock::{Clock, MockClock};
    ///
    /// let clock = MockClock::with_start_time(1_000);
    /// assert_eq!(clock.now_millis(), 1_000);
    /// ```
    #[must_use]
    pub fn with_start_time(millis: u64) -> Self {
        Self {
            now: Arc::new(Mutex::new(millis)),
        }
    }

    /// Advances the clock by the specified number of milliseconds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::clock::{Clock, MockClock};
    ///
    /// let clock = MockClock::new();
    /// clock.advance(10_000);
    /// clock.advance(500);
    /// assert_eq!(clock.now_millis(), 10_500);
    /// ```
    pub fn advance(&self, millis: u64) {
        *self.now.lock() += millis;
    }

    /// Sets the clock to an absolute time.
    ///
    /// Unlike `advance`, this allows setting time to any value, including
    /// values less than the current time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::clock::{Clock, MockClock};
    ///
    /// let clock = MockClock::new();
    /// clock.set(1_000);
    /// assert_eq!(clock.now_millis(), 1_000);
    /// ```
    pub fn set(&self, millis: u64) {
        *self.now.lock() = millis;
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> u64 {
        *self.now.lock()
    }
}
