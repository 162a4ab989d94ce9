//! Wall-clock [`Clock`] implementation.

use std::time::{SystemTime, UNIX_EPOCH};

use super::Clock;

/// The wall clock: milliseconds since the Unix epoch.
///
/// This is the default time source of a [`Spy`](crate::spy::Spy). It is a
/// zero-sized stateless type; construct it directly.
///
/// # Example
///
/// ```rust
/// use spykit::clock::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.now_millis() > 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_after_2020() {
        // 2020-01-01T00:00:00Z in milliseconds
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_monotone_enough() {
        let a = SystemClock.now_millis();
        let b = SystemClock.now_millis();
        assert!(b >= a);
    }
}
