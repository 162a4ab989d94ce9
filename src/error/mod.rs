//! Error definitions
//!
//! A spy is generic over its failure type `E`, so the crate does not force
//! an error representation on wrapped behaviors. [`Error`] is the default
//! `E` parameter: a ready-made payload for tests that only need *some*
//! comparable failure value to inject and assert on.

use thiserror::Error;

/// Default failure payload for spied behaviors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Failure produced (or injected) by a spied behavior
    #[error("mock failure: {0}")]
    Mock(String),
}

impl Error {
    /// Create a mock failure with the given message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spykit::Error;
    ///
    /// let err = Error::mock("database down");
    /// assert_eq!(err.to_string(), "mock failure: database down");
    /// ```
    #[must_use]
    pub fn mock(message: impl Into<String>) -> Self {
        Self::Mock(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
