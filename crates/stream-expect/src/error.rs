//! Error types for stream-expect.
//!
//! All failures are surfaced synchronously to the caller of the operation
//! that detected them. Construction-time problems (wrong domain, bad
//! tuning values, empty collections) are reported eagerly; the only
//! recoverable, expected condition is [`ExpectError::Timeout`].

use std::time::Duration;

use thiserror::Error;

use crate::content::Domain;

/// The main error type for stream-expect operations.
#[derive(Debug, Error)]
pub enum ExpectError {
    /// Content of one domain was handed to a component fixed to the other.
    #[error("domain mismatch in {operation}: expected {expected} content, got {actual}")]
    DomainMismatch {
        /// The operation that detected the mismatch.
        operation: &'static str,
        /// The domain the component was constructed for.
        expected: Domain,
        /// The domain of the content it was given.
        actual: Domain,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// A searcher collection was constructed from zero searchers.
    #[error("searcher collection requires at least one searcher")]
    EmptyCollection,

    /// No match was found (or no data arrived) before the deadline.
    ///
    /// This is an expected, recoverable condition that callers are meant
    /// to handle, not a programming error.
    #[error("timed out after {duration:?} waiting for data or a pattern match")]
    Timeout {
        /// The budget that elapsed.
        duration: Duration,
    },

    /// Invalid regex pattern.
    #[error("invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    /// An I/O error from the underlying source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An I/O error with additional context.
    #[error("{context}: {source}")]
    IoWithContext {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for stream-expect operations.
pub type Result<T> = std::result::Result<T, ExpectError>;

impl ExpectError {
    /// Create a domain mismatch error.
    #[must_use]
    pub const fn domain_mismatch(operation: &'static str, expected: Domain, actual: Domain) -> Self {
        Self::DomainMismatch {
            operation,
            expected,
            actual,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub const fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Create an I/O error with context.
    pub fn io_context(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoWithContext {
            context: context.into(),
            source,
        }
    }

    /// Check if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this is a domain mismatch error.
    #[must_use]
    pub const fn is_domain_mismatch(&self) -> bool {
        matches!(self, Self::DomainMismatch { .. })
    }
}
