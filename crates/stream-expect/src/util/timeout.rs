//! Timeout utilities.
//!
//! Deadline tracking for operations that retry in a loop: sample a
//! monotonic clock once, then hand each attempt the *remaining* budget so
//! repeated attempts never overrun the caller's original timeout.

use std::time::{Duration, Instant};

/// A deadline tracker for operations with multiple steps.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    /// Create a new deadline `budget` from now.
    #[must_use]
    pub fn from_now(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    /// The original budget.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Time elapsed since the deadline was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the remaining time until the deadline.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.start.elapsed())
    }

    /// Check if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.start.elapsed() >= self.budget
    }
}
