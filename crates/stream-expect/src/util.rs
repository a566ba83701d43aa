//! Utility types shared across the crate.

mod timeout;

pub use timeout::Deadline;
