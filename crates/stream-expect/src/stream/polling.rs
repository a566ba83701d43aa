//! Polling adapter for generic readable sources.

use std::io::Read;
use std::time::Duration;

use crate::content::{Chunk, Domain};
use crate::error::Result;
use crate::stream::adapter::{ChunkAssembler, PollConfig, StreamAdapter, drive_poll};

/// A [`StreamAdapter`] over any [`Read`] implementor.
///
/// The source is expected to behave non-blockingly: a read that returns
/// zero bytes (or `WouldBlock`/`TimedOut`) means "nothing available yet"
/// and the adapter retries until its poll deadline. Sources that block in
/// `read` until data arrives also work; they simply pre-empt the retry
/// sleep.
#[derive(Debug)]
pub struct PollingStreamAdapter<R> {
    source: R,
    config: PollConfig,
    assembler: ChunkAssembler,
}

impl<R: Read> PollingStreamAdapter<R> {
    /// Create a binary-domain adapter with default tuning.
    pub fn new(source: R) -> Self {
        Self::with_config(source, Domain::Binary, PollConfig::default())
    }

    /// Create a text-domain adapter with default tuning.
    pub fn text(source: R) -> Self {
        Self::with_config(source, Domain::Text, PollConfig::default())
    }

    /// Create an adapter with explicit domain and tuning.
    pub fn with_config(source: R, domain: Domain, config: PollConfig) -> Self {
        Self {
            source,
            config,
            assembler: ChunkAssembler::new(domain),
        }
    }

    /// Interval between read attempts.
    #[must_use]
    pub const fn poll_period(&self) -> Duration {
        self.config.poll_period()
    }

    /// Upper bound on bytes requested per read attempt.
    #[must_use]
    pub const fn max_read(&self) -> usize {
        self.config.max_read()
    }

    /// Set the poll period. Fails on a zero duration.
    pub fn set_poll_period(&mut self, poll_period: Duration) -> Result<()> {
        self.config.set_poll_period(poll_period)
    }

    /// Set the per-attempt read size. Fails on zero.
    pub fn set_max_read(&mut self, max_read: usize) -> Result<()> {
        self.config.set_max_read(max_read)
    }

    /// Borrow the underlying source.
    pub const fn get_ref(&self) -> &R {
        &self.source
    }

    /// Consume the adapter, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> StreamAdapter for PollingStreamAdapter<R> {
    fn domain(&self) -> Domain {
        self.assembler.domain()
    }

    fn poll(&mut self, timeout: Duration) -> Result<Chunk> {
        let source = &mut self.source;
        drive_poll(timeout, &self.config, &mut self.assembler, |buf| {
            source.read(buf)
        })
    }
}
