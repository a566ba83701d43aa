//! Polling adapter specialized for socket-like sources.

use std::io::Read;
use std::net::TcpStream;
use std::time::Duration;

use tracing::debug;

use crate::content::{Chunk, Domain};
use crate::error::{ExpectError, Result};
use crate::stream::adapter::{ChunkAssembler, PollConfig, StreamAdapter, drive_poll};

/// Socket-like sources: a readable transport with a non-blocking receive
/// mode and an explicit shutdown path.
pub trait SocketSource: Read {
    /// Switch the receive path in or out of non-blocking mode.
    fn set_nonblocking(&self, nonblocking: bool) -> std::io::Result<()>;

    /// Shut down both directions of the connection.
    fn shutdown(&self) -> std::io::Result<()>;
}

impl SocketSource for TcpStream {
    fn set_nonblocking(&self, nonblocking: bool) -> std::io::Result<()> {
        Self::set_nonblocking(self, nonblocking)
    }

    fn shutdown(&self) -> std::io::Result<()> {
        Self::shutdown(self, std::net::Shutdown::Both)
    }
}

#[cfg(unix)]
impl SocketSource for std::os::unix::net::UnixStream {
    fn set_nonblocking(&self, nonblocking: bool) -> std::io::Result<()> {
        Self::set_nonblocking(self, nonblocking)
    }

    fn shutdown(&self) -> std::io::Result<()> {
        Self::shutdown(self, std::net::Shutdown::Both)
    }
}

/// A [`StreamAdapter`] driving a socket in non-blocking receive mode.
///
/// The socket is switched to non-blocking mode at construction, so each
/// receive attempt returns whatever bytes are queued (or `WouldBlock`) and
/// the retry loop provides the timeout bound. `close` shuts the
/// connection down.
#[derive(Debug)]
pub struct PollingSocketAdapter<S: SocketSource> {
    source: S,
    config: PollConfig,
    assembler: ChunkAssembler,
}

impl<S: SocketSource> PollingSocketAdapter<S> {
    /// Create a binary-domain adapter with default tuning.
    pub fn new(source: S) -> Result<Self> {
        Self::with_config(source, Domain::Binary, PollConfig::default())
    }

    /// Create a text-domain adapter with default tuning.
    pub fn text(source: S) -> Result<Self> {
        Self::with_config(source, Domain::Text, PollConfig::default())
    }

    /// Create an adapter with explicit domain and tuning.
    pub fn with_config(source: S, domain: Domain, config: PollConfig) -> Result<Self> {
        source
            .set_nonblocking(true)
            .map_err(|e| ExpectError::io_context("switching socket to non-blocking mode", e))?;
        Ok(Self {
            source,
            config,
            assembler: ChunkAssembler::new(domain),
        })
    }

    /// Interval between receive attempts.
    #[must_use]
    pub const fn poll_period(&self) -> Duration {
        self.config.poll_period()
    }

    /// Upper bound on bytes requested per receive attempt.
    #[must_use]
    pub const fn max_read(&self) -> usize {
        self.config.max_read()
    }

    /// Set the poll period. Fails on a zero duration.
    pub fn set_poll_period(&mut self, poll_period: Duration) -> Result<()> {
        self.config.set_poll_period(poll_period)
    }

    /// Set the per-attempt receive size. Fails on zero.
    pub fn set_max_read(&mut self, max_read: usize) -> Result<()> {
        self.config.set_max_read(max_read)
    }

    /// Borrow the underlying socket.
    pub const fn get_ref(&self) -> &S {
        &self.source
    }

    /// Consume the adapter, returning the socket restored to blocking
    /// mode (best effort).
    pub fn into_inner(self) -> S {
        let _ = self.source.set_nonblocking(false);
        self.source
    }
}

impl<S: SocketSource> StreamAdapter for PollingSocketAdapter<S> {
    fn domain(&self) -> Domain {
        self.assembler.domain()
    }

    fn poll(&mut self, timeout: Duration) -> Result<Chunk> {
        let source = &mut self.source;
        drive_poll(timeout, &self.config, &mut self.assembler, |buf| {
            source.read(buf)
        })
    }

    fn close(&mut self) -> Result<()> {
        debug!("shutting down socket");
        match self.source.shutdown() {
            Ok(()) => Ok(()),
            // Already gone is fine for a close path.
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(ExpectError::io_context("shutting down socket", e)),
        }
    }
}
