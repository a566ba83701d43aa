//! The stream-adapter capability and shared polling machinery.

use std::io;
use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::config::{DEFAULT_MAX_READ, DEFAULT_POLL_PERIOD};
use crate::content::{Chunk, Domain};
use crate::error::{ExpectError, Result};
use crate::stream::decode::Utf8Carry;
use crate::util::Deadline;

/// The capability the engine requires of a data source.
///
/// `poll` attempts to obtain whatever data is currently available,
/// retrying at the adapter's poll period until either data arrives (a
/// partial chunk is returned immediately; `poll` never blocks to fill a
/// fixed size) or `timeout` elapses, in which case it fails with
/// [`ExpectError::Timeout`].
pub trait StreamAdapter {
    /// The domain of chunks this adapter produces.
    fn domain(&self) -> Domain;

    /// Wait up to `timeout` for newly available data.
    fn poll(&mut self, timeout: Duration) -> Result<Chunk>;

    /// Release the underlying source.
    ///
    /// The default implementation does nothing; adapters whose source has
    /// an explicit shutdown path override it.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Tuning for the poll retry loop.
///
/// Both values are validated eagerly: a zero poll period or a zero read
/// size fails at construction or assignment, never on the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    poll_period: Duration,
    max_read: usize,
}

impl PollConfig {
    /// Create a config, validating both values.
    pub fn new(poll_period: Duration, max_read: usize) -> Result<Self> {
        let mut config = Self {
            poll_period: DEFAULT_POLL_PERIOD,
            max_read: DEFAULT_MAX_READ,
        };
        config.set_poll_period(poll_period)?;
        config.set_max_read(max_read)?;
        Ok(config)
    }

    /// Interval between read attempts while no data is available.
    #[must_use]
    pub const fn poll_period(&self) -> Duration {
        self.poll_period
    }

    /// Upper bound on bytes requested per read attempt.
    #[must_use]
    pub const fn max_read(&self) -> usize {
        self.max_read
    }

    /// Set the poll period. Fails on a zero duration.
    pub fn set_poll_period(&mut self, poll_period: Duration) -> Result<()> {
        if poll_period.is_zero() {
            return Err(ExpectError::config("poll_period must be greater than zero"));
        }
        self.poll_period = poll_period;
        Ok(())
    }

    /// Set the per-attempt read size. Fails on zero.
    pub fn set_max_read(&mut self, max_read: usize) -> Result<()> {
        if max_read == 0 {
            return Err(ExpectError::config("max_read must be greater than zero"));
        }
        self.max_read = max_read;
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_period: DEFAULT_POLL_PERIOD,
            max_read: DEFAULT_MAX_READ,
        }
    }
}

/// Turns raw reads into domain-typed chunks.
///
/// Binary chunks pass through; text chunks run through the UTF-8 carry so
/// sequences split across reads are reassembled.
#[derive(Debug)]
pub(crate) struct ChunkAssembler {
    domain: Domain,
    carry: Utf8Carry,
}

impl ChunkAssembler {
    pub(crate) fn new(domain: Domain) -> Self {
        Self {
            domain,
            carry: Utf8Carry::new(),
        }
    }

    pub(crate) const fn domain(&self) -> Domain {
        self.domain
    }

    /// Convert `raw` into a chunk. Returns `None` when the read produced
    /// nothing decodable yet (an incomplete UTF-8 suffix only).
    pub(crate) fn assemble(&mut self, raw: &[u8]) -> Option<Chunk> {
        match self.domain {
            Domain::Binary => Some(Chunk::Binary(raw.to_vec())),
            Domain::Text => {
                let text = self.carry.decode(raw);
                if text.is_empty() {
                    None
                } else {
                    Some(Chunk::Text(text))
                }
            }
        }
    }
}

/// The retry loop shared by both adapter shapes.
///
/// `read_available` performs one non-blocking read attempt; `Ok(0)` and
/// `WouldBlock`/`TimedOut`/`Interrupted` all mean "no data yet".
pub(crate) fn drive_poll<F>(
    timeout: Duration,
    config: &PollConfig,
    assembler: &mut ChunkAssembler,
    mut read_available: F,
) -> Result<Chunk>
where
    F: FnMut(&mut [u8]) -> io::Result<usize>,
{
    let deadline = Deadline::from_now(timeout);
    let mut scratch = vec![0u8; config.max_read()];
    loop {
        match read_available(&mut scratch) {
            Ok(0) => {}
            Ok(n) => {
                trace!(bytes = n, "poll read");
                if let Some(chunk) = assembler.assemble(&scratch[..n]) {
                    return Ok(chunk);
                }
                // Incomplete UTF-8 suffix only; keep polling.
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock
                        | io::ErrorKind::TimedOut
                        | io::ErrorKind::Interrupted
                ) => {}
            Err(e) => return Err(e.into()),
        }
        if deadline.is_expired() {
            trace!(?timeout, "poll deadline expired");
            return Err(ExpectError::timeout(timeout));
        }
        thread::sleep(config.poll_period().min(deadline.remaining()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_config_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.poll_period(), DEFAULT_POLL_PERIOD);
        assert_eq!(config.max_read(), DEFAULT_MAX_READ);
    }

    #[test]
    fn poll_config_rejects_zero_period() {
        assert!(PollConfig::new(Duration::ZERO, 32).is_err());

        let mut config = PollConfig::default();
        assert!(config.set_poll_period(Duration::ZERO).is_err());
        // The failed assignment leaves the previous value in place.
        assert_eq!(config.poll_period(), DEFAULT_POLL_PERIOD);
    }

    #[test]
    fn poll_config_rejects_zero_max_read() {
        assert!(PollConfig::new(Duration::from_millis(1), 0).is_err());

        let mut config = PollConfig::default();
        assert!(config.set_max_read(0).is_err());
        assert_eq!(config.max_read(), DEFAULT_MAX_READ);
    }

    #[test]
    fn assembler_binary_passthrough() {
        let mut assembler = ChunkAssembler::new(Domain::Binary);
        assert_eq!(assembler.domain(), Domain::Binary);
        let chunk = assembler.assemble(b"\x01\x02").unwrap();
        assert_eq!(chunk.as_binary(), Some(&b"\x01\x02"[..]));
    }

    #[test]
    fn assembler_text_holds_incomplete_suffix() {
        let mut assembler = ChunkAssembler::new(Domain::Text);
        // A lone lead byte decodes to nothing yet.
        assert!(assembler.assemble(b"\xC3").is_none());
        let chunk = assembler.assemble(b"\xA9").unwrap();
        assert_eq!(chunk.as_text(), Some("\u{E9}"));
    }

    #[test]
    fn drive_poll_returns_short_chunk_immediately() {
        let mut assembler = ChunkAssembler::new(Domain::Binary);
        let config = PollConfig::new(Duration::from_millis(1), 64).unwrap();
        let mut served = false;
        let chunk = drive_poll(Duration::from_secs(1), &config, &mut assembler, |buf| {
            if served {
                return Ok(0);
            }
            served = true;
            buf[..3].copy_from_slice(b"abc");
            Ok(3)
        })
        .unwrap();
        assert_eq!(chunk.as_binary(), Some(&b"abc"[..]));
    }

    #[test]
    fn drive_poll_times_out_without_data() {
        let mut assembler = ChunkAssembler::new(Domain::Binary);
        let config = PollConfig::new(Duration::from_millis(1), 64).unwrap();
        let err = drive_poll(Duration::from_millis(10), &config, &mut assembler, |_| Ok(0))
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn drive_poll_treats_would_block_as_no_data() {
        let mut assembler = ChunkAssembler::new(Domain::Binary);
        let config = PollConfig::new(Duration::from_millis(1), 64).unwrap();
        let err = drive_poll(Duration::from_millis(5), &config, &mut assembler, |_| {
            Err(io::Error::new(io::ErrorKind::WouldBlock, "not ready"))
        })
        .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn drive_poll_propagates_real_errors() {
        let mut assembler = ChunkAssembler::new(Domain::Binary);
        let config = PollConfig::default();
        let err = drive_poll(Duration::from_secs(1), &config, &mut assembler, |_| {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        })
        .unwrap_err();
        assert!(matches!(err, ExpectError::Io(_)));
    }
}
