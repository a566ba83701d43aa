//! The expect engine.
//!
//! An [`Expecter`] turns a polled, chunked source into a blocking
//! "wait for this pattern" primitive: search the buffer, pull more data
//! while the timeout budget lasts, consume through each match so
//! sequential expectations walk one continuous stream.

use std::time::Duration;

use tracing::{debug, trace};

use crate::content::{Chunk, Content, Domain};
use crate::error::{ExpectError, Result};
use crate::expect::buffer::WindowBuffer;
use crate::search::{BytesSearcher, Match, RegexSearcher, Searcher, TextSearcher};
use crate::stream::StreamAdapter;
use crate::util::Deadline;

/// Observation hook invoked with every newly polled chunk.
pub type InputCallback = Box<dyn FnMut(Content<'_>)>;

/// The buffering/search/polling engine.
///
/// An `Expecter` exclusively owns its adapter (and, transitively, the
/// underlying source) for its lifetime. It is a strictly single-caller
/// object: every operation takes `&mut self` and at most one
/// `expect`/`read` can be in flight. Successive `expect` calls observe
/// data in arrival order; the buffer is only ever trimmed from the front.
pub struct Expecter {
    adapter: Box<dyn StreamAdapter>,
    buffer: WindowBuffer,
    input_callback: Option<InputCallback>,
    close_adapter: bool,
    closed: bool,
}

impl Expecter {
    /// Create an engine over `adapter` with the given window capacity.
    ///
    /// Fails on a zero window. When `close_adapter` is set, dropping or
    /// [`close`](Self::close)-ing the engine closes the adapter (and with
    /// it the underlying source).
    pub fn new(adapter: Box<dyn StreamAdapter>, window: usize, close_adapter: bool) -> Result<Self> {
        let buffer = WindowBuffer::new(adapter.domain(), window)?;
        Ok(Self {
            adapter,
            buffer,
            input_callback: None,
            close_adapter,
            closed: false,
        })
    }

    /// Install (or clear) the input-observation callback.
    ///
    /// The callback sees every polled chunk exactly once, before the
    /// chunk is appended to the buffer.
    pub fn set_input_callback(&mut self, callback: Option<InputCallback>) {
        self.input_callback = callback;
    }

    /// The window capacity in bytes.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.buffer.window()
    }

    /// The engine's content domain.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.buffer.domain()
    }

    /// Whether [`close`](Self::close) will close the owned adapter.
    #[must_use]
    pub const fn close_adapter(&self) -> bool {
        self.close_adapter
    }

    /// Borrow the owned adapter.
    #[must_use]
    pub fn adapter(&self) -> &dyn StreamAdapter {
        &*self.adapter
    }

    /// Mutably borrow the owned adapter.
    pub fn adapter_mut(&mut self) -> &mut dyn StreamAdapter {
        &mut *self.adapter
    }

    /// A non-consuming view of the buffered content.
    #[must_use]
    pub fn buffered(&self) -> Content<'_> {
        self.buffer.content()
    }

    /// Drain and return up to `n` bytes of already-buffered content
    /// without polling for more.
    pub fn read(&mut self, n: usize) -> Chunk {
        self.buffer.take_front(n)
    }

    /// Wait until `searcher` matches the stream or `timeout` elapses.
    ///
    /// The buffer is searched first; while there is no match and budget
    /// remains, the adapter is polled with the *remaining* budget and each
    /// new chunk is appended (observation callback first) and searched
    /// together with up to `window` bytes of history. On a match, content
    /// through the match end is consumed, so a later `expect` only sees
    /// what came after. On timeout the error propagates unchanged and the
    /// buffer is left exactly as it was.
    ///
    /// Window eviction runs once per poll cycle, after searching, so a
    /// pattern completed by a fresh chunk is found even when the combined
    /// length momentarily exceeds the window. A pattern that is longer
    /// than the window, or whose bytes were already evicted, can be
    /// missed; that is the documented cost of bounded memory.
    pub fn expect<S>(&mut self, searcher: &S, timeout: Duration) -> Result<Match>
    where
        S: Searcher + ?Sized,
    {
        if searcher.domain() != self.buffer.domain() {
            return Err(ExpectError::domain_mismatch(
                "expect",
                self.buffer.domain(),
                searcher.domain(),
            ));
        }

        debug!(domain = %self.buffer.domain(), ?timeout, "expect");
        let deadline = Deadline::from_now(timeout);
        loop {
            if let Some(found) = searcher.search(self.buffer.content())? {
                trace!(start = found.start(), end = found.end(), "pattern matched");
                self.buffer.discard_front(found.end());
                self.buffer.evict_to_window();
                return Ok(found);
            }
            self.buffer.evict_to_window();

            let chunk = self.adapter.poll(deadline.remaining())?;
            trace!(bytes = chunk.len(), "chunk received");
            if let Some(callback) = self.input_callback.as_mut() {
                callback(chunk.as_content());
            }
            self.buffer.append(chunk)?;
        }
    }

    /// Expect a literal text pattern.
    pub fn expect_text(&mut self, pattern: &str, timeout: Duration) -> Result<Match> {
        self.expect(&TextSearcher::new(pattern), timeout)
    }

    /// Expect a literal byte pattern.
    pub fn expect_bytes(&mut self, pattern: &[u8], timeout: Duration) -> Result<Match> {
        self.expect(&BytesSearcher::new(pattern), timeout)
    }

    /// Expect a regex pattern, compiled for the engine's domain.
    pub fn expect_regex(&mut self, pattern: &str, timeout: Duration) -> Result<Match> {
        let searcher = match self.buffer.domain() {
            Domain::Text => RegexSearcher::new(pattern)?,
            Domain::Binary => RegexSearcher::binary(pattern)?,
        };
        self.expect(&searcher, timeout)
    }

    /// Release the engine's resources.
    ///
    /// Closes the owned adapter when `close_adapter` was requested at
    /// construction; otherwise leaves the source for the caller to
    /// manage. Idempotent; also runs on drop.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.close_adapter {
            debug!("closing stream adapter");
            self.adapter.close()?;
        }
        Ok(())
    }
}

impl Drop for Expecter {
    fn drop(&mut self) {
        if !self.closed && self.close_adapter {
            let _ = self.adapter.close();
        }
    }
}

impl std::fmt::Debug for Expecter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expecter")
            .field("domain", &self.buffer.domain())
            .field("window", &self.buffer.window())
            .field("buffered", &self.buffer.len())
            .field("close_adapter", &self.close_adapter)
            .finish_non_exhaustive()
    }
}
