//! The sliding-window accumulation buffer.
//!
//! Domain-typed, append-at-the-back, trim-at-the-front. The engine owns
//! exactly one of these per session: polled chunks are appended, matched
//! content is discarded from the front, and anything beyond the window
//! capacity is evicted oldest-first. Content is never reordered, which is
//! what gives sequential expectations their arrival-order guarantee.

use bytes::{Buf, BytesMut};
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

use crate::content::{Chunk, Content, Domain};
use crate::error::{ExpectError, Result};

/// A bounded, domain-typed sliding window over stream content.
///
/// Text buffers maintain an NFC-normalization invariant so that text
/// searcher offsets (which refer to NFC content) always line up with the
/// stored bytes, and evict only on `char` boundaries.
#[derive(Debug)]
pub struct WindowBuffer {
    inner: Inner,
    window: usize,
}

#[derive(Debug)]
enum Inner {
    Text(String),
    Binary(BytesMut),
}

impl WindowBuffer {
    /// Create an empty buffer. Fails on a zero window capacity.
    pub fn new(domain: Domain, window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ExpectError::config("window must be greater than zero"));
        }
        let inner = match domain {
            Domain::Text => Inner::Text(String::new()),
            Domain::Binary => Inner::Binary(BytesMut::new()),
        };
        Ok(Self { inner, window })
    }

    /// The buffer's content domain.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self.inner {
            Inner::Text(_) => Domain::Text,
            Inner::Binary(_) => Domain::Binary,
        }
    }

    /// The window capacity in bytes.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Current length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.inner {
            Inner::Text(s) => s.len(),
            Inner::Binary(b) => b.len(),
        }
    }

    /// Check if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A borrowed view of the buffered content.
    #[must_use]
    pub fn content(&self) -> Content<'_> {
        match &self.inner {
            Inner::Text(s) => Content::Text(s),
            Inner::Binary(b) => Content::Binary(b),
        }
    }

    /// Append a chunk. Fails when the chunk's domain differs.
    ///
    /// Appending does not evict; callers decide when the window applies
    /// (the engine evicts once per poll cycle, after searching).
    pub fn append(&mut self, chunk: Chunk) -> Result<()> {
        let domain = self.domain();
        match (&mut self.inner, chunk) {
            (Inner::Text(buf), Chunk::Text(s)) => {
                // Renormalize only when this chunk could break the NFC
                // invariant: non-NFC content, or a leading combining mark
                // that may compose with the buffered tail.
                let boundary_risk = s
                    .chars()
                    .next()
                    .is_some_and(|c| canonical_combining_class(c) != 0);
                let normalized = is_nfc_quick(s.chars()) == IsNormalized::Yes;
                buf.push_str(&s);
                if boundary_risk || !normalized {
                    let renormalized: String = buf.nfc().collect();
                    *buf = renormalized;
                }
                Ok(())
            }
            (Inner::Binary(buf), Chunk::Binary(b)) => {
                buf.extend_from_slice(&b);
                Ok(())
            }
            (_, chunk) => Err(ExpectError::domain_mismatch(
                "buffer append",
                domain,
                chunk.domain(),
            )),
        }
    }

    /// Drop the oldest content so that the length is at most the window
    /// capacity. Text eviction rounds to the next `char` boundary.
    pub fn evict_to_window(&mut self) {
        let len = self.len();
        if len <= self.window {
            return;
        }
        let excess = len - self.window;
        match &mut self.inner {
            Inner::Text(s) => {
                let mut cut = excess;
                while !s.is_char_boundary(cut) {
                    cut += 1;
                }
                s.drain(..cut);
            }
            Inner::Binary(b) => b.advance(excess),
        }
    }

    /// Discard content from the front through `end` (exclusive).
    ///
    /// For text buffers, `end` is rounded up to a `char` boundary; offsets
    /// produced by searching this buffer always lie on one already.
    pub fn discard_front(&mut self, end: usize) {
        let end = end.min(self.len());
        match &mut self.inner {
            Inner::Text(s) => {
                let mut cut = end;
                while !s.is_char_boundary(cut) {
                    cut += 1;
                }
                s.drain(..cut);
            }
            Inner::Binary(b) => b.advance(end),
        }
    }

    /// Remove and return up to `n` bytes from the front.
    ///
    /// For text buffers, `n` is rounded down to a `char` boundary so the
    /// returned chunk is valid UTF-8.
    pub fn take_front(&mut self, n: usize) -> Chunk {
        let n = n.min(self.len());
        match &mut self.inner {
            Inner::Text(s) => {
                let mut cut = n;
                while cut > 0 && !s.is_char_boundary(cut) {
                    cut -= 1;
                }
                Chunk::Text(s.drain(..cut).collect())
            }
            Inner::Binary(b) => Chunk::Binary(b.split_to(n).to_vec()),
        }
    }

    /// Discard everything.
    pub fn clear(&mut self) {
        match &mut self.inner {
            Inner::Text(s) => s.clear(),
            Inner::Binary(b) => b.clear(),
        }
    }
}
