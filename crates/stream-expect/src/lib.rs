//! stream-expect: Expect-style pattern matching over non-blocking streams
//!
//! This crate turns any chunked, non-blocking data source — a socket, a
//! serial port, a child process pipe, an in-memory buffer — into a
//! blocking "wait for this pattern" primitive with a hard timeout. Data
//! is accumulated in a bounded sliding-window buffer and searched with
//! pluggable strategies: literal text (Unicode-equivalence aware), literal
//! bytes, regular expressions, or ordered collections of all three.
//!
//! # Features
//!
//! - **Timeout-bounded expectation** over sources that deliver data in
//!   arbitrary partial chunks
//! - **Sequential consumption**: each match is consumed, so successive
//!   expectations walk one continuous stream
//! - **Bounded memory** via a sliding window that evicts oldest content
//! - **Text or binary domains**, fixed per session and checked at every
//!   boundary
//! - **Socket and generic-reader adapters** behind one polling contract
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use std::time::Duration;
//!
//! use stream_expect::{ExpectOptions, wrap_reader};
//!
//! # fn main() -> Result<(), stream_expect::ExpectError> {
//! let source = Cursor::new(b"boot ok\nstatus: ready\n".to_vec());
//! let mut session = wrap_reader(source, ExpectOptions::new().unicode(true))?;
//!
//! let found = session.expect_regex(r"status: (\w+)", Duration::from_secs(1))?;
//! let state = found
//!     .as_regex()
//!     .and_then(|m| m.group(1))
//!     .and_then(|g| g.as_text());
//! assert_eq!(state, Some("ready"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod expect;
pub mod prelude;
pub mod search;
pub mod stream;
pub mod util;
pub mod wrap;

pub use config::{
    DEFAULT_MAX_READ, DEFAULT_POLL_PERIOD, DEFAULT_TIMEOUT, DEFAULT_WINDOW, ExpectOptions,
};
pub use content::{Chunk, Content, Domain};
pub use error::{ExpectError, Result};
pub use expect::{Expecter, InputCallback, WindowBuffer};
pub use search::{
    BytesSearcher, Match, RegexMatch, RegexSearcher, Searcher, SearcherCollection, SequenceMatch,
    TextSearcher,
};
pub use stream::{PollConfig, PollingSocketAdapter, PollingStreamAdapter, SocketSource, StreamAdapter};
pub use util::Deadline;
pub use wrap::{IntoStreamAdapter, wrap, wrap_reader};
