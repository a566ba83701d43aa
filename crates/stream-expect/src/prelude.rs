//! Convenience re-exports for common usage.
//!
//! ```
//! use stream_expect::prelude::*;
//! ```

pub use crate::config::{DEFAULT_TIMEOUT, ExpectOptions};
pub use crate::content::{Chunk, Content, Domain};
pub use crate::error::{ExpectError, Result};
pub use crate::expect::Expecter;
pub use crate::search::{
    BytesSearcher, Match, RegexSearcher, Searcher, SearcherCollection, TextSearcher,
};
pub use crate::stream::{PollConfig, StreamAdapter};
pub use crate::wrap::{wrap, wrap_reader};
