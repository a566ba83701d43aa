//! Stream adapters.
//!
//! Adapters translate a non-blocking source into the single capability the
//! engine needs: `poll(timeout) -> chunk`. Two shapes are provided — a
//! generic adapter over any [`std::io::Read`] implementor and a socket
//! adapter that drives the source in non-blocking receive mode — both
//! satisfying the identical [`StreamAdapter`] contract.

mod adapter;
mod decode;
mod polling;
mod socket;

pub use adapter::{PollConfig, StreamAdapter};
pub use polling::PollingStreamAdapter;
pub use socket::{PollingSocketAdapter, SocketSource};
