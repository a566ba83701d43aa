//! The expect engine: window buffer and orchestration loop.

mod buffer;
mod engine;

pub use buffer::WindowBuffer;
pub use engine::{Expecter, InputCallback};
