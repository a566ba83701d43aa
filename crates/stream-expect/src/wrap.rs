//! The factory entry point.
//!
//! [`wrap`] takes an opaque source plus [`ExpectOptions`] and returns a
//! ready-to-use [`Expecter`]. Socket types dispatch to the socket adapter
//! in non-blocking mode; ordinary readable types dispatch to the generic
//! polling adapter. Source kinds are selected by the
//! [`IntoStreamAdapter`] trait, so an unsupported type is rejected at
//! compile time rather than at run time.

use std::fs::File;
use std::io::{Cursor, Read, Stdin, Write};
use std::net::TcpStream;
use std::process::{ChildStderr, ChildStdout};

use crate::config::ExpectOptions;
use crate::content::{Content, Domain};
use crate::error::Result;
use crate::expect::{Expecter, InputCallback};
use crate::stream::{PollConfig, PollingSocketAdapter, PollingStreamAdapter, SocketSource, StreamAdapter};

/// Source kinds accepted by [`wrap`].
pub trait IntoStreamAdapter {
    /// Build the adapter appropriate for this source kind.
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>>;
}

fn domain_for(options: &ExpectOptions) -> Domain {
    if options.unicode {
        Domain::Text
    } else {
        Domain::Binary
    }
}

fn reader_adapter<R: Read + 'static>(
    reader: R,
    options: &ExpectOptions,
) -> Result<Box<dyn StreamAdapter>> {
    let config = PollConfig::new(options.poll_period, options.max_read)?;
    Ok(Box::new(PollingStreamAdapter::with_config(
        reader,
        domain_for(options),
        config,
    )))
}

fn socket_adapter<S: SocketSource + 'static>(
    socket: S,
    options: &ExpectOptions,
) -> Result<Box<dyn StreamAdapter>> {
    let config = PollConfig::new(options.poll_period, options.max_read)?;
    Ok(Box::new(PollingSocketAdapter::with_config(
        socket,
        domain_for(options),
        config,
    )?))
}

impl IntoStreamAdapter for TcpStream {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        socket_adapter(self, options)
    }
}

#[cfg(unix)]
impl IntoStreamAdapter for std::os::unix::net::UnixStream {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        socket_adapter(self, options)
    }
}

impl IntoStreamAdapter for File {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        reader_adapter(self, options)
    }
}

impl IntoStreamAdapter for ChildStdout {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        reader_adapter(self, options)
    }
}

impl IntoStreamAdapter for ChildStderr {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        reader_adapter(self, options)
    }
}

impl IntoStreamAdapter for Stdin {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        reader_adapter(self, options)
    }
}

impl IntoStreamAdapter for Cursor<Vec<u8>> {
    fn into_stream_adapter(self, options: &ExpectOptions) -> Result<Box<dyn StreamAdapter>> {
        reader_adapter(self, options)
    }
}

/// Wrap a source in a ready-to-use [`Expecter`].
///
/// Validates the options eagerly, selects the adapter for the source
/// kind, and installs the echo callback when requested.
pub fn wrap<S: IntoStreamAdapter>(source: S, options: ExpectOptions) -> Result<Expecter> {
    options.validate()?;
    let adapter = source.into_stream_adapter(&options)?;
    build_expecter(adapter, &options)
}

/// Wrap an arbitrary [`Read`] implementor.
///
/// Covers readable types without their own [`IntoStreamAdapter`] impl;
/// the source is driven through the generic polling adapter.
pub fn wrap_reader<R: Read + 'static>(reader: R, options: ExpectOptions) -> Result<Expecter> {
    options.validate()?;
    let adapter = reader_adapter(reader, &options)?;
    build_expecter(adapter, &options)
}

fn build_expecter(adapter: Box<dyn StreamAdapter>, options: &ExpectOptions) -> Result<Expecter> {
    let mut expecter = Expecter::new(adapter, options.window, options.close_stream)?;
    if options.echo {
        expecter.set_input_callback(Some(echo_callback()));
    }
    Ok(expecter)
}

/// An input callback that copies observed chunks to standard output.
///
/// Write failures are ignored: echoing is fire-and-forget display, never
/// part of the matching pipeline.
fn echo_callback() -> InputCallback {
    Box::new(|content: Content<'_>| {
        let mut stdout = std::io::stdout().lock();
        let _ = match content {
            Content::Text(s) => stdout.write_all(s.as_bytes()),
            Content::Binary(b) => stdout.write_all(b),
        };
        let _ = stdout.flush();
    })
}
