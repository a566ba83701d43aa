//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read};
use std::net::{TcpListener, TcpStream};

/// Serves a byte string in pieces of at most `max_chunk` bytes, then
/// reports "no data" forever.
pub struct PiecewiseReader {
    chunks: VecDeque<Vec<u8>>,
}

impl PiecewiseReader {
    pub fn new(data: &[u8], max_chunk: usize) -> Self {
        Self {
            chunks: data.chunks(max_chunk).map(<[u8]>::to_vec).collect(),
        }
    }
}

impl Read for PiecewiseReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

/// A connected loopback TCP pair: (write side, read side).
pub fn tcp_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let client = TcpStream::connect(addr).unwrap();
    let (server, _) = listener.accept().unwrap();
    (client, server)
}
