//! Probe an HTTP server and wait for its status line.
//!
//! ```sh
//! cargo run --example tcp_probe -- example.com:80
//! ```

use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

use stream_expect::{ExpectOptions, wrap};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example.com:80".to_string());
    let host = target.split(':').next().unwrap_or(&target);

    let mut socket = TcpStream::connect(&target)?;
    write!(
        socket,
        "HEAD / HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n"
    )?;

    let mut session = wrap(socket, ExpectOptions::new().close_stream(true))?;
    match session.expect_regex(r"HTTP/1\.[01] (\d{3})", Duration::from_secs(5)) {
        Ok(found) => {
            let status = found
                .as_regex()
                .and_then(|m| m.group(1))
                .and_then(|g| g.as_binary())
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default();
            println!("{target} answered with status {status}");
        }
        Err(e) if e.is_timeout() => println!("{target} sent no status line in time"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
