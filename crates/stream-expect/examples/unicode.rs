//! Canonically equivalent text matches across normalization forms.
//!
//! The stream delivers "façade" with the ç decomposed into c plus a
//! combining cedilla; the pattern uses the precomposed form. The text
//! searcher treats both as the same string.

use std::io::Cursor;
use std::time::Duration;

use stream_expect::{ExpectOptions, wrap_reader};

fn main() -> Result<(), stream_expect::ExpectError> {
    // "fac\u{327}ade" is the decomposed spelling of "façade".
    let source = Cursor::new("status: fac\u{327}ade ready\n".as_bytes().to_vec());
    let mut session = wrap_reader(source, ExpectOptions::new().unicode(true))?;

    let found = session.expect_text("fa\u{E7}ade", Duration::from_secs(1))?;
    println!(
        "matched {:?} at bytes {}..{}",
        found.matched().as_text().unwrap_or_default(),
        found.start(),
        found.end()
    );
    Ok(())
}
