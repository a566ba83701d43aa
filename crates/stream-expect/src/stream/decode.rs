//! Incremental UTF-8 decoding for text-domain adapters.
//!
//! A chunked source can split a multi-byte sequence across reads. The
//! carry holds the incomplete suffix of one chunk and prepends it to the
//! next, so text adapters never emit torn code points. Invalid sequences
//! decode to U+FFFD.

/// Carries incomplete UTF-8 suffixes between chunks.
#[derive(Debug, Default)]
pub(crate) struct Utf8Carry {
    /// At most 3 bytes: the valid prefix of an unfinished sequence.
    pending: Vec<u8>,
}

impl Utf8Carry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decode `input`, prepending any bytes carried from the previous
    /// chunk and retaining a trailing incomplete sequence for the next.
    pub(crate) fn decode(&mut self, input: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(input);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    if let Ok(s) = std::str::from_utf8(valid) {
                        out.push_str(s);
                    }
                    match e.error_len() {
                        // Invalid sequence: substitute and resume after it.
                        Some(len) => {
                            out.push('\u{FFFD}');
                            rest = &after[len..];
                        }
                        // Incomplete sequence at the end: carry it over.
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Bytes currently held back waiting for their continuation.
    pub(crate) fn pending(&self) -> &[u8] {
        &self.pending
    }
}
