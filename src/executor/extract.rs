use crate::assembler::{CLOSE_MARKER, OPEN_MARKER};
use tracing::warn;

/// Output of the executing cell, cut out of the whole program's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub bytes: Vec<u8>,
    /// Both markers were present in a usable order.
    pub found: bool,
}

impl Extracted {
    fn none() -> Self {
        Self::default()
    }

    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Length of the line terminator at the front of `bytes`, if any.
fn leading_newline(bytes: &[u8]) -> usize {
    if bytes.starts_with(b"\r\n") {
        2
    } else if bytes.starts_with(b"\n") {
        1
    } else {
        0
    }
}

fn trailing_newline(bytes: &[u8]) -> usize {
    if bytes.ends_with(b"\r\n") {
        2
    } else if bytes.ends_with(b"\n") {
        1
    } else {
        0
    }
}

/// Return the bytes printed between the two boundary markers.
///
/// The markers are printed as whole lines, so the newline ending the open
/// marker line and the newline ending the cell's last output line are not
/// part of the result. Missing markers, or markers in an order that gives
/// no valid range, yield an empty result.
pub fn extract(raw: &[u8]) -> Extracted {
    let open = match find(raw, OPEN_MARKER.as_bytes()) {
        Some(i) => i,
        None => return Extracted::none(),
    };
    let close = match find(raw, CLOSE_MARKER.as_bytes()) {
        Some(i) => i,
        None => return Extracted::none(),
    };

    let mut start = open + OPEN_MARKER.len();
    if let Some(rest) = raw.get(start..) {
        start += leading_newline(rest);
    }
    let end = close;

    let slice = match raw.get(start..end) {
        Some(s) => s,
        None => {
            warn!(
                start,
                end,
                len = raw.len(),
                "output markers out of order or out of bounds"
            );
            return Extracted::none();
        }
    };

    let body = &slice[..slice.len() - trailing_newline(slice)];
    Extracted {
        bytes: body.to_vec(),
        found: true,
    }
}
