//! Part splitting over a fully buffered body.
//!
//! # Responsibilities
//! - Locate each `--boundary` occurrence in the body
//! - Yield the bytes between consecutive occurrences as one part
//!
//! # Framing
//! For occurrences starting at `a` and `b` (with `a < b`) and a delimiter of
//! length `d`, the part is `body[a + d + 2 .. b - 2]`: the CRLF right after
//! the delimiter and the CRLF right before the next one are dropped without
//! being checked. Bodies that are not framed with exactly one CRLF on each
//! side lose or keep bytes accordingly. The closing `--boundary--` only
//! terminates the previous part.

use memchr::memmem::Finder;

use crate::multipart::boundary::Boundary;

/// Length of the line break trimmed on each side of a part.
const CRLF_LEN: usize = 2;

/// Lazy iterator over the parts of a multipart body.
#[derive(Debug, Clone)]
pub struct Parts<'a> {
    body: &'a [u8],
    finder: Finder<'static>,
    /// Start of the occurrence that opens the next part.
    current: Option<usize>,
}

/// Split `body` into parts delimited by `boundary`.
///
/// Fewer than two boundary occurrences yield no parts.
pub fn split_parts<'a>(body: &'a [u8], boundary: &Boundary) -> Parts<'a> {
    let finder = Finder::new(&boundary.delimiter()).into_owned();
    let current = finder.find(body);
    Parts {
        body,
        finder,
        current,
    }
}

impl<'a> Iterator for Parts<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.current?;
        let delim_end = start + self.finder.needle().len();

        let Some(offset) = self.finder.find(&self.body[delim_end..]) else {
            self.current = None;
            return None;
        };
        let next = delim_end + offset;
        self.current = Some(next);

        let from = delim_end + CRLF_LEN;
        let to = next.saturating_sub(CRLF_LEN);
        if from < to {
            Some(&self.body[from..to])
        } else {
            Some(&[])
        }
    }
}
