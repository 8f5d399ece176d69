//! File part selection.
//!
//! # Responsibilities
//! - Split a part into header block and payload at the first blank line
//! - Find the `filename="..."` attribute in the header block
//! - Pick the first part that declares a filename

use std::sync::LazyLock;

use bytes::Bytes;
use memchr::memmem;
use regex::Regex;

/// Blank line separating part headers from the payload.
const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

static FILENAME_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename="(.+?)""#).expect("filename pattern is valid"));

/// A file part borrowed from the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart<'a> {
    pub filename: String,
    pub content: &'a [u8],
}

impl FilePart<'_> {
    /// Copy the payload out of the request body.
    pub fn into_owned(self) -> ExtractedFile {
        ExtractedFile {
            filename: self.filename,
            content: Bytes::copy_from_slice(self.content),
        }
    }
}

/// The file forwarded downstream: exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub filename: String,
    pub content: Bytes,
}

/// Split a part at its first `\r\n\r\n` into `(headers, payload)`.
///
/// Returns `None` when the part has no header terminator.
pub fn split_header(part: &[u8]) -> Option<(&[u8], &[u8])> {
    let at = memmem::find(part, HEADER_SEPARATOR)?;
    Some((&part[..at], &part[at + HEADER_SEPARATOR.len()..]))
}

/// The first double-quoted `filename=` value in a header block.
pub fn parse_filename(headers: &str) -> Option<&str> {
    FILENAME_ATTR
        .captures(headers)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Find the first part that declares a filename.
///
/// Stops at the first match; malformed parts are skipped.
pub fn find_file_part<'a, I>(parts: I) -> Option<FilePart<'a>>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    parts.into_iter().find_map(|part| {
        let (headers, content) = split_header(part)?;
        let headers = String::from_utf8_lossy(headers);
        let filename = parse_filename(&headers)?.to_string();
        Some(FilePart { filename, content })
    })
}
