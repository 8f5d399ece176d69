//! Multipart body extraction subsystem.
//!
//! # Data Flow
//! ```text
//! Content-Type header
//!     → boundary.rs (take everything after `boundary=`)
//! Raw request body + Boundary
//!     → splitter.rs (scan for `--boundary`, slice between occurrences)
//!     → selector.rs (split headers/payload, find first `filename="..."`)
//!     → ExtractedFile (owned copy of the winning part)
//! ```
//!
//! # Design Decisions
//! - Pure functions over byte slices: no I/O, no environment access
//! - Parts are borrowed views until one is selected
//! - First part with a filename wins; later parts are never inspected
//! - Boundary framing is deliberately simplified (see `splitter`): each part
//!   is assumed to be wrapped by exactly one CRLF on each side

pub mod boundary;
pub mod selector;
pub mod splitter;

pub use boundary::{resolve_boundary, Boundary};
pub use selector::{find_file_part, parse_filename, split_header, ExtractedFile, FilePart};
pub use splitter::{split_parts, Parts};

use thiserror::Error;

/// Errors produced while extracting a file from a multipart body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultipartError {
    /// No part carried a `filename="..."` attribute.
    #[error("no file part found in multipart body")]
    NoFile,
}

/// Extract the first file part of `body`.
///
/// Composition of [`split_parts`] and [`find_file_part`]; the returned file
/// owns its bytes so the request body can be dropped afterwards.
pub fn extract_file(body: &[u8], boundary: &Boundary) -> Result<ExtractedFile, MultipartError> {
    find_file_part(split_parts(body, boundary))
        .map(FilePart::into_owned)
        .ok_or(MultipartError::NoFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(boundary: &str, parts: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        for part in parts {
            out.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            out.extend_from_slice(part);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
        out
    }

    #[test]
    fn extracts_single_file() {
        let payload: &[u8] = b"%PDF-1.7\r\n\x00\xff binary\r\n\r\ntrailer";
        let mut part = b"Content-Disposition: form-data; name=\"file\"; filename=\"report.pdf\"\r\n\
Content-Type: application/pdf\r\n\r\n"
            .to_vec();
        part.extend_from_slice(payload);
        let raw = body("XYZ123", &[part.as_slice()]);

        let boundary = resolve_boundary("multipart/form-data; boundary=XYZ123").unwrap();
        let file = extract_file(&raw, &boundary).unwrap();

        assert_eq!(file.filename, "report.pdf");
        assert_eq!(&file.content[..], payload);
    }

    #[test]
    fn body_without_boundary_has_no_file() {
        let boundary = Boundary::new("XYZ123").unwrap();
        let raw = b"Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\r\nhello";

        assert_eq!(split_parts(raw, &boundary).count(), 0);
        assert_eq!(extract_file(raw, &boundary), Err(MultipartError::NoFile));
    }

    #[test]
    fn first_file_wins() {
        let parts: [&[u8]; 3] = [
            b"Content-Disposition: form-data; name=\"note\"\r\n\r\nplain field",
            b"Content-Disposition: form-data; name=\"file\"; filename=\"second.bin\"\r\n\r\nSECOND",
            b"Content-Disposition: form-data; name=\"other\"; filename=\"third.bin\"\r\n\r\nTHIRD",
        ];
        let raw = body("b", &parts);
        let boundary = Boundary::new("b").unwrap();

        let file = extract_file(&raw, &boundary).unwrap();
        assert_eq!(file.filename, "second.bin");
        assert_eq!(&file.content[..], b"SECOND");
    }

    #[test]
    fn part_without_separator_is_skipped() {
        let parts: [&[u8]; 2] = [
            b"garbage with no header terminator",
            b"Content-Disposition: form-data; name=\"file\"; filename=\"ok.txt\"\r\n\r\nfine",
        ];
        let raw = body("sep", &parts);
        let boundary = Boundary::new("sep").unwrap();

        let file = extract_file(&raw, &boundary).unwrap();
        assert_eq!(file.filename, "ok.txt");
        assert_eq!(&file.content[..], b"fine");
    }

    #[test]
    fn parts_without_filename_never_fall_back_to_default_name() {
        let parts: [&[u8]; 2] = [
            b"Content-Disposition: form-data; name=\"a\"\r\n\r\none",
            b"Content-Disposition: form-data; name=\"b\"\r\n\r\ntwo",
        ];
        let raw = body("nf", &parts);
        let boundary = Boundary::new("nf").unwrap();

        assert_eq!(split_parts(&raw, &boundary).count(), 2);
        assert_eq!(extract_file(&raw, &boundary), Err(MultipartError::NoFile));
    }
}
