//! Boundary resolution from the `Content-Type` header.
//!
//! # Design Decisions
//! - Everything after the first `boundary=` is the token, verbatim
//! - No unquoting, no trimming, no stopping at a later `;`
//! - An empty token is treated as "no boundary"

/// Marker preceding the boundary token in a `Content-Type` value.
const BOUNDARY_PARAM: &str = "boundary=";

/// A non-empty multipart boundary token, as declared by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(String);

impl Boundary {
    /// Wrap a boundary token. Returns `None` for an empty token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The bare token, without leading hyphens.
    pub fn token(&self) -> &str {
        &self.0
    }

    /// The byte string that marks each part in the body: `--` + token.
    pub fn delimiter(&self) -> Vec<u8> {
        let mut delim = Vec::with_capacity(self.0.len() + 2);
        delim.extend_from_slice(b"--");
        delim.extend_from_slice(self.0.as_bytes());
        delim
    }
}

/// Resolve the boundary token from a `Content-Type` header value.
pub fn resolve_boundary(content_type: &str) -> Option<Boundary> {
    let start = content_type.find(BOUNDARY_PARAM)? + BOUNDARY_PARAM.len();
    Boundary::new(&content_type[start..])
}
