//! Outbound forwarding to the processor service.
//!
//! # Responsibilities
//! - Re-encode the extracted file as a fresh multipart body
//! - POST it to `{processor}/upload`
//! - Buffer the processor response for relaying
//!
//! # Design Decisions
//! - The outbound boundary is generated by reqwest, not reused from the client
//! - Single field `file`; part content type guessed from the filename
//! - No timeout and no retry: the caller waits as long as the processor does

use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::http::error::RelayError;
use crate::multipart::ExtractedFile;

/// Multipart field name the processor expects.
pub const FILE_FIELD: &str = "file";

/// Path appended to the processor base URL.
const UPLOAD_PATH: &str = "upload";

/// A buffered processor response, relayed verbatim.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// HTTP client wrapper that ships files to the processor.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder on top of an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Forward `file` to the processor at `base_url` and buffer its reply.
    pub async fn forward(&self, base_url: &str, file: ExtractedFile) -> Result<Relayed, RelayError> {
        let endpoint = upload_endpoint(base_url)?;
        let filename = file.filename;
        let size = file.content.len();

        let mime = mime_guess::from_path(&filename).first_or_octet_stream();
        let part = Part::stream_with_length(file.content, size as u64)
            .file_name(filename.clone())
            .mime_str(mime.as_ref())?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(
            endpoint = %endpoint,
            filename = %filename,
            bytes = size,
            "Forwarding file to processor"
        );

        let response = self.client.post(endpoint).multipart(form).send().await?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        tracing::debug!(
            status = %status,
            bytes = body.len(),
            "Processor responded"
        );

        Ok(Relayed {
            status,
            content_type,
            body,
        })
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// `{base}/upload`, tolerating a trailing slash on the base.
pub fn upload_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let base = base_url.trim_end_matches('/');
    Url::parse(&format!("{}/{}", base, UPLOAD_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_upload_path() {
        assert_eq!(
            upload_endpoint("http://processor:9000").unwrap().as_str(),
            "http://processor:9000/upload"
        );
        assert_eq!(
            upload_endpoint("https://example.com/api/v2/").unwrap().as_str(),
            "https://example.com/api/v2/upload"
        );
    }

    #[test]
    fn rejects_garbage_base() {
        assert!(upload_endpoint("no scheme here").is_err());
    }

    #[tokio::test]
    async fn unreachable_processor_is_upstream_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let forwarder = Forwarder::new(reqwest::Client::builder().no_proxy().build().unwrap());
        let file = ExtractedFile {
            filename: "a.txt".into(),
            content: Bytes::from_static(b"hello"),
        };
        let err = forwarder.forward(&format!("http://{}", addr), file).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(_)));
        assert!(err.is_unexpected());
    }
}
