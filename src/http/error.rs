//! Relay error taxonomy and its HTTP mapping.
//!
//! | Variant               | Status | Body                                         |
//! |-----------------------|--------|----------------------------------------------|
//! | `MethodNotAllowed`    | 405    | `{"error":"Only POST supported"}`            |
//! | `MissingProcessorUrl` | 500    | `{"error":"PROCESSOR_URL env variable missing"}` |
//! | `InvalidMultipart`    | 400    | `{"error":"Invalid multipart/form-data"}`    |
//! | `NoFile`              | 400    | `{"error":"No file found in request"}`       |
//! | everything else       | 500    | `{"error":"Proxy failed","detail":"..."}`    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::multipart::MultipartError;

/// Errors that end a relay request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Only POST supported")]
    MethodNotAllowed,

    #[error("PROCESSOR_URL env variable missing")]
    MissingProcessorUrl,

    #[error("Invalid multipart/form-data")]
    InvalidMultipart,

    #[error("No file found in request")]
    NoFile,

    /// The configured processor URL could not be turned into an upload endpoint.
    #[error("invalid processor URL: {0}")]
    ProcessorUrl(#[from] url::ParseError),

    /// Buffering the inbound body failed (client hung up, limit exceeded).
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    /// The processor could not be reached or its response could not be read.
    #[error("processor request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    /// HTTP status returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidMultipart | RelayError::NoFile => StatusCode::BAD_REQUEST,
            RelayError::MissingProcessorUrl
            | RelayError::ProcessorUrl(_)
            | RelayError::Body(_)
            | RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this is an unclassified failure reported as "Proxy failed".
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            RelayError::ProcessorUrl(_) | RelayError::Body(_) | RelayError::Upstream(_)
        )
    }
}

impl From<MultipartError> for RelayError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::NoFile => RelayError::NoFile,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = if self.is_unexpected() {
            json!({ "error": "Proxy failed", "detail": self.to_string() })
        } else {
            json!({ "error": self.to_string() })
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: RelayError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_have_plain_message() {
        let (status, body) = render(RelayError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Only POST supported" }));

        let (status, body) = render(RelayError::InvalidMultipart).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid multipart/form-data" }));

        let (status, body) = render(MultipartError::NoFile.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file found in request" }));
    }

    #[tokio::test]
    async fn missing_processor_url_is_500_without_detail() {
        let (status, body) = render(RelayError::MissingProcessorUrl).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "PROCESSOR_URL env variable missing" }));
    }

    #[tokio::test]
    async fn unexpected_errors_carry_detail() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let (status, body) = render(RelayError::ProcessorUrl(parse_err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Proxy failed");
        assert_eq!(
            body["detail"],
            format!("invalid processor URL: {}", parse_err)
        );
    }
}
