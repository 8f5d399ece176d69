//! Response relaying.
//!
//! # Responsibilities
//! - Turn a buffered processor response into the caller's response
//!
//! # Design Decisions
//! - Status, `Content-Type` and body bytes are copied verbatim
//! - No other processor headers are relayed
//! - A processor response without `Content-Type` stays without one

use axum::{
    body::Body,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::http::forward::Relayed;

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}
