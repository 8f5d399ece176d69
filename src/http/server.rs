//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create the Axum router (every path is the upload endpoint)
//! - Wire up middleware (request ID, tracing)
//! - Gate on method, resolve the boundary, buffer and parse the body
//! - Forward the extracted file and relay the processor response

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::error::RelayError;
use crate::http::forward::{Forwarder, Relayed};
use crate::http::request::{make_span, request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::multipart::{self, resolve_boundary};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Processor base URL; `None` fails every upload with 500.
    pub processor_url: Option<Arc<str>>,
    pub forwarder: Forwarder,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &RelayConfig, forwarder: Forwarder) -> Self {
        Self {
            processor_url: config.processor.url.as_deref().map(Arc::from),
            forwarder,
            max_body_bytes: config.limits.max_body_bytes,
        }
    }
}

/// HTTP server for the upload relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_forwarder(config, Forwarder::default())
    }

    /// Create a server that forwards through a caller-supplied client.
    pub fn with_forwarder(config: RelayConfig, forwarder: Forwarder) -> Self {
        let state = AppState::from_config(&config, forwarder);
        let router = Self::build_router(state);
        Self { router, config }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(relay_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires or Ctrl+C arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            processor_configured = self.config.processor.url.is_some(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Relay one upload and record its outcome.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();

    let response = match relay(&state, request).await {
        Ok(relayed) => {
            tracing::info!(
                request_id = %request_id,
                status = %relayed.status,
                bytes = relayed.body.len(),
                "Relayed processor response"
            );
            relayed.into_response()
        }
        Err(e) if e.is_unexpected() => {
            tracing::error!(request_id = %request_id, error = %e, "Proxy failed");
            e.into_response()
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected upload");
            e.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn relay(state: &AppState, request: Request<Body>) -> Result<Relayed, RelayError> {
    if request.method() != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let processor_url = state
        .processor_url
        .as_deref()
        .ok_or(RelayError::MissingProcessorUrl)?;

    let boundary = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(resolve_boundary)
        .ok_or(RelayError::InvalidMultipart)?;

    let body = axum::body::to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .map_err(RelayError::Body)?;

    let file = multipart::extract_file(&body, &boundary)?;
    drop(body);

    tracing::debug!(
        filename = %file.filename,
        bytes = file.content.len(),
        "Extracted file part"
    );
    metrics::record_forwarded_bytes(file.content.len());

    state.forwarder.forward(processor_url, file).await
}
