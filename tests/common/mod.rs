//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use upload_relay::config::RelayConfig;
use upload_relay::http::{Forwarder, HttpServer};
use upload_relay::lifecycle::Shutdown;

/// One request observed by the stub processor.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// What the stub processor answers with.
#[derive(Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: &'static [u8],
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn stub_handler(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.captured.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let mut response = (state.reply.status, state.reply.body).into_response();
    match state.reply.content_type {
        Some(ct) => {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, ct.parse().unwrap());
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    response
}

/// Start a stub processor on an ephemeral port.
pub async fn start_processor(reply: StubReply) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/{*path}", any(stub_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, captured)
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(processor_url: Option<String>) -> (SocketAddr, Shutdown) {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.processor.url = processor_url;

    let forwarder = Forwarder::new(client());
    let server = HttpServer::with_forwarder(config, forwarder);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// HTTP client that never goes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Hand-framed multipart body: each part is `(headers, payload)`.
pub fn multipart_body(boundary: &str, parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (headers, payload) in parts {
        out.extend_from_slice(format!("--{}\r\n{}\r\n\r\n", boundary, headers).as_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    out
}

/// `Content-Disposition` header line for a file part.
pub fn file_disposition(field: &str, filename: &str) -> String {
    format!(
        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
        field, filename
    )
}
