//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, method gate)
//!     → multipart (boundary, split, select file)
//!     → forward.rs (re-encode, POST {processor}/upload)
//!     → response.rs (status, Content-Type, body copied back)
//!     → Send to client
//! ```

pub mod error;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use error::RelayError;
pub use forward::{Forwarder, Relayed};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
