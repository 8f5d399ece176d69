//! Upload relay library.
//!
//! Accepts a `multipart/form-data` upload, pulls out the first file part and
//! re-posts it to a processor service, relaying the processor's answer.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod multipart;
pub mod observability;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
