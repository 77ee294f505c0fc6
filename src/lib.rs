//! # Parrot - HTTP request reflection service
//!
//! Parrot is a small, stateless HTTP service that answers a fixed set of
//! routes by reflecting the request back at the caller: the path, the parsed
//! query string, or the JSON body. It is a thin dispatch table over three
//! routes with no persistence and no shared mutable state.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    ParrotServer (hyper)                   │
//! │   accept loop · request conversion · response building    │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Router (dispatch table)                 │
//! │  (GET, /) ──────────────▶ HelloHandler                    │
//! │  (GET, /something) ─────▶ QueryEchoHandler                │
//! │  (POST, /something) ────▶ BodyEchoHandler                 │
//! │  anything else ─────────▶ 404 Not Found                   │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use parrot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = ParrotConfig::new().port(3001);
//!     let server = ParrotServer::new(config, parrot::routes::router());
//!     server.run().await
//! }
//! ```
//!
//! Custom routes implement [`routing::RouteHandler`] and register on a
//! [`routing::Router`] with a builder-style `route()` call.

pub mod http;
pub mod routes;
pub mod routing;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::http::{Method, ParrotRequest, ParrotResponse, QueryMap, QueryValue, StatusCode};
    pub use crate::routing::{ParrotError, RouteContext, RouteHandler, Router};
    pub use crate::runtime::{ParrotConfig, ParrotServer};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use http::{ParrotRequest, ParrotResponse};
pub use routing::{ParrotError, Router};
pub use runtime::{ParrotConfig, ParrotServer};
