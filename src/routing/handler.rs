//! Route handler trait, per-request context, and the dispatch error type.

use crate::http::{ParrotRequest, ParrotResponse};
use async_trait::async_trait;

/// Per-request context handed to route handlers.
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    /// Name of the matched route.
    pub route_name: String,
    /// Request ID for log correlation.
    pub request_id: String,
}

impl RouteContext {
    /// Create a new route context.
    pub fn new(route_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            request_id: request_id.into(),
        }
    }
}

/// Handler for a single (method, path) route.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    /// Produce the response for a matched request.
    async fn handle(
        &self,
        request: ParrotRequest,
        ctx: &RouteContext,
    ) -> Result<ParrotResponse, ParrotError>;

    /// Route name used in logs and the dispatch context.
    fn name(&self) -> &str;
}

/// Error raised while dispatching or handling a request.
#[derive(Debug, Clone)]
pub struct ParrotError {
    /// Error message.
    pub message: String,
    /// HTTP status code the error maps to.
    pub code: u16,
}

impl ParrotError {
    /// Create a new ParrotError mapping to a 500.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 500,
        }
    }

    /// Create a ParrotError with a specific status code.
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(404, message)
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(400, message)
    }
}

impl std::fmt::Display for ParrotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ParrotError {}

impl From<ParrotError> for ParrotResponse {
    fn from(err: ParrotError) -> Self {
        ParrotResponse::error(err.code, err.message)
    }
}

impl From<std::io::Error> for ParrotError {
    fn from(err: std::io::Error) -> Self {
        ParrotError::new(err.to_string())
    }
}

impl From<serde_json::Error> for ParrotError {
    fn from(err: serde_json::Error) -> Self {
        ParrotError::bad_request(err.to_string())
    }
}
