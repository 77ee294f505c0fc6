//! Static route table mapping (method, path) pairs to handlers.

use crate::http::{Method, ParrotRequest, ParrotResponse};
use crate::routing::handler::{ParrotError, RouteContext, RouteHandler};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Dispatch table over the registered routes.
///
/// Routes are registered at startup via the builder-style [`Router::route`]
/// and the table is immutable afterwards, so it can be shared across
/// connection tasks behind an `Arc` without locking.
pub struct Router {
    routes: HashMap<(Method, String), Box<dyn RouteHandler>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a handler for a (method, path) pair.
    ///
    /// Registering the same pair twice replaces the earlier handler.
    pub fn route(
        mut self,
        method: Method,
        path: impl Into<String>,
        handler: impl RouteHandler + 'static,
    ) -> Self {
        self.routes.insert((method, path.into()), Box::new(handler));
        self
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match the request against the table and run the handler.
    ///
    /// Every request is handled independently; the router holds no state
    /// across dispatches. An unmatched (method, path) pair yields a 404.
    pub async fn dispatch(
        &self,
        request: ParrotRequest,
        request_id: &str,
    ) -> Result<ParrotResponse, ParrotError> {
        let key = (request.method, request.path.clone());

        let handler = match self.routes.get(&key) {
            Some(handler) => handler,
            None => {
                warn!(
                    "No route for {} {} [{}]",
                    request.method, request.path, request_id
                );
                return Err(ParrotError::not_found("Not Found"));
            }
        };

        debug!(
            "Dispatching {} {} to '{}' [{}]",
            request.method,
            request.path,
            handler.name(),
            request_id
        );

        let ctx = RouteContext::new(handler.name(), request_id);
        handler.handle(request, &ctx).await
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
