//! Built-in reflection routes.
//!
//! Three routes make up the whole service: a fixed greeting at `GET /`, a
//! query-string reflection at `GET /something`, and a JSON body reflection
//! at `POST /something`. Everything else is a 404.

use crate::http::{Method, ParrotRequest, ParrotResponse, QueryMap, QueryValue};
use crate::routing::{ParrotError, RouteContext, RouteHandler, Router};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Fixed greeting served at `GET /`. The query string is ignored.
pub struct HelloHandler;

#[async_trait]
impl RouteHandler for HelloHandler {
    async fn handle(
        &self,
        _request: ParrotRequest,
        _ctx: &RouteContext,
    ) -> Result<ParrotResponse, ParrotError> {
        Ok(ParrotResponse::text("Hello from Python!"))
    }

    fn name(&self) -> &str {
        "hello"
    }
}

/// Reflection payload for `GET /something`.
#[derive(Serialize)]
struct QueryReflection<'a> {
    route: &'a str,
    query: &'a QueryMap,
}

/// Reflects the request path and parsed query string at `GET /something`.
///
/// When the `json` parameter is the scalar literal `"true"`, the reflection
/// is rendered as JSON; otherwise as plain text. A repeated `json` key does
/// not count as the literal.
pub struct QueryEchoHandler;

#[async_trait]
impl RouteHandler for QueryEchoHandler {
    async fn handle(
        &self,
        request: ParrotRequest,
        _ctx: &RouteContext,
    ) -> Result<ParrotResponse, ParrotError> {
        let wants_json =
            request.query.get("json").and_then(QueryValue::as_scalar) == Some("true");

        if wants_json {
            let payload = QueryReflection {
                route: &request.path,
                query: &request.query,
            };
            Ok(ParrotResponse::json(&payload)?)
        } else {
            Ok(ParrotResponse::text(format!(
                "Route: {}, Query: {}",
                request.path, request.query
            )))
        }
    }

    fn name(&self) -> &str {
        "query-echo"
    }
}

/// Reflection payload for `POST /something`.
#[derive(Serialize)]
struct BodyReflection<'a> {
    route: &'a str,
    body: Value,
}

/// Reflects the parsed JSON request body at `POST /something`.
///
/// An empty body is treated as an empty JSON object. A non-empty body that
/// is not valid JSON is rejected with a 400.
pub struct BodyEchoHandler;

#[async_trait]
impl RouteHandler for BodyEchoHandler {
    async fn handle(
        &self,
        request: ParrotRequest,
        _ctx: &RouteContext,
    ) -> Result<ParrotResponse, ParrotError> {
        let body = match request.body.as_deref() {
            Some(raw) if !raw.is_empty() => serde_json::from_slice(raw)?,
            _ => Value::Object(serde_json::Map::new()),
        };

        let payload = BodyReflection {
            route: &request.path,
            body,
        };
        Ok(ParrotResponse::json(&payload)?)
    }

    fn name(&self) -> &str {
        "body-echo"
    }
}

/// Assemble the default route table.
pub fn router() -> Router {
    Router::new()
        .route(Method::Get, "/", HelloHandler)
        .route(Method::Get, "/something", QueryEchoHandler)
        .route(Method::Post, "/something", BodyEchoHandler)
}
