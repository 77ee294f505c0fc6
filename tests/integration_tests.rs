//! Integration tests for the parrot service.

use parrot::prelude::*;
use parrot::routes;

/// A simple handler for router tests.
struct TestHandler {
    response_text: String,
}

impl TestHandler {
    fn new(response_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
        }
    }
}

#[async_trait]
impl RouteHandler for TestHandler {
    async fn handle(
        &self,
        _request: ParrotRequest,
        _ctx: &RouteContext,
    ) -> Result<ParrotResponse, ParrotError> {
        Ok(ParrotResponse::text(&self.response_text))
    }

    fn name(&self) -> &str {
        "test"
    }
}

#[tokio::test]
async fn test_hello_route() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Get, "/");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.content_type(), Some(&"text/plain".to_string()));
    assert_eq!(response.text_body(), Some("Hello from Python!".to_string()));
}

#[tokio::test]
async fn test_hello_route_ignores_query() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Get, "/").query("json=true&x=1");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.text_body(), Some("Hello from Python!".to_string()));
}

#[tokio::test]
async fn test_query_echo_plain_text() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Get, "/something").query("a=1&b=two");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.content_type(), Some(&"text/plain".to_string()));

    let body = response.text_body().unwrap();
    assert!(body.contains("Route: /something"));
    assert_eq!(body, r#"Route: /something, Query: {"a":"1","b":"two"}"#);
}

#[tokio::test]
async fn test_query_echo_plain_text_without_query() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Get, "/something");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert_eq!(
        response.text_body(),
        Some("Route: /something, Query: {}".to_string())
    );
}

#[tokio::test]
async fn test_query_echo_json() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Get, "/something").query("json=true&a=1&a=2");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert!(response.status.is_success());
    assert_eq!(
        response.content_type(),
        Some(&"application/json".to_string())
    );

    let value: serde_json::Value = response.json_body().unwrap().unwrap();
    assert_eq!(value["route"], "/something");
    assert_eq!(value["query"]["a"], serde_json::json!(["1", "2"]));
    assert_eq!(value["query"]["json"], "true");

    // Key order is fixed: route first, then query with sorted keys.
    assert_eq!(
        response.text_body(),
        Some(r#"{"route":"/something","query":{"a":["1","2"],"json":"true"}}"#.to_string())
    );
}

#[tokio::test]
async fn test_query_echo_repeated_json_key_is_plain_text() {
    let router = routes::router();

    // json appears twice, so its value is a sequence, not the literal "true"
    let request = ParrotRequest::new(Method::Get, "/something").query("json=true&json=true");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert_eq!(response.content_type(), Some(&"text/plain".to_string()));
}

#[tokio::test]
async fn test_body_echo_json_object() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Post, "/something").body(r#"{"x":1}"#);
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert!(response.status.is_success());
    assert_eq!(
        response.content_type(),
        Some(&"application/json".to_string())
    );
    assert_eq!(
        response.text_body(),
        Some(r#"{"route":"/something","body":{"x":1}}"#.to_string())
    );
}

#[tokio::test]
async fn test_body_echo_empty_body() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Post, "/something");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert_eq!(
        response.text_body(),
        Some(r#"{"route":"/something","body":{}}"#.to_string())
    );
}

#[tokio::test]
async fn test_body_echo_non_object_json() {
    let router = routes::router();

    // Any valid JSON value is reflected, not only objects
    let request = ParrotRequest::new(Method::Post, "/something").body("[1,2,3]");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert_eq!(
        response.text_body(),
        Some(r#"{"route":"/something","body":[1,2,3]}"#.to_string())
    );
}

#[tokio::test]
async fn test_body_echo_invalid_json() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Post, "/something").body("not json");
    let result = router.dispatch(request, "req-1").await;

    let err = result.unwrap_err();
    assert_eq!(err.code, 400);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Get, "/missing");
    let err = router.dispatch(request, "req-1").await.unwrap_err();

    assert_eq!(err.code, 404);

    let response: ParrotResponse = err.into();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.content_type(), Some(&"text/plain".to_string()));
    assert_eq!(response.text_body(), Some("Not Found".to_string()));
}

#[tokio::test]
async fn test_unknown_method_is_not_found() {
    let router = routes::router();

    let request = ParrotRequest::new(Method::Put, "/something");
    let err = router.dispatch(request, "req-1").await.unwrap_err();

    assert_eq!(err.code, 404);

    let err = router
        .dispatch(ParrotRequest::new(Method::Post, "/"), "req-2")
        .await
        .unwrap_err();
    assert_eq!(err.code, 404);
}

#[tokio::test]
async fn test_get_dispatch_is_idempotent() {
    let router = routes::router();

    let first = router
        .dispatch(
            ParrotRequest::new(Method::Get, "/something").query("b=2&a=1&a=3"),
            "req-1",
        )
        .await
        .unwrap();
    let second = router
        .dispatch(
            ParrotRequest::new(Method::Get, "/something").query("b=2&a=1&a=3"),
            "req-2",
        )
        .await
        .unwrap();

    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_router_custom_route() {
    let router = Router::new().route(Method::Get, "/custom", TestHandler::new("Custom Response"));

    assert_eq!(router.len(), 1);

    let request = ParrotRequest::new(Method::Get, "/custom");
    let response = router.dispatch(request, "req-1").await.unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.text_body(), Some("Custom Response".to_string()));
}

#[tokio::test]
async fn test_query_map_repeated_keys() {
    let query = QueryMap::parse("a=1&a=2&b=3");

    assert_eq!(query.len(), 2);
    assert_eq!(
        query.get("a").and_then(QueryValue::as_sequence),
        Some(&["1".to_string(), "2".to_string()][..])
    );
    assert_eq!(query.get("b").and_then(QueryValue::as_scalar), Some("3"));
}

#[tokio::test]
async fn test_query_map_drops_blank_values() {
    let query = QueryMap::parse("a=&flag&b=1");

    assert_eq!(query.len(), 1);
    assert!(query.get("a").is_none());
    assert!(query.get("flag").is_none());
    assert_eq!(query.get("b").and_then(QueryValue::as_scalar), Some("1"));
}

#[tokio::test]
async fn test_query_map_percent_decoding() {
    let query = QueryMap::parse("msg=hello%20world&name=a+b");

    assert_eq!(
        query.get("msg").and_then(QueryValue::as_scalar),
        Some("hello world")
    );
    assert_eq!(
        query.get("name").and_then(QueryValue::as_scalar),
        Some("a b")
    );
}

#[tokio::test]
async fn test_query_map_display_is_json() {
    let query = QueryMap::parse("b=2&a=1&a=3");

    assert_eq!(query.to_string(), r#"{"a":["1","3"],"b":"2"}"#);
    assert_eq!(QueryMap::new().to_string(), "{}");
}

#[tokio::test]
async fn test_parrot_request_builder() {
    let request = ParrotRequest::new(Method::Post, "/api/test")
        .header("Content-Type", "application/json")
        .body(r#"{"key": "value"}"#);

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/api/test");
    assert_eq!(
        request.get_header("Content-Type"),
        Some(&"application/json".to_string())
    );
    assert!(request.body.is_some());
    assert_eq!(request.text(), Some(r#"{"key": "value"}"#.to_string()));
}

#[tokio::test]
async fn test_parrot_response_json() {
    #[derive(serde::Serialize)]
    struct TestData {
        message: String,
        count: u32,
    }

    let data = TestData {
        message: "Hello".to_string(),
        count: 42,
    };

    let response = ParrotResponse::json(&data).unwrap();

    assert!(response.status.is_success());
    assert_eq!(
        response.content_type(),
        Some(&"application/json".to_string())
    );
}

#[tokio::test]
async fn test_parrot_response_error() {
    let response = ParrotResponse::error(StatusCode::NOT_FOUND, "Resource not found");

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.status.is_client_error());
    assert_eq!(response.text_body(), Some("Resource not found".to_string()));
}

#[tokio::test]
async fn test_route_context() {
    let ctx = RouteContext::new("query-echo", "req-456");

    assert_eq!(ctx.route_name, "query-echo");
    assert_eq!(ctx.request_id, "req-456");
}

#[tokio::test]
async fn test_parrot_error_conversion() {
    let error = ParrotError::not_found("Not Found");
    let response: ParrotResponse = error.into();

    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let error: ParrotError = serde_json::from_str::<serde_json::Value>("nope")
        .unwrap_err()
        .into();
    assert_eq!(error.code, 400);
}

#[tokio::test]
async fn test_status_code_helpers() {
    assert!(StatusCode::OK.is_success());
    assert!(!StatusCode::NOT_FOUND.is_success());

    assert!(StatusCode::BAD_REQUEST.is_client_error());
    assert!(StatusCode::NOT_FOUND.is_client_error());
    assert!(!StatusCode::OK.is_client_error());

    assert!(StatusCode::INTERNAL_SERVER_ERROR.is_server_error());
    assert!(!StatusCode::OK.is_server_error());
}

#[tokio::test]
async fn test_method_display() {
    assert_eq!(Method::Get.to_string(), "GET");
    assert_eq!(Method::Post.to_string(), "POST");
    assert_eq!(Method::Put.to_string(), "PUT");
    assert_eq!(Method::Delete.to_string(), "DELETE");
}
