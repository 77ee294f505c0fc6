//! Parrot HTTP server implementation.

use crate::http::{Method, ParrotRequest, ParrotResponse, QueryMap, StatusCode};
use crate::routing::{ParrotError, Router};
use crate::runtime::ParrotConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// The parrot HTTP server.
///
/// Owns the route table and the listener lifecycle: bind on startup, serve
/// connections until the process is interrupted.
pub struct ParrotServer {
    /// Server configuration.
    config: ParrotConfig,
    /// Route table.
    router: Arc<Router>,
}

impl ParrotServer {
    /// Create a server from a configuration and a route table.
    pub fn new(config: ParrotConfig, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Create a server with default configuration and the given routes.
    pub fn with_defaults(router: Router) -> Self {
        Self::new(ParrotConfig::default(), router)
    }

    /// Get the route table.
    pub fn router(&self) -> Arc<Router> {
        self.router.clone()
    }

    /// Bind the listener and serve until interrupted.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Parrot server listening on {}", addr);

        let router = self.router.clone();
        let config = self.config.clone();

        loop {
            let (stream, remote_addr) = tokio::select! {
                accepted = listener.accept() => accepted?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupt received, shutting down");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let router = router.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let router = router.clone();
                    let config = config.clone();
                    async move { handle_request(req, router, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection from {}: {:?}", remote_addr, err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request: convert, dispatch, convert back.
async fn handle_request(
    req: Request<Incoming>,
    router: Arc<Router>,
    config: ParrotConfig,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let request_id = generate_request_id();

    debug!(
        "Handling request: {} {} from {} [{}]",
        req.method(),
        req.uri(),
        remote_addr,
        request_id
    );

    let request = match convert_request(req, &config).await {
        Ok(request) => request,
        Err(e) => {
            warn!("Failed to read request: {} [{}]", e, request_id);
            return Ok(build_response(e.into()));
        }
    };

    match router.dispatch(request, &request_id).await {
        Ok(response) => Ok(build_response(response)),
        Err(e) => {
            if e.code == StatusCode::NOT_FOUND.0 {
                debug!("{} [{}]", e, request_id);
            } else {
                error!("Handler error: {} [{}]", e, request_id);
            }
            Ok(build_response(e.into()))
        }
    }
}

/// Convert a hyper Request into a ParrotRequest.
///
/// The body read is bounded by the configured size cap and read timeout.
async fn convert_request(
    req: Request<Incoming>,
    config: &ParrotConfig,
) -> Result<ParrotRequest, ParrotError> {
    let method =
        Method::from_hyper(req.method()).ok_or_else(|| ParrotError::not_found("Not Found"))?;
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(QueryMap::parse).unwrap_or_default();

    let mut headers = HashMap::new();
    for (name, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.as_str().to_string(), v.to_string());
        }
    }

    let collected = tokio::time::timeout(config.read_timeout(), req.collect())
        .await
        .map_err(|_| {
            ParrotError::with_code(
                StatusCode::REQUEST_TIMEOUT.0,
                "Timed out reading request body",
            )
        })?
        .map_err(|e| ParrotError::bad_request(e.to_string()))?;

    let body_bytes = collected.to_bytes();
    let body = if body_bytes.len() > config.max_body_size {
        return Err(ParrotError::bad_request("Request body too large"));
    } else if body_bytes.is_empty() {
        None
    } else {
        Some(body_bytes)
    };

    Ok(ParrotRequest {
        method,
        path,
        query,
        headers,
        body,
    })
}

/// Build a hyper Response from a ParrotResponse.
fn build_response(parrot_response: ParrotResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(parrot_response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            parrot_response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);

    for (name, value) in parrot_response.headers {
        builder = builder.header(name, value);
    }

    let body = parrot_response.body.unwrap_or_default();
    builder.body(Full::new(body)).unwrap()
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:x}", timestamp)
}
