use std::future::Future;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::Response,
    routing::any,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};

pub mod config;

pub use config::{ConfigError, StatusConfig, DEFAULT_PORT, PORT_ENV_VAR};

pub const STATUS_MESSAGE: &str = "Claude Code MCP Server is running";

/// The fixed payload returned for every non-preflight request. It never
/// reflects the state of the spawned MCP server.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    pub port: u16,
    pub endpoint: String,
}

impl StatusResponse {
    pub fn new(config: &StatusConfig) -> Self {
        Self {
            status: STATUS_MESSAGE.to_string(),
            port: config.port,
            endpoint: config.endpoint(),
        }
    }
}

/// Response headers that let a browser script on any origin read the
/// status payload.
pub fn allow_all_cors() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

pub fn wrapper_router(config: StatusConfig) -> Router {
    Router::new()
        .fallback(any(status_handler))
        .layer(Extension(config))
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .on_request(DefaultOnRequest::new())
                    .on_response(DefaultOnResponse::new()),
            ),
        )
}

/// Serve the status router until `shutdown` resolves, then drain the
/// listener. Binding is the caller's job so that failures surface as
/// ordinary startup errors.
pub async fn start_server_http(
    listener: TcpListener,
    config: StatusConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = wrapper_router(config);

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

// Answers any method on any path. Preflight requests get the headers with
// an empty body; everything else gets the status object.
async fn status_handler(Extension(config): Extension<StatusConfig>, req: Request) -> Response {
    let body = if req.method() == Method::OPTIONS {
        Body::empty()
    } else {
        let status = StatusResponse::new(&config);
        Body::from(serde_json::to_vec(&status).expect("Failed to serialize status"))
    };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body)
        .expect("Failed to build status response");

    response.headers_mut().extend(allow_all_cors());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_headers_allow_any_origin() {
        let headers = allow_all_cors();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[test]
    fn status_body_serializes_to_the_documented_wire_format() {
        let body = serde_json::to_string(&StatusResponse::new(&StatusConfig::default())).unwrap();

        assert_eq!(
            body,
            r#"{"status":"Claude Code MCP Server is running","port":8947,"endpoint":"http://localhost:8947"}"#
        );
    }

    #[test]
    fn status_body_reflects_an_overridden_port() {
        let status = StatusResponse::new(&StatusConfig::new(9001));

        assert_eq!(status.status, STATUS_MESSAGE);
        assert_eq!(status.port, 9001);
        assert_eq!(status.endpoint, "http://localhost:9001");
    }
}
