//! Outbound request construction and downstream relay.

use axum::{
    body::Body,
    http::{
        header::{self, HeaderName, HeaderValue},
        uri::{PathAndQuery, Scheme},
        Request, Uri,
    },
    response::Response,
};
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::error::ApiError;
use crate::load_balancer::WorkerEndpoint;

/// Marks a request that has already been forwarded once.
pub const X_GATEWAY_FORWARDED: &str = "x-gateway-forwarded";

/// Connection-scoped headers that must not be forwarded.
const HOP_BY_HOP: [&str; 7] = [
    "connection",
    "keep-alive",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "upgrade",
];

/// True if the request carries the forwarding marker.
pub fn is_forwarded(request: &Request<Body>) -> bool {
    request.headers().contains_key(X_GATEWAY_FORWARDED)
}

/// Rewrite an inbound request so it targets `worker`.
///
/// Method, headers and path (with query) are kept; the body is moved
/// over as-is, so it streams rather than being buffered.
pub fn outbound_request(request: Request<Body>, worker: &WorkerEndpoint) -> Result<Request<Body>, ApiError> {
    let (parts, body) = request.into_parts();

    let authority = worker
        .authority()
        .map_err(|e| ApiError::Transport(format!("invalid worker address {worker}: {e}")))?;
    let mut uri_parts = parts.uri.into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority);
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    let uri = Uri::from_parts(uri_parts).map_err(|e| ApiError::Transport(e.to_string()))?;

    let mut headers = parts.headers;
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
    headers.insert(
        HeaderName::from_static(X_GATEWAY_FORWARDED),
        HeaderValue::from_static("1"),
    );

    let mut outbound = Request::builder()
        .method(parts.method)
        .uri(uri)
        .body(body)
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    *outbound.headers_mut() = headers;
    Ok(outbound)
}

/// Send `request` downstream and relay the answer.
///
/// The downstream body is buffered fully (up to `limit` bytes) and returned
/// with the downstream status and content-type.
pub async fn relay(
    client: Client<HttpConnector, Body>,
    request: Request<Body>,
    limit: usize,
) -> Result<Response, ApiError> {
    let response = client
        .request(request)
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(Body::new(body), limit)
        .await
        .map_err(|e| ApiError::Transport(format!("failed to read downstream body: {e}")))?;

    let mut builder = Response::builder().status(parts.status);
    if let Some(content_type) = parts.headers.get(header::CONTENT_TYPE) {
        builder = builder.header(header::CONTENT_TYPE, content_type.clone());
    }
    builder
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Transport(e.to_string()))
}
