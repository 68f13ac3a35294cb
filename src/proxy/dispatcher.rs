//! Fallback proxy dispatch.
//!
//! # Responsibilities
//! - Pick the next worker for an unmatched request
//! - Forward it and relay the downstream response
//! - Bound the outbound call with a deadline
//!
//! # Design Decisions
//! - The outbound call runs inline under `tokio::time::timeout`; dropping the
//!   caller's future (disconnect, request timeout) drops the outbound call too
//! - A request that was already forwarded once is never forwarded again;
//!   it answers `404 Endpoint not found`
//! - Transport failures never reach the caller as errors, only as a 500

use std::time::Instant;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::outbound::{is_forwarded, outbound_request, relay};

/// Forward an unmatched request to the next worker and relay its answer.
pub async fn forward(state: &AppState, request: Request<Body>) -> Response {
    if !state.proxy_enabled {
        return ApiError::Unroutable.into_response();
    }
    if is_forwarded(&request) {
        tracing::debug!(path = %request.uri().path(), "Forwarded request matched no route");
        return ApiError::Unroutable.into_response();
    }

    let Some(worker) = state.workers.next().cloned() else {
        tracing::warn!("Worker pool is empty");
        return ApiError::Unroutable.into_response();
    };

    tracing::debug!(
        worker = %worker,
        method = %request.method(),
        path = %request.uri().path(),
        "Proxying request"
    );

    let outbound = match outbound_request(request, &worker) {
        Ok(outbound) => outbound,
        Err(e) => return e.into_response(),
    };

    let start_time = Instant::now();
    let worker = worker.to_string();
    let timeout = state.proxy_timeout;

    let outcome = tokio::time::timeout(
        timeout,
        relay(state.client.clone(), outbound, state.max_body_size),
    )
    .await;

    match outcome {
        Ok(Ok(response)) => {
            metrics::record_proxy(&worker, "relayed", start_time);
            response
        }
        Ok(Err(e)) => {
            tracing::warn!(worker = %worker, error = %e, "Upstream request failed");
            metrics::record_proxy(&worker, "transport_error", start_time);
            e.into_response()
        }
        Err(_) => {
            tracing::warn!(worker = %worker, timeout = ?timeout, "Upstream request timed out");
            metrics::record_proxy(&worker, "timeout", start_time);
            ApiError::Transport(format!("no response from {worker} within {timeout:?}")).into_response()
        }
    }
}
