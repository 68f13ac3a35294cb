//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind one listener per worker endpoint
//! - Report bind failures with the endpoint that failed

use std::io;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::load_balancer::WorkerEndpoint;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: io::Error,
    },
}

/// Bind a TCP listener on `endpoint`.
///
/// The host is resolved, and the first resolved address that binds wins.
pub async fn bind(endpoint: &WorkerEndpoint) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind((endpoint.host.as_str(), endpoint.port))
        .await
        .map_err(|source| ListenerError::Bind {
            endpoint: endpoint.to_string(),
            source,
        })?;

    match listener.local_addr() {
        Ok(addr) => tracing::info!(worker = %endpoint, address = %addr, "Listener bound"),
        Err(e) => tracing::warn!(worker = %endpoint, error = %e, "Listener bound, address unknown"),
    }

    Ok(listener)
}
