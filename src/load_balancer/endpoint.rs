//! Worker endpoint abstraction.

use std::fmt;

use axum::http::uri::{Authority, InvalidUri};

/// One listener slot in the worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerEndpoint {
    pub host: String,
    pub port: u16,
}

impl WorkerEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// URI authority (`host:port`) used when forwarding to this endpoint.
    pub fn authority(&self) -> Result<Authority, InvalidUri> {
        self.to_string().parse()
    }
}

impl fmt::Display for WorkerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
