//! Worker pool management.
//!
//! # Responsibilities
//! - Hold the fixed, ordered set of worker endpoints
//! - Apply the load balancing algorithm to select the next one

use crate::config::ListenerConfig;
use crate::load_balancer::{endpoint::WorkerEndpoint, round_robin::RoundRobin, LoadBalancer};

/// Fixed pool of worker endpoints plus the selector over it.
#[derive(Debug)]
pub struct WorkerPool {
    endpoints: Vec<WorkerEndpoint>,
    balancer: Box<dyn LoadBalancer>,
}

impl WorkerPool {
    /// Create a round-robin pool over `endpoints`, in the given order.
    pub fn new(endpoints: Vec<WorkerEndpoint>) -> Self {
        Self::with_balancer(endpoints, Box::new(RoundRobin::new()))
    }

    pub fn with_balancer(endpoints: Vec<WorkerEndpoint>, balancer: Box<dyn LoadBalancer>) -> Self {
        Self { endpoints, balancer }
    }

    /// One endpoint per port of `base_port..base_port + count`, all on `host`.
    /// Ports past `u16::MAX` are not produced.
    pub fn from_port_range(host: &str, base_port: u16, count: usize) -> Self {
        let endpoints = (0..count)
            .map_while(|i| u16::try_from(i).ok().and_then(|i| base_port.checked_add(i)))
            .map(|port| WorkerEndpoint::new(host, port))
            .collect();
        Self::new(endpoints)
    }

    /// Build the pool described by the listener configuration.
    pub fn from_config(config: &ListenerConfig) -> Self {
        Self::from_port_range(&config.host, config.base_port, config.workers)
    }

    /// Select the next endpoint.
    pub fn next(&self) -> Option<&WorkerEndpoint> {
        let index = self.balancer.next_index(self.endpoints.len())?;
        let endpoint = self.endpoints.get(index);
        if let Some(endpoint) = endpoint {
            tracing::trace!(worker = %endpoint, index, "Worker selected");
        }
        endpoint
    }

    /// All endpoints, in construction order.
    pub fn endpoints(&self) -> &[WorkerEndpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
