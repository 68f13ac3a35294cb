//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared state once (store, worker pool, client)
//! - Bind one listener per worker endpoint
//! - Serve every listener from the same router until shutdown
//!
//! # Design Decisions
//! - Fail fast: a single bind failure aborts startup before any serving
//! - Listeners have no per-listener behavior; they differ only by port

use std::io;
use std::net::SocketAddr;

use tokio::task::JoinSet;

use crate::config::GatewayConfig;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};

/// The running set of listeners.
pub struct ListenerPool {
    server: HttpServer,
    local_addrs: Vec<SocketAddr>,
    tasks: JoinSet<Result<(), io::Error>>,
}

impl ListenerPool {
    /// Addresses actually bound, in pool order.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// State shared by every listener.
    pub fn state(&self) -> &AppState {
        self.server.state()
    }

    /// Wait until every listener has stopped.
    /// Returns the first serve error, if any.
    pub async fn wait(mut self) -> Result<(), io::Error> {
        let mut result = Ok(());
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Listener stopped with error");
                    if result.is_ok() {
                        result = Err(e);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Listener task failed"),
            }
        }
        result
    }
}

/// Start the listener pool described by `config`.
pub async fn bootstrap(config: &GatewayConfig, shutdown: &Shutdown) -> Result<ListenerPool, ListenerError> {
    start(HttpServer::new(config), shutdown).await
}

/// Start one listener per endpoint in `server`'s worker pool.
pub async fn start(server: HttpServer, shutdown: &Shutdown) -> Result<ListenerPool, ListenerError> {
    let endpoints = server.state().workers.endpoints().to_vec();

    let mut listeners = Vec::with_capacity(endpoints.len());
    for endpoint in &endpoints {
        listeners.push(net::bind(endpoint).await?);
    }

    let mut local_addrs = Vec::with_capacity(listeners.len());
    let mut tasks = JoinSet::new();
    for listener in listeners {
        if let Ok(addr) = listener.local_addr() {
            local_addrs.push(addr);
        }
        tasks.spawn(server.clone().run(listener, shutdown.subscribe()));
    }

    tracing::info!(listeners = local_addrs.len(), "Listener pool started");

    Ok(ListenerPool {
        server,
        local_addrs,
        tasks,
    })
}
