//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatch handler
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Hold the state shared by every listener (store, worker pool, client)
//! - Serve one listener until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::load_balancer::WorkerPool;
use crate::observability::metrics;
use crate::routing::{self, Route};
use crate::store::UserStore;

/// Application state injected into handlers.
///
/// Cloned into every listener; all clones share the same store, pool
/// and client.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserStore>,
    pub workers: Arc<WorkerPool>,
    pub client: Client<HttpConnector, Body>,
    pub proxy_enabled: bool,
    pub proxy_timeout: Duration,
    pub max_body_size: usize,
}

impl AppState {
    /// Build state from configuration with a fresh, empty store.
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(UserStore::new()),
            Arc::new(WorkerPool::from_config(&config.listener)),
        )
    }

    /// Build state around an existing store and worker pool.
    pub fn with_parts(config: &GatewayConfig, store: Arc<UserStore>, workers: Arc<WorkerPool>) -> Self {
        let proxy_timeout = Duration::from_secs(config.timeouts.proxy_secs);

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(proxy_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            store,
            workers,
            client,
            proxy_enabled: config.proxy.enabled,
            proxy_timeout,
            max_body_size: config.limits.max_body_size,
        }
    }

    /// Override the outbound proxy deadline.
    pub fn with_proxy_timeout(mut self, timeout: Duration) -> Self {
        self.proxy_timeout = timeout;
        self
    }
}

/// HTTP server for the gateway.
///
/// Cheap to clone: every listener in the pool serves a clone of the same
/// router, and therefore the same state.
#[derive(Clone)]
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_state(config, AppState::new(config))
    }

    /// Create a server around prepared state.
    pub fn with_state(config: &GatewayConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The router, for serving or for driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The shared state behind the router.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every method and path.
/// Matches the route table and dispatches.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let route = Route::resolve(&method, &path);
    let label = route.label();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = label,
        "Dispatching request"
    );

    let response = routing::dispatch(&state, route, request).await;
    let status = response.status();

    metrics::record_request(label, status.as_u16(), start_time);
    tracing::debug!(request_id = %request_id, route = label, status = %status, "Request handled");

    response
}
