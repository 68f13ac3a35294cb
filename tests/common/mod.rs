//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use users_gateway::config::GatewayConfig;
use users_gateway::http::{AppState, HttpServer};
use users_gateway::lifecycle::Shutdown;
use users_gateway::load_balancer::{WorkerEndpoint, WorkerPool};
use users_gateway::store::UserStore;

/// What a mock backend saw.
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Canned response written by a mock backend.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl MockResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        201 => "201 Created",
        202 => "202 Accepted",
        404 => "404 Not Found",
        418 => "418 I'm a teapot",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Read one HTTP/1.1 request (head + Content-Length body) off `socket`.
async fn read_request(socket: &mut TcpStream) -> Option<SeenRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(SeenRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

async fn write_response(socket: &mut TcpStream, response: &MockResponse) {
    let response_str = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text(response.status),
        response.content_type,
        response.body.len(),
        response.body
    );
    let _ = socket.write_all(response_str.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a programmable mock backend: `f` maps each request to a response.
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(SeenRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                if let Some(request) = read_request(&mut socket).await {
                    let response = f(request).await;
                    write_response(&mut socket, &response).await;
                }
            });
        }
    });
}

/// Start a mock backend that returns a fixed text response.
pub async fn start_mock_backend(addr: SocketAddr, status: u16, body: &'static str) {
    start_programmable_backend(addr, move |_| async move { MockResponse::text(status, body) }).await;
}

/// Start a backend that accepts connections and never answers.
pub async fn start_hanging_backend(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
}

/// Start a backend that never answers and reports when the peer closes
/// its connection. The flag turns true once an accepted socket reads EOF.
pub async fn start_hanging_backend_reporting_close(addr: SocketAddr) -> Arc<AtomicBool> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let closed = Arc::new(AtomicBool::new(false));
    let flag = closed.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let flag = flag.clone();
            tokio::spawn(async move {
                let mut chunk = [0u8; 4096];
                loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {}
                    }
                }
                flag.store(true, Ordering::SeqCst);
            });
        }
    });
    closed
}

/// Config for a loopback pool of `workers` listeners starting at `base_port`.
pub fn loopback_config(base_port: u16, workers: usize) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.base_port = base_port;
    config.listener.workers = workers;
    config
}

/// Serve a single gateway listener on `addr` whose proxy fallback targets
/// `workers` instead of its own pool.
pub async fn start_gateway_with_workers(
    addr: SocketAddr,
    workers: Vec<SocketAddr>,
    proxy_timeout: Duration,
    shutdown: &Shutdown,
) -> HttpServer {
    let config = loopback_config(addr.port(), 1);
    let pool = WorkerPool::new(
        workers
            .into_iter()
            .map(|w| WorkerEndpoint::new(w.ip().to_string(), w.port()))
            .collect(),
    );
    let state = AppState::with_parts(&config, Arc::new(UserStore::new()), Arc::new(pool))
        .with_proxy_timeout(proxy_timeout);
    let server = HttpServer::with_state(&config, state);

    let listener = TcpListener::bind(addr).await.unwrap();
    let rx = shutdown.subscribe();
    let serving = server.clone();
    tokio::spawn(async move {
        let _ = serving.run(listener, rx).await;
    });

    // Let the accept loop start
    tokio::time::sleep(Duration::from_millis(100)).await;
    server
}

/// HTTP client that never reuses connections and ignores system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
