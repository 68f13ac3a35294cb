//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one per listener in the pool)
//!     → server.rs (Axum setup, middleware, shared AppState)
//!     → request.rs (request ID)
//!     → routing (store operation or proxy fallback)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
