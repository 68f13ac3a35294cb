//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Unmatched request
//!     → pool.rs (fixed worker endpoints)
//!     → round_robin.rs (rotate through positions)
//!     → endpoint.rs (host:port to forward to)
//! ```
//!
//! # Design Decisions
//! - The pool is fixed at startup; entries are never removed or reordered
//! - Selection ignores endpoint health and load
//! - The algorithm only sees the pool length, the pool owns the endpoints

pub mod endpoint;
pub mod pool;
pub mod round_robin;

pub use endpoint::WorkerEndpoint;
pub use pool::WorkerPool;
pub use round_robin::RoundRobin;

/// Strategy that picks the next pool position.
pub trait LoadBalancer: Send + Sync + std::fmt::Debug {
    /// Index in `0..len` to use next, or `None` for an empty pool.
    fn next_index(&self, len: usize) -> Option<usize>;
}
