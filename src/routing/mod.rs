//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → matcher.rs (path shape: collection / member / other)
//!     → router.rs (route table lookup)
//!     → store operation, or proxy fallback
//! ```
//!
//! # Design Decisions
//! - Static route table, immutable at runtime
//! - Deterministic: same method + path always matches the same route
//! - Unmatched requests are never rejected here, they go to the proxy

pub mod matcher;
pub mod router;

pub use router::{dispatch, Route};
