//! Fallback proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Unmatched request
//!     → dispatcher.rs (loop guard, worker selection, deadline)
//!     → outbound.rs (rewrite target, strip hop-by-hop headers, mark forwarded)
//!     → downstream worker
//!     → outbound.rs (buffer body, keep status + content-type)
//!     → single response to the caller
//! ```

pub mod dispatcher;
pub mod outbound;

pub use dispatcher::forward;
pub use outbound::X_GATEWAY_FORWARDED;
