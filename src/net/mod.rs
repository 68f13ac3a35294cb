//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Worker endpoint (host:port)
//!     → listener.rs (resolve + bind)
//!     → Hand off to HTTP layer
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
