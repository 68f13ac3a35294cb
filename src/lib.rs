//! Users gateway library.
//!
//! An in-memory `/api/users` CRUD service served from a pool of sibling
//! listeners, with round-robin proxying of every request it does not route.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod store;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::{bootstrap, ListenerPool, Shutdown};
pub use store::{User, UserStore};
