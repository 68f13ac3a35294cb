//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! Router (parsed id + payload)
//!     → memory.rs (UserStore: validate, look up, mutate)
//!     → user.rs (User record, UserPayload)
//!     → Ok(User) or ApiError
//! ```

pub mod memory;
pub mod user;

pub use memory::UserStore;
pub use user::{parse_user_id, User, UserPayload};
