//! Path shape matching.
//!
//! # Responsibilities
//! - Recognize the users collection path (`/api/users`)
//! - Recognize id-bearing member paths (`/api/users/...`)
//! - Extract the id segment
//!
//! # Design Decisions
//! - Matching is on the URI path only, the query string is ignored
//! - Path matching is case-sensitive
//! - The id is the fourth `/`-delimited segment; anything after it is ignored

/// Collection path for user records.
pub const USERS_PATH: &str = "/api/users";

/// Prefix of every id-bearing path.
pub const USER_MEMBER_PREFIX: &str = "/api/users/";

/// Shape of a request path as far as routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape<'a> {
    /// Exactly `/api/users`.
    Collection,
    /// Starts with `/api/users/`; carries the (possibly empty) id segment.
    Member(&'a str),
    /// Anything else.
    Other,
}

impl<'a> PathShape<'a> {
    pub fn of(path: &'a str) -> Self {
        if path == USERS_PATH {
            PathShape::Collection
        } else if path.starts_with(USER_MEMBER_PREFIX) {
            PathShape::Member(id_segment(path))
        } else {
            PathShape::Other
        }
    }
}

/// Fourth `/`-delimited segment of `path`, or `""` when there is none.
///
/// For `/api/users/{id}` the split is `["", "api", "users", "{id}"]`.
pub fn id_segment(path: &str) -> &str {
    path.split('/').nth(3).unwrap_or("")
}
