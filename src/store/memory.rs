//! In-memory user store.
//!
//! # Responsibilities
//! - Own the ordered collection of user records
//! - Validate ids and required fields
//! - Apply create / update / delete atomically
//!
//! # Design Decisions
//! - One `RwLock` around the whole collection; it is never held across
//!   an `.await`, so every operation runs to completion without interleaving
//! - Insertion order is preserved (`Vec`), lookups are linear

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::ApiError;
use crate::store::user::{parse_user_id, User, UserPayload};

/// Shared in-memory collection of users.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.read().clone()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Create a record. `username` and `age` are required.
    pub fn create(&self, payload: UserPayload) -> Result<User, ApiError> {
        let (Some(username), Some(age)) = (payload.username(), payload.age()) else {
            return Err(ApiError::Validation);
        };

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            age: age.to_string(),
            hobbies: payload.hobbies.unwrap_or_default(),
        };

        self.write().push(user.clone());
        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Fetch one record.
    pub fn get(&self, id: &str) -> Result<User, ApiError> {
        let id = parse_user_id(id)?;
        self.read()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    /// Apply every supplied, non-empty field of `payload` to a record.
    ///
    /// Existence is checked before the payload.
    pub fn update(&self, id: &str, payload: UserPayload) -> Result<User, ApiError> {
        let id = parse_user_id(id)?;
        let mut users = self.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::NotFound)?;

        if !payload.has_any_field() {
            return Err(ApiError::Validation);
        }

        if let Some(username) = payload.username() {
            user.username = username.to_string();
        }
        if let Some(age) = payload.age() {
            user.age = age.to_string();
        }
        if let Some(hobbies) = payload.hobbies() {
            user.hobbies = hobbies.to_vec();
        }

        tracing::debug!(user_id = %id, "User updated");
        Ok(user.clone())
    }

    /// Remove a record, returning it.
    pub fn delete(&self, id: &str) -> Result<User, ApiError> {
        let id = parse_user_id(id)?;
        let mut users = self.write();
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(ApiError::NotFound)?;

        let removed = users.remove(index);
        tracing::debug!(user_id = %id, "User deleted");
        Ok(removed)
    }
}
