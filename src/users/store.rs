//! In-memory user store.
//!
//! Every operation starts by calling [`UserStore::reset`], which repopulates
//! the seed dataset when the store is empty and recomputes the next id. Data
//! therefore survives only as long as the owning process, and deleting every
//! user brings the seed back on the next call.
//!
//! Updates merge only `name` and `age`. An `id` key in an update payload is
//! ignored, so a record's id always matches the key it is stored under.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::UserError;

use super::seed::seed_users;
use super::types::{User, UserPatch};

/// Mapping from user id to user record.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<String, User>,
    next_id: u64,
}

impl UserStore {
    /// Create an empty store. It seeds itself on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding the seed dataset.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.reset();
        store
    }

    /// Repopulate the seed dataset if empty and recompute the next id.
    pub fn reset(&mut self) {
        if self.users.is_empty() {
            debug!("User store empty, loading seed dataset");
            self.users = seed_users()
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect();
        }

        self.next_id = self.users.len() as u64 + 1;
    }

    /// Number of stored users (without reseeding).
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users (without reseeding).
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Add a user. Fails when `name` is empty or a given `age` is below 1.
    /// A user may be added without an age.
    #[instrument(skip(self))]
    pub fn add_user(&mut self, name: &str, age: Option<i64>) -> Result<User, UserError> {
        self.reset();
        if name.is_empty() || age.is_some_and(|age| age < 1) {
            return Err(UserError::invalid_user_data());
        }

        let id = self.allocate_id();
        let user = User {
            id: id.clone(),
            name: name.to_string(),
            age,
        };
        self.users.insert(id, user.clone());
        debug!(id = %user.id, "User added");
        Ok(user)
    }

    /// Fetch a user by id.
    pub fn get_user(&mut self, id: &str) -> Result<User, UserError> {
        self.reset();
        self.users
            .get(id)
            .cloned()
            .ok_or_else(UserError::user_not_found)
    }

    /// All users, in ascending id order.
    pub fn get_users(&mut self) -> Vec<User> {
        self.reset();
        sorted(self.users.values().cloned().collect())
    }

    /// Remove a user and return its id.
    #[instrument(skip(self))]
    pub fn delete_user(&mut self, id: &str) -> Result<String, UserError> {
        self.reset();
        match self.users.remove(id) {
            Some(user) => {
                debug!(remaining = self.users.len(), "User deleted");
                Ok(user.id)
            }
            None => Err(UserError::user_not_found()),
        }
    }

    /// Users whose name contains `query`, ignoring case. An empty query
    /// matches nothing.
    pub fn search(&mut self, query: &str) -> Vec<User> {
        self.reset();
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        sorted(
            self.users
                .values()
                .filter(|user| user.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        )
    }

    /// Merge `payload` into an existing user.
    ///
    /// Only `name` and `age` are taken from the payload. Other keys, `id`
    /// among them, are ignored. A known key holding a value of the wrong type
    /// is rejected.
    #[instrument(skip(self, payload))]
    pub fn update_user(&mut self, id: &str, payload: &Value) -> Result<User, UserError> {
        self.get_user(id)?;

        if !payload.is_object() {
            return Err(UserError::InvalidInput {
                message: "Update payload must be an object".to_string(),
            });
        }
        let patch: UserPatch =
            serde_json::from_value(payload.clone()).map_err(|e| UserError::InvalidInput {
                message: format!("Invalid update payload: {e}"),
            })?;

        let user = self
            .users
            .get_mut(id)
            .ok_or_else(UserError::user_not_found)?;
        user.apply(patch);
        Ok(user.clone())
    }

    /// Next free id, starting from one past the current size.
    fn allocate_id(&mut self) -> String {
        while self.users.contains_key(&self.next_id.to_string()) {
            self.next_id += 1;
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}

fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by_key(User::numeric_id);
    users
}
