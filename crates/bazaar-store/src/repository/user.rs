//! # User Repository
//!
//! Account lookup, registration and profile updates.

use tracing::debug;

use bazaar_core::{User, UserRole, UserUpdate};

use crate::error::{StoreError, StoreResult};
use crate::store::{generate_id, now, MarketStore};

/// Fields required to create an account. Id and timestamp are generated.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
}

impl MarketStore {
    /// Gets a user by id.
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Gets a user by exact email.
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// All users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Appends a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - Created user with generated id and timestamp
    /// * `Err(StoreError::Duplicate)` - Email already registered
    pub fn insert_user(&mut self, new_user: NewUser) -> StoreResult<User> {
        if self.find_user_by_email(&new_user.email).is_some() {
            return Err(StoreError::duplicate("email", new_user.email));
        }

        let user = User {
            id: generate_id(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            role: new_user.role,
            phone: None,
            address: None,
            created_at: now(),
        };

        debug!(id = %user.id, role = ?user.role, "Inserting user");

        self.users.push(user.clone());
        Ok(user)
    }

    /// Applies a profile update to the user with `id`.
    pub fn update_user(&mut self, id: &str, update: &UserUpdate) -> StoreResult<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("User", id))?;

        user.apply_update(update);

        debug!(id = %id, "Updated user");
        Ok(user.clone())
    }
}
