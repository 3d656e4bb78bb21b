//! In-memory user store keyed by secret code.
//!
//! One reader/writer lock guards the whole map. Lookups hand out clones, so a
//! caller never observes a user mid-update.

use super::{StoreError, model::User};
use std::{collections::HashMap, sync::RwLock};

#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user.
    ///
    /// # Errors
    /// Returns `DuplicateSecretCode` or `DuplicateEmail` if either is already
    /// present. Both checks run under the same write lock as the insert.
    pub fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::LockPoisoned("users"))?;

        if users.contains_key(&user.secret_code) {
            return Err(StoreError::DuplicateSecretCode);
        }
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        users.insert(user.secret_code.clone(), user);
        Ok(())
    }

    /// Look up a user by secret code.
    ///
    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn find_by_code(&self, code: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        Ok(users.get(code).cloned())
    }

    /// Exact, case-sensitive email match over every user.
    ///
    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        Ok(users.values().any(|user| user.email == email))
    }

    /// Append a complaint ID to the owned list of the user holding `code`.
    ///
    /// # Errors
    /// Returns `UserNotFound` if no user holds `code`.
    pub fn append_complaint(&self, code: &str, complaint_id: String) -> Result<(), StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        let user = users.get_mut(code).ok_or(StoreError::UserNotFound)?;
        user.complaints.push(complaint_id);
        Ok(())
    }

    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn len(&self) -> Result<usize, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        Ok(users.len())
    }

    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }

    /// Poison the lock by panicking while holding the write guard.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.users.write();
                    panic!("users writer panicked");
                })
                .join();
        });
    }
}
