//! Secret-code authentication and capability checks.
//!
//! The secret code is presented on every request; there are no sessions and
//! nothing expires. Once a user is resolved the capability checks are pure.

use crate::store::{Complaint, StoreError, User, UserStore};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("secret code required")]
    MissingCode,
    #[error("invalid secret code")]
    InvalidCode,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve a secret code to the user holding it.
///
/// # Errors
/// Returns `MissingCode` for an empty code and `InvalidCode` if no user holds it.
pub fn authenticate(users: &UserStore, code: &str) -> Result<User, AuthError> {
    if code.is_empty() {
        return Err(AuthError::MissingCode);
    }
    users.find_by_code(code)?.ok_or(AuthError::InvalidCode)
}

#[must_use]
pub const fn is_admin(user: &User) -> bool {
    user.is_admin
}

/// Admins see every complaint; everyone else only their own.
#[must_use]
pub fn can_view(user: &User, complaint: &Complaint) -> bool {
    is_admin(user) || complaint.user_id == user.id
}
