use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("secret code already in use")]
    DuplicateSecretCode,
    #[error("email already exists")]
    DuplicateEmail,
    #[error("complaint id already in use")]
    DuplicateComplaint,
    #[error("user not found")]
    UserNotFound,
    #[error("complaint not found")]
    ComplaintNotFound,
    #[error("complaint is already resolved")]
    AlreadyResolved,
    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}
