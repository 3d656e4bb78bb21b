//! Endpoint handlers and shared request plumbing.
//!
//! Each handler follows the same flow: decode the body, authenticate the
//! secret code (all but registration), validate fields in a fixed order so
//! the earliest failing field is reported, apply the store operation, and map
//! the outcome to a response. Wrong methods never reach a handler; the route
//! fallback answers them with `method_not_allowed`.

pub mod complaints;
pub mod error;
pub mod health;
pub mod login;
pub mod register;
pub mod types;

pub use self::error::{ApiError, Field};

use serde::de::DeserializeOwned;
use tracing::debug;

/// Decode a JSON body, mapping any syntax or shape error to `invalid_json`.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        debug!("Rejecting request body: {err}");
        ApiError::InvalidJson
    })
}

/// Fallback for every non-`POST` method on an endpoint route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fail with `field` unless `valid` holds.
pub(crate) fn ensure(valid: bool, field: Field) -> Result<(), ApiError> {
    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidField(field))
    }
}
