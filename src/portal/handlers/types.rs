//! Request/response payloads shared between handlers and `OpenAPI` generation.
//!
//! Request fields default when absent, so a missing secret code is reported
//! as an authentication failure and a missing title as an invalid title.

use crate::store::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub id: String,
    pub secret_code: String,
    pub name: String,
    pub email: String,
}

impl From<User> for RegisterResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            secret_code: user.secret_code,
            name: user.name,
            email: user.email,
        }
    }
}

/// Body of every endpoint that only needs the caller's credential.
#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CredentialRequest {
    pub secret_code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: String,
    pub secret_code: String,
    pub name: String,
    pub email: String,
    pub complaints: Vec<String>,
    pub is_admin: bool,
}

impl From<User> for LoginResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            secret_code: user.secret_code,
            name: user.name,
            email: user.email,
            complaints: user.complaints,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SubmitComplaintRequest {
    pub secret_code: String,
    pub title: String,
    pub summary: String,
    pub rating: i64,
}

#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ComplaintRequest {
    pub secret_code: String,
    pub complaint_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
