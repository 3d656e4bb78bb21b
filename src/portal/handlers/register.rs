use super::{
    ApiError, Field, decode, ensure,
    types::{ErrorResponse, RegisterRequest, RegisterResponse},
};
use crate::{
    portal::validation::{valid_email, valid_name},
    store::Store,
};
use axum::{Json, body::Bytes, extract::Extension, http::StatusCode};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = RegisterResponse),
        (status = 400, description = "Malformed body, invalid name or invalid email", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
    ),
    tag = "users"
)]
/// Registers a new non-admin user and returns its id and secret code.
/// The secret code is the only credential and is never shown again except on login.
#[instrument(skip(store, body))]
pub async fn register(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let request: RegisterRequest = decode(&body)?;

    ensure(valid_name(&request.name), Field::Name)?;
    ensure(valid_email(&request.email), Field::Email)?;

    if store.users().email_taken(&request.email)? {
        warn!("Registration rejected: email already exists");
        return Err(ApiError::EmailExists);
    }

    let user = store.register_user(&request.name, &request.email)?;
    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(RegisterResponse::from(user))))
}
