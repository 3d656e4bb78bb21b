use super::{
    ApiError, decode,
    types::{CredentialRequest, ErrorResponse, LoginResponse},
};
use crate::{portal::auth::authenticate, store::Store};
use axum::{Json, body::Bytes, extract::Extension};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialRequest,
    responses(
        (status = 200, description = "Full profile of the authenticated user", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or unknown secret code", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    ),
    tag = "users"
)]
// axum handler for login
#[instrument(skip(store, body))]
pub async fn login(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let request: CredentialRequest = decode(&body)?;
    let user = authenticate(store.users(), &request.secret_code)?;

    debug!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse::from(user)))
}
