//! Complaint endpoints.
//!
//! Regular users submit complaints and see only their own; administrators list
//! and resolve everything. Authentication always runs before any field
//! validation or lookup.

use super::{
    ApiError, Field, decode, ensure,
    types::{ComplaintRequest, CredentialRequest, ErrorResponse, SubmitComplaintRequest},
};
use crate::{
    portal::{
        auth::{authenticate, can_view, is_admin},
        validation::{valid_rating, valid_summary, valid_title},
    },
    store::{Complaint, Store},
};
use axum::{Json, body::Bytes, extract::Extension, http::StatusCode};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[utoipa::path(
    post,
    path = "/submitComplaint",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint stored as pending", body = Complaint),
        (status = 400, description = "Malformed body, invalid title, summary or rating", body = ErrorResponse),
        (status = 401, description = "Missing or unknown secret code", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    ),
    tag = "complaints"
)]
/// Stores a pending complaint owned by the caller and appends it to the caller's list.
/// Fields are checked in order title, summary, rating; the first failure is reported.
#[instrument(skip(store, body))]
pub async fn submit_complaint(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Complaint>), ApiError> {
    let request: SubmitComplaintRequest = decode(&body)?;
    let user = authenticate(store.users(), &request.secret_code)?;

    ensure(valid_title(&request.title), Field::Title)?;
    ensure(valid_summary(&request.summary), Field::Summary)?;
    ensure(valid_rating(request.rating), Field::Rating)?;

    let complaint =
        store.submit_complaint(&user, &request.title, &request.summary, request.rating)?;
    info!(complaint_id = %complaint.id, user_id = %user.id, "Complaint submitted");

    Ok((StatusCode::CREATED, Json(complaint)))
}

#[utoipa::path(
    post,
    path = "/getAllComplaintsForUser",
    request_body = CredentialRequest,
    responses(
        (status = 200, description = "Complaints submitted by the caller, in submission order", body = [Complaint]),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or unknown secret code", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    ),
    tag = "complaints"
)]
// owned IDs that are no longer stored are skipped, not reported
#[instrument(skip(store, body))]
pub async fn complaints_for_user(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<Json<Vec<Complaint>>, ApiError> {
    let request: CredentialRequest = decode(&body)?;
    let user = authenticate(store.users(), &request.secret_code)?;

    let complaints = store.complaints().find_many(&user.complaints)?;
    debug!(user_id = %user.id, count = complaints.len(), "Listed own complaints");

    Ok(Json(complaints))
}

#[utoipa::path(
    post,
    path = "/getAllComplaintsForAdmin",
    request_body = CredentialRequest,
    responses(
        (status = 200, description = "Every stored complaint, unordered", body = [Complaint]),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or unknown secret code", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(store, body))]
pub async fn complaints_for_admin(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<Json<Vec<Complaint>>, ApiError> {
    let request: CredentialRequest = decode(&body)?;
    let user = authenticate(store.users(), &request.secret_code)?;

    if !is_admin(&user) {
        warn!(user_id = %user.id, "Non-admin tried to list all complaints");
        return Err(ApiError::AccessDenied(
            "Only administrators can access this endpoint",
        ));
    }

    Ok(Json(store.complaints().all()?))
}

#[utoipa::path(
    post,
    path = "/viewComplaint",
    request_body = ComplaintRequest,
    responses(
        (status = 200, description = "The requested complaint", body = Complaint),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or unknown secret code", body = ErrorResponse),
        (status = 403, description = "Complaint belongs to another user", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    ),
    tag = "complaints"
)]
/// Returns one complaint to its owner or to an administrator.
/// Existence is checked before ownership, so unknown IDs answer `404` to everyone.
#[instrument(skip(store, body))]
pub async fn view_complaint(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<Json<Complaint>, ApiError> {
    let request: ComplaintRequest = decode(&body)?;
    let user = authenticate(store.users(), &request.secret_code)?;

    let complaint = store
        .complaints()
        .find_by_id(&request.complaint_id)?
        .ok_or(ApiError::ComplaintNotFound)?;

    if !can_view(&user, &complaint) {
        return Err(ApiError::AccessDenied(
            "You can only view your own complaints",
        ));
    }

    Ok(Json(complaint))
}

#[utoipa::path(
    post,
    path = "/resolveComplaint",
    request_body = ComplaintRequest,
    responses(
        (status = 200, description = "Complaint marked as resolved", body = Complaint),
        (status = 400, description = "Malformed body or complaint already resolved", body = ErrorResponse),
        (status = 401, description = "Missing or unknown secret code", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    ),
    tag = "admin"
)]
/// Moves a pending complaint to resolved and stamps `resolved_at`.
/// Resolution happens once; later calls fail with `already_resolved`.
#[instrument(skip(store, body))]
pub async fn resolve_complaint(
    store: Extension<Arc<Store>>,
    body: Bytes,
) -> Result<Json<Complaint>, ApiError> {
    let request: ComplaintRequest = decode(&body)?;
    let user = authenticate(store.users(), &request.secret_code)?;

    if !is_admin(&user) {
        warn!(user_id = %user.id, "Non-admin tried to resolve a complaint");
        return Err(ApiError::AccessDenied(
            "Only administrators can resolve complaints",
        ));
    }

    let complaint = store.complaints().mark_resolved(&request.complaint_id)?;
    info!(complaint_id = %complaint.id, admin_id = %user.id, "Complaint resolved");

    Ok(Json(complaint))
}
