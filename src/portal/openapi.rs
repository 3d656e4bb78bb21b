use super::handlers::{
    complaints, health, login, register,
    types::{
        ComplaintRequest, CredentialRequest, ErrorResponse, LoginResponse, RegisterRequest,
        RegisterResponse, SubmitComplaintRequest,
    },
};
use crate::store::{Complaint, ComplaintStatus};
use utoipa::OpenApi;

// Add new endpoints to `paths` so they show up in the generated document.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        register::register,
        login::login,
        complaints::submit_complaint,
        complaints::complaints_for_user,
        complaints::complaints_for_admin,
        complaints::view_complaint,
        complaints::resolve_complaint,
    ),
    components(schemas(
        Complaint,
        ComplaintStatus,
        ComplaintRequest,
        CredentialRequest,
        ErrorResponse,
        LoginResponse,
        RegisterRequest,
        RegisterResponse,
        SubmitComplaintRequest,
        health::Health,
    )),
    tags(
        (name = "users", description = "Registration and secret-code login"),
        (name = "complaints", description = "Submitting and reading complaints"),
        (name = "admin", description = "Administrator-only complaint management"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
