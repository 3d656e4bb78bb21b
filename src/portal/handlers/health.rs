use crate::{GIT_COMMIT_HASH, store::Store};
use axum::{
    extract::Extension,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    users: usize,
    complaints: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Stores are readable", body = Health),
        (status = 503, description = "A store lock is poisoned", body = Health)
    ),
    tag = "health"
)]
// axum handler for health
pub async fn health(store: Extension<Arc<Store>>) -> impl IntoResponse {
    let users = store.users().len();
    let complaints = store.complaints().len();

    let status = match (&users, &complaints) {
        (Ok(_), Ok(_)) => StatusCode::OK,
        (Err(err), _) | (_, Err(err)) => {
            error!("Store is unhealthy: {err}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users: users.unwrap_or_default(),
        complaints: complaints.unwrap_or_default(),
    };

    let short_hash = if health.commit.len() > 7 {
        health.commit.get(0..7).unwrap_or("")
    } else {
        ""
    };

    // Create headers using the map method
    let headers = format!("{}:{}:{}", health.name, health.version, short_hash)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();

            headers.insert("X-App", x_app_header_value);

            headers
        })
        .map_err(|err| {
            error!("Failed to parse X-App header: {}", err);
        });

    // Unwrap the headers or provide a default value (empty headers) in case of an error
    let headers = headers.unwrap_or_else(|()| HeaderMap::new());

    (status, headers, Json(health))
}
