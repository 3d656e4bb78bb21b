//! HTTP surface of the complaint portal.
//!
//! Every endpoint is `POST`-only and carries its credential in the JSON body;
//! other methods hit the route fallback and get `method_not_allowed`. The
//! shared `Store` reaches handlers through an `Extension` layer.

pub mod auth;
pub mod handlers;
mod openapi;
pub mod validation;

pub use openapi::openapi;

use crate::{cli::globals::GlobalArgs, store::Store};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
};
use handlers::{complaints, health, login, method_not_allowed, register};
use secrecy::ExposeSecret;
use std::{net::IpAddr, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, error, info, info_span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the application router around `store`.
#[must_use]
pub fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route(
            "/register",
            post(register::register).fallback(method_not_allowed),
        )
        .route("/login", post(login::login).fallback(method_not_allowed))
        .route(
            "/submitComplaint",
            post(complaints::submit_complaint).fallback(method_not_allowed),
        )
        .route(
            "/getAllComplaintsForUser",
            post(complaints::complaints_for_user).fallback(method_not_allowed),
        )
        .route(
            "/getAllComplaintsForAdmin",
            post(complaints::complaints_for_admin).fallback(method_not_allowed),
        )
        .route(
            "/viewComplaint",
            post(complaints::view_complaint).fallback(method_not_allowed),
        )
        .route(
            "/resolveComplaint",
            post(complaints::resolve_complaint).fallback(method_not_allowed),
        )
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(store)),
        )
}

/// Start the server
/// # Errors
/// Return error if the administrator cannot be seeded or the listener fails
pub async fn new(address: IpAddr, port: u16, globals: &GlobalArgs) -> Result<()> {
    let store = Arc::new(Store::new());

    let admin = store
        .seed_admin(
            &globals.admin_name,
            &globals.admin_email,
            globals.admin_secret_code.expose_secret(),
        )
        .context("Failed to seed administrator account")?;
    info!(admin_id = %admin.id, "Administrator account initialized");

    let app = router(store);

    let addr = SocketAddr::new(address, port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}
