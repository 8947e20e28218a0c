use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_account::current_account;
use super::handlers::disable_account::disable_account;
use super::handlers::dummies::create_dummy;
use super::handlers::dummies::delete_dummy;
use super::handlers::dummies::get_dummy;
use super::handlers::dummies::list_dummies;
use super::handlers::dummies::replace_dummy;
use super::handlers::dummies::update_dummy;
use super::handlers::files::download_file;
use super::handlers::files::download_file_s3;
use super::handlers::files::list_files_s3;
use super::handlers::files::upload_file;
use super::handlers::files::upload_file_s3;
use super::handlers::login::login;
use super::handlers::register_account::register_account;
use super::middleware::require_account;
use crate::domain::account::service::AccountService;
use crate::domain::dummy::service::DummyService;
use crate::domain::files::service::FileService;

// Request body cap. Generous enough that the 2 MiB per-file limit in the
// file service fires first (with its own 413 body) for oversized uploads.
const MAX_REQUEST_BYTES: usize = 4 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub dummy_service: Arc<DummyService>,
    pub file_service: Arc<FileService>,
    pub s3_file_service: Option<Arc<FileService>>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/token", post(login))
        .route("/users", post(register_account))
        .route("/dummy", get(list_dummies))
        .route("/dummy/:dummy_id", get(get_dummy))
        .route("/files/upload", post(upload_file))
        .route("/files/download/:filename", get(download_file))
        .route("/files/s3/upload", post(upload_file_s3))
        .route("/files/s3/download/:filename", get(download_file_s3))
        .route("/files/s3", get(list_files_s3));

    let protected_routes = Router::new()
        .route("/users/me", get(current_account))
        .route("/users/me/disable", post(disable_account))
        .route("/dummy", post(create_dummy))
        .route(
            "/dummy/:dummy_id",
            put(replace_dummy).patch(update_dummy).delete(delete_dummy),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_account,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
