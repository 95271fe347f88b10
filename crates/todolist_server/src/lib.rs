//! HTTP front end for the to-do list service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod views;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::time::Instant;

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::today).post(handlers::add_item))
        .route("/about", get(handlers::about))
        .route("/delete", post(handlers::delete_item))
        .route("/:list_name", get(handlers::custom_list))
        .layer(from_fn(request_log_middleware))
        .with_state(state)
}

async fn request_log_middleware(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!(
        "event=http_request module=http method={} path={} http_status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
