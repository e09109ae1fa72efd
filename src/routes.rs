// src/routes.rs
use std::sync::Arc;

use axum::body::Body;
use axum::routing::{get, post};
use axum::Router;
use http::Request;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::poll::PollStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/polls", get(handlers::index))
        .route("/polls/{question_id}", get(handlers::detail))
        .route("/polls/{question_id}/results", get(handlers::results))
        .route("/polls/{question_id}/vote", post(handlers::vote))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                id = %uuid::Uuid::new_v4(),
            )
        }))
        .with_state(state)
}
