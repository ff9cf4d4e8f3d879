use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/v1/services", get(ops::services))
        .route("/v1/evaluate", post(ops::evaluate))
        .with_state(state)
}
