//! Axum router wiring.
//!
//! Resource routes get the request pipeline as route layers, so they only run
//! for matched routes and `MatchedPath` is available. Operational endpoints
//! sit outside the pipeline.

use axum::middleware::from_fn_with_state;
use axum::{routing::get, Router};

use crate::transport::pipeline;
use crate::{app_state::AppState, contacts, ops};

pub fn build_router(state: AppState) -> Router {
    // last route_layer runs first
    let api = contacts::routes()
        .route_layer(from_fn_with_state(state.clone(), pipeline::authorize))
        .route_layer(from_fn_with_state(state.clone(), pipeline::negotiate_version))
        .route_layer(from_fn_with_state(state.clone(), pipeline::authenticate));

    Router::new()
        .merge(api)
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/swagger/security.json", get(ops::security_report))
        .route("/swagger/:doc/swagger.json", get(ops::swagger_doc))
        .fallback(ops::not_found)
        .with_state(state)
}
