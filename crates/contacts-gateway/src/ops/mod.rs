//! Operational and documentation HTTP endpoints (ungated, unversioned).
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format
//! - `/swagger/:doc/swagger.json` : generated API description per version
//! - `/swagger/security.json` : per-operation scope report

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use contacts_core::ContactsError;

use crate::app_state::AppState;
use crate::transport::ApiError;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(app): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        app.metrics().render(),
    )
        .into_response()
}

pub async fn swagger_doc(
    State(app): State<AppState>,
    Path(doc): Path<String>,
) -> Result<Json<Value>, ApiError> {
    app.documents()
        .get(&doc)
        .cloned()
        .map(Json)
        .ok_or_else(|| ContactsError::NotFound(format!("no api document named {doc}")).into())
}

pub async fn security_report(State(app): State<AppState>) -> Json<Value> {
    Json(json!({
        "documents": app.documents().names().collect::<Vec<_>>(),
        "operations": app.security().report(),
    }))
}

pub async fn not_found() -> ApiError {
    ContactsError::NotFound("no such route".into()).into()
}
