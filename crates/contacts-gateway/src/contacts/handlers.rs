//! Contacts HTTP handlers.
//!
//! Handlers only run after the pipeline accepted the request, so the
//! negotiated `ApiVersion` is always present as an extension.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::Value;

use contacts_core::{ApiVersion, ContactsError};

use super::model::{project, Contact};
use super::COLLECTION_PATH;
use crate::app_state::AppState;
use crate::transport::ApiError;

type Reply<T> = Result<T, ApiError>;

fn contact_id(path: Result<Path<u64>, PathRejection>) -> Reply<u64> {
    path.map(|Path(id)| id)
        .map_err(|e| ContactsError::BadRequest(format!("invalid contact id: {e}")).into())
}

fn payload(body: Result<Json<Contact>, JsonRejection>) -> Reply<Contact> {
    let Json(contact) =
        body.map_err(|e| ContactsError::BadRequest(format!("invalid contact payload: {e}")))?;
    contact.validate()?;
    Ok(contact)
}

pub async fn list_contacts(State(app): State<AppState>) -> Reply<Json<Vec<Contact>>> {
    Ok(Json(app.store().get_all().await?))
}

pub async fn get_contact(
    State(app): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    path: Result<Path<u64>, PathRejection>,
) -> Reply<Json<Value>> {
    let id = contact_id(path)?;
    let contact = app.store().get(id).await?;
    let body = project(&contact, version)
        .map_err(|e| ContactsError::Internal(format!("contact projection failed: {e}")))?;
    Ok(Json(body))
}

pub async fn create_contact(
    State(app): State<AppState>,
    body: Result<Json<Contact>, JsonRejection>,
) -> Reply<impl IntoResponse> {
    let contact = payload(body)?;
    let stored = app.store().add(contact).await?;
    tracing::info!(id = stored.contact_id, "contact created");

    let location = format!("{COLLECTION_PATH}/{}", stored.contact_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(stored)))
}

pub async fn update_contact(
    State(app): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<Contact>, JsonRejection>,
) -> Reply<StatusCode> {
    let id = contact_id(path)?;
    let mut contact = payload(body)?;
    contact.contact_id = id;
    app.store().update(contact).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_contact(
    State(app): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Reply<StatusCode> {
    let id = contact_id(path)?;
    app.store().delete(id).await?;
    tracing::info!(id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
