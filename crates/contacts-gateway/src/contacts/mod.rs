//! Contacts resource.
//!
//! Declares the published operations (with their operation-level policy
//! bindings) and the matching axum routes. The two must agree on verb and
//! path; the version and authorization layers look operations up by the
//! route's matched path.

pub mod handlers;
pub mod model;
pub mod store;

use axum::routing::get;
use axum::Router;
use contacts_core::ApiVersion;

use crate::app_state::AppState;
use crate::dispatch::{OperationDef, ResourceDef, Verb};

pub use model::{Contact, ContactV2};
pub use store::{ContactStore, InMemoryContactStore};

pub const RESOURCE: &str = "contacts";
pub const COLLECTION_PATH: &str = "/contacts";
pub const ITEM_PATH: &str = "/contacts/:id";

/// Policy guarding every mutating operation.
pub const WRITE_POLICY: &str = "WritePolicy";

const V1: ApiVersion = ApiVersion::major(1);
const V2: ApiVersion = ApiVersion::major(2);

pub fn resource() -> ResourceDef {
    ResourceDef::new(RESOURCE)
        .operation(
            OperationDef::new("list_contacts", Verb::Get, COLLECTION_PATH)
                .summary("Fetch all available contacts")
                .versions([V1])
                .response(200, "Contacts returned (could be an empty array)"),
        )
        .operation(
            OperationDef::new("get_contact", Verb::Get, ITEM_PATH)
                .summary("Fetch a single contact by its ID")
                .versions([V1, V2])
                .response(200, "A contact resource")
                .response(404, "No contact with a given ID exists"),
        )
        .operation(
            OperationDef::new("create_contact", Verb::Post, COLLECTION_PATH)
                .summary("Create a new contact")
                .versions([V1])
                .policy(WRITE_POLICY)
                .response(201, "Contact created successfully")
                .response(400, "The payload of the request was invalid"),
        )
        .operation(
            OperationDef::new("update_contact", Verb::Put, ITEM_PATH)
                .summary("Update an existing contact. All of the properties will be overwritten")
                .versions([V1])
                .policy(WRITE_POLICY)
                .response(204, "Contact updated correctly")
                .response(400, "The payload of the request was invalid")
                .response(404, "No contact with a given ID exists"),
        )
        .operation(
            OperationDef::new("delete_contact", Verb::Delete, ITEM_PATH)
                .summary("Remove an existing contact by its ID")
                .versions([V1])
                .policy(WRITE_POLICY)
                .response(204, "Contact successfully removed")
                .response(404, "No contact with a given ID exists"),
        )
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            COLLECTION_PATH,
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            ITEM_PATH,
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
}
