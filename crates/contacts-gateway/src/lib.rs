//! Contacts gateway library entry.
//!
//! Wires configuration, credential validation, the policy registry and gate,
//! version negotiation, the contacts resource, and generated docs into one
//! axum application. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod contacts;
pub mod dispatch;
pub mod docs;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod transport;
