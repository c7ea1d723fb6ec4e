//! Contacts core: transport-agnostic primitives shared by the API gateway.
//!
//! This crate hosts the pieces of the access layer that do not need an HTTP
//! stack: the error surface with its stable client codes, media-type version
//! negotiation, API version parsing, and the caller identity model. No HTTP
//! or async runtime dependency.
//!
//! # Guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Header values come straight from untrusted callers, so every parser in this
//! crate is total: malformed input yields an empty token or a `ContactsError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod identity;
pub mod negotiation;

/// Shared result type.
pub use error::{ContactsError, Result};
pub use identity::{Claim, Identity};
pub use negotiation::version::ApiVersion;
