//! HTTP request pipeline.
//!
//! Three route layers run in front of every versioned handler, outermost
//! first: `authenticate` (bearer -> `Caller`), `negotiate_version`
//! (`Accept` -> `ApiVersion`), `authorize` (gate over the bound policies).
//! `reply` maps `ContactsError` onto HTTP responses.

pub mod pipeline;
pub mod reply;

pub use reply::ApiError;
