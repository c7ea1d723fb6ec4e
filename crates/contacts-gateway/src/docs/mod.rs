//! Documentation generation.
//!
//! Runs once at startup, outside the request path: the scope aggregator walks
//! the operation table and the document builder renders one API description
//! per published version. Both outputs are immutable afterwards.

pub mod document;
pub mod scopes;

pub use document::{openapi_path, ApiDocuments};
pub use scopes::{aggregate, OperationSecurity, ScopeMap, SecurityRequirement};
