//! Content negotiation for API versions.
//!
//! Callers select a representation through the `Accept` header instead of the
//! URL: `application/vnd.demo-v2+json` asks for version `2`. The pieces are
//! layered leaf-first:
//! - `media_type`: delimiter extraction and `Accept` candidate splitting.
//! - `resolver`: picks the first recognized vendor type and pulls its token.
//! - `version`: parses a token into an ordered `ApiVersion`.
//!
//! Everything here is a pure function of its input; nothing is cached between
//! requests.

pub mod media_type;
pub mod resolver;
pub mod version;

pub use media_type::{accept_candidates, between};
pub use resolver::VersionResolver;
pub use version::ApiVersion;
