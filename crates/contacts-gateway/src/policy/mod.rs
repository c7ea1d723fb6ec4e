//! Policy layer (named claim requirements and the request gate).
//!
//! Policies are compiled from configuration into a `PolicyRegistry` once at
//! startup. The operation table resolves every binding against it into a
//! shared `Arc<Policy>`; the registry itself is dropped after startup. The
//! gate only ever sees those resolved policies; it never looks names up.

pub mod gate;
pub mod registry;

pub use gate::{evaluate, Denial, GateDecision};
pub use registry::{Policy, PolicyRegistry};
