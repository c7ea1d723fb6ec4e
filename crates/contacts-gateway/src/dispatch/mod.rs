//! Operation registration and lookup.
//!
//! Resources declare their operations (verb, path, versions, policy names) as
//! plain structs. At startup those declarations are joined with the global and
//! resource-level bindings and resolved against the policy registry into an
//! `OperationTable`, which the request pipeline and the docs generator share.

pub mod operation;
pub mod table;

pub use operation::{OperationDef, OperationKey, ResourceDef, Verb};
pub use table::{BoundOperation, OperationTable};
