//! Top-level facade crate for the contacts API.
//!
//! Re-exports the core primitives and the gateway library so users can depend
//! on a single crate.

pub mod core {
    pub use contacts_core::*;
}

pub mod gateway {
    pub use contacts_gateway::*;
}
