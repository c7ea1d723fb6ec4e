//! Request authorization gate.
//!
//! Evaluates every policy bound to the matched operation against the caller.
//! Runs synchronously inside the request pipeline and has no side effects.

use std::sync::Arc;

use contacts_core::{ContactsError, Identity};

use super::registry::Policy;

/// Decision from gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny(Denial),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Why a request was stopped at the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No identity, but the operation has bound policies.
    Unauthenticated,
    /// Identity authenticated with a scheme the policy does not accept.
    SchemeMismatch { policy: String, required: String },
    /// Identity lacks the claim the policy requires.
    MissingClaim { policy: String },
}

impl Denial {
    /// Metric / log label.
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::Unauthenticated => "unauthenticated",
            Denial::SchemeMismatch { .. } => "scheme_mismatch",
            Denial::MissingClaim { .. } => "missing_claim",
        }
    }

    pub fn policy(&self) -> Option<&str> {
        match self {
            Denial::Unauthenticated => None,
            Denial::SchemeMismatch { policy, .. } | Denial::MissingClaim { policy } => Some(policy),
        }
    }
}

impl From<Denial> for ContactsError {
    fn from(d: Denial) -> Self {
        match d {
            // wrong scheme answers 401, same as no identity
            Denial::Unauthenticated | Denial::SchemeMismatch { .. } => ContactsError::Unauthenticated,
            Denial::MissingClaim { policy } => ContactsError::Forbidden(policy),
        }
    }
}

/// Evaluate `policies` (AND) against the caller.
///
/// - no policies: allow, even without an identity;
/// - no identity: `Unauthenticated`;
/// - scheme requirements of all policies are checked before any claim;
/// - first policy whose claim is missing: `MissingClaim`.
pub fn evaluate(caller: Option<&Identity>, policies: &[Arc<Policy>]) -> GateDecision {
    if policies.is_empty() {
        return GateDecision::Allow;
    }

    let Some(identity) = caller else {
        return GateDecision::Deny(Denial::Unauthenticated);
    };

    if let Some(p) = policies.iter().find(|p| !p.accepts_scheme(identity)) {
        return GateDecision::Deny(Denial::SchemeMismatch {
            policy: p.name().to_string(),
            required: p.scheme().unwrap_or_default().to_string(),
        });
    }

    if let Some(p) = policies.iter().find(|p| !p.is_satisfied_by(identity)) {
        return GateDecision::Deny(Denial::MissingClaim {
            policy: p.name().to_string(),
        });
    }

    GateDecision::Allow
}
