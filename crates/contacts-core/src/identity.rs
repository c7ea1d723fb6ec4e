//! Validated caller identity.
//!
//! An `Identity` is produced by a credential validator and is immutable for
//! the rest of the request. Claims form a multiset: a token granting two
//! scopes carries two `scope` claims.

use serde::Serialize;

/// Key/value fact about an identity (e.g. `scope=read`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    subject: String,
    scheme: String,
    claims: Vec<Claim>,
}

impl Identity {
    pub fn new(subject: impl Into<String>, scheme: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            subject: subject.into(),
            scheme: scheme.into(),
            claims,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Authentication scheme that produced this identity (e.g. `Bearer`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// True if at least one claim has this type and exactly this value.
    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && c.value == value)
    }

    /// All values carried under one claim type, in token order.
    pub fn claim_values<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.claims
            .iter()
            .filter(move |c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }
}
