//! Named authorization policies.

use std::collections::HashMap;
use std::sync::Arc;

use contacts_core::error::{ContactsError, Result};
use contacts_core::{Claim, Identity};

use crate::config::PolicyConfig;

/// One required claim, optionally tied to an authentication scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    name: String,
    claim: Claim,
    scheme: Option<String>,
}

impl Policy {
    pub fn new(name: impl Into<String>, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            claim: Claim::new(claim_type, value),
            scheme: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Scheme check. Policies without a scheme accept any authenticated identity.
    pub fn accepts_scheme(&self, identity: &Identity) -> bool {
        match &self.scheme {
            None => true,
            Some(s) => s.eq_ignore_ascii_case(identity.scheme()),
        }
    }

    pub fn is_satisfied_by(&self, identity: &Identity) -> bool {
        identity.has_claim(&self.claim.claim_type, &self.claim.value)
    }
}

impl From<&PolicyConfig> for Policy {
    fn from(cfg: &PolicyConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            claim: Claim::new(cfg.claim.claim_type.clone(), cfg.claim.value.clone()),
            scheme: cfg.scheme.clone(),
        }
    }
}

/// Write-once registry of policies by name.
///
/// Populated during startup, then shared read-only. There is no removal and
/// no replacement: registering a name twice is a configuration error.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, Arc<Policy>>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(policies: &[PolicyConfig]) -> Result<Self> {
        let mut registry = Self::new();
        for p in policies {
            registry.register(Policy::from(p))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, policy: Policy) -> Result<()> {
        if self.policies.contains_key(policy.name()) {
            return Err(ContactsError::Configuration(format!(
                "policy registered twice: {}",
                policy.name()
            )));
        }
        self.policies.insert(policy.name().to_string(), Arc::new(policy));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<Policy>> {
        self.policies
            .get(name)
            .cloned()
            .ok_or_else(|| ContactsError::Configuration(format!("unknown policy: {name}")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
