//! Fixed development tokens from configuration.

use std::collections::HashMap;

use contacts_core::{Claim, Identity};

use super::{CredentialError, CredentialValidator};
use crate::config::StaticTokenConfig;

pub struct StaticTokenValidator {
    scheme: String,
    tokens: HashMap<String, (String, Vec<Claim>)>,
}

impl StaticTokenValidator {
    pub fn new(scheme: &str, tokens: &[StaticTokenConfig]) -> Self {
        let tokens = tokens
            .iter()
            .map(|t| {
                let claims = t
                    .claims
                    .iter()
                    .map(|c| Claim::new(c.claim_type.clone(), c.value.clone()))
                    .collect();
                (t.token.clone(), (t.subject.clone(), claims))
            })
            .collect();

        Self {
            scheme: scheme.to_string(),
            tokens,
        }
    }
}

impl CredentialValidator for StaticTokenValidator {
    fn name(&self) -> &'static str {
        "static"
    }

    fn validate(&self, token: &str) -> Result<Identity, CredentialError> {
        let (subject, claims) = self.tokens.get(token).ok_or(CredentialError::Unrecognized)?;
        Ok(Identity::new(subject.clone(), self.scheme.clone(), claims.clone()))
    }
}
