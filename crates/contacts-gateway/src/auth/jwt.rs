//! HS256 JWT validation.
//!
//! Signature, `exp`, optional `iss`/`aud` are checked by `jsonwebtoken`. The
//! payload is then flattened into claims: `sub` becomes the subject, a
//! space-delimited `scope` string becomes one `scope` claim per entry, arrays
//! become one claim per element, and scalar values become a single claim.
//! Registered time/identity claims are not copied.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use contacts_core::{Claim, Identity};

use super::{CredentialError, CredentialValidator};
use crate::config::JwtConfig;

const REGISTERED: [&str; 7] = ["sub", "iss", "aud", "exp", "nbf", "iat", "jti"];

pub struct JwtValidator {
    scheme: String,
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(scheme: &str, cfg: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = cfg.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &cfg.issuer {
            validation.set_issuer(std::slice::from_ref(issuer));
        }
        match &cfg.audience {
            Some(audience) => validation.set_audience(std::slice::from_ref(audience)),
            None => validation.validate_aud = false,
        }

        Self {
            scheme: scheme.to_string(),
            key: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation,
        }
    }
}

impl CredentialValidator for JwtValidator {
    fn name(&self) -> &'static str {
        "jwt"
    }

    fn validate(&self, token: &str) -> Result<Identity, CredentialError> {
        // Not JWT-shaped: leave it to other validators.
        if decode_header(token).is_err() {
            return Err(CredentialError::Unrecognized);
        }

        let decoded = decode::<Value>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::Expired,
            ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
            ErrorKind::InvalidIssuer => CredentialError::InvalidClaims("issuer".into()),
            ErrorKind::InvalidAudience => CredentialError::InvalidClaims("audience".into()),
            ErrorKind::MissingRequiredClaim(c) => CredentialError::InvalidClaims(format!("missing {c}")),
            ErrorKind::ImmatureSignature => CredentialError::InvalidClaims("not yet valid".into()),
            _ => CredentialError::Malformed(e.to_string()),
        })?;

        let Value::Object(payload) = decoded.claims else {
            return Err(CredentialError::Malformed("payload is not an object".into()));
        };

        let subject = payload
            .get("sub")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CredentialError::InvalidClaims("sub must be a non-empty string".into()))?
            .to_string();

        let mut claims = Vec::new();
        for (name, value) in &payload {
            if REGISTERED.contains(&name.as_str()) {
                continue;
            }
            flatten_claim(name, value, &mut claims);
        }

        Ok(Identity::new(subject, self.scheme.clone(), claims))
    }
}

fn flatten_claim(name: &str, value: &Value, out: &mut Vec<Claim>) {
    match value {
        Value::String(s) if name == "scope" => {
            out.extend(s.split_whitespace().map(|v| Claim::new(name, v)));
        }
        Value::String(s) => out.push(Claim::new(name, s.as_str())),
        Value::Bool(_) | Value::Number(_) => out.push(Claim::new(name, value.to_string())),
        Value::Array(items) => {
            for item in items {
                flatten_claim(name, item, out);
            }
        }
        Value::Null | Value::Object(_) => {}
    }
}
