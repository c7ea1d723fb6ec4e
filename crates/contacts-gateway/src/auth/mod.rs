//! Bearer credential validation.
//!
//! Turns an `Authorization: Bearer ...` header into an `Identity`. Validators
//! are tried in configuration order (static development tokens first, then
//! JWT); the first one that recognizes the token decides. A missing or
//! rejected credential never fails the request here: the caller simply stays
//! anonymous and the authorization gate decides what that means for the
//! matched operation.

pub mod jwt;
pub mod static_tokens;

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use contacts_core::Identity;
use thiserror::Error;

use crate::config::AuthSection;

pub use jwt::JwtValidator;
pub use static_tokens::StaticTokenValidator;

/// Why a presented credential was not accepted.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Validator does not know this token; the next one may.
    #[error("token not recognized")]
    Unrecognized,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid claims: {0}")]
    InvalidClaims(String),
}

impl CredentialError {
    /// Metric label.
    pub fn reason(&self) -> &'static str {
        match self {
            CredentialError::Unrecognized => "unrecognized",
            CredentialError::Malformed(_) => "malformed",
            CredentialError::Expired => "expired",
            CredentialError::InvalidSignature => "invalid_signature",
            CredentialError::InvalidClaims(_) => "invalid_claims",
        }
    }
}

/// Validates an opaque bearer token into an identity.
pub trait CredentialValidator: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, token: &str) -> Result<Identity, CredentialError>;
}

/// Caller attached to each request by the authentication stage.
#[derive(Debug, Clone, Default)]
pub struct Caller(Option<Arc<Identity>>);

impl Caller {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self(Some(Arc::new(identity)))
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_deref()
    }

    pub fn subject(&self) -> &str {
        self.identity().map(Identity::subject).unwrap_or("-")
    }
}

/// Ordered chain of validators built from `auth` config.
pub struct Authenticator {
    validators: Vec<Box<dyn CredentialValidator>>,
}

impl Authenticator {
    pub fn new(validators: Vec<Box<dyn CredentialValidator>>) -> Self {
        Self { validators }
    }

    pub fn from_config(cfg: &AuthSection) -> Self {
        let mut validators: Vec<Box<dyn CredentialValidator>> = Vec::new();
        if !cfg.static_tokens.is_empty() {
            validators.push(Box::new(StaticTokenValidator::new(&cfg.scheme, &cfg.static_tokens)));
        }
        if let Some(jwt) = &cfg.jwt {
            validators.push(Box::new(JwtValidator::new(&cfg.scheme, jwt)));
        }
        Self::new(validators)
    }

    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// `Ok(None)` when no bearer credential was presented.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Option<Identity>, CredentialError> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };
        self.validate(token).map(Some)
    }

    pub fn validate(&self, token: &str) -> Result<Identity, CredentialError> {
        let mut last = CredentialError::Unrecognized;
        for v in &self.validators {
            match v.validate(token) {
                Ok(identity) => {
                    tracing::trace!(validator = v.name(), subject = identity.subject(), "credential accepted");
                    return Ok(identity);
                }
                Err(CredentialError::Unrecognized) => continue,
                Err(e) => last = e,
            }
        }
        Err(last)
    }
}

/// Token from `Authorization: Bearer <token>` (scheme case-insensitive).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
