use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;

use serde::Deserialize;
use contacts_core::error::{ContactsError, Result};
use contacts_core::ApiVersion;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub versioning: VersioningSection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub policies: Vec<PolicyConfig>,

    /// Policies bound to every published operation.
    #[serde(default)]
    pub global_policies: Vec<String>,

    /// Extra resource-level bindings, keyed by resource name.
    #[serde(default)]
    pub resource_policies: BTreeMap<String, Vec<String>>,

    /// Policy name -> scope label shown in generated docs.
    #[serde(default)]
    pub scope_labels: BTreeMap<String, String>,

    #[serde(default)]
    pub docs: DocsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ContactsError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.versioning.validate()?;
        self.auth.validate()?;
        for p in &self.policies {
            p.validate()?;
        }
        for (policy, label) in &self.scope_labels {
            if label.trim().is_empty() {
                return Err(ContactsError::BadRequest(format!(
                    "scope_labels.{policy} must not be empty"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ContactsError::BadRequest(format!(
                "gateway.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersioningSection {
    /// Vendor media types recognized in `Accept` (e.g. `application/vnd.demo`).
    #[serde(default = "default_media_types")]
    pub media_types: Vec<String>,

    /// Version served when the caller does not ask for one.
    #[serde(default = "default_api_version")]
    pub default_version: String,

    /// Emit `api-supported-versions` on versioned responses.
    #[serde(default = "default_true")]
    pub report_versions: bool,
}

impl Default for VersioningSection {
    fn default() -> Self {
        Self {
            media_types: default_media_types(),
            default_version: default_api_version(),
            report_versions: true,
        }
    }
}

impl VersioningSection {
    pub fn validate(&self) -> Result<()> {
        if self.media_types.is_empty() {
            return Err(ContactsError::BadRequest(
                "versioning.media_types must not be empty".into(),
            ));
        }
        if self.media_types.iter().any(|m| m.trim().is_empty()) {
            return Err(ContactsError::BadRequest(
                "versioning.media_types entries must not be blank".into(),
            ));
        }
        self.default_api_version()?;
        Ok(())
    }

    pub fn default_api_version(&self) -> Result<ApiVersion> {
        self.default_version.parse().map_err(|_| {
            ContactsError::BadRequest(format!(
                "versioning.default_version is not a valid api version: {}",
                self.default_version
            ))
        })
    }
}

fn default_media_types() -> Vec<String> {
    vec!["application/vnd.demo".into()]
}
fn default_api_version() -> String {
    "1".into()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Scheme tag attached to every identity the validators produce.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default)]
    pub jwt: Option<JwtConfig>,

    #[serde(default)]
    pub static_tokens: Vec<StaticTokenConfig>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            jwt: None,
            static_tokens: Vec::new(),
        }
    }
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        if self.scheme.trim().is_empty() {
            return Err(ContactsError::BadRequest("auth.scheme must not be empty".into()));
        }
        if let Some(jwt) = &self.jwt {
            if jwt.secret.is_empty() {
                return Err(ContactsError::BadRequest(
                    "auth.jwt.secret must not be empty".into(),
                ));
            }
        }

        let mut seen = HashSet::new();
        for t in &self.static_tokens {
            if t.token.trim().is_empty() || t.subject.trim().is_empty() {
                return Err(ContactsError::BadRequest(
                    "auth.static_tokens entries need a token and a subject".into(),
                ));
            }
            if !seen.insert(t.token.as_str()) {
                return Err(ContactsError::BadRequest(format!(
                    "auth.static_tokens has a duplicate token for subject {}",
                    t.subject
                )));
            }
        }
        Ok(())
    }
}

fn default_scheme() -> String {
    "Bearer".into()
}

/// HS256 bearer token validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

fn default_leeway_secs() -> u64 {
    30
}

/// Fixed development credential.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticTokenConfig {
    pub token: String,
    pub subject: String,
    #[serde(default)]
    pub claims: Vec<ClaimConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClaimConfig {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    pub name: String,
    pub claim: ClaimConfig,
    #[serde(default)]
    pub scheme: Option<String>,
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ContactsError::BadRequest("policy name must not be empty".into()));
        }
        if self.claim.claim_type.trim().is_empty() {
            return Err(ContactsError::BadRequest(format!(
                "policy {} has an empty claim type",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Scope label -> human description.
    #[serde(default = "default_scopes")]
    pub scopes: BTreeMap<String, String>,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            token_url: default_token_url(),
            scopes: default_scopes(),
        }
    }
}

fn default_title() -> String {
    "Contacts API".into()
}
fn default_description() -> String {
    "Used to exchange contact information".into()
}
fn default_token_url() -> String {
    "http://localhost:5000/openid/connect/token".into()
}
fn default_scopes() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("read".to_string(), "Read access".to_string()),
        ("write".to_string(), "Write access".to_string()),
    ])
}
