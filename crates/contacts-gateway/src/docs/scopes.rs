//! Policy-to-scope aggregation.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use contacts_core::ApiVersion;

use crate::dispatch::{OperationKey, OperationTable};

/// Responses every secured operation may answer with.
pub const SECURED_RESPONSES: [(u16, &str); 2] = [(401, "Unauthorized"), (403, "Forbidden")];

/// Security metadata for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRequirement {
    pub required_scopes: BTreeSet<String>,
    pub possible_responses: Vec<u16>,
}

impl SecurityRequirement {
    fn from_scopes(required_scopes: BTreeSet<String>) -> Self {
        let possible_responses = if required_scopes.is_empty() {
            Vec::new()
        } else {
            SECURED_RESPONSES.iter().map(|(code, _)| *code).collect()
        };
        Self {
            required_scopes,
            possible_responses,
        }
    }

    pub fn is_secured(&self) -> bool {
        !self.required_scopes.is_empty()
    }
}

/// Flattened row of the security report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSecurity<'a> {
    pub operation_id: &'a str,
    pub method: &'a str,
    pub path: String,
    pub version: ApiVersion,
    #[serde(flatten)]
    pub security: &'a SecurityRequirement,
}

/// Operation -> required scope labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeMap {
    entries: BTreeMap<OperationKey, (&'static str, SecurityRequirement)>,
}

impl ScopeMap {
    pub fn get(&self, key: &OperationKey) -> Option<&SecurityRequirement> {
        self.entries.get(key).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OperationKey, &SecurityRequirement)> {
        self.entries.iter().map(|(k, (_, s))| (k, s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializable per-operation report, in key order.
    pub fn report(&self) -> Vec<OperationSecurity<'_>> {
        self.entries
            .iter()
            .map(|(key, (id, security))| OperationSecurity {
                operation_id: *id,
                method: key.verb.as_str(),
                path: super::openapi_path(&key.path),
                version: key.version,
                security,
            })
            .collect()
    }
}

/// Map every operation's bound policies to scope labels.
///
/// Policies without a label are skipped. Pure and deterministic: the same
/// table and labels always yield an equal `ScopeMap`.
pub fn aggregate(table: &OperationTable, labels: &BTreeMap<String, String>) -> ScopeMap {
    let entries = table
        .iter()
        .map(|op| {
            let scopes: BTreeSet<String> = op
                .policy_names()
                .filter_map(|name| labels.get(name).cloned())
                .collect();
            (op.key.clone(), (op.id, SecurityRequirement::from_scopes(scopes)))
        })
        .collect();

    ScopeMap { entries }
}
