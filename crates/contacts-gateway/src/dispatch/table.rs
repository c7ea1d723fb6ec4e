use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use contacts_core::error::{ContactsError, Result};
use contacts_core::{ApiVersion, Identity};

use crate::policy::{evaluate, GateDecision, Policy, PolicyRegistry};

use super::operation::{OperationKey, ResourceDef, Verb};

/// Operation with its bindings resolved to registry policies.
#[derive(Debug, Clone)]
pub struct BoundOperation {
    pub key: OperationKey,
    pub id: &'static str,
    pub resource: &'static str,
    pub summary: &'static str,
    pub responses: Vec<(u16, &'static str)>,
    policies: Vec<Arc<Policy>>,
}

impl BoundOperation {
    /// Bound policies: global, then resource, then operation; unique by name.
    pub fn policies(&self) -> &[Arc<Policy>] {
        &self.policies
    }

    pub fn policy_names(&self) -> impl Iterator<Item = &str> {
        self.policies.iter().map(|p| p.name())
    }

    pub fn authorize(&self, caller: Option<&Identity>) -> GateDecision {
        evaluate(caller, &self.policies)
    }
}

/// Explicit operation -> policy binding table.
///
/// Construct once at startup, then share via Arc.
#[derive(Debug, Default)]
pub struct OperationTable {
    ops: BTreeMap<OperationKey, BoundOperation>,
    versions: HashMap<(Verb, String), Vec<ApiVersion>>,
}

impl OperationTable {
    /// Resolve every declared operation against `registry`.
    ///
    /// `resource_overrides` adds resource-level bindings from configuration;
    /// naming a resource that was not declared is a configuration error, as
    /// is any unknown policy name or an operation published twice.
    pub fn build(
        registry: &PolicyRegistry,
        global: &[String],
        resources: &[ResourceDef],
        resource_overrides: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self> {
        for name in resource_overrides.keys() {
            if !resources.iter().any(|r| r.name == name.as_str()) {
                return Err(ContactsError::Configuration(format!(
                    "resource_policies refers to unknown resource: {name}"
                )));
            }
        }

        let mut table = Self::default();

        for resource in resources {
            let overrides = resource_overrides
                .get(resource.name)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for op in &resource.operations {
                if op.versions.is_empty() {
                    return Err(ContactsError::Configuration(format!(
                        "operation {} is not published for any version",
                        op.id
                    )));
                }

                let names = global
                    .iter()
                    .chain(&resource.policies)
                    .chain(overrides)
                    .chain(&op.policies);
                let policies = resolve_unique(registry, names)?;

                for &version in &op.versions {
                    let key = OperationKey::new(op.verb, op.path, version);
                    if table.ops.contains_key(&key) {
                        return Err(ContactsError::Configuration(format!(
                            "operation published twice: {key}"
                        )));
                    }

                    table
                        .versions
                        .entry((op.verb, op.path.to_string()))
                        .or_default()
                        .push(version);

                    table.ops.insert(
                        key.clone(),
                        BoundOperation {
                            key,
                            id: op.id,
                            resource: resource.name,
                            summary: op.summary,
                            responses: op.responses.clone(),
                            policies: policies.clone(),
                        },
                    );
                }
            }
        }

        for versions in table.versions.values_mut() {
            versions.sort_unstable();
        }

        Ok(table)
    }

    pub fn get(&self, verb: Verb, path: &str, version: ApiVersion) -> Option<&BoundOperation> {
        self.ops.get(&OperationKey::new(verb, path, version))
    }

    /// Versions a (verb, path) pair is published for, ascending.
    pub fn published_versions(&self, verb: Verb, path: &str) -> Option<&[ApiVersion]> {
        self.versions
            .get(&(verb, path.to_string()))
            .map(Vec::as_slice)
    }

    /// Every version at least one operation is published for.
    pub fn api_versions(&self) -> BTreeSet<ApiVersion> {
        self.ops.keys().map(|k| k.version).collect()
    }

    /// All operations in key order (path, verb, version).
    pub fn iter(&self) -> impl Iterator<Item = &BoundOperation> {
        self.ops.values()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

fn resolve_unique<'a, I>(registry: &PolicyRegistry, names: I) -> Result<Vec<Arc<Policy>>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: Vec<Arc<Policy>> = Vec::new();
    for name in names {
        let policy = registry.lookup(name)?;
        if out.iter().any(|p| p.name() == policy.name()) {
            continue;
        }
        out.push(policy);
    }
    Ok(out)
}
