//! Shared application state for the contacts gateway.
//!
//! Everything the request path reads is assembled here before the listener
//! binds: the policy registry, the operation table, version negotiation
//! settings, credential validators, and the generated docs. Startup errors are
//! returned, never panicked on; a `Configuration` error means the process must
//! not serve.

use std::sync::Arc;

use contacts_core::error::Result;
use contacts_core::negotiation::VersionResolver;
use contacts_core::ApiVersion;

use crate::auth::Authenticator;
use crate::config::GatewayConfig;
use crate::contacts::{self, ContactStore, InMemoryContactStore};
use crate::dispatch::{OperationTable, ResourceDef};
use crate::docs::{aggregate, ApiDocuments, ScopeMap};
use crate::obs::GatewayMetrics;
use crate::policy::PolicyRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<dyn ContactStore>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    operations: OperationTable,
    resolver: VersionResolver,
    default_version: ApiVersion,
    authenticator: Authenticator,
    security: ScopeMap,
    documents: ApiDocuments,
}

impl AppState {
    /// Build application state with the seeded in-memory store.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(InMemoryContactStore::seeded()))
    }

    pub fn with_store(cfg: GatewayConfig, store: Arc<dyn ContactStore>) -> Result<Self> {
        Self::build(cfg, store, vec![contacts::resource()])
    }

    /// Build from explicit resource declarations.
    pub fn build(
        cfg: GatewayConfig,
        store: Arc<dyn ContactStore>,
        resources: Vec<ResourceDef>,
    ) -> Result<Self> {
        // 1) Policies, then bindings resolved against them
        let registry = PolicyRegistry::from_config(&cfg.policies)?;
        let operations = OperationTable::build(
            &registry,
            &cfg.global_policies,
            &resources,
            &cfg.resource_policies,
        )?;

        // 2) Version negotiation
        let resolver = VersionResolver::new(&cfg.versioning.media_types);
        let default_version = cfg.versioning.default_api_version()?;

        // 3) Credentials
        let authenticator = Authenticator::from_config(&cfg.auth);

        sanity_check(&cfg, &registry, &operations, default_version, &authenticator);

        // 4) Docs (single shot)
        let security = aggregate(&operations, &cfg.scope_labels);
        let documents = ApiDocuments::build(
            &cfg.docs,
            resolver.vendor_types().first().map(String::as_str),
            &operations,
            &security,
        );

        tracing::info!(
            policies = registry.len(),
            operations = operations.len(),
            validators = ?authenticator.validator_names(),
            default_version = %default_version,
            "application state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                operations,
                resolver,
                default_version,
                authenticator,
                security,
                documents,
            }),
            store,
            metrics: Arc::new(GatewayMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn operations(&self) -> &OperationTable {
        &self.inner.operations
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.inner.resolver
    }

    pub fn default_version(&self) -> ApiVersion {
        self.inner.default_version
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }

    pub fn security(&self) -> &ScopeMap {
        &self.inner.security
    }

    pub fn documents(&self) -> &ApiDocuments {
        &self.inner.documents
    }

    pub fn store(&self) -> Arc<dyn ContactStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// Non-fatal wiring mismatches, reported once at startup.
fn sanity_check(
    cfg: &GatewayConfig,
    registry: &PolicyRegistry,
    operations: &OperationTable,
    default_version: ApiVersion,
    authenticator: &Authenticator,
) {
    for (policy, label) in &cfg.scope_labels {
        if !registry.contains(policy) {
            tracing::warn!(%policy, %label, "scope_labels refers to unregistered policy");
        }
        if !cfg.docs.scopes.contains_key(label) {
            tracing::warn!(%policy, %label, "scope label has no description in docs.scopes");
        }
    }

    if !operations.api_versions().contains(&default_version) {
        tracing::warn!(%default_version, "default version is not published by any operation");
    }

    if authenticator.validator_names().is_empty() {
        tracing::warn!("no credential validator configured; every caller is anonymous");
    }
}
