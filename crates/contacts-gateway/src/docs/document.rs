//! Per-version API description documents (Swagger 2.0 shaped JSON).

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::config::DocsSection;
use crate::dispatch::OperationTable;

use super::scopes::{ScopeMap, SECURED_RESPONSES};

/// Rendered documents keyed by name (`v1`, `v2`, ...).
#[derive(Debug, Clone, Default)]
pub struct ApiDocuments {
    docs: BTreeMap<String, Value>,
}

impl ApiDocuments {
    /// Render one document per published version.
    ///
    /// `vendor_type` is the first recognized vendor media type; when present
    /// each operation advertises the versioned form of it in `produces`.
    pub fn build(
        cfg: &DocsSection,
        vendor_type: Option<&str>,
        table: &OperationTable,
        scopes: &ScopeMap,
    ) -> Self {
        let mut docs = BTreeMap::new();

        for version in table.api_versions() {
            let name = format!("v{version}");

            let mut produces = vec!["application/json".to_string()];
            if let Some(vendor) = vendor_type {
                produces.insert(0, format!("{vendor}-v{version}+json"));
            }

            let mut paths = Map::new();
            for op in table.iter().filter(|op| op.key.version == version) {
                let security = scopes.get(&op.key).cloned().unwrap_or_default();

                let mut responses = Map::new();
                for (code, description) in &op.responses {
                    responses.insert(code.to_string(), json!({ "description": description }));
                }

                let mut operation = json!({
                    "operationId": op.id,
                    "summary": op.summary,
                    "tags": [op.resource],
                    "produces": produces,
                });

                if security.is_secured() {
                    for (code, description) in SECURED_RESPONSES {
                        responses.insert(code.to_string(), json!({ "description": description }));
                    }
                    operation["security"] = json!([{ "oauth2": security.required_scopes }]);
                }
                operation["responses"] = Value::Object(responses);

                let entry = paths
                    .entry(openapi_path(&op.key.path))
                    .or_insert_with(|| json!({}));
                entry[op.key.verb.doc_key()] = operation;
            }

            let doc = json!({
                "swagger": "2.0",
                "info": {
                    "title": cfg.title,
                    "version": name,
                    "description": cfg.description,
                },
                "securityDefinitions": {
                    "oauth2": {
                        "type": "oauth2",
                        "flow": "application",
                        "tokenUrl": cfg.token_url,
                        "scopes": cfg.scopes,
                    }
                },
                "paths": paths,
            });
            docs.insert(name, doc);
        }

        Self { docs }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.docs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }
}

/// Router path template (`/contacts/:id`) to docs form (`/contacts/{id}`).
pub fn openapi_path(path: &str) -> String {
    path.split('/')
        .map(|seg| match seg.strip_prefix(':') {
            Some(param) => format!("{{{param}}}"),
            None => seg.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
