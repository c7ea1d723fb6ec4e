use std::fmt;

use axum::http::Method;
use contacts_core::ApiVersion;

/// HTTP verbs an operation can be published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// `HEAD` is served by the `GET` operation.
    pub fn from_method(method: &Method) -> Option<Self> {
        const VERBS: [(Method, Verb); 6] = [
            (Method::GET, Verb::Get),
            (Method::HEAD, Verb::Get),
            (Method::POST, Verb::Post),
            (Method::PUT, Verb::Put),
            (Method::PATCH, Verb::Patch),
            (Method::DELETE, Verb::Delete),
        ];
        VERBS.iter().find(|(m, _)| m == method).map(|(_, v)| *v)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    /// Lower-case form used as the key in generated docs.
    pub fn doc_key(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a published operation: (path template, verb, version).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationKey {
    pub path: String,
    pub verb: Verb,
    pub version: ApiVersion,
}

impl OperationKey {
    pub fn new(verb: Verb, path: impl Into<String>, version: ApiVersion) -> Self {
        Self {
            path: path.into(),
            verb,
            version,
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} v{}", self.verb, self.path, self.version)
    }
}

/// Declared operation. `path` uses router syntax (`/contacts/:id`).
#[derive(Debug, Clone)]
pub struct OperationDef {
    pub id: &'static str,
    pub verb: Verb,
    pub path: &'static str,
    pub summary: &'static str,
    pub versions: Vec<ApiVersion>,
    pub policies: Vec<String>,
    pub responses: Vec<(u16, &'static str)>,
}

impl OperationDef {
    pub fn new(id: &'static str, verb: Verb, path: &'static str) -> Self {
        Self {
            id,
            verb,
            path,
            summary: "",
            versions: Vec::new(),
            policies: Vec::new(),
            responses: Vec::new(),
        }
    }

    pub fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }

    pub fn versions<I: IntoIterator<Item = ApiVersion>>(mut self, versions: I) -> Self {
        self.versions.extend(versions);
        self
    }

    pub fn policy(mut self, name: impl Into<String>) -> Self {
        self.policies.push(name.into());
        self
    }

    pub fn response(mut self, status: u16, description: &'static str) -> Self {
        self.responses.push((status, description));
        self
    }
}

/// Declared resource: a group of operations sharing resource-level policies.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    pub name: &'static str,
    pub policies: Vec<String>,
    pub operations: Vec<OperationDef>,
}

impl ResourceDef {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            policies: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn policy(mut self, name: impl Into<String>) -> Self {
        self.policies.push(name.into());
        self
    }

    pub fn operation(mut self, op: OperationDef) -> Self {
        self.operations.push(op);
        self
    }
}
