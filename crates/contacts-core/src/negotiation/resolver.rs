//! Accept-header API version resolver.

use super::media_type::{accept_candidates, between, VERSION_END, VERSION_START};

/// Resolves the requested API version from `Accept` media types.
///
/// Built once from the configured vendor media types (e.g.
/// `application/vnd.demo`) and then shared read-only.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    vendor_types: Vec<String>,
}

impl VersionResolver {
    pub fn new<I, S>(vendor_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vendor_types: vendor_types
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn vendor_types(&self) -> &[String] {
        &self.vendor_types
    }

    /// Version token requested by the caller, or `None` when unspecified.
    ///
    /// Only the first candidate matching a vendor type is inspected; a later
    /// candidate is never consulted even if the first yields no token.
    pub fn resolve<'a, I>(&self, accept_values: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let candidate = accept_candidates(accept_values).find(|c| self.is_vendor_type(c))?;

        let token = between(candidate, VERSION_START, VERSION_END);
        if token.is_empty() {
            tracing::trace!(media_type = %candidate, "vendor media type without version token");
            return None;
        }
        Some(token)
    }

    fn is_vendor_type(&self, media_type: &str) -> bool {
        let lowered = media_type.to_ascii_lowercase();
        self.vendor_types.iter().any(|v| lowered.contains(v.as_str()))
    }
}
