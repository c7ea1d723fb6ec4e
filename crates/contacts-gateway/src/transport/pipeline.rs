//! Request pipeline for versioned operations.
//!
//! Three route layers run in order before any handler:
//! 1) `authenticate`: bearer credential -> `Caller` extension
//! 2) `negotiate_version`: `Accept` -> `ApiVersion` extension
//! 3) `authorize`: bound policies of the matched operation vs. the caller
//!
//! A request rejected by one stage never reaches the next.

use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use contacts_core::{ApiVersion, ContactsError};

use crate::app_state::AppState;
use crate::auth::Caller;
use crate::dispatch::Verb;
use crate::policy::GateDecision;

use super::ApiError;

pub const SUPPORTED_VERSIONS_HEADER: HeaderName = HeaderName::from_static("api-supported-versions");

/// Attach the caller identity. Never rejects: an absent or refused
/// credential leaves the caller anonymous.
pub async fn authenticate(State(app): State<AppState>, mut req: Request, next: Next) -> Response {
    let caller = match app.authenticator().authenticate(req.headers()) {
        Ok(Some(identity)) => Caller::authenticated(identity),
        Ok(None) => Caller::anonymous(),
        Err(e) => {
            app.metrics()
                .credential_failures
                .inc(&[("reason", e.reason())]);
            tracing::debug!(error = %e, "bearer credential rejected");
            Caller::anonymous()
        }
    };

    req.extensions_mut().insert(caller);
    next.run(req).await
}

pub async fn negotiate_version(
    State(app): State<AppState>,
    matched: MatchedPath,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(verb) = Verb::from_method(req.method()) else {
        return Ok(next.run(req).await);
    };
    let path = matched.as_str();
    let metrics = app.metrics();

    // method not published on this path: the method router answers 405
    let Some(published) = app.operations().published_versions(verb, path) else {
        return Ok(next.run(req).await);
    };

    let accept = req
        .headers()
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok());

    let (version, source) = match app.resolver().resolve(accept) {
        Some(token) => match token.parse::<ApiVersion>() {
            Ok(v) => (v, "requested"),
            Err(e) => {
                metrics.version_rejections.inc(&[("reason", "invalid")]);
                tracing::debug!(%token, %path, "unparsable api version");
                return Err(e.into());
            }
        },
        None => (app.default_version(), "default"),
    };

    if !published.contains(&version) {
        metrics.version_rejections.inc(&[("reason", "unsupported")]);
        return Err(ContactsError::UnsupportedVersion(format!(
            "{verb} {path} is not published for version {version}"
        ))
        .into());
    }

    let supported = app.cfg().versioning.report_versions.then(|| {
        published
            .iter()
            .map(ApiVersion::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    });

    let version_label = version.to_string();
    metrics
        .requests
        .inc(&[("version", version_label.as_str()), ("source", source)]);

    req.extensions_mut().insert(version);
    let mut resp = next.run(req).await;

    if let Some(value) = supported.and_then(|s| HeaderValue::from_str(&s).ok()) {
        resp.headers_mut().insert(SUPPORTED_VERSIONS_HEADER, value);
    }
    Ok(resp)
}

pub async fn authorize(
    State(app): State<AppState>,
    matched: MatchedPath,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(verb) = Verb::from_method(req.method()) else {
        return Ok(next.run(req).await);
    };
    let path = matched.as_str();
    if app.operations().published_versions(verb, path).is_none() {
        return Ok(next.run(req).await);
    }

    let version = req
        .extensions()
        .get::<ApiVersion>()
        .copied()
        .unwrap_or_else(|| app.default_version());
    let caller = req.extensions().get::<Caller>().cloned().unwrap_or_default();

    let Some(op) = app.operations().get(verb, path, version) else {
        tracing::error!(%verb, %path, %version, "no bound operation for matched route");
        return Err(ContactsError::Internal("operation lookup failed".into()).into());
    };

    match op.authorize(caller.identity()) {
        GateDecision::Allow => {
            app.metrics()
                .gate_decisions
                .inc(&[("operation", op.id), ("outcome", "allow")]);
            Ok(next.run(req).await)
        }
        GateDecision::Deny(denial) => {
            app.metrics()
                .gate_decisions
                .inc(&[("operation", op.id), ("outcome", denial.reason())]);
            tracing::debug!(
                operation = op.id,
                policy = denial.policy().unwrap_or("-"),
                subject = caller.subject(),
                reason = denial.reason(),
                "request denied"
            );
            Err(ContactsError::from(denial).into())
        }
    }
}
