//! End-to-end request pipeline: authentication, version negotiation,
//! authorization, handlers, and the operational endpoints.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;


const V1_ACCEPT: &str = "application/vnd.demo-v1+json";
const V2_ACCEPT: &str = "application/vnd.demo-v2+json";

fn request(method: Method, uri: &str, token: Option<&str>, accept: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    if let Some(a) = accept {
        b = b.header(header::ACCEPT, a);
    }
    match body {
        Some(v) => b
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => b.body(Body::empty()).unwrap(),
    }
}

fn get(uri: &str, token: Option<&str>, accept: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, accept, None)
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn supported(resp: &Response) -> Option<&str> {
    resp.headers()
        .get("api-supported-versions")
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn list_uses_default_version() {
    let app = fixture::app();
    let resp = send(&app, get("/contacts", Some(fixture::READER), None)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(supported(&resp), Some("1"));
    let body = json_body(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["contactId"], 1);
    assert_eq!(items[0]["name"], "Filip W");
}

#[tokio::test]
async fn v2_projection_adds_cumulus_number() {
    let app = fixture::app();

    let resp = send(&app, get("/contacts/1", Some(fixture::READER), Some(V2_ACCEPT))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(supported(&resp), Some("1, 2"));
    let body = json_body(resp).await;
    assert_eq!(body["contactId"], 1);
    assert_eq!(body["city"], "Zurich");
    assert_eq!(body["cumulusNumber"], 12345678);

    let resp = send(&app, get("/contacts/1", Some(fixture::READER), Some(V1_ACCEPT))).await;
    let body = json_body(resp).await;
    assert!(body.get("cumulusNumber").is_none());
}

#[tokio::test]
async fn accept_list_with_other_types_still_negotiates() {
    let app = fixture::app();
    let accept = format!("text/html, {V2_ACCEPT};q=0.9, */*;q=0.1");
    let resp = send(&app, get("/contacts/2", Some(fixture::READER), Some(&accept))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["cumulusNumber"], 12345678);
}

#[tokio::test]
async fn version_errors_are_bad_requests() {
    let app = fixture::app();

    let resp = send(&app, get("/contacts", Some(fixture::READER), Some(V2_ACCEPT))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], "UNSUPPORTED_API_VERSION");

    let resp = send(
        &app,
        get("/contacts", Some(fixture::READER), Some("application/vnd.demo-vx+json")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], "INVALID_API_VERSION");
}

#[tokio::test]
async fn missing_identity_is_401_with_challenge() {
    let app = fixture::app();

    let resp = send(&app, get("/contacts", None, None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(json_body(resp).await["code"], "UNAUTHENTICATED");

    let resp = send(&app, get("/contacts", Some("garbage"), None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_claim_is_403() {
    let app = fixture::app();

    let resp = send(&app, get("/contacts", Some(fixture::NO_SCOPES), None)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "FORBIDDEN");
    assert!(body["msg"].as_str().unwrap().contains("ReadPolicy"));

    let new = json!({ "name": "New Person" });
    let resp = send(
        &app,
        request(Method::POST, "/contacts", Some(fixture::READER), None, Some(new)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(json_body(resp).await["msg"].as_str().unwrap().contains("WritePolicy"));
}

#[tokio::test]
async fn writer_manages_contacts() {
    let app = fixture::app();

    let new = json!({ "name": "Marcus Stroman", "city": "Toronto" });
    let resp = send(
        &app,
        request(Method::POST, "/contacts", Some(fixture::WRITER), None, Some(new)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/contacts/6");
    let created = json_body(resp).await;
    assert_eq!(created["contactId"], 6);

    let update = json!({ "name": "Marcus Stroman", "city": "New York" });
    let resp = send(
        &app,
        request(Method::PUT, "/contacts/6", Some(fixture::WRITER), None, Some(update)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, get("/contacts/6", Some(fixture::READER), None)).await;
    assert_eq!(json_body(resp).await["city"], "New York");

    let resp = send(
        &app,
        request(Method::DELETE, "/contacts/6", Some(fixture::WRITER), None, None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, get("/contacts/6", Some(fixture::READER), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn jwt_caller_is_authorized_by_scope() {
    let app = fixture::app();

    let token = fixture::jwt("carol", "read write");
    let new = json!({ "name": "Carol" });
    let resp = send(
        &app,
        request(Method::POST, "/contacts", Some(&token), None, Some(new)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let token = fixture::jwt("dave", "read");
    let resp = send(
        &app,
        request(Method::DELETE, "/contacts/1", Some(&token), None, None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_requests_after_the_gate() {
    let app = fixture::app();

    let resp = send(
        &app,
        request(Method::POST, "/contacts", Some(fixture::WRITER), None, Some(json!({ "name": " " }))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, get("/contacts/abc", Some(fixture::READER), None)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, get("/contacts/99", Some(fixture::READER), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["code"], "NOT_FOUND");

    let resp = send(
        &app,
        request(Method::PUT, "/contacts/99", Some(fixture::WRITER), None, Some(json!({ "name": "x" }))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn operational_endpoints_are_ungated() {
    let app = fixture::app();

    let resp = send(&app, get("/healthz", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, get("/swagger/v1/swagger.json", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await;
    assert_eq!(doc["info"]["title"], "Contacts API");
    assert_eq!(
        doc["paths"]["/contacts/{id}"]["delete"]["security"][0]["oauth2"],
        json!(["read", "write"])
    );

    let resp = send(&app, get("/swagger/v9/swagger.json", None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, get("/swagger/security.json", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let report = json_body(resp).await;
    assert_eq!(report["documents"], json!(["v1", "v2"]));
    assert_eq!(report["operations"].as_array().unwrap().len(), 6);

    let resp = send(&app, get("/nope", None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_count_pipeline_outcomes() {
    let app = fixture::app();

    send(&app, get("/contacts", None, None)).await;
    send(&app, get("/contacts", Some(fixture::READER), None)).await;
    send(&app, get("/contacts", Some(fixture::READER), Some(V2_ACCEPT))).await;
    send(&app, get("/contacts", Some("garbage"), None)).await;

    let resp = send(&app, get("/metrics", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains(
        r#"contacts_gate_decisions_total{operation="list_contacts",outcome="allow"} 1"#
    ));
    assert!(text.contains(
        r#"contacts_gate_decisions_total{operation="list_contacts",outcome="unauthenticated"} 2"#
    ));
    assert!(text.contains(r#"contacts_version_rejections_total{reason="unsupported"} 1"#));
    assert!(text.contains(r#"contacts_credential_failures_total{reason="unrecognized"} 1"#));
    assert!(text.contains(r#"contacts_requests_total{source="default",version="1"} 3"#));
}

#[tokio::test]
async fn unpublished_methods_are_405() {
    let app = fixture::app();

    for (method, uri) in [
        (Method::DELETE, "/contacts"),
        (Method::PATCH, "/contacts/1"),
        (Method::POST, "/contacts/1"),
    ] {
        let resp = send(
            &app,
            request(method.clone(), uri, Some(fixture::WRITER), None, None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
    }

    // not published for the method, so the Accept version is never inspected
    let resp = send(
        &app,
        request(
            Method::PATCH,
            "/contacts/1",
            None,
            Some("application/vnd.demo-vx+json"),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
