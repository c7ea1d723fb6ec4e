//! Policy registry, operation bindings, and gate decisions.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;
use std::sync::Arc;

use contacts_core::{ApiVersion, Claim, ContactsError, Identity};
use contacts_gateway::app_state::AppState;
use contacts_gateway::contacts::InMemoryContactStore;
use contacts_gateway::dispatch::{OperationDef, OperationTable, ResourceDef, Verb};
use contacts_gateway::policy::{evaluate, Denial, GateDecision, Policy, PolicyRegistry};


const V1: ApiVersion = ApiVersion::major(1);
const V2: ApiVersion = ApiVersion::major(2);

fn bearer(subject: &str, scopes: &[&str]) -> Identity {
    let claims = scopes.iter().map(|s| Claim::new("scope", *s)).collect();
    Identity::new(subject, "Bearer", claims)
}

fn registry() -> PolicyRegistry {
    let mut r = PolicyRegistry::new();
    r.register(Policy::new("ReadPolicy", "scope", "read").with_scheme("Bearer"))
        .unwrap();
    r.register(Policy::new("WritePolicy", "scope", "write").with_scheme("Bearer"))
        .unwrap();
    r.register(Policy::new("AdminPolicy", "role", "admin")).unwrap();
    r
}

fn policies(names: &[&str]) -> Vec<Arc<Policy>> {
    let r = registry();
    names.iter().map(|n| r.lookup(n).unwrap()).collect()
}

#[test]
fn registry_rejects_duplicates_and_unknown_names() {
    let mut r = registry();
    let err = r
        .register(Policy::new("ReadPolicy", "scope", "other"))
        .unwrap_err();
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");
    // first registration wins
    assert_eq!(r.lookup("ReadPolicy").unwrap().claim().value, "read");

    let err = r.lookup("Missing").unwrap_err();
    assert!(matches!(err, ContactsError::Configuration(_)));
    assert!(!r.contains("Missing"));
}

#[test]
fn registry_names_are_sorted() {
    let r = registry();
    assert_eq!(r.len(), 3);
    assert_eq!(r.names(), vec!["AdminPolicy", "ReadPolicy", "WritePolicy"]);
}

#[test]
fn no_policies_allows_anonymous() {
    assert_eq!(evaluate(None, &[]), GateDecision::Allow);
    let id = bearer("a", &[]);
    assert!(evaluate(Some(&id), &[]).is_allowed());
}

#[test]
fn anonymous_is_unauthenticated_when_policies_bound() {
    let decision = evaluate(None, &policies(&["ReadPolicy"]));
    assert_eq!(decision, GateDecision::Deny(Denial::Unauthenticated));
}

#[test]
fn all_policies_must_hold() {
    let bound = policies(&["ReadPolicy", "WritePolicy"]);

    let reader = bearer("reader", &["read"]);
    assert_eq!(
        evaluate(Some(&reader), &bound),
        GateDecision::Deny(Denial::MissingClaim {
            policy: "WritePolicy".into()
        })
    );

    let writer = bearer("writer", &["read", "write"]);
    assert!(evaluate(Some(&writer), &bound).is_allowed());
}

#[test]
fn first_missing_claim_is_reported() {
    let nobody = bearer("nobody", &[]);
    let decision = evaluate(Some(&nobody), &policies(&["WritePolicy", "ReadPolicy"]));
    let GateDecision::Deny(denial) = decision else {
        panic!("expected deny");
    };
    assert_eq!(denial.policy(), Some("WritePolicy"));
    assert_eq!(denial.reason(), "missing_claim");
}

#[test]
fn scheme_is_checked_before_claims() {
    // claim for AdminPolicy is missing, but the scheme of ReadPolicy fails first
    let cookie = Identity::new("c", "Cookie", vec![Claim::new("scope", "read")]);
    let decision = evaluate(Some(&cookie), &policies(&["AdminPolicy", "ReadPolicy"]));
    assert_eq!(
        decision,
        GateDecision::Deny(Denial::SchemeMismatch {
            policy: "ReadPolicy".into(),
            required: "Bearer".into(),
        })
    );
}

#[test]
fn scheme_comparison_ignores_case() {
    let id = Identity::new("a", "bearer", vec![Claim::new("scope", "read")]);
    assert!(evaluate(Some(&id), &policies(&["ReadPolicy"])).is_allowed());
}

#[test]
fn policy_without_scheme_accepts_any_scheme() {
    let id = Identity::new("a", "Cookie", vec![Claim::new("role", "admin")]);
    assert!(evaluate(Some(&id), &policies(&["AdminPolicy"])).is_allowed());
}

#[test]
fn denials_map_to_distinct_client_codes() {
    let unauth: ContactsError = Denial::Unauthenticated.into();
    assert_eq!(unauth.client_code().as_str(), "UNAUTHENTICATED");

    let scheme: ContactsError = Denial::SchemeMismatch {
        policy: "ReadPolicy".into(),
        required: "Bearer".into(),
    }
    .into();
    assert_eq!(scheme.client_code().as_str(), "UNAUTHENTICATED");

    let forbidden: ContactsError = Denial::MissingClaim {
        policy: "WritePolicy".into(),
    }
    .into();
    assert_eq!(forbidden.client_code().as_str(), "FORBIDDEN");
    assert!(forbidden.to_string().contains("WritePolicy"));
}

fn notes() -> ResourceDef {
    ResourceDef::new("notes")
        .policy("ReadPolicy")
        .operation(
            OperationDef::new("list_notes", Verb::Get, "/notes")
                .versions([V1, V2])
                .policy("ReadPolicy"),
        )
        .operation(
            OperationDef::new("create_note", Verb::Post, "/notes")
                .versions([V1])
                .policy("WritePolicy"),
        )
}

#[test]
fn bindings_are_ordered_and_unique() {
    let overrides = BTreeMap::from([("notes".to_string(), vec!["AdminPolicy".to_string()])]);
    let table = OperationTable::build(
        &registry(),
        &["ReadPolicy".to_string()],
        &[notes()],
        &overrides,
    )
    .unwrap();

    let create = table.get(Verb::Post, "/notes", V1).unwrap();
    let names: Vec<&str> = create.policy_names().collect();
    assert_eq!(names, vec!["ReadPolicy", "AdminPolicy", "WritePolicy"]);

    let list = table.get(Verb::Get, "/notes", V2).unwrap();
    let names: Vec<&str> = list.policy_names().collect();
    assert_eq!(names, vec!["ReadPolicy", "AdminPolicy"]);
}

#[test]
fn table_tracks_published_versions() {
    let table = OperationTable::build(&registry(), &[], &[notes()], &BTreeMap::new()).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.published_versions(Verb::Get, "/notes"), Some(&[V1, V2][..]));
    assert_eq!(table.published_versions(Verb::Post, "/notes"), Some(&[V1][..]));
    assert_eq!(table.published_versions(Verb::Delete, "/notes"), None);
    assert!(table.get(Verb::Post, "/notes", V2).is_none());
    assert_eq!(table.api_versions().into_iter().collect::<Vec<_>>(), vec![V1, V2]);
}

#[test]
fn bound_operation_authorizes_with_its_policies() {
    let table = OperationTable::build(&registry(), &[], &[notes()], &BTreeMap::new()).unwrap();
    let create = table.get(Verb::Post, "/notes", V1).unwrap();

    let reader = bearer("reader", &["read"]);
    assert!(!create.authorize(Some(&reader)).is_allowed());
    let writer = bearer("writer", &["read", "write"]);
    assert!(create.authorize(Some(&writer)).is_allowed());
}

#[test]
fn table_build_rejects_bad_wiring() {
    let r = registry();
    let none = BTreeMap::new();

    // unknown global policy
    let err = OperationTable::build(&r, &["Nope".to_string()], &[notes()], &none).unwrap_err();
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");

    // override for an undeclared resource
    let overrides = BTreeMap::from([("people".to_string(), vec!["ReadPolicy".to_string()])]);
    let err = OperationTable::build(&r, &[], &[notes()], &overrides).unwrap_err();
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");

    // same (verb, path, version) twice
    let dup = ResourceDef::new("dup")
        .operation(OperationDef::new("a", Verb::Get, "/x").versions([V1]))
        .operation(OperationDef::new("b", Verb::Get, "/x").versions([V1]));
    let err = OperationTable::build(&r, &[], &[dup], &none).unwrap_err();
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");

    // no versions at all
    let unpublished = ResourceDef::new("u").operation(OperationDef::new("a", Verb::Get, "/u"));
    let err = OperationTable::build(&r, &[], &[unpublished], &none).unwrap_err();
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");
}

#[test]
fn app_state_refuses_inconsistent_config() {
    let mut cfg = fixture::config();
    cfg.global_policies.push("UnknownPolicy".into());
    let err = AppState::new(cfg).err().expect("must fail");
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");

    let mut cfg = fixture::config();
    let dup = cfg.policies[0].clone();
    cfg.policies.push(dup);
    let err = AppState::with_store(cfg, Arc::new(InMemoryContactStore::new()))
        .err()
        .expect("must fail");
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");
}

#[test]
fn app_state_binds_contacts_operations() {
    let state = fixture::state();
    let ops = state.operations();
    assert_eq!(ops.len(), 6);

    let delete = ops.get(Verb::Delete, "/contacts/:id", V1).unwrap();
    assert_eq!(
        delete.policy_names().collect::<Vec<_>>(),
        vec!["ReadPolicy", "WritePolicy"]
    );
    assert_eq!(
        ops.published_versions(Verb::Get, "/contacts/:id"),
        Some(&[V1, V2][..])
    );
}
