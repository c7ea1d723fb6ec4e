//! Delimiter extraction vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use contacts_core::negotiation::between;

use vector_loader::BetweenVector;

#[test]
fn between_vectors() {
    let vectors: Vec<BetweenVector> = vector_loader::load("between.json");
    assert!(!vectors.is_empty());

    for v in vectors {
        assert_eq!(
            between(&v.value, &v.start, &v.end),
            v.expect,
            "vector={}",
            v.description
        );
    }
}

#[test]
fn empty_whenever_offsets_cross() {
    // first(start) + len(start) >= last(end) must always yield "".
    let samples = ["-v+", "+-v", "x+y-vz", "-v", "+", "", "-+v"];
    for s in samples {
        let crossed = match (s.find("-v"), s.rfind('+')) {
            (Some(a), Some(b)) => a + 2 >= b,
            _ => true,
        };
        if crossed {
            assert_eq!(between(s, "-v", "+"), "", "sample={s}");
        }
    }
}

#[test]
fn result_borrows_input() {
    let owned = String::from("application/vnd.demo-v42+json");
    let token = between(&owned, "-v", "+");
    assert_eq!(token, "42");
    assert!(owned.as_ptr() <= token.as_ptr());
}
