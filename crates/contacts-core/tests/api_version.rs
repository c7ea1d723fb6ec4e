#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use contacts_core::ApiVersion;

#[test]
fn parses_major_and_minor() {
    assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::major(2));
    assert_eq!("2.0".parse::<ApiVersion>().unwrap(), ApiVersion::major(2));
    assert_eq!("1.5".parse::<ApiVersion>().unwrap(), ApiVersion::new(1, 5));
    assert_eq!(" 10 ".parse::<ApiVersion>().unwrap(), ApiVersion::major(10));
}

#[test]
fn rejects_garbage() {
    for bad in ["", "v2", "2.", ".1", "+2", "-1", "1.2.3", "two", "2+beta"] {
        let err = bad.parse::<ApiVersion>().expect_err(bad);
        assert_eq!(err.client_code().as_str(), "INVALID_API_VERSION", "input={bad}");
    }
}

#[test]
fn display_drops_zero_minor() {
    assert_eq!(ApiVersion::major(2).to_string(), "2");
    assert_eq!(ApiVersion::new(1, 5).to_string(), "1.5");
}

#[test]
fn ordering_is_numeric() {
    let mut v: Vec<ApiVersion> = ["10", "2", "1.5", "1"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    v.sort();
    let shown: Vec<String> = v.iter().map(ToString::to_string).collect();
    assert_eq!(shown, vec!["1", "1.5", "2", "10"]);
}

#[test]
fn serializes_as_string() {
    let json = serde_json::to_string(&ApiVersion::new(1, 5)).unwrap();
    assert_eq!(json, "\"1.5\"");
}
