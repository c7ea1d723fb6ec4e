//! API version value type.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{ContactsError, Result};

/// Parsed API version (`major[.minor]`).
///
/// `"2"` and `"2.0"` are the same version. Ordering is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub const fn major(major: u32) -> Self {
        Self { major, minor: 0 }
    }
}

impl FromStr for ApiVersion {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ContactsError::InvalidVersion(s.to_string());
        let s = s.trim();

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (s, None),
        };

        let major = parse_component(major).ok_or_else(invalid)?;
        let minor = match minor {
            Some(m) => parse_component(m).ok_or_else(invalid)?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

fn parse_component(s: &str) -> Option<u32> {
    // `u32::from_str` accepts a leading '+', which is never a valid version.
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minor == 0 {
            write!(f, "{}", self.major)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
