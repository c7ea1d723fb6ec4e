use serde::{Deserialize, Serialize};

use contacts_core::error::{ContactsError, Result};
use contacts_core::ApiVersion;

/// Canonical stored contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub contact_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

impl Contact {
    pub fn new(contact_id: u64, name: &str, address: &str, city: &str) -> Self {
        Self {
            contact_id,
            name: name.to_string(),
            address: Some(address.to_string()),
            city: Some(city.to_string()),
            ..Self::default()
        }
    }

    /// Payload checks for create/update.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ContactsError::BadRequest("name is required".into()));
        }
        Ok(())
    }
}

/// Loyalty number every V2 representation carries.
pub const CUMULUS_NUMBER: u64 = 12345678;

/// Version 2 read-only view of a contact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactV2<'a> {
    #[serde(flatten)]
    pub contact: &'a Contact,
    pub cumulus_number: u64,
}

impl<'a> From<&'a Contact> for ContactV2<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            contact,
            cumulus_number: CUMULUS_NUMBER,
        }
    }
}

/// Per-response projection of a stored contact.
pub fn project(contact: &Contact, version: ApiVersion) -> serde_json::Result<serde_json::Value> {
    match version.major {
        2 => serde_json::to_value(ContactV2::from(contact)),
        _ => serde_json::to_value(contact),
    }
}
