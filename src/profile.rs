//! Hatchbuck contact profile as it travels over the wire.
//!
//! Only the fields the reconciler reads or writes are typed. Everything
//! else the CRM sends back is kept in [`Profile::other`] so that a profile
//! fetched, modified and sent back through `PUT /contact` does not lose
//! data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EMAIL_TYPE_WORK: &str = "Work";
pub const STATUS_CUSTOMER: &str = "Customer";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub address: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl EmailEntry {
    pub fn work(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            kind: Some(EMAIL_TYPE_WORK.to_string()),
            other: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Tag {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            other: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub name: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Scalar profile fields that can be set in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    FirstName,
    LastName,
}

impl ScalarField {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarField::FirstName => "firstName",
            ScalarField::LastName => "lastName",
        }
    }
}

/// An entry of one of the profile's keyed collections.
///
/// Emails are keyed by `address`, tags by `name`. Key comparison is exact.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEntry {
    Email(EmailEntry),
    Tag(Tag),
}

impl CollectionEntry {
    pub fn field(&self) -> &'static str {
        match self {
            CollectionEntry::Email(_) => "emails",
            CollectionEntry::Tag(_) => "tags",
        }
    }

    pub fn match_key(&self) -> &'static str {
        match self {
            CollectionEntry::Email(_) => "address",
            CollectionEntry::Tag(_) => "name",
        }
    }

    pub fn key_value(&self) -> &str {
        match self {
            CollectionEntry::Email(entry) => &entry.address,
            CollectionEntry::Tag(tag) => &tag.name,
        }
    }
}

impl Profile {
    /// The profile handed to `create` when no existing contact matched.
    pub fn new_customer(first: &str, last: &str, emails: &[String]) -> Self {
        Self {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            emails: emails.iter().map(EmailEntry::work).collect(),
            status: Some(Status {
                name: STATUS_CUSTOMER.to_string(),
                other: Map::new(),
            }),
            subscribed: Some(true),
            ..Self::default()
        }
    }

    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        match field {
            ScalarField::FirstName => self.first_name.as_deref(),
            ScalarField::LastName => self.last_name.as_deref(),
        }
    }

    /// True when the field is absent or blank, i.e. eligible for backfill.
    pub fn is_blank(&self, field: ScalarField) -> bool {
        self.scalar(field).is_none_or(|value| value.trim().is_empty())
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: &str) {
        let slot = match field {
            ScalarField::FirstName => &mut self.first_name,
            ScalarField::LastName => &mut self.last_name,
        };
        *slot = Some(value.to_string());
    }

    pub fn contains_entry(&self, entry: &CollectionEntry) -> bool {
        let key = entry.key_value();
        match entry {
            CollectionEntry::Email(_) => self.emails.iter().any(|e| e.address == key),
            CollectionEntry::Tag(_) => self.tags.iter().any(|t| t.name == key),
        }
    }

    /// Appends `entry` unless an entry with the same key already exists.
    /// Returns whether the profile changed.
    pub fn upsert_entry(&mut self, entry: CollectionEntry) -> bool {
        if self.contains_entry(&entry) {
            return false;
        }
        match entry {
            CollectionEntry::Email(email) => self.emails.push(email),
            CollectionEntry::Tag(tag) => self.tags.push(tag),
        }
        true
    }

    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}
