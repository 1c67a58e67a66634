#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv2hatchbuck::crm::CrmAccessor;
use csv2hatchbuck::error::CrmError;
use csv2hatchbuck::profile::{CollectionEntry, EmailEntry, Profile, ScalarField, Tag};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// In-memory CRM that behaves like Hatchbuck and records every call.
#[derive(Default)]
pub struct MemoryCrm {
    contacts: RefCell<Vec<Profile>>,
    calls: RefCell<Vec<String>>,
    next_id: Cell<u32>,
    fail_on: Option<&'static str>,
}

impl MemoryCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call to the operation named `op` fails with HTTP 500.
    pub fn failing_on(op: &'static str) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    /// Seeds an existing contact and returns its id.
    pub fn seed(&self, mut profile: Profile) -> String {
        let id = self.assign_id();
        profile.contact_id = Some(id.clone());
        self.contacts.borrow_mut().push(profile);
        id
    }

    pub fn contact(&self, id: &str) -> Profile {
        self.contacts
            .borrow()
            .iter()
            .find(|p| p.contact_id.as_deref() == Some(id))
            .cloned()
            .expect("contact exists")
    }

    pub fn contacts(&self) -> Vec<Profile> {
        self.contacts.borrow().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn assign_id(&self) -> String {
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        format!("c{next}")
    }

    fn record(&self, op: &'static str, detail: String) -> Result<(), CrmError> {
        self.calls.borrow_mut().push(format!("{op} {detail}"));
        if self.fail_on == Some(op) {
            return Err(CrmError::Http {
                status: 500,
                message: format!("{op} exploded"),
            });
        }
        Ok(())
    }

    fn store(&self, profile: &Profile) {
        let mut contacts = self.contacts.borrow_mut();
        if let Some(slot) = contacts
            .iter_mut()
            .find(|p| p.contact_id == profile.contact_id)
        {
            *slot = profile.clone();
        }
    }
}

impl CrmAccessor for MemoryCrm {
    fn search_email_multi(&self, addresses: &[String]) -> Result<Option<Profile>, CrmError> {
        self.record("search", addresses.join(","))?;
        let contacts = self.contacts.borrow();
        Ok(addresses.iter().find_map(|address| {
            contacts
                .iter()
                .find(|p| p.emails.iter().any(|e| &e.address == address))
                .cloned()
        }))
    }

    fn create(&self, mut profile: Profile) -> Result<Profile, CrmError> {
        self.record("create", profile.display_name())?;
        profile.contact_id = Some(self.assign_id());
        self.contacts.borrow_mut().push(profile.clone());
        Ok(profile)
    }

    fn set_scalar_field(
        &self,
        mut profile: Profile,
        field: ScalarField,
        value: &str,
    ) -> Result<Profile, CrmError> {
        self.record("set", format!("{}={value}", field.as_str()))?;
        profile.set_scalar(field, value);
        self.store(&profile);
        Ok(profile)
    }

    fn upsert_collection_entry(
        &self,
        mut profile: Profile,
        entry: CollectionEntry,
    ) -> Result<Profile, CrmError> {
        self.record("upsert", format!("{}={}", entry.field(), entry.key_value()))?;
        if profile.upsert_entry(entry) {
            self.store(&profile);
        }
        Ok(profile)
    }

    fn add_tag(&self, contact_id: Option<&str>, tag: &str) -> Result<(), CrmError> {
        self.record("tag", tag.to_string())?;
        let id = contact_id.ok_or(CrmError::MissingContactId("add tag"))?;
        let mut contacts = self.contacts.borrow_mut();
        if let Some(profile) = contacts
            .iter_mut()
            .find(|p| p.contact_id.as_deref() == Some(id))
        {
            profile.tags.push(Tag::named(tag));
        }
        Ok(())
    }
}

pub fn profile_with_emails(first: &str, last: &str, emails: &[&str]) -> Profile {
    Profile {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        emails: emails.iter().map(|e| EmailEntry::work(*e)).collect(),
        ..Profile::default()
    }
}
