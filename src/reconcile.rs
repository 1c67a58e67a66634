//! Find-or-create reconciliation of one contact row against the CRM.
//!
//! A row moves through these states:
//!
//! ```text
//! START -> SKIPPED_NO_EMAIL
//! START -> PROCESSING -> CREATED | MATCHED -> BACKFILLED -> TAGGED -> DONE
//!                     \-> FAILED (name split or CRM error)
//! ```
//!
//! The profile returned by each CRM call replaces the local copy before
//! the next step runs.

use log::{debug, info, warn};

use crate::{
    crm::CrmAccessor,
    error::SyncError,
    input::ContactRow,
    name::split_name,
    profile::{CollectionEntry, EmailEntry, Profile, ScalarField, Tag},
    stats::RunStats,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    SkippedNoEmail,
    Created { tagged: bool },
    Matched { tagged: bool },
}

pub struct Reconciler<'a, C: CrmAccessor + ?Sized> {
    crm: &'a C,
    tag: Option<String>,
}

impl<'a, C: CrmAccessor + ?Sized> Reconciler<'a, C> {
    /// A blank tag is the same as no tag.
    pub fn new(crm: &'a C, tag: Option<&str>) -> Self {
        let tag = tag
            .filter(|tag| !tag.trim().is_empty())
            .map(str::to_string);
        Self { crm, tag }
    }

    pub fn process_row(
        &self,
        row: &ContactRow,
        stats: &mut RunStats,
    ) -> Result<RowOutcome, SyncError> {
        debug!("line {}: {:?}", row.line, row);
        stats.contacts += 1;

        let emails = row.emails();
        if emails.is_empty() {
            stats.noemail += 1;
            warn!(
                "no email address found for '{}' (line {}), skipping",
                row.full_name, row.line
            );
            return Ok(RowOutcome::SkippedNoEmail);
        }

        let remote = |source| SyncError::Remote {
            line: row.line,
            source,
        };

        let existing = self.crm.search_email_multi(&emails).map_err(remote)?;

        let (first, last) = split_name(&row.full_name).map_err(|source| {
            SyncError::InvalidName {
                line: row.line,
                source,
            }
        })?;

        let created = existing.is_none();
        let mut profile = match existing {
            Some(profile) => {
                stats.found += 1;
                profile
            }
            None => {
                stats.notfound += 1;
                let profile = self
                    .crm
                    .create(Profile::new_customer(&first, &last, &emails))
                    .map_err(remote)?;
                info!(
                    "added contact: {} <{}> ({})",
                    profile.display_name(),
                    emails.join(", "),
                    profile.contact_id.as_deref().unwrap_or("no id")
                );
                profile
            }
        };

        let names = [(ScalarField::FirstName, &first), (ScalarField::LastName, &last)];
        for (field, value) in names {
            if profile.is_blank(field) {
                debug!("backfilling {} with '{value}'", field.as_str());
                profile = self
                    .crm
                    .set_scalar_field(profile, field, value)
                    .map_err(remote)?;
            }
        }

        for address in &emails {
            let entry = CollectionEntry::Email(EmailEntry::work(address));
            profile = self
                .crm
                .upsert_collection_entry(profile, entry)
                .map_err(remote)?;
        }

        let tagged = match &self.tag {
            Some(tag) if !self.has_tag(&profile, tag) => {
                self.crm
                    .add_tag(profile.contact_id.as_deref(), tag)
                    .map_err(remote)?;
                true
            }
            _ => false,
        };

        Ok(if created {
            RowOutcome::Created { tagged }
        } else {
            RowOutcome::Matched { tagged }
        })
    }

    fn has_tag(&self, profile: &Profile, tag: &str) -> bool {
        self.crm
            .contains_entry(profile, &CollectionEntry::Tag(Tag::named(tag)))
    }
}
