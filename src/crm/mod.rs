//! The capability surface the reconciler needs from a CRM.
//!
//! Every call that can change the profile returns the profile the caller
//! must continue with; the local copy handed in is consumed. In dry-run
//! mode an implementation returns its best local projection instead of
//! the authoritative remote one.

pub mod hatchbuck;

pub use hatchbuck::HatchbuckClient;

use crate::{
    error::CrmError,
    profile::{CollectionEntry, Profile, ScalarField},
};

pub trait CrmAccessor {
    /// Finds a profile matching ANY of `addresses`.
    fn search_email_multi(&self, addresses: &[String]) -> Result<Option<Profile>, CrmError>;

    /// Creates the contact and returns the stored profile including its id.
    fn create(&self, profile: Profile) -> Result<Profile, CrmError>;

    fn set_scalar_field(
        &self,
        profile: Profile,
        field: ScalarField,
        value: &str,
    ) -> Result<Profile, CrmError>;

    /// Adds `entry` to its collection unless an entry with the same key is
    /// already present. Never creates duplicates.
    fn upsert_collection_entry(
        &self,
        profile: Profile,
        entry: CollectionEntry,
    ) -> Result<Profile, CrmError>;

    fn contains_entry(&self, profile: &Profile, entry: &CollectionEntry) -> bool {
        profile.contains_entry(entry)
    }

    fn add_tag(&self, contact_id: Option<&str>, tag: &str) -> Result<(), CrmError>;
}
