//! Blocking client for the Hatchbuck REST API.
//!
//! Authentication is the `api_key` query parameter. All bodies are JSON.
//! In noop mode the client still searches (a read) but only logs what it
//! would have created, updated or tagged.

use std::time::Duration;

use log::{debug, info};
use reqwest::{
    StatusCode,
    blocking::{Client, RequestBuilder, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::CrmAccessor;
use crate::{
    error::CrmError,
    profile::{CollectionEntry, Profile, ScalarField},
};

pub const DEFAULT_API_BASE: &str = "https://api.hatchbuck.com/api/v1";

const USER_AGENT: &str = concat!("csv2hatchbuck/", env!("CARGO_PKG_VERSION"));
const TIMEOUT_SECS: u64 = 30;
const MAX_ERROR_BODY: usize = 200;

pub struct HatchbuckClient {
    http: Client,
    api_base: String,
    api_key: String,
    noop: bool,
}

impl HatchbuckClient {
    pub fn new(api_base: &str, api_key: &str, noop: bool) -> Result<Self, CrmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            noop,
        })
    }

    pub fn is_noop(&self) -> bool {
        self.noop
    }

    /// Looks up a single address. `Ok(None)` when Hatchbuck knows no
    /// contact with it.
    pub fn search_email(&self, address: &str) -> Result<Option<Profile>, CrmError> {
        debug!("Searching Hatchbuck for {address}");
        let body = json!({ "emails": [{ "address": address }] });
        let response = self.request(self.http.post(self.url("/contact/search")).json(&body))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let matches: Vec<Profile> = decode(check(response)?)?;
        Ok(matches.into_iter().next())
    }

    fn update(&self, profile: Profile, action: &str) -> Result<Profile, CrmError> {
        if self.noop {
            info!("[noop] would {action}: {}", preview(&profile));
            return Ok(profile);
        }
        if profile.contact_id.is_none() {
            return Err(CrmError::MissingContactId("update profile"));
        }
        debug!("Updating contact: {action}");
        let response = self.request(self.http.put(self.url("/contact")).json(&profile))?;
        decode(check(response)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn request(&self, builder: RequestBuilder) -> Result<Response, CrmError> {
        Ok(builder.query(&[("api_key", &self.api_key)]).send()?)
    }
}

impl CrmAccessor for HatchbuckClient {
    fn search_email_multi(&self, addresses: &[String]) -> Result<Option<Profile>, CrmError> {
        for address in addresses {
            if let Some(profile) = self.search_email(address)? {
                debug!(
                    "Matched {address} to contact {}",
                    profile.contact_id.as_deref().unwrap_or("?")
                );
                return Ok(Some(profile));
            }
        }
        Ok(None)
    }

    fn create(&self, profile: Profile) -> Result<Profile, CrmError> {
        if self.noop {
            info!("[noop] would create contact: {}", preview(&profile));
            return Ok(profile);
        }
        let response = self.request(self.http.post(self.url("/contact")).json(&profile))?;
        decode(check(response)?)
    }

    fn set_scalar_field(
        &self,
        mut profile: Profile,
        field: ScalarField,
        value: &str,
    ) -> Result<Profile, CrmError> {
        profile.set_scalar(field, value);
        self.update(profile, &format!("set {} to '{value}'", field.as_str()))
    }

    fn upsert_collection_entry(
        &self,
        mut profile: Profile,
        entry: CollectionEntry,
    ) -> Result<Profile, CrmError> {
        let action = format!(
            "add {} entry {}='{}'",
            entry.field(),
            entry.match_key(),
            entry.key_value()
        );
        if !profile.upsert_entry(entry) {
            return Ok(profile);
        }
        self.update(profile, &action)
    }

    fn add_tag(&self, contact_id: Option<&str>, tag: &str) -> Result<(), CrmError> {
        if self.noop {
            info!(
                "[noop] would tag contact {} with '{tag}'",
                contact_id.unwrap_or("<new>")
            );
            return Ok(());
        }
        let contact_id = contact_id.ok_or(CrmError::MissingContactId("add tag"))?;
        let body = json!([{ "name": tag }]);
        let url = self.url(&format!("/contact/{contact_id}/Tags"));
        check(self.request(self.http.post(url).json(&body))?)?;
        debug!("Tagged contact {contact_id} with '{tag}'");
        Ok(())
    }
}

fn check(response: Response) -> Result<Response, CrmError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(CrmError::Unauthorized(status.as_u16()));
    }
    if !status.is_success() {
        let text = response.text().unwrap_or_default();
        let message = text.chars().take(MAX_ERROR_BODY).collect::<String>();
        return Err(CrmError::Http {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CrmError> {
    let text = response.text()?;
    Ok(serde_json::from_str(text.trim_start_matches('\u{feff}'))?)
}

fn preview(profile: &Profile) -> String {
    serde_json::to_string(profile).unwrap_or_else(|_| format!("{profile:?}"))
}
