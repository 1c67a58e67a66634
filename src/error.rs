//! Typed errors raised while reconciling contacts.
//!
//! A row without a usable email address is not an error: the reconciler
//! counts it and moves on. Everything here is either a per-row failure
//! ([`SyncError`]) or something that stops the run before it starts
//! ([`ConfigError`]).

use thiserror::Error;

/// The full-name field could not be split into a first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("cannot determine first/last name from '{0}': fewer than two words")]
    TooFewTokens(String),
}

/// Failures reported by a [`crate::crm::CrmAccessor`].
#[derive(Debug, Error)]
pub enum CrmError {
    /// The CRM rejected the API key.
    #[error("Hatchbuck rejected the API key (HTTP {0})")]
    Unauthorized(u16),

    /// The CRM answered with a non-success status.
    #[error("Hatchbuck returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error talking to Hatchbuck: {0}")]
    Network(#[from] reqwest::Error),

    /// A request or response body was not the JSON we expected.
    #[error("invalid JSON exchanged with Hatchbuck: {0}")]
    Json(#[from] serde_json::Error),

    /// A mutation needs a `contactId` but the profile has none.
    #[error("profile has no contactId; cannot {0}")]
    MissingContactId(&'static str),
}

/// A row that reached the CRM stage but could not be reconciled.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("line {line}: invalid name")]
    InvalidName {
        line: u64,
        #[source]
        source: NameError,
    },

    #[error("line {line}: CRM call failed")]
    Remote {
        line: u64,
        #[source]
        source: CrmError,
    },
}

impl SyncError {
    pub fn line(&self) -> u64 {
        match self {
            SyncError::InvalidName { line, .. } | SyncError::Remote { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing Hatchbuck API key (set {0} in the environment or a .env file)")]
    MissingApiKey(&'static str),
}
