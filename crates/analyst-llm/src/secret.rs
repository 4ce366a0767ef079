//! API credential retrieval from the OS keyring.

use analyst_core::error::{AnalystError, Result};
use std::collections::HashMap;

const MISSING_TOKEN: &str = "keyring vault is missing the OpenAI API token";

/// An API credential. Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret, rejecting empty or whitespace-only values.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AnalystError::Configuration(MISSING_TOKEN.to_string()));
        }
        Ok(Self(secret))
    }

    /// The raw secret, for placing in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Source of named secrets, keyed by service and account.
pub trait SecretStore {
    /// `Ok(None)` when no entry exists; `Err` when the store itself fails.
    fn load(&self, service: &str, account: &str) -> Result<Option<String>>;
}

/// Secret store backed by the platform keyring.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringSecretStore;

impl SecretStore for KeyringSecretStore {
    fn load(&self, service: &str, account: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(service, account).map_err(|e| {
            AnalystError::Configuration(format!("unable to open keyring entry: {e}"))
        })?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AnalystError::Configuration(format!(
                "unable to read keyring entry: {e}"
            ))),
        }
    }
}

/// Fixed in-memory store, for tests and for embedding callers that already hold the key.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    entries: HashMap<(String, String), String>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, service: &str, account: &str, secret: &str) -> Self {
        self.entries
            .insert((service.to_string(), account.to_string()), secret.to_string());
        self
    }
}

impl SecretStore for StaticSecretStore {
    fn load(&self, service: &str, account: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(&(service.to_string(), account.to_string()))
            .cloned())
    }
}

/// Fetch the API credential once; a missing or blank secret is a configuration error.
pub fn fetch_credential(store: &dyn SecretStore, service: &str, account: &str) -> Result<Credential> {
    match store.load(service, account)? {
        Some(secret) => Credential::new(secret),
        None => {
            tracing::debug!(service, account, "no credential in secret store");
            Err(AnalystError::Configuration(MISSING_TOKEN.to_string()))
        }
    }
}
