//! OS keychain credential store
//!
//! Uses the system keychain:
//! - macOS: Keychain
//! - Windows: Credential Manager (DPAPI)
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;
use tracing::debug;

use super::{AccountIdentity, CredentialError, CredentialStore};

/// OS keychain credential store
///
/// Payloads are base64-encoded because the keychain entry API stores
/// strings. The OS entry API has no duplicate detection - writing an
/// existing identity overwrites it silently - so the delete-before-add
/// discipline of the secure backend cannot be observed through this store;
/// use [`MemoryKeychain`](super::MemoryKeychain) in tests that need it.
#[derive(Clone, Default)]
pub struct SystemKeychain;

impl SystemKeychain {
    /// Create a handle to the OS keychain
    pub fn new() -> Self {
        Self
    }

    fn entry(identity: &AccountIdentity) -> Result<Entry, CredentialError> {
        Entry::new(&identity.service, &identity.account)
            .map_err(|e| CredentialError::Failure(e.to_string()))
    }
}

impl CredentialStore for SystemKeychain {
    fn add(&self, identity: &AccountIdentity, payload: &[u8]) -> Result<(), CredentialError> {
        let entry = Self::entry(identity)?;
        let encoded = base64_encode(payload);

        entry
            .set_password(&encoded)
            .map_err(|e| CredentialError::Failure(e.to_string()))?;

        debug!("Stored entry in keychain: {}", identity);
        Ok(())
    }

    fn delete(&self, identity: &AccountIdentity) -> Result<(), CredentialError> {
        let entry = Self::entry(identity)?;

        match entry.delete_password() {
            Ok(()) => {
                debug!("Deleted entry from keychain: {}", identity);
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Err(CredentialError::NotFound(identity.clone())),
            Err(e) => Err(CredentialError::Failure(e.to_string())),
        }
    }

    fn lookup(&self, identity: &AccountIdentity) -> Result<Vec<u8>, CredentialError> {
        let entry = Self::entry(identity)?;

        match entry.get_password() {
            Ok(encoded) => {
                debug!("Retrieved entry from keychain: {}", identity);
                base64_decode(&encoded)
            }
            Err(keyring::Error::NoEntry) => Err(CredentialError::NotFound(identity.clone())),
            Err(e) => Err(CredentialError::Failure(e.to_string())),
        }
    }
}

/// Base64 encode bytes
fn base64_encode(data: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Base64 decode string
fn base64_decode(encoded: &str) -> Result<Vec<u8>, CredentialError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| CredentialError::Failure(format!("base64 decode error: {e}")))
}
