//! Secure credential store backend

use tracing::debug;

use super::Backend;
use crate::error::{PersistError, Result};
use crate::keychain::{AccountIdentity, CredentialError, CredentialStore};

/// Backend addressing one (account, service) entry of a credential store.
///
/// Owns the status mapping of the credential-store protocol: a missing
/// entry is plain absence on fetch and success on remove; every other
/// non-success status aborts the operation with
/// [`PersistError::Keychain`].
pub struct SecureBackend<S> {
    identity: AccountIdentity,
    store: S,
}

impl<S: CredentialStore> SecureBackend<S> {
    /// Bind an identity in the given credential store
    pub fn new(identity: AccountIdentity, store: S) -> Self {
        Self { identity, store }
    }

    /// The identity this backend addresses
    pub fn identity(&self) -> &AccountIdentity {
        &self.identity
    }
}

impl<S: CredentialStore> Backend for SecureBackend<S> {
    type Raw = Vec<u8>;

    /// Saves by deleting any existing entry first: the credential store
    /// has no upsert and rejects duplicate inserts. A delete of nothing is
    /// accepted. The two steps are not atomic - a crash or a concurrent
    /// writer between them can lose the entry. Accepted limitation, no
    /// retries.
    fn save(&self, raw: Vec<u8>) -> Result<()> {
        match self.store.delete(&self.identity) {
            Ok(()) | Err(CredentialError::NotFound(_)) => {}
            Err(e) => return Err(PersistError::Keychain(e.to_string())),
        }

        self.store
            .add(&self.identity, &raw)
            .map_err(|e| PersistError::Keychain(e.to_string()))?;

        debug!("Saved entry: {}", self.identity);
        Ok(())
    }

    fn fetch(&self) -> Result<Option<Vec<u8>>> {
        match self.store.lookup(&self.identity) {
            Ok(payload) => Ok(Some(payload)),
            Err(CredentialError::NotFound(_)) => Ok(None),
            Err(e) => Err(PersistError::Keychain(e.to_string())),
        }
    }

    fn remove(&self) -> Result<()> {
        match self.store.delete(&self.identity) {
            Ok(()) | Err(CredentialError::NotFound(_)) => {
                debug!("Removed entry: {}", self.identity);
                Ok(())
            }
            Err(e) => Err(PersistError::Keychain(e.to_string())),
        }
    }
}
