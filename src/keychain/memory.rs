//! In-memory credential store for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{AccountIdentity, CredentialError, CredentialStore};

/// In-memory credential store
///
/// Unlike the OS keychain this store rejects duplicate inserts, like the
/// credential services that have no native upsert. Tests rely on this to
/// observe that the secure backend deletes before every add. Clones share
/// the same map.
#[derive(Clone, Default)]
pub struct MemoryKeychain {
    entries: Arc<Mutex<HashMap<AccountIdentity, Vec<u8>>>>,
}

impl MemoryKeychain {
    /// Create an empty in-memory credential store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw payload directly, bypassing any codec (for tests)
    pub fn seed(&self, identity: &AccountIdentity, payload: Vec<u8>) {
        self.lock().insert(identity.clone(), payload);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AccountIdentity, Vec<u8>>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryKeychain {
    fn add(&self, identity: &AccountIdentity, payload: &[u8]) -> Result<(), CredentialError> {
        let mut entries = self.lock();
        if entries.contains_key(identity) {
            return Err(CredentialError::Duplicate(identity.clone()));
        }
        entries.insert(identity.clone(), payload.to_vec());
        Ok(())
    }

    fn delete(&self, identity: &AccountIdentity) -> Result<(), CredentialError> {
        self.lock()
            .remove(identity)
            .map(|_| ())
            .ok_or_else(|| CredentialError::NotFound(identity.clone()))
    }

    fn lookup(&self, identity: &AccountIdentity) -> Result<Vec<u8>, CredentialError> {
        self.lock()
            .get(identity)
            .cloned()
            .ok_or_else(|| CredentialError::NotFound(identity.clone()))
    }
}
