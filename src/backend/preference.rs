//! Preference store backend

use tracing::debug;

use super::Backend;
use crate::error::Result;
use crate::prefs::{Preference, PreferenceStore};

/// Backend addressing one key of a preference store.
///
/// The preference store is assumed always available and synchronous, so
/// none of the operations fail; the `Result` surface exists only to match
/// the backend contract. Every write is followed by an explicit
/// `synchronize()`.
pub struct PreferenceBackend<P> {
    key: String,
    store: P,
}

impl<P: PreferenceStore> PreferenceBackend<P> {
    /// Bind a key in the given preference store
    pub fn new(key: impl Into<String>, store: P) -> Self {
        Self {
            key: key.into(),
            store,
        }
    }

    /// The key this backend addresses
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<P: PreferenceStore> Backend for PreferenceBackend<P> {
    type Raw = Preference;

    fn save(&self, raw: Preference) -> Result<()> {
        self.store.set(&self.key, raw);
        self.store.synchronize();
        debug!("Saved preference: {}", self.key);
        Ok(())
    }

    fn fetch(&self) -> Result<Option<Preference>> {
        Ok(self.store.get(&self.key))
    }

    fn remove(&self) -> Result<()> {
        self.store.remove_object(&self.key);
        self.store.synchronize();
        debug!("Removed preference: {}", self.key);
        Ok(())
    }
}
