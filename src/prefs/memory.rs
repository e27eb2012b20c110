//! In-memory preference store for tests and ephemeral use

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{Preference, PreferenceStore};

/// In-memory preference store
///
/// Never touches the disk; `synchronize()` always succeeds. Clones share
/// the same map.
#[derive(Clone, Default)]
pub struct MemoryPreferences {
    entries: Arc<Mutex<HashMap<String, Preference>>>,
}

impl MemoryPreferences {
    /// Create an empty in-memory preference store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Preference>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn set(&self, key: &str, value: Preference) {
        self.lock().insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<Preference> {
        self.lock().get(key).cloned()
    }

    fn remove_object(&self, key: &str) {
        self.lock().remove(key);
    }

    fn synchronize(&self) -> bool {
        true
    }
}
