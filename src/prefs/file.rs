//! File-backed preference store
//!
//! Stores preferences in a plain JSON file. Writes accumulate in memory
//! and hit the disk on `synchronize()`, written atomically through a temp
//! file. Not for sensitive data - use the keychain side for that.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Preference, PreferenceStore};
use crate::error::{PersistError, Result};

/// File name used inside the preference directory
const PREFERENCES_FILE: &str = "preferences.json";

/// File-backed preference store
///
/// A cheap clonable handle; clones share the same in-memory state and file.
#[derive(Clone)]
pub struct FilePreferences {
    /// Path of the backing JSON file
    path: PathBuf,
    /// In-memory state, shared between clones
    cache: Arc<Mutex<Cache>>,
}

#[derive(Debug, Default)]
struct Cache {
    entries: HashMap<String, Preference>,
    /// Whether entries diverged from the file since the last flush
    dirty: bool,
}

/// On-disk format
#[derive(Serialize, Deserialize)]
struct PreferencesFile {
    version: u32,
    entries: HashMap<String, Preference>,
}

impl FilePreferences {
    /// Open the preference store in the platform data directory for the
    /// given application name (e.g. `~/.local/share/<app>` on Linux).
    pub fn standard(app: &str) -> Result<Self> {
        let dirs = ProjectDirs::from("com", "symbia-labs", app).ok_or_else(|| {
            PersistError::Preferences("could not determine data directory".to_string())
        })?;
        Self::with_dir(dirs.data_dir())
    }

    /// Open the preference store in a specific directory (for testing)
    pub fn with_dir(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(PREFERENCES_FILE);
        let entries = Self::load_from_file(&path)?;

        debug!("Preference store opened at {:?}", path);

        Ok(Self {
            path,
            cache: Arc::new(Mutex::new(Cache {
                entries,
                dirty: false,
            })),
        })
    }

    fn load_from_file(path: &Path) -> Result<HashMap<String, Preference>> {
        if !path.exists() {
            debug!("No preference file found, starting empty");
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let file: PreferencesFile = serde_json::from_str(&contents)?;
        debug!("Loaded {} preferences from {:?}", file.entries.len(), path);
        Ok(file.entries)
    }

    fn flush(&self, cache: &mut Cache) -> Result<()> {
        if !cache.dirty {
            return Ok(());
        }

        let file = PreferencesFile {
            version: 1,
            entries: cache.entries.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;

        // Write atomically using a temp file
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &self.path)?;

        cache.dirty = false;
        debug!("Flushed {} preferences to {:?}", cache.entries.len(), self.path);
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cache> {
        // A poisoned lock means another thread panicked mid-update; the
        // map itself is still structurally sound.
        self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PreferenceStore for FilePreferences {
    fn set(&self, key: &str, value: Preference) {
        let mut cache = self.lock();
        cache.entries.insert(key.to_string(), value);
        cache.dirty = true;
    }

    fn get(&self, key: &str) -> Option<Preference> {
        self.lock().entries.get(key).cloned()
    }

    fn remove_object(&self, key: &str) {
        let mut cache = self.lock();
        if cache.entries.remove(key).is_some() {
            cache.dirty = true;
        }
    }

    fn synchronize(&self) -> bool {
        let mut cache = self.lock();
        match self.flush(&mut cache) {
            Ok(()) => true,
            Err(e) => {
                warn!("Preference flush failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn starts_empty() {
        let dir = TempDir::new().unwrap();
        let prefs = FilePreferences::with_dir(dir.path()).unwrap();
        assert_eq!(prefs.get("missing"), None);
    }

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().unwrap();
        let prefs = FilePreferences::with_dir(dir.path()).unwrap();

        prefs.set("answer", Preference::Int(42));
        assert_eq!(prefs.get("answer"), Some(Preference::Int(42)));

        prefs.remove_object("answer");
        assert_eq!(prefs.get("answer"), None);
    }

    #[test]
    fn persists_across_instances() {
        let dir = TempDir::new().unwrap();

        {
            let prefs = FilePreferences::with_dir(dir.path()).unwrap();
            prefs.set("name", Preference::Str("anna".to_string()));
            prefs.set(
                "tags",
                Preference::List(vec![Preference::Int(1), Preference::Int(2)]),
            );
            assert!(prefs.synchronize());
        }

        {
            let prefs = FilePreferences::with_dir(dir.path()).unwrap();
            assert_eq!(prefs.get("name"), Some(Preference::Str("anna".to_string())));
            assert_eq!(
                prefs.get("tags"),
                Some(Preference::List(vec![
                    Preference::Int(1),
                    Preference::Int(2)
                ]))
            );
        }
    }

    #[test]
    fn unsynchronized_writes_stay_in_memory() {
        let dir = TempDir::new().unwrap();

        {
            let prefs = FilePreferences::with_dir(dir.path()).unwrap();
            prefs.set("volatile", Preference::Bool(true));
            // no synchronize
        }

        let prefs = FilePreferences::with_dir(dir.path()).unwrap();
        assert_eq!(prefs.get("volatile"), None);
    }

    #[test]
    fn clones_share_state() {
        let dir = TempDir::new().unwrap();
        let prefs = FilePreferences::with_dir(dir.path()).unwrap();
        let other = prefs.clone();

        prefs.set("shared", Preference::Bool(true));
        assert_eq!(other.get("shared"), Some(Preference::Bool(true)));
    }
}
