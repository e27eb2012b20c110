//! Device preference store
//!
//! The preference side of the crate stores one [`Preference`] per key.
//! Two implementations are provided:
//! 1. [`FilePreferences`] - a plain JSON file in the user's data directory
//! 2. [`MemoryPreferences`] - in-memory, for tests and ephemeral use

mod file;
mod memory;

pub use file::FilePreferences;
pub use memory::MemoryPreferences;

use serde::{Deserialize, Serialize};

/// The universe of values a preference store can hold directly:
/// booleans, numbers, strings, byte buffers and lists thereof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Preference>),
}

/// Trait for preference store backends.
///
/// Modeled on the device preference services this crate fronts: writes land
/// in memory and are pushed out by an explicit [`synchronize`] call. The
/// store itself has no per-operation error surface; a failed flush is
/// reported through the `synchronize` return value.
///
/// Implementations are cheap clonable handles so several values can share
/// one store.
///
/// [`synchronize`]: PreferenceStore::synchronize
pub trait PreferenceStore {
    /// Store a preference under the given key.
    fn set(&self, key: &str, value: Preference);

    /// Retrieve the preference stored under the given key.
    fn get(&self, key: &str) -> Option<Preference>;

    /// Remove the preference stored under the given key.
    fn remove_object(&self, key: &str);

    /// Flush pending writes. Returns `false` if the flush failed.
    fn synchronize(&self) -> bool;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &P {
    fn set(&self, key: &str, value: Preference) {
        (**self).set(key, value);
    }

    fn get(&self, key: &str) -> Option<Preference> {
        (**self).get(key)
    }

    fn remove_object(&self, key: &str) {
        (**self).remove_object(key);
    }

    fn synchronize(&self) -> bool {
        (**self).synchronize()
    }
}
