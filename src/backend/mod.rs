//! Storage backends
//!
//! A backend binds one storage slot (a preference key, or a keychain
//! identity) to the service that persists it. It moves raw, already-encoded
//! data; which typed values fit in the slot is the codec's business.

mod preference;
mod secure;

pub use preference::PreferenceBackend;
pub use secure::SecureBackend;

use crate::error::Result;

/// Trait for value storage backends.
///
/// One backend instance addresses exactly one slot, fixed for its
/// lifetime.
pub trait Backend {
    /// Raw representation this backend persists
    type Raw;

    /// Persist raw data into the slot, replacing whatever was there.
    fn save(&self, raw: Self::Raw) -> Result<()>;

    /// Read the slot. `None` means nothing is stored.
    fn fetch(&self) -> Result<Option<Self::Raw>>;

    /// Clear the slot. Clearing an empty slot is a no-op, not an error.
    fn remove(&self) -> Result<()>;
}
