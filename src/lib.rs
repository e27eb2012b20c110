//! # persisted
//!
//! Typed local persistence: one read/write value interface backed
//! interchangeably by a device preference store or the OS keychain, with a
//! pluggable codec layer in between.
//!
//! A [`Persisted`] container holds an in-memory `Option<V>` bound to
//! exactly one [`Backend`] (which slot, which service) and one
//! [`Codec`](codec::Codec) (how `V` becomes raw data). `save()`, `fetch()`
//! and `remove()` move the value through both, synchronously.
//!
//! ```no_run
//! use persisted::prefs::FilePreferences;
//! use persisted::values::pref;
//!
//! # fn main() -> persisted::Result<()> {
//! let prefs = FilePreferences::standard("my-app")?;
//!
//! let mut launches = pref::native::<i64, _>("launch-count", prefs)?;
//! launches.save_with(|n| Some(n.unwrap_or(0) + 1))?;
//! # Ok(())
//! # }
//! ```
//!
//! Secrets go through the keychain side instead:
//!
//! ```no_run
//! use persisted::keychain::{AccountIdentity, SystemKeychain};
//! use persisted::values::secure;
//!
//! # fn main() -> persisted::Result<()> {
//! let identity = AccountIdentity::new("api-token", "com.example.my-app");
//! let mut token = secure::native::<String, _>(identity, SystemKeychain::new())?;
//! token.set(Some("s3cr3t".to_string()));
//! token.save()?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod codec;
pub mod error;
pub mod keychain;
pub mod prefs;
pub mod value;
pub mod values;

pub use backend::{Backend, PreferenceBackend, SecureBackend};
pub use codec::{ByteRepr, Codec, DecodePolicy, JsonCodec, ScalarCodec, SetCodec, Storable};
pub use error::{PersistError, Result};
pub use keychain::{AccountIdentity, CredentialError, CredentialStore, MemoryKeychain, SystemKeychain};
pub use prefs::{FilePreferences, MemoryPreferences, Preference, PreferenceStore};
pub use value::Persisted;
