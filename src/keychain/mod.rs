//! Secure credential store
//!
//! The secure side of the crate stores raw byte payloads in an
//! access-controlled credential store, addressed by an (account, service)
//! pair. Two implementations are provided:
//! 1. [`SystemKeychain`] - the OS credential store (macOS Keychain, Windows
//!    Credential Manager, Linux Secret Service)
//! 2. [`MemoryKeychain`] - in-memory, for tests

mod memory;
mod system;

pub use memory::MemoryKeychain;
pub use system::SystemKeychain;

use thiserror::Error;

/// Service used when a caller does not care about namespacing
pub const DEFAULT_SERVICE: &str = "com.symbia-labs.persisted";

/// Addresses one credential-store entry.
///
/// `service` is a logical namespace, `account` identifies the entry within
/// it. At most one entry exists per identity at any time; the save protocol
/// of the secure backend enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountIdentity {
    pub account: String,
    pub service: String,
}

impl AccountIdentity {
    /// Create an identity under an explicit service
    pub fn new(account: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            service: service.into(),
        }
    }

    /// Create an identity under [`DEFAULT_SERVICE`]
    pub fn for_account(account: impl Into<String>) -> Self {
        Self::new(account, DEFAULT_SERVICE)
    }
}

impl std::fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}

/// Status vocabulary of the credential store.
///
/// How each status maps to an outcome depends on the operation and is
/// decided by the secure backend, not here: a `NotFound` lookup is plain
/// absence, a `NotFound` delete is success, anything unexpected is fatal
/// to the calling operation.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no entry for {0}")]
    NotFound(AccountIdentity),

    #[error("duplicate entry for {0}")]
    Duplicate(AccountIdentity),

    #[error("{0}")]
    Failure(String),
}

/// Trait for credential store backends.
///
/// `add` inserts a new entry and is expected to reject an identity that
/// already holds one; callers that want upsert semantics must delete first.
/// Implementations are cheap clonable handles.
pub trait CredentialStore {
    /// Insert a new entry. Fails with [`CredentialError::Duplicate`] if the
    /// identity already holds one (where the underlying service can tell).
    fn add(&self, identity: &AccountIdentity, payload: &[u8]) -> Result<(), CredentialError>;

    /// Delete the entry for the identity. Fails with
    /// [`CredentialError::NotFound`] if there is none.
    fn delete(&self, identity: &AccountIdentity) -> Result<(), CredentialError>;

    /// Look up the payload for the identity, limited to one match. Fails
    /// with [`CredentialError::NotFound`] if there is none.
    fn lookup(&self, identity: &AccountIdentity) -> Result<Vec<u8>, CredentialError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for &S {
    fn add(&self, identity: &AccountIdentity, payload: &[u8]) -> Result<(), CredentialError> {
        (**self).add(identity, payload)
    }

    fn delete(&self, identity: &AccountIdentity) -> Result<(), CredentialError> {
        (**self).delete(identity)
    }

    fn lookup(&self, identity: &AccountIdentity) -> Result<Vec<u8>, CredentialError> {
        (**self).lookup(identity)
    }
}
