//! Factory functions for pre-configured containers
//!
//! One factory function per backend/codec pairing, instead of a container
//! subtype per value type. Each comes in two forms mirroring
//! the two ways a container starts life: the plain form eagerly loads from
//! storage, the `*_with` form takes an explicit initial value that is not
//! persisted until `save()`.

/// Containers backed by a preference store
pub mod pref {
    use std::collections::HashSet;
    use std::hash::Hash;

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use crate::backend::PreferenceBackend;
    use crate::codec::{JsonCodec, ScalarCodec, SetCodec, Storable};
    use crate::error::Result;
    use crate::prefs::PreferenceStore;
    use crate::value::Persisted;

    /// Preference-backed container, any codec
    pub type PrefValue<V, P, C> = Persisted<V, PreferenceBackend<P>, C>;

    /// Load a scalar value (bool, integer, float, string, timestamp)
    pub fn native<V, P>(key: &str, store: P) -> Result<PrefValue<V, P, ScalarCodec>>
    where
        V: Storable,
        P: PreferenceStore,
    {
        Persisted::load(PreferenceBackend::new(key, store), ScalarCodec)
    }

    /// Scalar value container with an explicit initial value
    pub fn native_with<V, P>(
        value: Option<V>,
        key: &str,
        store: P,
    ) -> PrefValue<V, P, ScalarCodec>
    where
        V: Storable,
        P: PreferenceStore,
    {
        Persisted::with_value(value, PreferenceBackend::new(key, store), ScalarCodec)
    }

    /// Load a composite value through the lenient JSON codec
    pub fn json<V, P>(key: &str, store: P) -> Result<PrefValue<V, P, JsonCodec>>
    where
        V: Serialize + DeserializeOwned,
        P: PreferenceStore,
    {
        Persisted::load(PreferenceBackend::new(key, store), JsonCodec::lenient())
    }

    /// Load a composite value through the strict JSON codec; undecodable
    /// stored data is an error rather than `None`
    pub fn json_strict<V, P>(key: &str, store: P) -> Result<PrefValue<V, P, JsonCodec>>
    where
        V: Serialize + DeserializeOwned,
        P: PreferenceStore,
    {
        Persisted::load(PreferenceBackend::new(key, store), JsonCodec::strict())
    }

    /// Composite value container with an explicit initial value (lenient)
    pub fn json_with<V, P>(
        value: Option<V>,
        key: &str,
        store: P,
    ) -> PrefValue<V, P, JsonCodec>
    where
        V: Serialize + DeserializeOwned,
        P: PreferenceStore,
    {
        Persisted::with_value(value, PreferenceBackend::new(key, store), JsonCodec::lenient())
    }

    /// Load a set of scalar elements. An empty or wrong-shaped slot loads
    /// as an empty set, not `None`.
    pub fn set<E, P>(key: &str, store: P) -> Result<PrefValue<HashSet<E>, P, SetCodec>>
    where
        E: Storable + Eq + Hash,
        P: PreferenceStore,
    {
        Persisted::load(PreferenceBackend::new(key, store), SetCodec)
    }

    /// Set container with an explicit initial value
    pub fn set_with<E, P>(
        value: Option<HashSet<E>>,
        key: &str,
        store: P,
    ) -> PrefValue<HashSet<E>, P, SetCodec>
    where
        E: Storable + Eq + Hash,
        P: PreferenceStore,
    {
        Persisted::with_value(value, PreferenceBackend::new(key, store), SetCodec)
    }
}

/// Containers backed by a credential store
pub mod secure {
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use crate::backend::SecureBackend;
    use crate::codec::{ByteRepr, JsonCodec, ScalarCodec};
    use crate::error::Result;
    use crate::keychain::{AccountIdentity, CredentialStore};
    use crate::value::Persisted;

    /// Credential-store-backed container, any codec
    pub type SecureValue<V, S, C> = Persisted<V, SecureBackend<S>, C>;

    /// Load a scalar value from the credential store
    pub fn native<V, S>(identity: AccountIdentity, store: S) -> Result<SecureValue<V, S, ScalarCodec>>
    where
        V: ByteRepr,
        S: CredentialStore,
    {
        Persisted::load(SecureBackend::new(identity, store), ScalarCodec)
    }

    /// Scalar value container with an explicit initial value
    pub fn native_with<V, S>(
        value: Option<V>,
        identity: AccountIdentity,
        store: S,
    ) -> SecureValue<V, S, ScalarCodec>
    where
        V: ByteRepr,
        S: CredentialStore,
    {
        Persisted::with_value(value, SecureBackend::new(identity, store), ScalarCodec)
    }

    /// Load a composite value through the lenient JSON codec
    pub fn json<V, S>(identity: AccountIdentity, store: S) -> Result<SecureValue<V, S, JsonCodec>>
    where
        V: Serialize + DeserializeOwned,
        S: CredentialStore,
    {
        Persisted::load(SecureBackend::new(identity, store), JsonCodec::lenient())
    }

    /// Load a composite value through the strict JSON codec; undecodable
    /// stored data is an error rather than `None`
    pub fn json_strict<V, S>(
        identity: AccountIdentity,
        store: S,
    ) -> Result<SecureValue<V, S, JsonCodec>>
    where
        V: Serialize + DeserializeOwned,
        S: CredentialStore,
    {
        Persisted::load(SecureBackend::new(identity, store), JsonCodec::strict())
    }

    /// Composite value container with an explicit initial value (lenient)
    pub fn json_with<V, S>(
        value: Option<V>,
        identity: AccountIdentity,
        store: S,
    ) -> SecureValue<V, S, JsonCodec>
    where
        V: Serialize + DeserializeOwned,
        S: CredentialStore,
    {
        Persisted::with_value(value, SecureBackend::new(identity, store), JsonCodec::lenient())
    }
}
