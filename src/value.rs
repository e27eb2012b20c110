//! The persisted value container

use crate::backend::Backend;
use crate::codec::Codec;
use crate::error::Result;

/// A typed optional value bound to one storage backend and one codec.
///
/// The value lives in memory; `save()`, `fetch()` and `remove()` push and
/// pull it through the codec and backend synchronously. Between a mutation
/// and the next `save()` the in-memory value may diverge from storage -
/// that is by contract, not an anomaly.
///
/// Not internally locked: concurrent operations on the *same* container
/// must be serialized by the caller. Different containers are independent.
///
/// Most callers construct these through the [`values`](crate::values)
/// factory functions rather than directly.
pub struct Persisted<V, B, C>
where
    B: Backend,
    C: Codec<V, B::Raw>,
{
    value: Option<V>,
    backend: B,
    codec: C,
}

impl<V, B, C> Persisted<V, B, C>
where
    B: Backend,
    C: Codec<V, B::Raw>,
{
    /// Create a container and eagerly load its value from the backend.
    ///
    /// A slot that holds nothing (or undecodable data, under a lenient
    /// codec) loads as `None`.
    pub fn load(backend: B, codec: C) -> Result<Self> {
        let value = codec.decode(backend.fetch()?)?;
        Ok(Self {
            value,
            backend,
            codec,
        })
    }

    /// Create a container with an explicit initial value.
    ///
    /// The value is not persisted until `save()` is called.
    pub fn with_value(value: Option<V>, backend: B, codec: C) -> Self {
        Self {
            value,
            backend,
            codec,
        }
    }

    /// The current in-memory value
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Mutable access to the current in-memory value
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Replace the in-memory value without persisting it
    pub fn set(&mut self, value: Option<V>) {
        self.value = value;
    }

    /// Persist the current value.
    ///
    /// With a present value this encodes and writes through the backend;
    /// with an absent one it clears the slot, exactly like [`remove`].
    ///
    /// [`remove`]: Persisted::remove
    pub fn save(&mut self) -> Result<()> {
        match &self.value {
            Some(value) => {
                let raw = self.codec.encode(value)?;
                self.backend.save(raw)
            }
            None => self.remove(),
        }
    }

    /// Update the in-memory value through a closure, then persist it.
    ///
    /// The closure receives the current *in-memory* value - storage is not
    /// re-read first - which makes compute-and-persist a single call.
    pub fn save_with(&mut self, updating: impl FnOnce(Option<V>) -> Option<V>) -> Result<()> {
        self.value = updating(self.value.take());
        self.save()
    }

    /// Reload the value from the backend, overwriting the in-memory value.
    ///
    /// An empty slot (or undecodable data, under a lenient codec)
    /// overwrites it with `None`.
    pub fn fetch(&mut self) -> Result<()> {
        self.value = self.codec.decode(self.backend.fetch()?)?;
        Ok(())
    }

    /// Drop the in-memory value and clear the backend slot.
    ///
    /// Removing an already-absent value is a no-op.
    pub fn remove(&mut self) -> Result<()> {
        self.value = None;
        self.backend.remove()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    use crate::error::PersistError;
    use crate::keychain::{AccountIdentity, MemoryKeychain};
    use crate::prefs::{FilePreferences, MemoryPreferences, Preference, PreferenceStore};
    use crate::values::{pref, secure};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Hedgehog {
        name: String,
        alive: bool,
        friends: Vec<Hedgehog>,
        birthday: DateTime<Utc>,
    }

    fn carlos() -> Hedgehog {
        Hedgehog {
            name: "Carlos".to_string(),
            alive: false,
            friends: vec![],
            birthday: DateTime::from_timestamp_micros(-123_456_789_000_000).unwrap(),
        }
    }

    fn anna() -> Hedgehog {
        Hedgehog {
            name: "Anna".to_string(),
            alive: true,
            friends: vec![carlos()],
            birthday: DateTime::from_timestamp_micros(567_890_123_000_000).unwrap(),
        }
    }

    #[test]
    fn fresh_key_loads_as_none() {
        let prefs = MemoryPreferences::new();
        let value = pref::native::<bool, _>("never-written", prefs).unwrap();
        assert_eq!(value.value(), None);
    }

    #[test]
    fn fresh_identity_loads_as_none() {
        let store = MemoryKeychain::new();
        let value =
            secure::native::<String, _>(AccountIdentity::for_account("nobody"), store).unwrap();
        assert_eq!(value.value(), None);
    }

    #[test]
    fn explicit_initial_value_is_not_persisted_until_save() {
        let prefs = MemoryPreferences::new();
        let mut value = pref::native_with(Some(7i64), "count", prefs.clone());
        assert_eq!(prefs.get("count"), None);

        value.save().unwrap();
        assert_eq!(prefs.get("count"), Some(Preference::Int(7)));
    }

    #[test]
    fn scalar_round_trips_through_preferences() {
        let prefs = MemoryPreferences::new();

        let mut b = pref::native_with(Some(true), "b", prefs.clone());
        b.save().unwrap();
        let mut i = pref::native_with(Some(-5i64), "i", prefs.clone());
        i.save().unwrap();
        let mut f = pref::native_with(Some(2.5f64), "f", prefs.clone());
        f.save().unwrap();
        let mut s = pref::native_with(Some("text".to_string()), "s", prefs.clone());
        s.save().unwrap();
        let date: DateTime<Utc> = DateTime::from_timestamp_micros(1_234_567).unwrap();
        let mut d = pref::native_with(Some(date), "d", prefs.clone());
        d.save().unwrap();

        assert_eq!(
            pref::native::<bool, _>("b", prefs.clone()).unwrap().value(),
            Some(&true)
        );
        assert_eq!(
            pref::native::<i64, _>("i", prefs.clone()).unwrap().value(),
            Some(&-5)
        );
        assert_eq!(
            pref::native::<f64, _>("f", prefs.clone()).unwrap().value(),
            Some(&2.5)
        );
        assert_eq!(
            pref::native::<String, _>("s", prefs.clone())
                .unwrap()
                .value()
                .map(String::as_str),
            Some("text")
        );
        assert_eq!(
            pref::native::<DateTime<Utc>, _>("d", prefs).unwrap().value(),
            Some(&date)
        );
    }

    #[test]
    fn scalar_round_trips_through_keychain() {
        let store = MemoryKeychain::new();

        let mut b = secure::native_with(
            Some(true),
            AccountIdentity::for_account("b"),
            store.clone(),
        );
        b.save().unwrap();
        let mut s = secure::native_with(
            Some("tajemství".to_string()),
            AccountIdentity::for_account("s"),
            store.clone(),
        );
        s.save().unwrap();

        assert_eq!(
            secure::native::<bool, _>(AccountIdentity::for_account("b"), store.clone())
                .unwrap()
                .value(),
            Some(&true)
        );
        assert_eq!(
            secure::native::<String, _>(AccountIdentity::for_account("s"), store)
                .unwrap()
                .value()
                .map(String::as_str),
            Some("tajemství")
        );
    }

    #[test]
    fn save_of_absent_value_clears_the_slot() {
        let prefs = MemoryPreferences::new();
        prefs.set("gone", Preference::Int(1));

        let mut value = pref::native_with(None::<i64>, "gone", prefs.clone());
        value.save().unwrap();
        assert_eq!(prefs.get("gone"), None);
    }

    #[test]
    fn remove_clears_value_and_slot_idempotently() {
        let store = MemoryKeychain::new();
        let id = AccountIdentity::for_account("alice");
        let mut value = secure::native_with(Some(1i64), id.clone(), store.clone());
        value.save().unwrap();

        value.remove().unwrap();
        assert_eq!(value.value(), None);
        value.remove().unwrap();

        assert_eq!(secure::native::<i64, _>(id, store).unwrap().value(), None);
    }

    #[test]
    fn save_with_from_absent_value() {
        let prefs = MemoryPreferences::new();
        let mut value = pref::native::<i64, _>("counter", prefs.clone()).unwrap();

        value.save_with(|current| Some(current.unwrap_or(-1))).unwrap();

        assert_eq!(value.value(), Some(&-1));
        assert_eq!(prefs.get("counter"), Some(Preference::Int(-1)));
    }

    #[test]
    fn save_with_from_present_value() {
        let prefs = MemoryPreferences::new();
        prefs.set("counter", Preference::Int(2));

        let mut value = pref::native::<i64, _>("counter", prefs.clone()).unwrap();
        value.save_with(|current| current.map(|c| c + 10)).unwrap();

        assert_eq!(value.value(), Some(&12));
        assert_eq!(prefs.get("counter"), Some(Preference::Int(12)));
    }

    #[test]
    fn save_with_can_clear_the_value() {
        let store = MemoryKeychain::new();
        let id = AccountIdentity::for_account("alice");
        let mut value = secure::native_with(Some(5i64), id.clone(), store.clone());
        value.save().unwrap();

        value.save_with(|_| None).unwrap();

        assert_eq!(value.value(), None);
        assert_eq!(secure::native::<i64, _>(id, store).unwrap().value(), None);
    }

    #[test]
    fn overwrite_leaves_only_the_newer_value() {
        let store = MemoryKeychain::new();
        let id = AccountIdentity::for_account("token");

        let mut first = secure::native_with(
            Some("A".to_string()),
            id.clone(),
            store.clone(),
        );
        first.save().unwrap();

        let mut second = secure::native_with(
            Some("B".to_string()),
            id.clone(),
            store.clone(),
        );
        second.save().unwrap();

        let reloaded = secure::native::<String, _>(id, store).unwrap();
        assert_eq!(reloaded.value().map(String::as_str), Some("B"));
    }

    #[test]
    fn fetch_overwrites_the_in_memory_value() {
        let prefs = MemoryPreferences::new();
        let mut value = pref::native_with(Some(1i64), "n", prefs.clone());

        prefs.set("n", Preference::Int(99));
        value.fetch().unwrap();
        assert_eq!(value.value(), Some(&99));

        prefs.remove_object("n");
        value.fetch().unwrap();
        assert_eq!(value.value(), None);
    }

    #[test]
    fn malformed_payload_fetches_as_none_under_lenient_policy() {
        let store = MemoryKeychain::new();
        let id = AccountIdentity::for_account("mangled");
        store.seed(&id, b"definitely not json".to_vec());

        let value = secure::json::<Hedgehog, _>(id, store).unwrap();
        assert_eq!(value.value(), None);
    }

    #[test]
    fn malformed_payload_fails_load_under_strict_policy() {
        let store = MemoryKeychain::new();
        let id = AccountIdentity::for_account("mangled");
        store.seed(&id, b"definitely not json".to_vec());

        let result = secure::json_strict::<Hedgehog, _>(id, store);
        assert!(matches!(result, Err(PersistError::Decode(_))));
    }

    #[test]
    fn wrong_shaped_preference_fetches_as_none_for_scalars() {
        let prefs = MemoryPreferences::new();
        prefs.set("b", Preference::Str("true".to_string()));

        let value = pref::native::<bool, _>("b", prefs).unwrap();
        assert_eq!(value.value(), None);
    }

    #[test]
    fn set_round_trips_order_insensitively() {
        let prefs = MemoryPreferences::new();
        let set: HashSet<String> = ["a", "b", "c"].into_iter().map(String::from).collect();

        let mut value = pref::set_with(Some(set.clone()), "tags", prefs.clone());
        value.save().unwrap();

        let reloaded = pref::set::<String, _>("tags", prefs).unwrap();
        assert_eq!(reloaded.value(), Some(&set));
    }

    #[test]
    fn set_decodes_scalar_slot_as_empty_set() {
        let prefs = MemoryPreferences::new();
        prefs.set("tags", Preference::Int(42));

        let value = pref::set::<i64, _>("tags", prefs).unwrap();
        assert_eq!(value.value(), Some(&HashSet::new()));
    }

    #[test]
    fn set_decodes_empty_slot_as_empty_set() {
        let value = pref::set::<i64, _>("tags", MemoryPreferences::new()).unwrap();
        assert_eq!(value.value(), Some(&HashSet::new()));
    }

    #[test]
    fn nested_composite_round_trips_through_preferences() {
        let prefs = MemoryPreferences::new();

        let mut value = pref::json_with(Some(anna()), "hedgehog", prefs.clone());
        value.save().unwrap();

        let reloaded = pref::json::<Hedgehog, _>("hedgehog", prefs).unwrap();
        assert_eq!(reloaded.value(), Some(&anna()));
        assert_eq!(reloaded.value().unwrap().friends, vec![carlos()]);
    }

    #[test]
    fn nested_composite_round_trips_through_keychain() {
        let store = MemoryKeychain::new();
        let id = AccountIdentity::new("hedgehogs", "cz.example.app");

        let mut value = secure::json_with(Some(vec![anna(), carlos()]), id.clone(), store.clone());
        value.save().unwrap();

        let reloaded = secure::json::<Vec<Hedgehog>, _>(id, store).unwrap();
        assert_eq!(reloaded.value(), Some(&vec![anna(), carlos()]));
    }

    #[test]
    fn values_survive_a_preference_store_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let prefs = FilePreferences::with_dir(dir.path()).unwrap();
            let mut value = pref::json_with(Some(anna()), "hedgehog", prefs);
            value.save().unwrap();
        }

        let prefs = FilePreferences::with_dir(dir.path()).unwrap();
        let reloaded = pref::json::<Hedgehog, _>("hedgehog", prefs).unwrap();
        assert_eq!(reloaded.value(), Some(&anna()));
    }
}
