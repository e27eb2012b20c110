//! Set codec for unordered collections of scalar elements

use std::collections::HashSet;
use std::hash::Hash;

use super::{Codec, Storable};
use crate::error::Result;
use crate::prefs::Preference;

/// Codec persisting a `HashSet` of scalar elements as a list preference.
///
/// Element types are restricted to scalars by the [`Storable`] bound;
/// composite (serde-only) element types do not compile. Element order in
/// the stored list is arbitrary, so the round trip guarantees set
/// equality, not sequence equality.
///
/// Decoding is deliberately more forgiving than the other codecs: absent
/// raw data and non-list raw data both decode to an **empty set** rather
/// than `None`, and list elements of the wrong shape are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetCodec;

impl<E> Codec<HashSet<E>, Preference> for SetCodec
where
    E: Storable + Eq + Hash,
{
    fn encode(&self, value: &HashSet<E>) -> Result<Preference> {
        Ok(Preference::List(
            value.iter().map(Storable::to_preference).collect(),
        ))
    }

    fn decode(&self, raw: Option<Preference>) -> Result<Option<HashSet<E>>> {
        let set = match raw {
            Some(Preference::List(items)) => items
                .iter()
                .filter_map(E::from_preference)
                .collect(),
            _ => HashSet::new(),
        };
        Ok(Some(set))
    }
}
