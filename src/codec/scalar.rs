//! Direct codecs for scalar types
//!
//! One zero-sized [`ScalarCodec`] covers both backends through two bridge
//! traits: [`Storable`] maps a scalar onto its native [`Preference`]
//! variant, [`ByteRepr`] onto a fixed byte layout for the secure store.
//! Decode of mismatched data yields `None` under both.

use chrono::{DateTime, Utc};

use super::Codec;
use crate::error::Result;
use crate::prefs::Preference;

/// Direct native-representation codec for scalar values.
///
/// Supported types: `bool`, `i32`, `i64`, `f32`, `f64`, `String` and
/// `DateTime<Utc>` (at microsecond precision).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarCodec;

impl<V: Storable> Codec<V, Preference> for ScalarCodec {
    fn encode(&self, value: &V) -> Result<Preference> {
        Ok(value.to_preference())
    }

    fn decode(&self, raw: Option<Preference>) -> Result<Option<V>> {
        Ok(raw.and_then(|p| V::from_preference(&p)))
    }
}

impl<V: ByteRepr> Codec<V, Vec<u8>> for ScalarCodec {
    fn encode(&self, value: &V) -> Result<Vec<u8>> {
        Ok(value.to_bytes())
    }

    fn decode(&self, raw: Option<Vec<u8>>) -> Result<Option<V>> {
        Ok(raw.and_then(|b| V::from_bytes(&b)))
    }
}

/// Scalars with a native slot in the preference store.
///
/// Implementing this trait is what marks a type as "primitive" for the
/// preference side; composite types go through [`JsonCodec`](super::JsonCodec)
/// instead and deliberately do not implement it.
pub trait Storable: Sized {
    fn to_preference(&self) -> Preference;

    /// `None` if the stored preference has a different shape.
    fn from_preference(pref: &Preference) -> Option<Self>;
}

impl Storable for bool {
    fn to_preference(&self) -> Preference {
        Preference::Bool(*self)
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Storable for i64 {
    fn to_preference(&self) -> Preference {
        Preference::Int(*self)
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl Storable for i32 {
    fn to_preference(&self) -> Preference {
        Preference::Int(i64::from(*self))
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Int(i) => Self::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl Storable for f64 {
    fn to_preference(&self) -> Preference {
        Preference::Float(*self)
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl Storable for f32 {
    fn to_preference(&self) -> Preference {
        // Widening is exact; the round trip back through f64 is lossless.
        Preference::Float(f64::from(*self))
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Float(f) => Some(*f as f32),
            _ => None,
        }
    }
}

impl Storable for String {
    fn to_preference(&self) -> Preference {
        Preference::Str(self.clone())
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl Storable for DateTime<Utc> {
    fn to_preference(&self) -> Preference {
        Preference::Int(self.timestamp_micros())
    }

    fn from_preference(pref: &Preference) -> Option<Self> {
        match pref {
            Preference::Int(micros) => Self::from_timestamp_micros(*micros),
            _ => None,
        }
    }
}

/// Scalars with a fixed byte layout for the secure store.
///
/// Booleans are one byte (1/0), numerics little-endian with exact width,
/// strings UTF-8, timestamps the microsecond count as a little-endian i64.
pub trait ByteRepr: Sized {
    fn to_bytes(&self) -> Vec<u8>;

    /// `None` if the payload has the wrong length or shape.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;
}

impl ByteRepr for bool {
    fn to_bytes(&self) -> Vec<u8> {
        vec![u8::from(*self)]
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0] => Some(false),
            [1] => Some(true),
            _ => None,
        }
    }
}

macro_rules! le_byte_repr {
    ($($t:ty),*) => {$(
        impl ByteRepr for $t {
            fn to_bytes(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> Option<Self> {
                Some(<$t>::from_le_bytes(bytes.try_into().ok()?))
            }
        }
    )*};
}

le_byte_repr!(i32, i64, f32, f64);

impl ByteRepr for String {
    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::from_utf8(bytes.to_vec()).ok()
    }
}

impl ByteRepr for DateTime<Utc> {
    fn to_bytes(&self) -> Vec<u8> {
        self.timestamp_micros().to_le_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::from_timestamp_micros(i64::from_bytes(bytes)?)
    }
}
