//! Codecs between typed values and backend raw representations
//!
//! A codec is a pair of pure functions bridging a value type `V` and the
//! raw type a backend persists: [`Preference`](crate::prefs::Preference)
//! for the preference backend, `Vec<u8>` for the secure backend.
//!
//! Error policy, by direction:
//! - `encode` failure means the value and the codec do not fit together at
//!   all. That is a programming error and surfaces as
//!   [`PersistError::Encode`](crate::PersistError::Encode); it is never
//!   swallowed.
//! - `decode` of absent raw data is `Ok(None)`, never an error. What
//!   happens on *present but malformed* data is the codec's policy: the
//!   scalar codec yields `None`, [`JsonCodec`] is configurable via
//!   [`DecodePolicy`], and [`SetCodec`] yields an empty set.

mod json;
mod scalar;
mod set;

pub use json::JsonCodec;
pub use scalar::{ByteRepr, ScalarCodec, Storable};
pub use set::SetCodec;

use crate::error::Result;

/// Paired encode/decode functions between `V` and a backend's `Raw` type.
///
/// The round-trip law holds for every supported `V`:
/// `decode(Some(encode(v)))` reproduces `v` (element-set equality for the
/// set codec, plain equality otherwise).
pub trait Codec<V, Raw> {
    /// Convert a value into the backend's raw representation.
    fn encode(&self, value: &V) -> Result<Raw>;

    /// Convert raw data back into a value. `None` input means the backend
    /// holds nothing for this slot.
    fn decode(&self, raw: Option<Raw>) -> Result<Option<V>>;
}

/// What a generic codec does with present-but-malformed stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Malformed data decodes to `None`. The expected condition when
    /// reading data written by an incompatible version.
    #[default]
    Lenient,
    /// Malformed data is an error. For values whose silent loss would be
    /// worse than a visible failure.
    Strict,
}
