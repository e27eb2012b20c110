//! JSON codec for arbitrary serde-serializable types

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{Codec, DecodePolicy};
use crate::error::{PersistError, Result};
use crate::prefs::Preference;

/// JSON codec for composite values (structs, enums, nested collections).
///
/// Encoding produces a JSON byte buffer; on the preference side it is
/// stored in a byte-buffer slot. An encode failure means the type and its
/// current value are not jointly serializable, which is a structural bug -
/// it surfaces as [`PersistError::Encode`], never as silent data loss.
///
/// Decoding of malformed or schema-mismatched data follows the configured
/// [`DecodePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    policy: DecodePolicy,
}

impl JsonCodec {
    /// Codec with the lenient decode policy (malformed data reads as `None`)
    pub fn lenient() -> Self {
        Self {
            policy: DecodePolicy::Lenient,
        }
    }

    /// Codec with the strict decode policy (malformed data is an error)
    pub fn strict() -> Self {
        Self {
            policy: DecodePolicy::Strict,
        }
    }

    /// Codec with an explicit decode policy
    pub fn with_policy(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    fn encode_value<V: Serialize>(value: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| PersistError::Encode(e.to_string()))
    }

    fn decode_value<V: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<V>> {
        match serde_json::from_slice(bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => match self.policy {
                DecodePolicy::Lenient => {
                    warn!("Discarding undecodable stored value: {}", e);
                    Ok(None)
                }
                DecodePolicy::Strict => Err(PersistError::Decode(e.to_string())),
            },
        }
    }
}

impl<V> Codec<V, Vec<u8>> for JsonCodec
where
    V: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &V) -> Result<Vec<u8>> {
        Self::encode_value(value)
    }

    fn decode(&self, raw: Option<Vec<u8>>) -> Result<Option<V>> {
        match raw {
            Some(bytes) => self.decode_value(&bytes),
            None => Ok(None),
        }
    }
}

impl<V> Codec<V, Preference> for JsonCodec
where
    V: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &V) -> Result<Preference> {
        Ok(Preference::Bytes(Self::encode_value(value)?))
    }

    fn decode(&self, raw: Option<Preference>) -> Result<Option<V>> {
        match raw {
            Some(Preference::Bytes(bytes)) => self.decode_value(&bytes),
            Some(other) => match self.policy {
                DecodePolicy::Lenient => {
                    warn!("Stored preference is not a byte buffer, discarding");
                    Ok(None)
                }
                DecodePolicy::Strict => Err(PersistError::Decode(format!(
                    "expected a byte buffer, found {other:?}"
                ))),
            },
            None => Ok(None),
        }
    }
}
