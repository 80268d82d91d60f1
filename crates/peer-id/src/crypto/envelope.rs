//! Key envelope codec.
//!
//! Public and private keys are marshaled into the same protobuf message:
//!
//! ```text
//! message KeyEnvelope {
//!     required KeyType Type = 1;
//!     required bytes Data = 2;
//! }
//! ```
//!
//! Both fields carry explicit presence so a missing field is detected on
//! decode instead of silently defaulting.

use prost::Message;

use crate::crypto::KeyType;
use crate::error::{PeerIdError, Result};

/// Wire representation of a key envelope.
#[derive(Clone, PartialEq, Message)]
struct KeyEnvelope {
    #[prost(int32, optional, tag = "1")]
    key_type: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    data: Option<Vec<u8>>,
}

/// Serialize a `(key type, key bytes)` pair into its envelope.
pub fn serialize(key_type: KeyType, data: &[u8]) -> Vec<u8> {
    KeyEnvelope {
        key_type: Some(key_type.tag()),
        data: Some(data.to_vec()),
    }
    .encode_to_vec()
}

/// Parse an envelope back into its key type and key bytes.
pub fn deserialize(bytes: &[u8]) -> Result<(KeyType, Vec<u8>)> {
    let envelope = KeyEnvelope::decode(bytes)
        .map_err(|e| PeerIdError::MalformedEnvelope(e.to_string()))?;

    let tag = envelope
        .key_type
        .ok_or_else(|| PeerIdError::MalformedEnvelope("missing field 1 (type)".into()))?;
    let data = envelope
        .data
        .ok_or_else(|| PeerIdError::MalformedEnvelope("missing field 2 (data)".into()))?;

    Ok((KeyType::from_tag(i64::from(tag))?, data))
}
