//! Algorithm tag carried by every key envelope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PeerIdError, Result};

/// Signature algorithm of a key.
///
/// The discriminant is the value written into field 1 of the key envelope,
/// and therefore the 4th byte of every embedded peer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyType {
    Rsa = 0,
    Ed25519 = 1,
    Secp256k1 = 2,
}

impl KeyType {
    /// All supported key types, in tag order.
    pub const ALL: [KeyType; 3] = [KeyType::Rsa, KeyType::Ed25519, KeyType::Secp256k1];

    /// Resolve an envelope tag value.
    pub fn from_tag(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(Self::Rsa),
            1 => Ok(Self::Ed25519),
            2 => Ok(Self::Secp256k1),
            other => Err(PeerIdError::UnsupportedKeyType(format!(
                "unknown key type tag {other}"
            ))),
        }
    }

    /// The tag value written into the envelope.
    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Return a stable string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Ed25519 => "Ed25519",
            Self::Secp256k1 => "Secp256k1",
        }
    }
}

impl TryFrom<u8> for KeyType {
    type Error = PeerIdError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_tag(i64::from(value))
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = PeerIdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(Self::Rsa),
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" => Ok(Self::Secp256k1),
            other => Err(PeerIdError::UnsupportedKeyType(other.to_string())),
        }
    }
}
