//! Multihash framing: `[function code][digest length][digest]`.
//!
//! Code and length are unsigned varints. The `identity` function embeds
//! the input unchanged; `sha2-256` stores its SHA-256 digest.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{PeerIdError, Result};

/// Supported multihash function codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashCode {
    Identity = 0x00,
    Sha2_256 = 0x12,
}

impl HashCode {
    /// Resolve a function code read from a frame.
    pub fn from_code(code: u64) -> Result<Self> {
        match code {
            0x00 => Ok(Self::Identity),
            0x12 => Ok(Self::Sha2_256),
            other => Err(PeerIdError::UnsupportedHashCode(other)),
        }
    }

    pub fn code(self) -> u64 {
        self as u64
    }

    /// Multicodec table name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Sha2_256 => "sha2-256",
        }
    }
}

/// A decoded multihash frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multihash {
    code: HashCode,
    digest: Vec<u8>,
}

impl Multihash {
    /// Hash `input` with `code` and wrap the result.
    pub fn wrap(input: &[u8], code: HashCode) -> Self {
        let digest = match code {
            HashCode::Identity => input.to_vec(),
            HashCode::Sha2_256 => Sha256::digest(input).to_vec(),
        };
        Self { code, digest }
    }

    pub fn code(&self) -> HashCode {
        self.code
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Serialize back to frame bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.digest.len() + 4);
        prost::encoding::encode_varint(self.code.code(), &mut out);
        prost::encoding::encode_varint(self.digest.len() as u64, &mut out);
        out.extend_from_slice(&self.digest);
        out
    }
}

impl fmt::Display for Multihash {
    /// Renders as `0x12 sha2-256 <hex digest>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#04x} {} {}",
            self.code.code(),
            self.code.name(),
            hex::encode(&self.digest)
        )
    }
}

/// Frame `input` with the given hash function.
pub fn encode(input: &[u8], code: HashCode) -> Vec<u8> {
    Multihash::wrap(input, code).to_bytes()
}

/// Read one frame from the front of `bytes`, returning it with the unread tail.
pub fn read(bytes: &[u8]) -> Result<(Multihash, &[u8])> {
    let mut cursor = bytes;
    let code = read_varint(&mut cursor, bytes.len())?;
    let declared = read_varint(&mut cursor, bytes.len())? as usize;
    let code = HashCode::from_code(code)?;

    if declared > cursor.len() {
        return Err(PeerIdError::TruncatedFrame {
            declared,
            available: cursor.len(),
        });
    }
    let (digest, rest) = cursor.split_at(declared);
    if code == HashCode::Sha2_256 && digest.len() != 32 {
        return Err(PeerIdError::invalid_length(
            "sha2-256 digest",
            "32 bytes",
            digest.len(),
        ));
    }

    Ok((
        Multihash {
            code,
            digest: digest.to_vec(),
        },
        rest,
    ))
}

/// Decode a complete frame. Trailing bytes are rejected.
pub fn decode(bytes: &[u8]) -> Result<Multihash> {
    let (multihash, rest) = read(bytes)?;
    if !rest.is_empty() {
        return Err(PeerIdError::invalid_length(
            "multihash frame",
            format!("{} bytes", bytes.len() - rest.len()),
            bytes.len(),
        ));
    }
    Ok(multihash)
}

fn read_varint(cursor: &mut &[u8], total: usize) -> Result<u64> {
    if cursor.is_empty() {
        return Err(PeerIdError::TruncatedFrame {
            declared: total + 1,
            available: total,
        });
    }
    prost::encoding::decode_varint(cursor).map_err(|_| PeerIdError::TruncatedFrame {
        declared: total + 1,
        available: total,
    })
}
