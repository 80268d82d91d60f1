//! Multibase text encodings: a one-character base indicator followed by
//! the encoded payload.

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::{PeerIdError, Result};

/// RFC 4648 base64 without padding on output, padding optional on input.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const BASE32_LOWER_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz234567";

/// Supported multibase encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    /// RFC 4648 base32, lowercase, no padding.
    Base32Lower,
    /// Bitcoin base58.
    Base58Btc,
    /// RFC 4648 base64, no padding.
    Base64,
}

impl Base {
    /// The multibase indicator character.
    pub fn code(self) -> char {
        match self {
            Self::Base32Lower => 'b',
            Self::Base58Btc => 'z',
            Self::Base64 => 'm',
        }
    }

    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'b' => Ok(Self::Base32Lower),
            'z' => Ok(Self::Base58Btc),
            'm' => Ok(Self::Base64),
            other => Err(PeerIdError::InvalidPrefix(format!(
                "unsupported multibase indicator '{other}'"
            ))),
        }
    }

    /// Encode without the indicator.
    pub fn encode_raw(self, bytes: &[u8]) -> String {
        match self {
            Self::Base32Lower => data_encoding::BASE32_NOPAD
                .encode(bytes)
                .to_ascii_lowercase(),
            Self::Base58Btc => bs58::encode(bytes).into_string(),
            Self::Base64 => BASE64.encode(bytes),
        }
    }

    /// Decode a payload that carries no indicator.
    pub fn decode_raw(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Base32Lower => {
                if let Some(bad) = text.chars().find(|c| !BASE32_LOWER_ALPHABET.contains(*c)) {
                    return Err(PeerIdError::InvalidCharacter(format!(
                        "'{bad}' is not in the base32 lowercase alphabet"
                    )));
                }
                data_encoding::BASE32_NOPAD
                    .decode(text.to_ascii_uppercase().as_bytes())
                    .map_err(|e| PeerIdError::InvalidCharacter(format!("base32: {e}")))
            }
            Self::Base58Btc => bs58::decode(text)
                .into_vec()
                .map_err(|e| PeerIdError::InvalidCharacter(format!("base58: {e}"))),
            Self::Base64 => BASE64
                .decode(text)
                .map_err(|e| PeerIdError::InvalidCharacter(format!("base64: {e}"))),
        }
    }
}

/// Encode bytes with the base's indicator prepended.
pub fn encode(base: Base, bytes: &[u8]) -> String {
    let mut out = String::new();
    out.push(base.code());
    out.push_str(&base.encode_raw(bytes));
    out
}

/// Decode text whose first character names its base.
pub fn decode(text: &str) -> Result<(Base, Vec<u8>)> {
    let mut chars = text.chars();
    let code = chars
        .next()
        .ok_or_else(|| PeerIdError::InvalidPrefix("empty multibase string".into()))?;
    let base = Base::from_code(code)?;
    Ok((base, base.decode_raw(chars.as_str())?))
}

/// Decode text that must start with the indicator of `base`.
pub fn decode_prefixed(base: Base, text: &str) -> Result<Vec<u8>> {
    let payload = text.strip_prefix(base.code()).ok_or_else(|| {
        PeerIdError::InvalidPrefix(format!(
            "expected multibase indicator '{}'",
            base.code()
        ))
    })?;
    base.decode_raw(payload)
}

/// Decode a payload with the indicator already stripped.
pub fn decode_raw(base: Base, text: &str) -> Result<Vec<u8>> {
    base.decode_raw(text)
}
