//! Peer identity — a content-derived identifier over a public key.
//!
//! The identifier is a multihash over the marshaled public key envelope.
//! Envelopes of at most 42 bytes (Ed25519, secp256k1) are embedded with
//! the `identity` function, so the key can be recovered from the
//! identifier alone. Larger envelopes (RSA) are replaced by their SHA-256
//! digest and the key cannot be recovered.
//!
//! Text forms:
//! - Base58: `12D3KooW…` (Ed25519), `16Uiu2…` (secp256k1), `Qm…` (hashed)
//! - CIDv1: `b` + base32-lower(`0x01 0x72` ‖ identifier), starts with `bafz`
//! - hex: lowercase identifier bytes

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::crypto::{KeyPair, KeyType, PrivateKey, PublicKey};
use crate::error::{PeerIdError, Result};
use crate::identity::json::{PeerIdJson, UNDEFINED_PRIVATE_KEY};
use crate::multiformats::multibase::{self, Base};
use crate::multiformats::multihash::{self, HashCode};

/// Largest public key envelope that is embedded rather than hashed.
pub const MAX_INLINE_KEY_LENGTH: usize = 42;

/// CID version byte.
pub const CID_VERSION_1: u8 = 0x01;

/// Multicodec code for `libp2p-key`.
pub const LIBP2P_KEY_CODEC: u8 = 0x72;

/// Offset of the key type tag inside an embedded identifier:
/// multihash code, length, envelope field key, tag.
const KEY_TYPE_OFFSET: usize = 3;

/// Compute the identifier for a marshaled public key envelope.
pub fn compute_id(public_envelope: &[u8]) -> Vec<u8> {
    if public_envelope.len() <= MAX_INLINE_KEY_LENGTH {
        log::debug!(
            "embedding {}-byte public key envelope in identifier",
            public_envelope.len()
        );
        multihash::encode(public_envelope, HashCode::Identity)
    } else {
        log::debug!(
            "hashing {}-byte public key envelope into identifier",
            public_envelope.len()
        );
        multihash::encode(public_envelope, HashCode::Sha2_256)
    }
}

/// A peer identity.
///
/// The identifier is fixed at construction. Key payloads are stored
/// without their envelope framing.
#[derive(Clone)]
pub struct PeerId {
    id: Vec<u8>,
    public_key: Option<Vec<u8>>,
    private_key: Option<Zeroizing<Vec<u8>>>,
    key_type: Option<KeyType>,
}

impl PeerId {
    // ── Construction ──────────────────────────────────────────────────────────

    /// Create an identity with a freshly generated key pair.
    pub fn generate(key_type: KeyType) -> Result<Self> {
        Self::generate_with_bits(key_type, None)
    }

    /// Create an identity with a freshly generated key pair; `bits` only
    /// applies to RSA.
    pub fn generate_with_bits(key_type: KeyType, bits: Option<usize>) -> Result<Self> {
        let pair = KeyPair::generate(key_type, bits)?;
        Self::create(&pair.public.marshal(), Some(&pair.private))
    }

    /// Create an identity from raw private key material.
    ///
    /// RSA private keys are not accepted.
    pub fn from_private_key(key_type: KeyType, raw: &[u8]) -> Result<Self> {
        reject_rsa_private(key_type)?;
        let private = PrivateKey::from_raw(key_type, raw)?;
        Self::create(&private.public().marshal(), Some(&private))
    }

    /// Create an identity from a marshaled private key envelope.
    ///
    /// RSA private keys are not accepted.
    pub fn from_private_key_envelope(envelope: &[u8]) -> Result<Self> {
        let private = PrivateKey::unmarshal(envelope)?;
        reject_rsa_private(private.key_type())?;
        Self::create(&private.public().marshal(), Some(&private))
    }

    /// Create an identity from a marshaled public key envelope.
    pub fn from_public_key(envelope: &[u8]) -> Result<Self> {
        Self::create(envelope, None)
    }

    /// Rebuild an identity from identifier bytes.
    ///
    /// An embedded identifier yields the public key as well. A hashed
    /// identifier yields an identity with no key material and no key type.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let multihash = multihash::decode(bytes)?;
        match multihash.code() {
            HashCode::Identity => {
                let envelope = multihash.digest();
                if envelope.len() > MAX_INLINE_KEY_LENGTH {
                    return Err(PeerIdError::invalid_length(
                        "embedded public key envelope",
                        format!("at most {MAX_INLINE_KEY_LENGTH} bytes"),
                        envelope.len(),
                    ));
                }
                Self::create(envelope, None)
            }
            HashCode::Sha2_256 => Ok(Self {
                id: bytes.to_vec(),
                public_key: None,
                private_key: None,
                key_type: None,
            }),
        }
    }

    /// Rebuild an identity from a lowercase (or uppercase) hex identifier.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes =
            hex::decode(text).map_err(|e| PeerIdError::InvalidCharacter(format!("hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Rebuild an identity from its Base58 string (no multibase indicator).
    pub fn from_b58_string(text: &str) -> Result<Self> {
        Self::from_bytes(&multibase::decode_raw(Base::Base58Btc, text)?)
    }

    /// Rebuild an identity from a CIDv1 string.
    ///
    /// The text must start with the base32-lower indicator `b`.
    pub fn from_cid_v1(text: &str) -> Result<Self> {
        let bytes = multibase::decode_prefixed(Base::Base32Lower, text).map_err(|e| match e {
            PeerIdError::InvalidPrefix(_) => PeerIdError::InvalidPrefix(
                "CIDv1 peer identifiers must start with 'b'".into(),
            ),
            other => other,
        })?;

        match bytes.as_slice() {
            [CID_VERSION_1, LIBP2P_KEY_CODEC, frame @ ..] => Self::from_bytes(frame),
            [CID_VERSION_1, codec, ..] => Err(PeerIdError::InvalidCid(format!(
                "multicodec {codec:#04x} is not libp2p-key"
            ))),
            [version, ..] => Err(PeerIdError::InvalidCid(format!(
                "unsupported CID version {version}"
            ))),
            [] => Err(PeerIdError::InvalidCid("empty CID".into())),
        }
    }

    /// Rebuild an identity from its JSON envelope.
    ///
    /// With `privKey` set to `"undefined"` only the identifier (and the
    /// public key, if given) is restored. Otherwise both keys are rebuilt
    /// from the private key and checked against `id`.
    pub fn from_json(json: &PeerIdJson) -> Result<Self> {
        let from_id = Self::from_b58_string(&json.id)?;

        if json.priv_key == UNDEFINED_PRIVATE_KEY {
            return match &json.pub_key {
                Some(pub_key) if from_id.public_key.is_none() => {
                    let envelope = multibase::decode_raw(Base::Base64, pub_key)?;
                    let with_key = Self::from_public_key(&envelope)?;
                    if with_key.id != from_id.id {
                        return Err(PeerIdError::IdMismatch);
                    }
                    Ok(with_key)
                }
                _ => Ok(from_id),
            };
        }

        let envelope = Zeroizing::new(multibase::decode_raw(Base::Base64, &json.priv_key)?);
        let restored = Self::from_private_key_envelope(&envelope)?;
        if restored.id != from_id.id {
            return Err(PeerIdError::IdMismatch);
        }
        Ok(restored)
    }

    /// Parse a JSON envelope string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: PeerIdJson = serde_json::from_str(text)
            .map_err(|e| PeerIdError::SerializationError(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Parse either a Base58 identifier or a CIDv1 string.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with(Base::Base32Lower.code()) {
            Self::from_cid_v1(text)
        } else {
            Self::from_b58_string(text)
        }
    }

    fn create(public_envelope: &[u8], private: Option<&PrivateKey>) -> Result<Self> {
        let public = PublicKey::unmarshal(public_envelope)?;
        let id = compute_id(public_envelope);
        let key_type = key_type_from_id(&id).or(Some(public.key_type()));

        Ok(Self {
            id,
            public_key: Some(public.payload()),
            private_key: private.map(PrivateKey::payload),
            key_type,
        })
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Attach a private key payload supplied by the application.
    ///
    /// The identifier is not recomputed.
    pub fn with_private_key(mut self, payload: Vec<u8>) -> Self {
        self.private_key = Some(Zeroizing::new(payload));
        self
    }

    /// The identifier cannot be reassigned after construction.
    pub fn set_id(&mut self, _id: Vec<u8>) -> Result<()> {
        Err(PeerIdError::ImmutableFieldViolation("peer identifier"))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The identifier bytes.
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.id.clone()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.id)
    }

    /// Base58 identifier without the multibase indicator.
    pub fn to_b58_string(&self) -> String {
        let encoded = multibase::encode(Base::Base58Btc, &self.id);
        encoded[Base::Base58Btc.code().len_utf8()..].to_string()
    }

    /// CIDv1 string: base32-lower multibase over `0x01 0x72 ‖ identifier`.
    pub fn to_cid_string(&self) -> String {
        let mut cid = Vec::with_capacity(self.id.len() + 2);
        cid.push(CID_VERSION_1);
        cid.push(LIBP2P_KEY_CODEC);
        cid.extend_from_slice(&self.id);
        multibase::encode(Base::Base32Lower, &cid)
    }

    /// Human-readable multihash: function name and hex digest.
    pub fn decode_id(&self) -> Result<String> {
        let description = multihash::decode(&self.id)?.to_string();
        // Drop the leading "0x12" code.
        Ok(description[4..].trim_start().to_string())
    }

    /// Key algorithm, when known.
    ///
    /// Read from the identifier when the key is embedded. For a hashed
    /// identifier it is only known if the identity was built from a key.
    pub fn key_type(&self) -> Option<KeyType> {
        self.key_type
    }

    /// Public key payload (no envelope).
    pub fn public_key_payload(&self) -> Option<&[u8]> {
        self.public_key.as_deref()
    }

    /// Private key payload (no envelope).
    pub fn private_key_payload(&self) -> Option<&[u8]> {
        self.private_key.as_ref().map(|k| k.as_slice())
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Whether the public key is embedded in the identifier.
    pub fn is_inline(&self) -> bool {
        self.id.first() == Some(&(HashCode::Identity as u8))
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    /// Typed public key.
    pub fn unmarshal_public_key(&self) -> Result<PublicKey> {
        let payload = self
            .public_key
            .as_deref()
            .ok_or(PeerIdError::NullKeyMaterial("public key"))?;
        PublicKey::from_payload(self.require_key_type()?, payload)
    }

    /// Typed private key. RSA private keys are not reconstructed.
    pub fn unmarshal_private_key(&self) -> Result<PrivateKey> {
        let payload = self
            .private_key
            .as_ref()
            .ok_or(PeerIdError::NullKeyMaterial("private key"))?;
        let key_type = self.require_key_type()?;
        reject_rsa_private(key_type)?;
        PrivateKey::from_payload(key_type, payload)
    }

    /// Marshaled public key envelope.
    pub fn marshal_public_key(&self) -> Result<Vec<u8>> {
        Ok(self.unmarshal_public_key()?.marshal())
    }

    /// Marshaled private key envelope.
    pub fn marshal_private_key(&self) -> Result<Vec<u8>> {
        Ok(self.unmarshal_private_key()?.marshal())
    }

    /// Sign a message with the identity's private key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.unmarshal_private_key()?.sign(message)
    }

    /// Verify a signature with the identity's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        Ok(self.unmarshal_public_key()?.verify(message, signature))
    }

    // ── Comparison ────────────────────────────────────────────────────────────

    /// Byte equality of identifiers.
    pub fn is_equal(&self, other: &PeerId) -> bool {
        self.id == other.id
    }

    /// Check the identifier against the embedded public key.
    ///
    /// Only identities using the embed strategy can pass: a hashed
    /// identifier never equals the identity multihash of its key, so this
    /// returns `false` for RSA identities even when they are genuine.
    pub fn is_valid(&self) -> bool {
        match self.marshal_public_key() {
            Ok(envelope) => self.id == multihash::encode(&envelope, HashCode::Identity),
            Err(_) => false,
        }
    }

    // ── JSON ──────────────────────────────────────────────────────────────────

    /// Public JSON envelope; `privKey` is always `"undefined"`.
    ///
    /// `pubKey` is omitted when only the identifier is known.
    pub fn to_json(&self) -> Result<PeerIdJson> {
        let pub_key = match self.public_key {
            Some(_) => Some(Base::Base64.encode_raw(&self.marshal_public_key()?)),
            None => None,
        };
        Ok(PeerIdJson {
            id: self.to_b58_string(),
            priv_key: UNDEFINED_PRIVATE_KEY.to_string(),
            pub_key,
        })
    }

    /// JSON envelope including the private key, when one is present.
    pub fn to_json_with_private_key(&self) -> Result<PeerIdJson> {
        let mut json = self.to_json()?;
        if self.private_key.is_some() {
            let envelope = Zeroizing::new(self.marshal_private_key()?);
            json.priv_key = Base::Base64.encode_raw(&envelope);
        }
        Ok(json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&self.to_json()?)
            .map_err(|e| PeerIdError::SerializationError(e.to_string()))
    }

    fn require_key_type(&self) -> Result<KeyType> {
        self.key_type.ok_or_else(|| {
            PeerIdError::UnsupportedKeyType("key type is unknown for a hashed identifier".into())
        })
    }
}

fn key_type_from_id(id: &[u8]) -> Option<KeyType> {
    if id.first() != Some(&(HashCode::Identity as u8)) {
        return None;
    }
    id.get(KEY_TYPE_OFFSET)
        .and_then(|tag| KeyType::try_from(*tag).ok())
}

fn reject_rsa_private(key_type: KeyType) -> Result<()> {
    if key_type == KeyType::Rsa {
        return Err(PeerIdError::UnsupportedKeyType(
            "RSA private keys cannot be reconstructed for a peer identity".into(),
        ));
    }
    Ok(())
}

impl PartialEq for PeerId {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for PeerId {}

impl Hash for PeerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for PeerId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PeerId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_b58_string())
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerId")
            .field("id", &self.to_b58_string())
            .field("key_type", &self.key_type)
            .field("has_private_key", &self.private_key.is_some())
            .finish()
    }
}

impl FromStr for PeerId {
    type Err = PeerIdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
