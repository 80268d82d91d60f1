//! RSA, Ed25519 and secp256k1 keys.
//!
//! Each role (private, public) is one enum with a variant per algorithm.
//! Every operation matches on the variant exactly once. Marshaling always
//! goes through the key envelope, so `unmarshal(marshal(k))` reproduces
//! the same bytes.
//!
//! Payload layouts:
//!
//! | Algorithm | Private payload                 | Public payload            |
//! |-----------|---------------------------------|---------------------------|
//! | RSA       | PKCS#1 DER                      | SubjectPublicKeyInfo DER  |
//! | Ed25519   | seed ‖ public ‖ public (96)     | point (32)                |
//! | Secp256k1 | scalar (32)                     | compressed point (33)     |

use std::fmt;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use zeroize::Zeroizing;

use crate::crypto::{envelope, random, signing, KeyType};
use crate::error::{PeerIdError, Result};

/// Default modulus size for generated RSA keys.
pub const DEFAULT_RSA_BITS: usize = 2048;

const ED25519_SEED_LENGTH: usize = 32;
const ED25519_KEYPAIR_LENGTH: usize = 64;
const ED25519_PUBLIC_LENGTH: usize = 32;
/// Marshaled Ed25519 private payload: 64-byte keypair followed by the public key.
const ED25519_PRIVATE_PAYLOAD_LENGTH: usize = ED25519_KEYPAIR_LENGTH + ED25519_PUBLIC_LENGTH;
const SECP256K1_SECRET_LENGTH: usize = 32;
const SECP256K1_PUBLIC_LENGTH: usize = 33;

// ── RSA key holders ───────────────────────────────────────────────────────────

/// RSA private key together with its DER encodings.
#[derive(Clone)]
pub struct RsaPrivate {
    key: rsa::RsaPrivateKey,
    der: Zeroizing<Vec<u8>>,
    public: RsaPublic,
}

/// RSA public key together with the exact DER bytes it was read from.
#[derive(Clone)]
pub struct RsaPublic {
    key: rsa::RsaPublicKey,
    der: Vec<u8>,
}

impl RsaPrivate {
    fn from_key(key: rsa::RsaPrivateKey) -> Result<Self> {
        let der = key
            .to_pkcs1_der()
            .map_err(|e| PeerIdError::InvalidKey(format!("RSA private key encoding: {e}")))?;
        let public = RsaPublic::from_key(rsa::RsaPublicKey::from(&key))?;
        Ok(Self {
            key,
            der: Zeroizing::new(der.as_bytes().to_vec()),
            public,
        })
    }

    fn from_der(der: &[u8]) -> Result<Self> {
        let key = rsa::RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| PeerIdError::InvalidKey(format!("invalid RSA private key: {e}")))?;
        let public = RsaPublic::from_key(rsa::RsaPublicKey::from(&key))?;
        Ok(Self {
            key,
            der: Zeroizing::new(der.to_vec()),
            public,
        })
    }
}

impl RsaPublic {
    fn from_key(key: rsa::RsaPublicKey) -> Result<Self> {
        let der = key
            .to_public_key_der()
            .map_err(|e| PeerIdError::InvalidKey(format!("RSA public key encoding: {e}")))?;
        Ok(Self {
            key,
            der: der.as_bytes().to_vec(),
        })
    }

    fn from_der(der: &[u8]) -> Result<Self> {
        let key = rsa::RsaPublicKey::from_public_key_der(der)
            .map_err(|e| PeerIdError::InvalidKey(format!("invalid RSA public key: {e}")))?;
        Ok(Self {
            key,
            der: der.to_vec(),
        })
    }
}

// ── Private keys ──────────────────────────────────────────────────────────────

/// A private signing key of any supported algorithm.
///
/// Secret material is zeroized on drop by the underlying key types.
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(RsaPrivate),
    Ed25519(ed25519_dalek::SigningKey),
    Secp256k1(k256::SecretKey),
}

impl PrivateKey {
    /// Generate a new random private key.
    pub fn generate(key_type: KeyType) -> Result<Self> {
        Self::generate_with_bits(key_type, None)
    }

    /// Generate a new random private key; `bits` only applies to RSA.
    pub fn generate_with_bits(key_type: KeyType, bits: Option<usize>) -> Result<Self> {
        log::debug!("generating {key_type} private key");
        match key_type {
            KeyType::Rsa => {
                let bits = bits.unwrap_or(DEFAULT_RSA_BITS);
                let key = rsa::RsaPrivateKey::new(&mut rand::rngs::OsRng, bits)
                    .map_err(|e| PeerIdError::InvalidKey(format!("RSA generation failed: {e}")))?;
                Ok(Self::Rsa(RsaPrivate::from_key(key)?))
            }
            KeyType::Ed25519 => Ok(Self::Ed25519(ed25519_dalek::SigningKey::generate(
                &mut rand::rngs::OsRng,
            ))),
            KeyType::Secp256k1 => Ok(Self::Secp256k1(random::random_secp256k1_scalar())),
        }
    }

    /// Reconstruct a private key from raw key material.
    ///
    /// Ed25519 accepts a 32-byte seed, a 64-byte `seed ‖ public` keypair
    /// or the 96-byte envelope payload. Secp256k1 requires the 32-byte
    /// scalar. RSA takes PKCS#1 DER.
    pub fn from_raw(key_type: KeyType, raw: &[u8]) -> Result<Self> {
        match key_type {
            KeyType::Rsa => Ok(Self::Rsa(RsaPrivate::from_der(raw)?)),
            KeyType::Ed25519 => match raw.len() {
                ED25519_SEED_LENGTH => {
                    let mut seed = Zeroizing::new([0u8; ED25519_SEED_LENGTH]);
                    seed.copy_from_slice(raw);
                    Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed)))
                }
                ED25519_KEYPAIR_LENGTH => Ok(Self::Ed25519(ed25519_from_keypair(raw)?)),
                ED25519_PRIVATE_PAYLOAD_LENGTH => Self::from_payload(key_type, raw),
                actual => Err(PeerIdError::invalid_length(
                    "Ed25519 private key",
                    "32, 64 or 96 bytes",
                    actual,
                )),
            },
            KeyType::Secp256k1 => Ok(Self::Secp256k1(secp256k1_secret(raw)?)),
        }
    }

    /// Reconstruct a private key from an envelope payload.
    ///
    /// An Ed25519 payload must be exactly 96 bytes: the 64-byte keypair
    /// followed by the 32-byte public key.
    pub fn from_payload(key_type: KeyType, payload: &[u8]) -> Result<Self> {
        match key_type {
            KeyType::Ed25519 => {
                if payload.len() != ED25519_PRIVATE_PAYLOAD_LENGTH {
                    return Err(PeerIdError::invalid_length(
                        "Ed25519 private key payload",
                        "96 bytes",
                        payload.len(),
                    ));
                }
                let (keypair, public) = payload.split_at(ED25519_KEYPAIR_LENGTH);
                let signing_key = ed25519_from_keypair(keypair)?;
                if signing_key.verifying_key().as_bytes() != public {
                    return Err(PeerIdError::InvalidKey(
                        "Ed25519 trailing public key does not match the private key".into(),
                    ));
                }
                Ok(Self::Ed25519(signing_key))
            }
            KeyType::Rsa | KeyType::Secp256k1 => Self::from_raw(key_type, payload),
        }
    }

    /// Parse a marshaled private key envelope.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self> {
        let (key_type, payload) = envelope::deserialize(bytes)?;
        let payload = Zeroizing::new(payload);
        Self::from_payload(key_type, &payload)
    }

    /// Return the algorithm of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Rsa(_) => KeyType::Rsa,
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    /// Return the envelope payload. Caller should keep it in zeroizing storage.
    pub fn payload(&self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Rsa(rsa) => rsa.der.clone(),
            Self::Ed25519(key) => {
                let mut out = Zeroizing::new(Vec::with_capacity(ED25519_PRIVATE_PAYLOAD_LENGTH));
                out.extend_from_slice(&Zeroizing::new(key.to_keypair_bytes())[..]);
                out.extend_from_slice(key.verifying_key().as_bytes());
                out
            }
            Self::Secp256k1(secret) => Zeroizing::new(secret.to_bytes().to_vec()),
        }
    }

    /// Serialize into a private key envelope.
    pub fn marshal(&self) -> Vec<u8> {
        envelope::serialize(self.key_type(), &self.payload())
    }

    /// Derive the matching public key.
    pub fn public(&self) -> PublicKey {
        match self {
            Self::Rsa(rsa) => PublicKey::Rsa(rsa.public.clone()),
            Self::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
            Self::Secp256k1(secret) => PublicKey::Secp256k1(secret.public_key()),
        }
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Rsa(rsa) => signing::sign_rsa(&rsa.key, message),
            Self::Ed25519(key) => Ok(signing::sign_ed25519(key, message)),
            Self::Secp256k1(secret) => Ok(signing::sign_secp256k1(secret, message)),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key_type", &self.key_type())
            .finish_non_exhaustive()
    }
}

fn ed25519_from_keypair(bytes: &[u8]) -> Result<ed25519_dalek::SigningKey> {
    let mut keypair = Zeroizing::new([0u8; ED25519_KEYPAIR_LENGTH]);
    keypair.copy_from_slice(bytes);
    ed25519_dalek::SigningKey::from_keypair_bytes(&keypair)
        .map_err(|e| PeerIdError::InvalidKey(format!("invalid Ed25519 keypair: {e}")))
}

fn secp256k1_secret(bytes: &[u8]) -> Result<k256::SecretKey> {
    if bytes.len() != SECP256K1_SECRET_LENGTH {
        return Err(PeerIdError::invalid_length(
            "secp256k1 private key",
            "32 bytes",
            bytes.len(),
        ));
    }
    k256::SecretKey::from_slice(bytes)
        .map_err(|_| PeerIdError::InvalidKey("secp256k1 scalar out of range".into()))
}

// ── Public keys ───────────────────────────────────────────────────────────────

/// A public verification key of any supported algorithm.
#[derive(Clone)]
pub enum PublicKey {
    Rsa(RsaPublic),
    Ed25519(ed25519_dalek::VerifyingKey),
    Secp256k1(k256::PublicKey),
}

impl PublicKey {
    /// Reconstruct a public key from an envelope payload.
    pub fn from_payload(key_type: KeyType, payload: &[u8]) -> Result<Self> {
        match key_type {
            KeyType::Rsa => Ok(Self::Rsa(RsaPublic::from_der(payload)?)),
            KeyType::Ed25519 => {
                let bytes: [u8; ED25519_PUBLIC_LENGTH] = payload.try_into().map_err(|_| {
                    PeerIdError::invalid_length("Ed25519 public key", "32 bytes", payload.len())
                })?;
                let key = ed25519_dalek::VerifyingKey::from_bytes(&bytes)
                    .map_err(|e| PeerIdError::InvalidKey(format!("invalid Ed25519 point: {e}")))?;
                Ok(Self::Ed25519(key))
            }
            KeyType::Secp256k1 => {
                if payload.len() != SECP256K1_PUBLIC_LENGTH {
                    return Err(PeerIdError::invalid_length(
                        "secp256k1 public key",
                        "33 bytes (compressed)",
                        payload.len(),
                    ));
                }
                let key = k256::PublicKey::from_sec1_bytes(payload)
                    .map_err(|_| PeerIdError::InvalidKey("invalid secp256k1 point".into()))?;
                Ok(Self::Secp256k1(key))
            }
        }
    }

    /// Parse a marshaled public key envelope.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self> {
        let (key_type, payload) = envelope::deserialize(bytes)?;
        Self::from_payload(key_type, &payload)
    }

    /// Return the algorithm of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Rsa(_) => KeyType::Rsa,
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    /// Return the envelope payload.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Rsa(rsa) => rsa.der.clone(),
            Self::Ed25519(key) => key.as_bytes().to_vec(),
            Self::Secp256k1(key) => key.to_encoded_point(true).as_bytes().to_vec(),
        }
    }

    /// Serialize into a public key envelope.
    pub fn marshal(&self) -> Vec<u8> {
        envelope::serialize(self.key_type(), &self.payload())
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            Self::Rsa(rsa) => signing::verify_rsa(&rsa.key, message, signature),
            Self::Ed25519(key) => signing::verify_ed25519(key, message, signature),
            Self::Secp256k1(key) => signing::verify_secp256k1(key, message, signature),
        }
    }

    /// Derive the peer identity for this key.
    pub fn to_peer_id(&self) -> Result<crate::identity::PeerId> {
        crate::identity::PeerId::from_public_key(&self.marshal())
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key_type() == other.key_type() && self.payload() == other.payload()
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("key_type", &self.key_type())
            .field("payload", &hex::encode(self.payload()))
            .finish()
    }
}

// ── Key pairs ─────────────────────────────────────────────────────────────────

/// A freshly generated key pair, handed off to identity construction.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private: PrivateKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// Generate a new key pair; `bits` only applies to RSA.
    pub fn generate(key_type: KeyType, bits: Option<usize>) -> Result<Self> {
        let private = PrivateKey::generate_with_bits(key_type, bits)?;
        let public = private.public();
        Ok(Self { private, public })
    }
}
