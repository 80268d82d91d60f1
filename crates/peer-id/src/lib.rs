//! peer-id — content-derived peer identities for libp2p-style networks.
//!
//! Provides key envelopes for RSA, Ed25519 and secp256k1 keys, the
//! embed-or-hash identifier derivation, and conversion between raw
//! bytes, hex, Base58, CIDv1 and a JSON envelope.

pub mod crypto;
pub mod error;
pub mod identity;
pub mod multiformats;

// Re-export primary types
pub use crypto::{KeyPair, KeyType, PrivateKey, PublicKey};
pub use error::{PeerIdError, Result};
pub use identity::{PeerId, PeerIdJson};
pub use multiformats::{Base, HashCode, Multihash};
