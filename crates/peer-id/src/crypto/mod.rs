//! Cryptographic keys for peer identities.
//!
//! This module provides:
//! - The `KeyType` algorithm tag shared by keys and identifiers
//! - The protobuf key envelope used to marshal public and private keys
//! - RSA, Ed25519 and secp256k1 key variants behind one enum per role
//! - Signing and verification delegated to the primitive crates
//! - Cryptographically secure random number generation

pub mod envelope;
pub mod key_type;
pub mod keys;
pub mod random;
pub mod signing;

pub use key_type::KeyType;
pub use keys::{KeyPair, PrivateKey, PublicKey};
