//! Signing and verification for each key algorithm.
//!
//! Every function is a thin delegation to the primitive crate for the
//! algorithm. Verification never errors: malformed signatures simply
//! fail to verify.

use ed25519_dalek::{Signer as _, Verifier as _};
use rsa::signature::{SignatureEncoding, Signer as _, Verifier as _};
use sha2::Sha256;

use crate::error::{PeerIdError, Result};

/// Sign a message with an Ed25519 signing key.
///
/// Returns the 64-byte signature.
pub fn sign_ed25519(signing_key: &ed25519_dalek::SigningKey, message: &[u8]) -> Vec<u8> {
    signing_key.sign(message).to_bytes().to_vec()
}

/// Verify an Ed25519 signature.
pub fn verify_ed25519(
    verifying_key: &ed25519_dalek::VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> bool {
    match ed25519_dalek::Signature::from_slice(signature) {
        Ok(sig) => verifying_key.verify(message, &sig).is_ok(),
        Err(_) => false,
    }
}

/// Sign a message with a secp256k1 key.
///
/// ECDSA over SHA-256 of the message, DER-encoded.
pub fn sign_secp256k1(secret: &k256::SecretKey, message: &[u8]) -> Vec<u8> {
    let signing_key = k256::ecdsa::SigningKey::from(secret);
    let signature: k256::ecdsa::Signature = signing_key.sign(message);
    signature.to_der().as_bytes().to_vec()
}

/// Verify a DER-encoded secp256k1 ECDSA signature.
pub fn verify_secp256k1(public: &k256::PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let verifying_key = k256::ecdsa::VerifyingKey::from(public);
    match k256::ecdsa::Signature::from_der(signature) {
        Ok(sig) => verifying_key.verify(message, &sig).is_ok(),
        Err(_) => false,
    }
}

/// Sign a message with an RSA key (PKCS#1 v1.5, SHA-256).
pub fn sign_rsa(private: &rsa::RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let signing_key = rsa::pkcs1v15::SigningKey::<Sha256>::new(private.clone());
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| PeerIdError::InvalidKey(format!("RSA signing failed: {e}")))?;
    Ok(signature.to_vec())
}

/// Verify an RSA PKCS#1 v1.5 SHA-256 signature.
pub fn verify_rsa(public: &rsa::RsaPublicKey, message: &[u8], signature: &[u8]) -> bool {
    let verifying_key = rsa::pkcs1v15::VerifyingKey::<Sha256>::new(public.clone());
    match rsa::pkcs1v15::Signature::try_from(signature) {
        Ok(sig) => verifying_key.verify(message, &sig).is_ok(),
        Err(_) => false,
    }
}
