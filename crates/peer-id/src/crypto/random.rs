//! Secure random number generation.
//!
//! Uses the operating system's cryptographic random source via `rand`.
//! No generator state is kept between calls.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// Fill a buffer with cryptographically secure random bytes.
pub fn fill_random(buf: &mut [u8]) {
    OsRng.fill_bytes(buf);
}

/// Generate a fixed-size array of cryptographically secure random bytes.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    fill_random(&mut buf);
    buf
}

/// Generate a secp256k1 secret scalar.
///
/// Draws 32 random bytes until they form a valid non-zero scalar below
/// the curve order. Rejected candidates are zeroized.
pub fn random_secp256k1_scalar() -> k256::SecretKey {
    loop {
        let candidate = Zeroizing::new(random_bytes::<32>());
        if let Ok(secret) = k256::SecretKey::from_slice(&candidate[..]) {
            return secret;
        }
    }
}
