//! Edge case tests: envelope tags, lengths, prefixes, truncated frames,
//! threshold boundaries and hashed identifiers.

use peer_id::crypto::envelope;
use peer_id::identity::{compute_id, MAX_INLINE_KEY_LENGTH};
use peer_id::multiformats::multibase::{self, Base};
use peer_id::multiformats::multihash::{self, HashCode};
use peer_id::{KeyType, PeerId, PeerIdError, PrivateKey, PublicKey};

// === Envelope Edge Cases ===

#[test]
fn edge_envelope_with_unknown_tag() {
    let bytes = [0x08, 0x07, 0x12, 0x02, 0xAA, 0xBB];
    assert!(matches!(
        envelope::deserialize(&bytes),
        Err(PeerIdError::UnsupportedKeyType(_))
    ));
    assert!(PublicKey::unmarshal(&bytes).is_err());
    assert!(PeerId::from_public_key(&bytes).is_err());
}

#[test]
fn edge_envelope_garbage() {
    assert!(matches!(
        envelope::deserialize(&[0xFF, 0xFF, 0xFF]),
        Err(PeerIdError::MalformedEnvelope(_))
    ));
    assert!(matches!(
        envelope::deserialize(&[]),
        Err(PeerIdError::MalformedEnvelope(_))
    ));
}

// === Key Length Edge Cases ===

#[test]
fn edge_ed25519_private_95_bytes() {
    let key = PrivateKey::generate(KeyType::Ed25519).unwrap();
    let truncated = envelope::serialize(KeyType::Ed25519, &key.payload()[..95]);
    assert!(matches!(
        PrivateKey::unmarshal(&truncated),
        Err(PeerIdError::InvalidLength { actual: 95, .. })
    ));
}

#[test]
fn edge_secp256k1_uncompressed_public_rejected() {
    let envelope_bytes = envelope::serialize(KeyType::Secp256k1, &[0x04; 65]);
    assert!(matches!(
        PublicKey::unmarshal(&envelope_bytes),
        Err(PeerIdError::InvalidLength { .. })
    ));
}

// === Threshold Edge Cases ===

#[test]
fn edge_threshold_both_sides() {
    for len in [MAX_INLINE_KEY_LENGTH - 1, MAX_INLINE_KEY_LENGTH] {
        let id = compute_id(&vec![0u8; len]);
        assert_eq!(id[0], HashCode::Identity as u8, "{len} bytes should embed");
        assert_eq!(id.len(), len + 2);
    }
    for len in [MAX_INLINE_KEY_LENGTH + 1, 300] {
        let id = compute_id(&vec![0u8; len]);
        assert_eq!(id[0], HashCode::Sha2_256 as u8, "{len} bytes should hash");
        assert_eq!(id.len(), 34);
    }
}

// === Text Edge Cases ===

#[test]
fn edge_cid_without_b_prefix() {
    let peer = PeerId::generate(KeyType::Ed25519).unwrap();
    let cid = peer.to_cid_string();
    assert!(matches!(
        PeerId::from_cid_v1(&cid[1..]),
        Err(PeerIdError::InvalidPrefix(_))
    ));
    let cid_bytes = multibase::decode_prefixed(Base::Base32Lower, &cid).unwrap();
    let as_b58 = multibase::encode(Base::Base58Btc, &cid_bytes);
    assert!(matches!(
        PeerId::from_cid_v1(&as_b58),
        Err(PeerIdError::InvalidPrefix(_))
    ));
}

#[test]
fn edge_cid_with_uppercase_rejected() {
    let peer = PeerId::generate(KeyType::Ed25519).unwrap();
    let upper = format!("b{}", peer.to_cid_string()[1..].to_ascii_uppercase());
    assert!(matches!(
        PeerId::from_cid_v1(&upper),
        Err(PeerIdError::InvalidCharacter(_))
    ));
}

#[test]
fn edge_invalid_base58() {
    assert!(matches!(
        PeerId::from_b58_string("12D3Koo0OIl"),
        Err(PeerIdError::InvalidCharacter(_))
    ));
}

#[test]
fn edge_invalid_hex() {
    assert!(matches!(
        PeerId::from_hex("zz"),
        Err(PeerIdError::InvalidCharacter(_))
    ));
}

#[test]
fn edge_truncated_identifier() {
    let peer = PeerId::generate(KeyType::Ed25519).unwrap();
    let id = peer.to_bytes();
    assert!(matches!(
        PeerId::from_bytes(&id[..id.len() - 1]),
        Err(PeerIdError::TruncatedFrame { .. })
    ));
    assert!(PeerId::from_bytes(&[]).is_err());
}

#[test]
fn edge_hashed_identifier_from_text() {
    let digest = multihash::encode(b"some rsa public key envelope", HashCode::Sha2_256);
    let b58 = bs58::encode(&digest).into_string();
    assert!(b58.starts_with("Qm"));

    let peer = PeerId::from_b58_string(&b58).unwrap();
    assert_eq!(peer.to_b58_string(), b58);
    assert_eq!(peer.key_type(), None);
    assert!(!peer.is_valid());
    assert!(!peer.is_inline());

    let via_cid = PeerId::from_cid_v1(&peer.to_cid_string()).unwrap();
    assert!(via_cid.is_equal(&peer));
}

#[test]
fn edge_identity_frame_with_invalid_envelope() {
    let id = multihash::encode(&[0x08, 0x01, 0x12, 0x02, 0x00, 0x00], HashCode::Identity);
    assert!(matches!(
        PeerId::from_bytes(&id),
        Err(PeerIdError::InvalidLength { .. })
    ));
}

#[test]
fn edge_json_with_undecodable_private_key() {
    let peer = PeerId::generate(KeyType::Ed25519).unwrap();
    let text = format!(
        "{{\"id\":\"{}\",\"privKey\":\"!!!\",\"pubKey\":\"\"}}",
        peer.to_b58_string()
    );
    assert!(matches!(
        PeerId::from_json_str(&text),
        Err(PeerIdError::InvalidCharacter(_))
    ));
}
