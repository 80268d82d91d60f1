//! Integration tests: full identity lifecycle across every encoding.

use peer_id::crypto::{envelope, PrivateKey, PublicKey};
use peer_id::{KeyType, PeerId, PeerIdError};

#[test]
fn workflow_generate_sign_export_import() {
    // Step 1: Generate identities of both embeddable types
    for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
        let peer = PeerId::generate(key_type).expect("generation should succeed");
        assert!(peer.is_valid(), "{key_type} identity should be valid");

        // Step 2: Sign with the identity and verify with the public key
        let signature = peer.sign(b"deploy v1.2.3").expect("signing should succeed");
        let public = peer.unmarshal_public_key().expect("public key present");
        assert!(public.verify(b"deploy v1.2.3", &signature));

        // Step 3: Export as public JSON and re-import
        let json = peer.to_json_string().expect("json export");
        let imported = PeerId::from_json_str(&json).expect("json import");
        assert!(imported.is_equal(&peer));
        assert!(imported.verify(b"deploy v1.2.3", &signature).unwrap());

        // Step 4: The imported copy cannot sign
        assert!(matches!(
            imported.sign(b"anything"),
            Err(PeerIdError::NullKeyMaterial("private key"))
        ));
    }
}

#[test]
fn workflow_private_key_payload_rebuilds_same_identity() {
    for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
        let peer = PeerId::generate(key_type).unwrap();
        let payload = peer.private_key_payload().expect("generated identity has a private key");

        let rebuilt = PeerId::from_private_key(key_type, payload).unwrap();
        assert_eq!(rebuilt.id(), peer.id(), "{key_type} identifier should be stable");
        assert_eq!(rebuilt.to_b58_string(), peer.to_b58_string());

        let signature = rebuilt.sign(b"stable").unwrap();
        assert!(peer.verify(b"stable", &signature).unwrap());
    }
}

#[test]
fn workflow_every_text_form_roundtrips() {
    for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
        let peer = PeerId::generate(key_type).unwrap();

        let from_b58 = PeerId::from_b58_string(&peer.to_b58_string()).unwrap();
        let from_cid = PeerId::from_cid_v1(&peer.to_cid_string()).unwrap();
        let from_hex = PeerId::from_hex(&peer.to_hex()).unwrap();
        let from_bytes = PeerId::from_bytes(&peer.to_bytes()).unwrap();

        for restored in [&from_b58, &from_cid, &from_hex, &from_bytes] {
            assert!(restored.is_equal(&peer));
            assert!(restored.is_valid(), "embedded identity stays valid");
            assert_eq!(restored.key_type(), Some(key_type));
            assert_eq!(restored.public_key_payload(), peer.public_key_payload());
        }
    }
}

#[test]
fn workflow_secp256k1_b58_scenario() {
    let original = PeerId::generate(KeyType::Secp256k1).unwrap();
    let b58 = original.to_b58_string();
    let restored = PeerId::from_b58_string(&b58).unwrap();
    assert!(restored.is_equal(&original));
    assert_eq!(restored.to_b58_string(), b58);
}

#[test]
fn workflow_rsa_identity_roundtrips_by_identifier() {
    let peer = PeerId::generate_with_bits(KeyType::Rsa, Some(1024)).unwrap();
    let from_cid = PeerId::from_cid_v1(&peer.to_cid_string()).unwrap();
    assert!(from_cid.is_equal(&peer));
    assert_eq!(from_cid.to_cid_string(), peer.to_cid_string());

    let public = peer.unmarshal_public_key().unwrap();
    let rebuilt = public.to_peer_id().unwrap();
    assert!(rebuilt.is_equal(&peer));
}

#[test]
fn workflow_public_key_identity_matches_generated() {
    let key = PrivateKey::generate(KeyType::Ed25519).unwrap();
    let from_public = PeerId::from_public_key(&key.public().marshal()).unwrap();
    let from_envelope = PeerId::from_private_key_envelope(&key.marshal()).unwrap();
    assert!(from_public.is_equal(&from_envelope));
    assert!(!from_public.has_private_key());
    assert!(from_envelope.has_private_key());
}

#[test]
fn workflow_identifier_embeds_envelope() {
    let peer = PeerId::generate(KeyType::Ed25519).unwrap();
    let envelope_bytes = peer.marshal_public_key().unwrap();
    assert_eq!(&peer.id()[2..], envelope_bytes.as_slice());

    let (key_type, payload) = envelope::deserialize(&envelope_bytes).unwrap();
    assert_eq!(key_type, KeyType::Ed25519);
    assert_eq!(PublicKey::from_payload(key_type, &payload).unwrap().marshal(), envelope_bytes);
}

#[test]
fn workflow_known_ed25519_vector() {
    // RFC 8032 test 1 secret key
    let seed = hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
        .unwrap();
    let peer = PeerId::from_private_key(KeyType::Ed25519, &seed).unwrap();
    assert_eq!(
        hex::encode(peer.public_key_payload().unwrap()),
        "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
    );
    assert_eq!(
        peer.to_hex(),
        "002408011220d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
    );
    assert!(peer.to_b58_string().starts_with("12D3KooW"));
}
