//! Stress test: create 100 identities per key type, verify all have
//! unique IDs and all survive every text encoding.

use std::collections::HashSet;

use peer_id::{KeyType, PeerId};

#[test]
fn stress_100_unique_identities() {
    for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
        let mut ids = HashSet::new();

        for _ in 0..100 {
            let peer = PeerId::generate(key_type).expect("generation should succeed");
            assert!(
                ids.insert(peer.to_b58_string()),
                "Duplicate {key_type} identity: {peer}"
            );
        }

        assert_eq!(ids.len(), 100);
    }
}

#[test]
fn stress_100_identities_roundtrip_and_sign() {
    let peers: Vec<PeerId> = (0..100)
        .map(|i| {
            let key_type = if i % 2 == 0 {
                KeyType::Ed25519
            } else {
                KeyType::Secp256k1
            };
            PeerId::generate(key_type).expect("generation should succeed")
        })
        .collect();

    for (i, peer) in peers.iter().enumerate() {
        let restored = PeerId::from_cid_v1(&peer.to_cid_string()).expect("cid parse");
        assert!(restored.is_equal(peer), "identity {i} should survive CID");
        assert!(restored.is_valid(), "identity {i} should stay valid");

        let message = format!("message from peer {i}");
        let signature = peer.sign(message.as_bytes()).expect("signing should succeed");
        assert!(
            restored.verify(message.as_bytes(), &signature).unwrap(),
            "signature from peer {i} should verify"
        );
    }
}

#[test]
fn stress_equality_is_reflexive_and_symmetric() {
    let peers: Vec<PeerId> = (0..20)
        .map(|_| PeerId::generate(KeyType::Ed25519).unwrap())
        .collect();

    for a in &peers {
        assert!(a.is_equal(a));
        for b in &peers {
            assert_eq!(a.is_equal(b), b.is_equal(a));
            assert_eq!(a.is_equal(b), std::ptr::eq(a, b));
        }
    }
}
