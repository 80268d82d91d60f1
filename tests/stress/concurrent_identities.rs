//! Stress test: identities built in parallel threads are independent.

use std::collections::HashSet;

use peer_id::{KeyType, PeerId};

#[test]
fn stress_parallel_generation() {
    let per_thread = 25;
    let threads = 8;

    let ids: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                scope.spawn(move || {
                    let key_type = if t % 2 == 0 {
                        KeyType::Ed25519
                    } else {
                        KeyType::Secp256k1
                    };
                    (0..per_thread)
                        .map(|_| {
                            let peer = PeerId::generate(key_type).expect("generation");
                            let restored =
                                PeerId::from_b58_string(&peer.to_b58_string()).expect("parse");
                            assert!(restored.is_equal(&peer));
                            peer.to_b58_string()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), threads * per_thread);
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn stress_shared_identity_across_threads() {
    let peer = PeerId::generate(KeyType::Secp256k1).unwrap();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let peer = &peer;
            scope.spawn(move || {
                let message = format!("thread {i}");
                let signature = peer.sign(message.as_bytes()).unwrap();
                assert!(peer.verify(message.as_bytes(), &signature).unwrap());
            });
        }
    });
}
