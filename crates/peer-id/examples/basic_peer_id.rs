//! Basic Peer Id — generate identities, inspect every text form, restore them.
//!
//! Run with:
//!   cargo run --example basic_peer_id -p peer-id

use peer_id::{KeyType, PeerId};

fn main() {
    // ── 1. Generate an Ed25519 identity ─────────────────────────────────────
    //
    // The 36-byte public key envelope fits under the 42-byte threshold, so
    // it is embedded in the identifier.
    let peer = PeerId::generate(KeyType::Ed25519).expect("generation should succeed");

    println!("Identity created");
    println!("  Base58:    {peer}");
    println!("  CIDv1:     {}", peer.to_cid_string());
    println!("  Hex:       {}", peer.to_hex());
    println!("  Multihash: {}", peer.decode_id().expect("valid multihash"));
    println!("  Valid:     {}", peer.is_valid());
    println!();

    // ── 2. Restore from text ────────────────────────────────────────────────
    let restored = PeerId::from_cid_v1(&peer.to_cid_string()).expect("cid parse");
    assert!(restored.is_equal(&peer));
    println!(
        "Restored from CID, public key recovered: {}",
        restored.public_key_payload().is_some()
    );
    println!();

    // ── 3. Sign with the original, verify with the restored copy ────────────
    let signature = peer.sign(b"hello libp2p").expect("signing should succeed");
    let ok = restored
        .verify(b"hello libp2p", &signature)
        .expect("public key present");
    println!("Signature verified by restored identity: {ok}");
    println!();

    // ── 4. RSA identities are hashed ────────────────────────────────────────
    //
    // The RSA envelope exceeds the threshold, so only its SHA-256 digest is
    // kept. The key type cannot be recovered from the identifier alone.
    let rsa = PeerId::generate_with_bits(KeyType::Rsa, Some(1024)).expect("rsa generation");
    let parsed = PeerId::from_b58_string(&rsa.to_b58_string()).expect("b58 parse");
    println!("RSA identity:    {rsa}");
    println!("  Key type after parse: {:?}", parsed.key_type());
    println!("  Valid by embedded key check: {}", rsa.is_valid());
    println!();

    // ── 5. JSON envelope ────────────────────────────────────────────────────
    let json = serde_json::to_string_pretty(&peer.to_json().expect("public key present"))
        .expect("serializable");
    println!("JSON envelope:\n{json}");
}
