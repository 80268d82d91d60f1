//! Peer identity — derivation, parsing and text encodings.
//!
//! The identity module provides the core `PeerId` type and its JSON
//! envelope.

pub mod json;
pub mod peer_id;

pub use json::{PeerIdJson, UNDEFINED_PRIVATE_KEY};
pub use peer_id::{compute_id, PeerId, CID_VERSION_1, LIBP2P_KEY_CODEC, MAX_INLINE_KEY_LENGTH};
