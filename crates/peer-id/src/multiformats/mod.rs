//! Self-describing binary and text encodings.
//!
//! Only the subset needed by peer identities is provided: the `identity`
//! and `sha2-256` multihash functions, and the base32-lower, base58-btc
//! and base64 multibase encodings.

pub mod multibase;
pub mod multihash;

pub use multibase::Base;
pub use multihash::{HashCode, Multihash};
