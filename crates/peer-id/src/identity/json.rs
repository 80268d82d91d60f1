//! JSON envelope for exchanging peer identities.
//!
//! ```json
//! {
//!     "id": "<base58 identifier>",
//!     "privKey": "undefined" | "<base64 private key envelope>",
//!     "pubKey": "<base64 public key envelope>"
//! }
//! ```
//!
//! Base64 fields carry no multibase indicator.

use serde::{Deserialize, Serialize};

/// Sentinel written to `privKey` when no private key is exported.
pub const UNDEFINED_PRIVATE_KEY: &str = "undefined";

fn undefined_private_key() -> String {
    UNDEFINED_PRIVATE_KEY.to_string()
}

/// Serialized peer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerIdJson {
    pub id: String,
    #[serde(rename = "privKey", default = "undefined_private_key")]
    pub priv_key: String,
    #[serde(rename = "pubKey", default, skip_serializing_if = "Option::is_none")]
    pub pub_key: Option<String>,
}

impl PeerIdJson {
    /// Whether a private key is carried.
    pub fn has_private_key(&self) -> bool {
        self.priv_key != UNDEFINED_PRIVATE_KEY
    }
}
