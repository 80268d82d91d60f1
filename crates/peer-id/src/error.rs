//! Error types for peer-id.
//!
//! All errors are strongly typed and propagated without panicking.
//! Private key material is never included in error messages.

/// Peer identity error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum PeerIdError {
    #[error("Malformed key envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Invalid length for {context}: expected {expected}, got {actual}")]
    InvalidLength {
        context: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    #[error("Invalid character: {0}")]
    InvalidCharacter(String),

    #[error("Truncated multihash frame: declared {declared} bytes, {available} available")]
    TruncatedFrame { declared: usize, available: usize },

    #[error("Unsupported multihash function code: {0:#04x}")]
    UnsupportedHashCode(u64),

    #[error("Invalid CID: {0}")]
    InvalidCid(String),

    #[error("Missing key material: {0} is not present")]
    NullKeyMaterial(&'static str),

    #[error("Field is immutable: {0}")]
    ImmutableFieldViolation(&'static str),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key material does not match the peer identifier")]
    IdMismatch,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PeerIdError {
    pub(crate) fn invalid_length(
        context: &'static str,
        expected: impl Into<String>,
        actual: usize,
    ) -> Self {
        Self::InvalidLength {
            context,
            expected: expected.into(),
            actual,
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PeerIdError>;
