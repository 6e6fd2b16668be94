pub mod codec;
pub mod passwords;
pub mod sha;

pub use codec::{decode, encode, encoded_len};
pub use passwords::{decode_save, DecodedSave};

/// Why a payload could not be decoded (or encoded).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("payload length {0} is not a signature plus whole 64-byte blocks")]
    InvalidLength(usize),

    #[error("signature error flag set ({0})")]
    SignatureFlag(u8),

    #[error("checksum mismatch: stored={stored:#010x}, computed={computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("last chunk size {0} exceeds the 64-byte block")]
    InvalidChunkSize(u8),

    #[error("no password decoded the payload ({tried} tried)")]
    NoPasswordMatched { tried: usize },

    #[error("save encoding is not supported (read-only)")]
    EncodeUnsupported,
}
