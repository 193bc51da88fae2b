//! Error handling for the wallet toolkit
//!
//! Every key reader, the keystore decryption pipeline, the address codec and
//! the transaction builders report failures through [`WalletError`].

use std::fmt;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

pub const ERROR_MSG_FILE_DOES_NOT_EXIST: &str = "File does not exist";
pub const ERROR_MSG_FILE_EXTENSION_INVALID: &str = "Invalid file extension";
pub const ERROR_MSG_FILE_EMPTY: &str = "File is empty";
pub const ERROR_MSG_KEY_BYTES_SIZE: &str = "Invalid key bytes size";
pub const ERROR_MSG_ENVELOPE_INVALID: &str = "Missing begin or end marker";
pub const ERROR_MSG_MAC_MISMATCH: &str = "MAC mismatch, wrong password or corrupted keystore";

/// Error types for key loading, signing and transaction building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Key file is missing or cannot be opened
    FileAccess(String),
    /// Wrong extension, malformed envelope/record or empty content
    Format(String),
    /// Decoded key material has an unexpected size
    Length { expected: usize, actual: usize },
    /// MAC verification failed while decrypting a keystore
    Integrity(String),
    /// Decrypted or decoded bytes violate key derivation invariants
    MalformedKey(String),
    /// Bad checksum, prefix or payload in a bech32 address
    InvalidAddress(String),
    /// Address declared by a keystore differs from the one derived from its key
    AddressMismatch { declared: String, derived: String },
    /// A buffer of the wrong fixed length was handed to a key type
    ContractViolation(String),
    /// Cryptographic backend errors
    Crypto(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// Configuration errors
    Config(String),
    /// Transaction building and signing errors
    Transaction(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::FileAccess(msg) => write!(f, "File access error: {msg}"),
            WalletError::Format(msg) => write!(f, "Format error: {msg}"),
            WalletError::Length { expected, actual } => write!(
                f,
                "Length error: {ERROR_MSG_KEY_BYTES_SIZE}, expected {expected} bytes, got {actual}"
            ),
            WalletError::Integrity(msg) => write!(f, "Integrity error: {msg}"),
            WalletError::MalformedKey(msg) => write!(f, "Malformed key: {msg}"),
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {msg}"),
            WalletError::AddressMismatch { declared, derived } => write!(
                f,
                "Address mismatch: keystore declares {declared}, key derives {derived}"
            ),
            WalletError::ContractViolation(msg) => write!(f, "Contract violation: {msg}"),
            WalletError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            WalletError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            WalletError::Config(msg) => write!(f, "Configuration error: {msg}"),
            WalletError::Transaction(msg) => write!(f, "Transaction error: {msg}"),
            WalletError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for WalletError {}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for WalletError {
    fn from(err: toml::de::Error) -> Self {
        WalletError::Config(err.to_string())
    }
}
