//! # erd-wallet - My Key Management and Signing Toolkit
//!
//! This is the wallet side of an erd account: it loads a signing key, derives
//! the address and builds signed transactions ready for submission.
//! When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Key Files**: Plaintext PEM files and scrypt + AES-128-CTR keystores
//! - **Signing Engine**: Ed25519 key derivation, signing and verification via `ring`
//! - **Addresses**: Bech32 `erd1...` addresses with full checksum validation
//! - **Transactions**: EGLD transfers, ESDT/NFT transfers and token issuance
//! - **Gas**: Gas limit estimation from a configurable gas schedule
//!
//! ## How I Organized My Code
//! - `core/`: Transaction record, builder factory, token payloads, gas
//! - `wallet/`: Key types, addresses and the session wallet
//! - `storage/`: PEM reader/writer and the encrypted keystore
//! - `config/`: Network parameters from defaults, TOML and environment
//! - `utils/`: Codec and cryptographic helpers
//! - `cli/`: Command-line interface for the binary
//!
//! ## Key Design Decisions I Made
//! - Fixed-size array newtypes for every key so lengths are checked once
//! - The keystore MAC is verified in constant time before anything is decrypted
//! - Concrete transaction builders stay private behind `TransactionFactory`
//! - Secret material is zeroed on drop and never shows up in `Debug` output
//!
//! ## When I Need to Understand Something
//! 1. Start with `main.rs` to see the CLI commands
//! 2. Look at `storage/encrypted/keystore.rs` for the decryption pipeline
//! 3. Check `core/builders.rs` for how payloads are encoded
//! 4. Review `core/transaction.rs` for the wire format that gets signed

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use crate::core::{
    EsdtProperties, GasEstimator, IssueEsdtParams, TokenPayment, Transaction,
    TransactionBuilder, TransactionBuilderInput, TransactionFactory, TransactionKind,
};
pub use error::{Result, WalletError};
pub use storage::{
    decrypt, open_key_source, write_keystore, write_pem, EncryptedKeyRecord, KeyFileReader,
    KeySource, PemFileReader,
};
pub use utils::{
    ed25519_sign, ed25519_verify, public_key_from_secret_key, secret_key_from_seed,
    seed_from_secret_key,
};
pub use wallet::{
    decode_address, encode_address, validate_address, Address, PublicKey, SecretKey, Seed,
    Signature, Wallet,
};
