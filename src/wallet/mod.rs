//! Account keys, addresses and signing
//!
//! This module holds the fixed-length key types, the bech32 address codec and
//! the [`Wallet`] that ties a seed to its address for a signing session.

pub mod address;
pub mod keys;
#[allow(clippy::module_inception)]
pub mod wallet;

pub use address::{
    decode_address, encode_address, validate_address, Address, ADDRESS_HRP,
    ESDT_SYSTEM_SC_PUBLIC_KEY,
};
pub use keys::{
    PublicKey, SecretKey, Seed, Signature, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH,
    SIGNATURE_LENGTH,
};
pub use wallet::Wallet;
