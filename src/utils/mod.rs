//! Utility functions and helpers
//!
//! This module contains the codec helpers (hex, base64, numeric hex), the
//! Ed25519/HMAC primitives and the JSON helpers used throughout the wallet.

pub mod crypto;
pub mod encoding;
pub mod serialization;

pub use crypto::{
    check_secret_key, ed25519_sign, ed25519_verify, fill_random, hmac_sha256, hmac_sha256_verify,
    public_key_from_secret_key, public_key_from_seed, secret_key_from_seed,
    seed_from_secret_key, HMAC_SHA256_LENGTH,
};
pub use encoding::{
    base64_decode, base64_encode, biguint_to_hex, bytes_to_string, hex_decode, hex_encode,
    string_to_hex, u64_to_hex,
};
pub use serialization::{from_json, to_json, to_json_pretty};
