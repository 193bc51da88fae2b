//! Password-protected keystore files
//!
//! A keystore holds the 64-byte secret key encrypted with AES-128-CTR under a
//! key derived from the password with scrypt. The upper half of the derived
//! key authenticates the ciphertext with HMAC-SHA256 before decryption.

pub mod cipher;
pub mod kdf;
pub mod keystore;

pub use cipher::{Aes128CtrCipher, SecureKey, AES_128_KEY_LENGTH, AES_CTR_IV_LENGTH};
pub use kdf::{KdfParams, DERIVED_KEY_LENGTH};
pub use keystore::{
    decrypt, write_keystore, EncryptedKeyRecord, KeyFileReader, KEYSTORE_FILE_EXTENSION,
    KEYSTORE_VERSION,
};
