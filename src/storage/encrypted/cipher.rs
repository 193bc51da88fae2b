use crate::error::{Result, WalletError};
use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use zeroize::ZeroizeOnDrop;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

pub const AES_128_KEY_LENGTH: usize = 16;
pub const AES_CTR_IV_LENGTH: usize = 16;

/// Secure key wrapper that automatically zeros memory on drop
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecureKey {
    key: Vec<u8>,
}

impl SecureKey {
    /// Create a new secure key
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    /// Get key bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Get key length
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Check if key is empty
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Split into (encryption key, MAC key) halves
    pub fn halves(&self) -> (&[u8], &[u8]) {
        self.key.split_at(self.key.len() / 2)
    }
}

impl std::fmt::Debug for SecureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureKey")
            .field("length", &self.key.len())
            .finish()
    }
}

/// AES-128 in big-endian counter mode, as used by version 4 keystores.
///
/// CTR is a stream cipher, so the same operation encrypts and decrypts.
pub struct Aes128CtrCipher {
    key: SecureKey,
}

impl Aes128CtrCipher {
    /// Create a new cipher with the given key
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::validate_key(key)?;
        Ok(Self {
            key: SecureKey::new(key.to_vec()),
        })
    }

    /// Apply the keystream derived from `iv` to `data`
    pub fn apply_keystream(&self, iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        if iv.len() != AES_CTR_IV_LENGTH {
            return Err(WalletError::Crypto(format!(
                "AES-128-CTR requires a {AES_CTR_IV_LENGTH}-byte IV, got {}",
                iv.len()
            )));
        }

        let mut cipher = Aes128Ctr::new_from_slices(self.key.as_bytes(), iv)
            .map_err(|e| WalletError::Crypto(format!("AES-128-CTR setup failed: {e}")))?;
        let mut buffer = data.to_vec();
        cipher.apply_keystream(&mut buffer);
        Ok(buffer)
    }

    pub fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.apply_keystream(iv, plaintext)
    }

    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.apply_keystream(iv, ciphertext)
    }

    /// Validate key length
    pub fn validate_key(key: &[u8]) -> Result<()> {
        if key.len() != AES_128_KEY_LENGTH {
            return Err(WalletError::Crypto(format!(
                "AES-128-CTR requires a {AES_128_KEY_LENGTH}-byte key, got {}",
                key.len()
            )));
        }
        Ok(())
    }

    /// Get cipher algorithm name as written in keystore files
    pub fn algorithm_name() -> &'static str {
        "aes-128-ctr"
    }
}
