use crate::error::{Result, WalletError};
use crate::storage::encrypted::cipher::SecureKey;
use serde::{Deserialize, Serialize};

/// Derived key length: 16 bytes of AES-128 key followed by 16 bytes of MAC key
pub const DERIVED_KEY_LENGTH: usize = 32;
pub const SCRYPT_KDF_NAME: &str = "scrypt";

pub const DEFAULT_SCRYPT_N: u32 = 4096;
pub const DEFAULT_SCRYPT_R: u32 = 8;
pub const DEFAULT_SCRYPT_P: u32 = 1;
pub const DEFAULT_SALT_LENGTH: usize = 32;

/// Scrypt cost parameters as stored in a keystore file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    #[serde(with = "hex_bytes")]
    pub salt: Vec<u8>,
    pub n: u32,
    pub r: u32,
    pub p: u32,
    pub dklen: usize,
}

impl KdfParams {
    /// Default cost parameters with the given salt
    pub fn with_salt(salt: Vec<u8>) -> Self {
        Self {
            salt,
            n: DEFAULT_SCRYPT_N,
            r: DEFAULT_SCRYPT_R,
            p: DEFAULT_SCRYPT_P,
            dklen: DERIVED_KEY_LENGTH,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(WalletError::Format(format!(
                "scrypt n must be a power of two greater than 1, got {}",
                self.n
            )));
        }
        if self.r == 0 || self.p == 0 {
            return Err(WalletError::Format(
                "scrypt r and p must be positive".to_string(),
            ));
        }
        if self.dklen != DERIVED_KEY_LENGTH {
            return Err(WalletError::Format(format!(
                "scrypt dklen must be {DERIVED_KEY_LENGTH}, got {}",
                self.dklen
            )));
        }
        Ok(())
    }

    /// Run scrypt over `password` with these parameters
    pub fn derive_key(&self, password: &str) -> Result<SecureKey> {
        self.validate()?;

        let log_n = self.n.trailing_zeros() as u8;
        let params = scrypt::Params::new(log_n, self.r, self.p, self.dklen)
            .map_err(|e| WalletError::Format(format!("Invalid scrypt parameters: {e}")))?;

        let mut key = vec![0u8; self.dklen];
        scrypt::scrypt(password.as_bytes(), &self.salt, &params, &mut key)
            .map_err(|e| WalletError::Crypto(format!("Key derivation failed: {e}")))?;

        Ok(SecureKey::new(key))
    }
}

pub(crate) mod hex_bytes {
    use crate::utils::{hex_decode, hex_encode};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex_encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex_decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{hex_decode, hex_encode};

    #[test]
    fn test_rfc7914_vector() {
        // scrypt("password", "NaCl", N=1024, r=8, p=16), first 32 bytes
        let params = KdfParams {
            salt: b"NaCl".to_vec(),
            n: 1024,
            r: 8,
            p: 16,
            dklen: 32,
        };
        let key = params.derive_key("password").unwrap();
        assert_eq!(
            hex_encode(key.as_bytes()),
            "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162"
        );
    }

    #[test]
    fn test_defaults() {
        let params = KdfParams::with_salt(vec![1u8; DEFAULT_SALT_LENGTH]);
        assert_eq!(params.n, 4096);
        assert_eq!(params.r, 8);
        assert_eq!(params.p, 1);
        assert_eq!(params.dklen, 32);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_params() {
        let base = KdfParams::with_salt(vec![0u8; 8]);

        let not_power_of_two = KdfParams {
            n: 1000,
            ..base.clone()
        };
        assert!(matches!(
            not_power_of_two.derive_key("pw"),
            Err(WalletError::Format(_))
        ));

        let zero_r = KdfParams { r: 0, ..base.clone() };
        assert!(zero_r.validate().is_err());

        let short_dklen = KdfParams { dklen: 16, ..base };
        assert!(short_dklen.validate().is_err());
    }

    #[test]
    fn test_serde_uses_hex_salt() {
        let params = KdfParams::with_salt(hex_decode("00ff").unwrap());
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"salt":"00ff","n":4096,"r":8,"p":1,"dklen":32}"#);
        let back: KdfParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
