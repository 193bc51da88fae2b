use crate::error::{Result, WalletError, ERROR_MSG_MAC_MISMATCH};
use crate::storage::encrypted::cipher::{Aes128CtrCipher, AES_CTR_IV_LENGTH};
use crate::storage::encrypted::kdf::{KdfParams, DEFAULT_SALT_LENGTH, SCRYPT_KDF_NAME};
use crate::storage::{check_key_file, read_key_file, KeySource};
use crate::utils::{
    check_secret_key, fill_random, from_json, hex_decode, hex_encode, hmac_sha256, hmac_sha256_verify,
    public_key_from_secret_key, seed_from_secret_key, to_json_pretty, HMAC_SHA256_LENGTH,
};
use crate::wallet::{Address, SecretKey, Seed, Wallet, SECRET_KEY_LENGTH};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;
use zeroize::Zeroize;

pub const KEYSTORE_VERSION: u32 = 4;
pub const KEYSTORE_FILE_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct CipherParamsJson {
    iv: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CryptoJson {
    ciphertext: String,
    cipherparams: CipherParamsJson,
    cipher: String,
    kdf: String,
    kdfparams: KdfParams,
    mac: String,
}

// On-disk layout of a version 4 keystore
#[derive(Debug, Serialize, Deserialize)]
struct KeystoreJson {
    version: u32,
    #[serde(default)]
    id: String,
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bech32: Option<String>,
    crypto: CryptoJson,
}

/// A password-protected secret key as stored in a keystore file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedKeyRecord {
    pub version: u32,
    pub id: String,
    pub kdf_params: KdfParams,
    pub iv: [u8; AES_CTR_IV_LENGTH],
    pub cipher_text: Vec<u8>,
    pub mac: [u8; HMAC_SHA256_LENGTH],
    /// Hex public key the file claims to hold
    pub declared_address: String,
    pub declared_bech32: Option<String>,
}

impl EncryptedKeyRecord {
    /// Parse and validate a keystore JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        let file: KeystoreJson = from_json(text)?;
        if file.version != KEYSTORE_VERSION {
            return Err(WalletError::Format(format!(
                "Unsupported keystore version {}, expected {KEYSTORE_VERSION}",
                file.version
            )));
        }
        let crypto = file.crypto;

        if crypto.kdf != SCRYPT_KDF_NAME {
            return Err(WalletError::Format(format!(
                "Unsupported key derivation function: {}",
                crypto.kdf
            )));
        }
        if crypto.cipher != Aes128CtrCipher::algorithm_name() {
            return Err(WalletError::Format(format!(
                "Unsupported cipher: {}",
                crypto.cipher
            )));
        }
        crypto.kdfparams.validate()?;

        let iv: [u8; AES_CTR_IV_LENGTH] = hex_decode(&crypto.cipherparams.iv)?
            .try_into()
            .map_err(|_| {
                WalletError::Format(format!("IV must be {AES_CTR_IV_LENGTH} bytes"))
            })?;
        let mac: [u8; HMAC_SHA256_LENGTH] = hex_decode(&crypto.mac)?
            .try_into()
            .map_err(|_| WalletError::Format(format!("MAC must be {HMAC_SHA256_LENGTH} bytes")))?;
        let cipher_text = hex_decode(&crypto.ciphertext)?;
        if cipher_text.is_empty() {
            return Err(WalletError::Format("Ciphertext is empty".to_string()));
        }

        Ok(EncryptedKeyRecord {
            version: file.version,
            id: file.id,
            kdf_params: crypto.kdfparams,
            iv,
            cipher_text,
            mac,
            declared_address: file.address,
            declared_bech32: file.bech32,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let file = KeystoreJson {
            version: self.version,
            id: self.id.clone(),
            address: self.declared_address.clone(),
            bech32: self.declared_bech32.clone(),
            crypto: CryptoJson {
                ciphertext: hex_encode(&self.cipher_text),
                cipherparams: CipherParamsJson {
                    iv: hex_encode(&self.iv),
                },
                cipher: Aes128CtrCipher::algorithm_name().to_string(),
                kdf: SCRYPT_KDF_NAME.to_string(),
                kdfparams: self.kdf_params.clone(),
                mac: hex_encode(&self.mac),
            },
        };
        to_json_pretty(&file)
    }

    /// Encrypt `secret_key` under `password` with a fresh salt, IV and id
    pub fn encrypt(secret_key: &SecretKey, password: &str) -> Result<Self> {
        let mut salt = vec![0u8; DEFAULT_SALT_LENGTH];
        fill_random(&mut salt)?;
        let mut iv = [0u8; AES_CTR_IV_LENGTH];
        fill_random(&mut iv)?;

        let mut record =
            Self::encrypt_with_params(secret_key, password, KdfParams::with_salt(salt), iv)?;
        record.id = Uuid::new_v4().to_string();
        Ok(record)
    }

    /// Deterministic encryption with caller-supplied KDF parameters and IV
    pub fn encrypt_with_params(
        secret_key: &SecretKey,
        password: &str,
        kdf_params: KdfParams,
        iv: [u8; AES_CTR_IV_LENGTH],
    ) -> Result<Self> {
        let derived_key = kdf_params.derive_key(password)?;
        let (encryption_key, mac_key) = derived_key.halves();

        let cipher = Aes128CtrCipher::new(encryption_key)?;
        let cipher_text = cipher.encrypt(&iv, secret_key.as_bytes())?;
        let mac = hmac_sha256(mac_key, &cipher_text);

        let address = Address::from_public_key(public_key_from_secret_key(secret_key));
        Ok(EncryptedKeyRecord {
            version: KEYSTORE_VERSION,
            id: String::new(),
            kdf_params,
            iv,
            cipher_text,
            mac,
            declared_address: address.to_hex(),
            declared_bech32: Some(address.bech32().to_string()),
        })
    }
}

/// Recover the secret key from `record`.
///
/// The MAC is checked before anything is decrypted; a mismatch means a wrong
/// password or a corrupted file and yields [`WalletError::Integrity`].
pub fn decrypt(password: &str, record: &EncryptedKeyRecord) -> Result<SecretKey> {
    let derived_key = record.kdf_params.derive_key(password)?;
    let (decryption_key, mac_key) = derived_key.halves();

    if !hmac_sha256_verify(mac_key, &record.cipher_text, &record.mac) {
        return Err(WalletError::Integrity(ERROR_MSG_MAC_MISMATCH.to_string()));
    }

    let cipher = Aes128CtrCipher::new(decryption_key)?;
    let mut plain = cipher.decrypt(&record.iv, &record.cipher_text)?;
    if plain.len() != SECRET_KEY_LENGTH {
        let actual = plain.len();
        plain.zeroize();
        return Err(WalletError::MalformedKey(format!(
            "decrypted key is {actual} bytes, expected {SECRET_KEY_LENGTH}"
        )));
    }

    let secret_key = SecretKey::from_slice(&plain);
    plain.zeroize();
    let secret_key = secret_key?;
    check_secret_key(&secret_key)?;
    Ok(secret_key)
}

/// Reads a password-protected keystore file
pub struct KeyFileReader {
    seed: Seed,
    address: Address,
}

impl KeyFileReader {
    pub fn new<P: AsRef<Path>>(path: P, password: &str) -> Result<Self> {
        let path = path.as_ref();
        check_key_file(path, KEYSTORE_FILE_EXTENSION)?;
        let content = read_key_file(path)?;

        let record = EncryptedKeyRecord::from_json(&content)?;
        debug!(
            "Decrypting keystore {} (version {})",
            path.display(),
            record.version
        );
        let secret_key = decrypt(password, &record)?;
        let seed = seed_from_secret_key(&secret_key);
        let address = Address::from_public_key(public_key_from_secret_key(&secret_key));

        check_declared_address(&record, &address)?;

        info!("Loaded keystore {} for {address}", path.display());
        Ok(KeyFileReader { seed, address })
    }
}

impl KeySource for KeyFileReader {
    fn seed(&self) -> &Seed {
        &self.seed
    }

    fn address(&self) -> &Address {
        &self.address
    }
}

fn check_declared_address(record: &EncryptedKeyRecord, derived: &Address) -> Result<()> {
    if !record.declared_address.eq_ignore_ascii_case(&derived.to_hex()) {
        return Err(WalletError::AddressMismatch {
            declared: record.declared_address.clone(),
            derived: derived.to_hex(),
        });
    }
    if let Some(bech32) = &record.declared_bech32 {
        if !bech32.eq_ignore_ascii_case(derived.bech32()) {
            return Err(WalletError::AddressMismatch {
                declared: bech32.clone(),
                derived: derived.bech32().to_string(),
            });
        }
    }
    Ok(())
}

/// Write `wallet`'s secret key to `path` as a keystore protected by `password`
pub fn write_keystore<P: AsRef<Path>>(
    path: P,
    wallet: &Wallet,
    password: &str,
) -> Result<EncryptedKeyRecord> {
    let path = path.as_ref();
    let record = EncryptedKeyRecord::encrypt(wallet.secret_key(), password)?;

    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .map_err(|e| WalletError::FileAccess(format!("{}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(record.to_json()?.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Wrote keystore {} for {}", path.display(), wallet.address());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::secret_key_from_seed;

    const PASSWORD: &str = "12345678Qq!";
    const SEED_HEX: &str = "413f42575f7f26fad3317a778771212fdb80245850981e48b58a4f25e344e8f9";

    fn fixture_secret_key() -> SecretKey {
        secret_key_from_seed(&Seed::from_slice(&hex_decode(SEED_HEX).unwrap()).unwrap())
    }

    fn cheap_params() -> KdfParams {
        KdfParams {
            n: 16,
            ..KdfParams::with_salt(vec![9u8; 32])
        }
    }

    #[test]
    fn test_encrypt_then_decrypt() {
        let sk = fixture_secret_key();
        let record =
            EncryptedKeyRecord::encrypt_with_params(&sk, PASSWORD, cheap_params(), [3u8; 16])
                .unwrap();
        assert_eq!(
            record.declared_bech32.as_deref(),
            Some("erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th")
        );
        assert_ne!(record.cipher_text.as_slice(), sk.as_bytes().as_slice());

        let decrypted = decrypt(PASSWORD, &record).unwrap();
        assert_eq!(decrypted, sk);
    }

    #[test]
    fn test_wrong_password_is_integrity_error() {
        let record = EncryptedKeyRecord::encrypt_with_params(
            &fixture_secret_key(),
            PASSWORD,
            cheap_params(),
            [3u8; 16],
        )
        .unwrap();
        let result = decrypt("wrong password", &record);
        assert!(matches!(result, Err(WalletError::Integrity(_))));
    }

    #[test]
    fn test_tampered_ciphertext_is_integrity_error() {
        let mut record = EncryptedKeyRecord::encrypt_with_params(
            &fixture_secret_key(),
            PASSWORD,
            cheap_params(),
            [3u8; 16],
        )
        .unwrap();
        record.cipher_text[0] ^= 0x01;
        assert!(matches!(
            decrypt(PASSWORD, &record),
            Err(WalletError::Integrity(_))
        ));
    }

    #[test]
    fn test_wrong_plaintext_length_is_malformed_key() {
        let params = cheap_params();
        let derived = params.derive_key(PASSWORD).unwrap();
        let (enc_key, mac_key) = derived.halves();
        let iv = [5u8; 16];
        let cipher_text = Aes128CtrCipher::new(enc_key)
            .unwrap()
            .encrypt(&iv, &[1u8; 32])
            .unwrap();
        let record = EncryptedKeyRecord {
            version: KEYSTORE_VERSION,
            id: String::new(),
            mac: hmac_sha256(mac_key, &cipher_text),
            kdf_params: params,
            iv,
            cipher_text,
            declared_address: String::new(),
            declared_bech32: None,
        };
        assert!(matches!(
            decrypt(PASSWORD, &record),
            Err(WalletError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let record = EncryptedKeyRecord::encrypt_with_params(
            &fixture_secret_key(),
            PASSWORD,
            cheap_params(),
            [3u8; 16],
        )
        .unwrap();
        let json = record.to_json().unwrap();
        assert!(json.contains("\"cipher\": \"aes-128-ctr\""));
        assert!(json.contains("\"kdf\": \"scrypt\""));
        assert_eq!(EncryptedKeyRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_from_json_rejects_unknown_kdf_and_short_iv() {
        let record = EncryptedKeyRecord::encrypt_with_params(
            &fixture_secret_key(),
            PASSWORD,
            cheap_params(),
            [3u8; 16],
        )
        .unwrap();
        let json = record.to_json().unwrap();

        let pbkdf2 = json.replace("\"kdf\": \"scrypt\"", "\"kdf\": \"pbkdf2\"");
        assert!(matches!(
            EncryptedKeyRecord::from_json(&pbkdf2),
            Err(WalletError::Format(_))
        ));

        let short_iv = json.replace(&hex_encode(&[3u8; 16]), "0303");
        assert!(matches!(
            EncryptedKeyRecord::from_json(&short_iv),
            Err(WalletError::Format(_))
        ));

        assert!(EncryptedKeyRecord::from_json("{\"version\": 4}").is_err());

        for version in ["1", "3"] {
            let old = json.replace("\"version\": 4", &format!("\"version\": {version}"));
            assert!(matches!(
                EncryptedKeyRecord::from_json(&old),
                Err(WalletError::Format(_))
            ));
        }
    }

    #[test]
    fn test_random_encryption_uses_fresh_salt_and_iv() {
        let sk = fixture_secret_key();
        let a = EncryptedKeyRecord::encrypt(&sk, PASSWORD).unwrap();
        let b = EncryptedKeyRecord::encrypt(&sk, PASSWORD).unwrap();
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.kdf_params.salt, b.kdf_params.salt);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_declared_address_mismatch() {
        let mut record = EncryptedKeyRecord::encrypt_with_params(
            &fixture_secret_key(),
            PASSWORD,
            cheap_params(),
            [3u8; 16],
        )
        .unwrap();
        record.declared_address =
            "8049d639e5a6980d1cd2392abcce41029cda74a1563523a202f09641cc2618f8".to_string();

        let sk = decrypt(PASSWORD, &record).unwrap();
        let derived = Address::from_public_key(public_key_from_secret_key(&sk));
        assert!(matches!(
            check_declared_address(&record, &derived),
            Err(WalletError::AddressMismatch { .. })
        ));
    }
}
