//! Key files on disk
//!
//! This module reads (and writes) the two key file formats: plaintext PEM
//! files and password-protected keystores. Both readers produce the same
//! seed and address through the [`KeySource`] trait.

pub mod encrypted;
pub mod pem;

pub use encrypted::{
    decrypt, write_keystore, Aes128CtrCipher, EncryptedKeyRecord, KdfParams, KeyFileReader,
    SecureKey, KEYSTORE_FILE_EXTENSION,
};
pub use pem::{to_pem, write_pem, PemFileReader, PEM_FILE_EXTENSION};

use crate::error::{
    Result, WalletError, ERROR_MSG_FILE_DOES_NOT_EXIST, ERROR_MSG_FILE_EMPTY,
    ERROR_MSG_FILE_EXTENSION_INVALID,
};
use crate::utils::{bytes_to_string, secret_key_from_seed};
use crate::wallet::{Address, SecretKey, Seed};
use std::fs;
use std::path::Path;
use zeroize::Zeroize;

/// Anything that can hand out an account seed and its address
pub trait KeySource {
    fn seed(&self) -> &Seed;

    fn address(&self) -> &Address;

    fn secret_key(&self) -> SecretKey {
        secret_key_from_seed(self.seed())
    }
}

/// Open a key file, picking the reader from the file extension
pub fn open_key_source<P: AsRef<Path>>(
    path: P,
    password: Option<&str>,
) -> Result<Box<dyn KeySource>> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(PEM_FILE_EXTENSION) => Ok(Box::new(PemFileReader::new(path)?)),
        Some(KEYSTORE_FILE_EXTENSION) => {
            let password = password.ok_or_else(|| {
                WalletError::Config(format!("A password is required for {}", path.display()))
            })?;
            Ok(Box::new(KeyFileReader::new(path, password)?))
        }
        _ => {
            if !path.exists() {
                return Err(WalletError::FileAccess(format!(
                    "{ERROR_MSG_FILE_DOES_NOT_EXIST}: {}",
                    path.display()
                )));
            }
            Err(WalletError::Format(format!(
                "{ERROR_MSG_FILE_EXTENSION_INVALID}: {}, expected .{PEM_FILE_EXTENSION} or .{KEYSTORE_FILE_EXTENSION}",
                path.display()
            )))
        }
    }
}

/// Existence first, then extension
pub(crate) fn check_key_file(path: &Path, extension: &str) -> Result<()> {
    if !path.is_file() {
        return Err(WalletError::FileAccess(format!(
            "{ERROR_MSG_FILE_DOES_NOT_EXIST}: {}",
            path.display()
        )));
    }
    if path.extension().and_then(|e| e.to_str()) != Some(extension) {
        return Err(WalletError::Format(format!(
            "{ERROR_MSG_FILE_EXTENSION_INVALID}: {}, expected .{extension}",
            path.display()
        )));
    }
    Ok(())
}

pub(crate) fn read_key_file(path: &Path) -> Result<String> {
    let mut bytes =
        fs::read(path).map_err(|e| WalletError::FileAccess(format!("{}: {e}", path.display())))?;
    let content = bytes_to_string(&bytes);
    bytes.zeroize();
    let content = content?;
    if content.trim().is_empty() {
        return Err(WalletError::Format(ERROR_MSG_FILE_EMPTY.to_string()));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_key_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.pem");
        assert!(matches!(
            check_key_file(&missing, "pem"),
            Err(WalletError::FileAccess(_))
        ));

        let wrong = dir.path().join("keys.pme");
        fs::write(&wrong, "x").unwrap();
        let err = check_key_file(&wrong, "pem").unwrap_err();
        assert!(matches!(err, WalletError::Format(ref m) if m.contains(ERROR_MSG_FILE_EXTENSION_INVALID)));
    }

    #[test]
    fn test_read_empty_file() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.pem");
        fs::write(&empty, "\n \n").unwrap();
        assert_eq!(
            read_key_file(&empty).unwrap_err(),
            WalletError::Format(ERROR_MSG_FILE_EMPTY.to_string())
        );
    }

    #[test]
    fn test_binary_key_files_are_format_errors() {
        let dir = tempdir().unwrap();
        let pem = dir.path().join("binary.pem");
        let keystore = dir.path().join("binary.json");
        fs::write(&pem, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        fs::write(&keystore, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(matches!(read_key_file(&pem), Err(WalletError::Format(_))));
        assert!(matches!(
            PemFileReader::new(&pem),
            Err(WalletError::Format(_))
        ));
        assert!(matches!(
            KeyFileReader::new(&keystore, "password"),
            Err(WalletError::Format(_))
        ));
    }

    #[test]
    fn test_open_key_source_requires_password_for_keystore() {
        let dir = tempdir().unwrap();
        let keystore = dir.path().join("keys.json");
        fs::write(&keystore, "{}").unwrap();
        assert!(matches!(
            open_key_source(&keystore, None),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn test_open_key_source_unknown_extension() {
        let dir = tempdir().unwrap();
        let other = dir.path().join("keys.txt");
        assert!(matches!(
            open_key_source(&other, None),
            Err(WalletError::FileAccess(_))
        ));
        fs::write(&other, "x").unwrap();
        assert!(matches!(
            open_key_source(&other, None),
            Err(WalletError::Format(_))
        ));
    }
}
